pub mod assigner;
pub mod notifier;
pub mod retry;
pub mod santa;
pub mod template;

pub use crate::domain::model::{Assignment, ExclusionRelation, Participant, Roster};
pub use crate::domain::ports::{ConfigProvider, MessageSender};
pub use crate::utils::error::Result;
