pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliArgs;
pub use config::SantaConfig;

pub use adapters::TwilioSender;
pub use crate::core::{
    notifier::{DeliveryStatus, NotificationReport, Notifier},
    retry::{RetryDriver, RetryOutcome},
    santa::{RunReport, SantaEngine},
    template::MessageTemplate,
};
pub use domain::model::{Assignment, ExclusionRelation, Participant, Roster};
pub use domain::ports::{ConfigProvider, MessageSender};
pub use utils::error::{Result, SantaError};
