use crate::domain::model::{ExclusionRelation, Roster};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::num::NonZeroU32;

pub trait ConfigProvider: Send + Sync {
    fn roster(&self) -> Result<Roster>;
    fn exclusions(&self) -> ExclusionRelation;
    fn max_attempts(&self) -> NonZeroU32;
    fn dry_run(&self) -> bool;
    fn sender_address(&self) -> &str;
    fn message_template(&self) -> Option<&str>;
}

/// Outbound messaging channel. Returns the provider's message id.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, from: &str, to: &str, body: &str) -> Result<String>;
}
