use crate::core::notifier::{NotificationReport, Notifier};
use crate::core::retry::RetryDriver;
use crate::core::template::MessageTemplate;
use crate::domain::model::{Assignment, ExclusionRelation, Roster};
use crate::domain::ports::{ConfigProvider, MessageSender};
use crate::utils::error::Result;
use rand::Rng;

#[derive(Debug, Clone)]
pub struct RunReport {
    pub attempts: u32,
    pub assignment: Assignment,
    pub notifications: NotificationReport,
}

pub struct SantaEngine<S: MessageSender> {
    roster: Roster,
    exclusions: ExclusionRelation,
    driver: RetryDriver,
    notifier: Notifier<S>,
    template: MessageTemplate,
}

impl<S: MessageSender> SantaEngine<S> {
    pub fn new<C: ConfigProvider>(config: &C, sender: S) -> Result<Self> {
        let template = match config.message_template() {
            Some(text) => MessageTemplate::new(text)?,
            None => MessageTemplate::default(),
        };

        Ok(Self {
            roster: config.roster()?,
            exclusions: config.exclusions(),
            driver: RetryDriver::new(config.max_attempts()),
            notifier: Notifier::new(sender, config.sender_address(), config.dry_run()),
            template,
        })
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn exclusions(&self) -> &ExclusionRelation {
        &self.exclusions
    }

    /// Draws an assignment and notifies every giver.
    ///
    /// Returns `ExhaustedRetries` when no attempt succeeded; nothing is sent in
    /// that case. Individual dispatch failures are only visible in the report.
    pub async fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<RunReport> {
        tracing::info!(
            "🎅 Drawing names for {} participants (max {} attempts)",
            self.roster.len(),
            self.driver.max_attempts()
        );

        let outcome = self.driver.run(&self.roster, &self.exclusions, rng);
        let (assignment, attempts) = match outcome.into_result() {
            Ok(found) => found,
            Err(e) => {
                tracing::error!(
                    "❌ Failed to assign Secret Santa pairs after {} attempts",
                    self.driver.max_attempts()
                );
                return Err(e);
            }
        };

        if self.notifier.is_dry_run() {
            tracing::info!("🔍 DRY RUN MODE - messages will be logged, not sent");
        }

        let notifications = self
            .notifier
            .notify(&assignment, &self.roster, |giver, receiver| {
                self.template.render(giver, receiver)
            })
            .await;

        if notifications.failed() > 0 {
            tracing::warn!(
                "⚠️ {} of {} messages could not be sent",
                notifications.failed(),
                notifications.deliveries.len()
            );
        }
        tracing::info!(
            "✅ Secret Santa assignments completed on attempt {}",
            attempts
        );

        Ok(RunReport {
            attempts,
            assignment,
            notifications,
        })
    }
}
