use crate::domain::model::{Assignment, Roster};
use crate::domain::ports::MessageSender;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeliveryStatus {
    Sent { message_id: String },
    DryRun,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    pub giver: String,
    pub to: Option<String>,
    pub body: String,
    pub status: DeliveryStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NotificationReport {
    pub deliveries: Vec<Delivery>,
}

impl NotificationReport {
    pub fn sent(&self) -> usize {
        self.count(|s| matches!(s, DeliveryStatus::Sent { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, DeliveryStatus::Failed { .. }))
    }

    pub fn dry_runs(&self) -> usize {
        self.count(|s| matches!(s, DeliveryStatus::DryRun))
    }

    fn count(&self, predicate: impl Fn(&DeliveryStatus) -> bool) -> usize {
        self.deliveries
            .iter()
            .filter(|d| predicate(&d.status))
            .count()
    }
}

/// Tells every giver who they drew. Failures are recorded per giver and never stop the loop.
pub struct Notifier<S: MessageSender> {
    sender: S,
    from: String,
    dry_run: bool,
}

impl<S: MessageSender> Notifier<S> {
    pub fn new(sender: S, from: impl Into<String>, dry_run: bool) -> Self {
        Self {
            sender,
            from: from.into(),
            dry_run,
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub async fn notify<F>(
        &self,
        assignment: &Assignment,
        roster: &Roster,
        template: F,
    ) -> NotificationReport
    where
        F: Fn(&str, &str) -> String,
    {
        let mut report = NotificationReport::default();

        for pair in assignment.iter() {
            let body = template(&pair.giver, &pair.receiver);

            let Some(contact) = roster.contact_of(&pair.giver) else {
                tracing::error!("❌ No contact address for {}, skipping", pair.giver);
                report.deliveries.push(Delivery {
                    giver: pair.giver.clone(),
                    to: None,
                    body,
                    status: DeliveryStatus::Failed {
                        reason: "no contact address".to_string(),
                    },
                });
                continue;
            };

            let status = if self.dry_run {
                tracing::info!("Dry run: {}", body);
                DeliveryStatus::DryRun
            } else {
                match self.sender.send(&self.from, contact, &body).await {
                    Ok(message_id) => {
                        tracing::info!("📨 Message sent to {} at {}.", pair.giver, contact);
                        tracing::debug!("Message id: {}", message_id);
                        DeliveryStatus::Sent { message_id }
                    }
                    Err(e) => {
                        tracing::error!(
                            "❌ Failed to send message to {} at {}: {}",
                            pair.giver,
                            contact,
                            e
                        );
                        DeliveryStatus::Failed {
                            reason: e.to_string(),
                        }
                    }
                }
            };

            report.deliveries.push(Delivery {
                giver: pair.giver.clone(),
                to: Some(contact.to_string()),
                body,
                status,
            });
        }

        report
    }
}
