use crate::utils::error::{Result, SantaError};

pub const GIVER_PLACEHOLDER: &str = "{giver}";
pub const RECEIVER_PLACEHOLDER: &str = "{receiver}";

pub const DEFAULT_TEMPLATE: &str = "Ho ho ho, {giver} ! 🎅 Vous allez faire briller les yeux de {receiver} en lui offrant un cadeau pour le Secret Santa ! 🎁 Joyeux Noël !";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    text: String,
}

impl MessageTemplate {
    /// A template that never names the receiver would leak nothing useful, so it is rejected.
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if !text.contains(RECEIVER_PLACEHOLDER) {
            return Err(SantaError::InvalidConfigValueError {
                field: "message.template".to_string(),
                value: text,
                reason: format!("template must contain {}", RECEIVER_PLACEHOLDER),
            });
        }
        Ok(Self { text })
    }

    pub fn render(&self, giver: &str, receiver: &str) -> String {
        self.text
            .replace(GIVER_PLACEHOLDER, giver)
            .replace(RECEIVER_PLACEHOLDER, receiver)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEMPLATE.to_string(),
        }
    }
}
