use crate::adapters::twilio::{TwilioSender, DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECONDS};
use crate::core::template::MessageTemplate;
use crate::core::ConfigProvider;
use crate::domain::model::{ExclusionRelation, Roster};
use crate::utils::error::{Result, SantaError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::num::NonZeroU32;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SantaConfig {
    #[serde(default, alias = "maxAttempts")]
    pub max_attempts: Option<u32>,
    #[serde(default, alias = "dryRun")]
    pub dry_run: Option<bool>,
    pub participants: BTreeMap<String, String>,
    #[serde(default, alias = "relationship")]
    pub exclusions: BTreeMap<String, Vec<String>>,
    pub twilio: Option<TwilioConfig>,
    pub message: Option<MessageConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwilioConfig {
    pub sid: Option<String>,
    pub token: Option<String>,
    pub from: Option<String>,
    pub api_base: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageConfig {
    pub template: Option<String>,
}

impl SantaConfig {
    /// 從檔案載入配置，`.json` 以 JSON 解析，其餘視為 TOML
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SantaError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(serde_json::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${TWILIO_TOKEN})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SantaError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        let twilio = validation::validate_required_field("twilio", &self.twilio)?;
        for (field, value) in [
            ("twilio.sid", &twilio.sid),
            ("twilio.token", &twilio.token),
            ("twilio.from", &twilio.from),
        ] {
            let value = validation::validate_required_field(field, value)?;
            validation::validate_non_empty_string(field, value)?;
        }
        if let Some(api_base) = &twilio.api_base {
            validation::validate_url("twilio.api_base", api_base)?;
        }
        if let Some(timeout) = twilio.timeout_seconds {
            if timeout == 0 {
                return Err(SantaError::InvalidConfigValueError {
                    field: "twilio.timeout_seconds".to_string(),
                    value: timeout.to_string(),
                    reason: "Value must be at least 1".to_string(),
                });
            }
        }

        if let Some(max_attempts) = self.max_attempts {
            validation::validate_positive_number("max_attempts", max_attempts, 1)?;
        }

        let roster = self.roster()?;
        for (giver, excluded) in &self.exclusions {
            if !roster.contains(giver) {
                return Err(SantaError::InvalidConfigValueError {
                    field: "exclusions".to_string(),
                    value: giver.clone(),
                    reason: "not a participant".to_string(),
                });
            }
            if let Some(unknown) = excluded.iter().find(|name| !roster.contains(name)) {
                return Err(SantaError::InvalidConfigValueError {
                    field: format!("exclusions.{}", giver),
                    value: unknown.clone(),
                    reason: "not a participant".to_string(),
                });
            }
        }

        if let Some(template) = self.message_template() {
            MessageTemplate::new(template)?;
        }

        Ok(())
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run.unwrap_or(false)
    }

    pub fn api_base(&self) -> &str {
        self.twilio
            .as_ref()
            .and_then(|t| t.api_base.as_deref())
            .unwrap_or(DEFAULT_API_BASE)
    }

    pub fn twilio_sender(&self) -> Result<TwilioSender> {
        let twilio = validation::validate_required_field("twilio", &self.twilio)?;
        let sid = validation::validate_required_field("twilio.sid", &twilio.sid)?;
        let token = validation::validate_required_field("twilio.token", &twilio.token)?;
        let timeout = twilio.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS);

        TwilioSender::with_options(
            sid.as_str(),
            token.as_str(),
            self.api_base(),
            Duration::from_secs(timeout),
        )
    }
}

impl ConfigProvider for SantaConfig {
    fn roster(&self) -> Result<Roster> {
        Roster::from_contacts(&self.participants)
    }

    fn exclusions(&self) -> ExclusionRelation {
        self.exclusions
            .iter()
            .map(|(giver, excluded)| (giver.as_str(), excluded.iter().map(String::as_str)))
            .collect()
    }

    fn max_attempts(&self) -> NonZeroU32 {
        NonZeroU32::new(self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS))
            .unwrap_or(NonZeroU32::MIN)
    }

    fn dry_run(&self) -> bool {
        self.is_dry_run()
    }

    fn sender_address(&self) -> &str {
        self.twilio
            .as_ref()
            .and_then(|t| t.from.as_deref())
            .unwrap_or_default()
    }

    fn message_template(&self) -> Option<&str> {
        self.message.as_ref().and_then(|m| m.template.as_deref())
    }
}

impl Validate for SantaConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
