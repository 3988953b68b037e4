use thiserror::Error;

#[derive(Error, Debug)]
pub enum SantaError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Message dispatch to {to} failed: {message}")]
    DispatchError { to: String, message: String },

    #[error("No valid assignment found after {attempts} attempts")]
    ExhaustedRetries { attempts: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Assignment,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SantaError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SantaError::ConfigError { .. }
            | SantaError::MissingConfigError { .. }
            | SantaError::InvalidConfigValueError { .. }
            | SantaError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            SantaError::ApiError(_) | SantaError::DispatchError { .. } => ErrorCategory::Network,
            SantaError::ExhaustedRetries { .. } => ErrorCategory::Assignment,
            SantaError::IoError(_) | SantaError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 單一訊息失敗不影響配對結果
            SantaError::ApiError(_) | SantaError::DispatchError { .. } => ErrorSeverity::Low,
            SantaError::ExhaustedRetries { .. } => ErrorSeverity::Medium,
            SantaError::ConfigError { .. }
            | SantaError::MissingConfigError { .. }
            | SantaError::InvalidConfigValueError { .. }
            | SantaError::ConfigValidationError { .. } => ErrorSeverity::High,
            SantaError::IoError(_) | SantaError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SantaError::ApiError(_) => {
                "Check network connectivity and the Twilio API endpoint".to_string()
            }
            SantaError::IoError(_) => "Check that the file exists and is readable".to_string(),
            SantaError::SerializationError(_) => {
                "Check that the configuration file is valid JSON".to_string()
            }
            SantaError::ConfigError { .. } | SantaError::ConfigValidationError { .. } => {
                "Review the configuration file syntax and values".to_string()
            }
            SantaError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration file", field)
            }
            SantaError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the configuration file", field)
            }
            SantaError::DispatchError { to, .. } => {
                format!("Verify the phone number {} and the Twilio account balance", to)
            }
            SantaError::ExhaustedRetries { .. } => {
                "Relax the exclusion rules or raise max_attempts".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Network => format!("Could not deliver a message: {}", self),
            ErrorCategory::Assignment => format!("Could not draw names: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SantaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = SantaError::MissingConfigError {
            field: "twilio.sid".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("twilio.sid"));
    }

    #[test]
    fn test_exhausted_retries_is_medium_severity() {
        let err = SantaError::ExhaustedRetries { attempts: 5 };
        assert_eq!(err.category(), ErrorCategory::Assignment);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.to_string(), "No valid assignment found after 5 attempts");
    }

    #[test]
    fn test_dispatch_error_is_low_severity() {
        let err = SantaError::DispatchError {
            to: "+33600000001".to_string(),
            message: "queue overflow".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(err.user_friendly_message().starts_with("Could not deliver"));
    }
}
