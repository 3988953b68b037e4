use crate::utils::error::{Result, SantaError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SantaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SantaError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SantaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: u32, min_value: u32) -> Result<()> {
    if value < min_value {
        return Err(SantaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| SantaError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SantaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("twilio.api_base", "https://api.twilio.com").is_ok());
        assert!(validate_url("twilio.api_base", "http://127.0.0.1:8080").is_ok());
        assert!(validate_url("twilio.api_base", "").is_err());
        assert!(validate_url("twilio.api_base", "invalid-url").is_err());
        assert!(validate_url("twilio.api_base", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("max_attempts", 5, 1).is_ok());
        assert!(validate_positive_number("max_attempts", 0, 1).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("AC123".to_string());
        let missing: Option<String> = None;
        assert_eq!(validate_required_field("twilio.sid", &present).unwrap(), "AC123");
        assert!(matches!(
            validate_required_field("twilio.sid", &missing),
            Err(SantaError::MissingConfigError { field }) if field == "twilio.sid"
        ));
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("twilio.from", "+33700000000").is_ok());
        assert!(validate_non_empty_string("twilio.from", "   ").is_err());
    }
}
