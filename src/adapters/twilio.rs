use crate::domain::ports::MessageSender;
use crate::utils::error::{Result, SantaError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.twilio.com";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: String,
}

#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    code: Option<i64>,
    message: Option<String>,
}

/// SMS over the Twilio Programmable Messaging REST API.
pub struct TwilioSender {
    client: Client,
    api_base: String,
    account_sid: String,
    auth_token: String,
}

impl TwilioSender {
    pub fn with_options(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        api_base: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
        })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_base, self.account_sid
        )
    }
}

#[async_trait]
impl MessageSender for TwilioSender {
    async fn send(&self, from: &str, to: &str, body: &str) -> Result<String> {
        let url = self.messages_url();
        tracing::debug!("POST {} (to {})", url, to);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", to), ("From", from), ("Body", body)])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Twilio response status: {}", status);

        if status.is_success() {
            let resource: MessageResource = response.json().await?;
            return Ok(resource.sid);
        }

        // Twilio 錯誤回應格式: {"code": 21211, "message": "...", "status": 400}
        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<TwilioErrorBody>(&text) {
            Ok(TwilioErrorBody {
                code: Some(code),
                message: Some(message),
            }) => format!("{} (code {})", message, code),
            Ok(TwilioErrorBody {
                message: Some(message),
                ..
            }) => message,
            _ => format!("HTTP {}", status),
        };

        Err(SantaError::DispatchError {
            to: to.to_string(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn sender(server: &MockServer) -> TwilioSender {
        TwilioSender::with_options("AC123", "secret", server.base_url(), Duration::from_secs(5))
            .unwrap()
    }

    #[tokio::test]
    async fn test_send_posts_form_with_basic_auth() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/2010-04-01/Accounts/AC123/Messages.json")
                // base64("AC123:secret")
                .header("authorization", "Basic QUMxMjM6c2VjcmV0")
                .x_www_form_urlencoded_tuple("To", "+33600000001")
                .x_www_form_urlencoded_tuple("From", "+33700000000")
                .x_www_form_urlencoded_tuple("Body", "Ho ho ho");
            then.status(201)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"sid": "SM42", "status": "queued"}));
        });

        let message_id = sender(&server)
            .send("+33700000000", "+33600000001", "Ho ho ho")
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(message_id, "SM42");
    }

    #[tokio::test]
    async fn test_send_maps_twilio_error_body() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST);
            then.status(400)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "code": 21211,
                    "message": "The 'To' number is not a valid phone number.",
                    "status": 400
                }));
        });

        let err = sender(&server)
            .send("+33700000000", "not-a-number", "hi")
            .await
            .unwrap_err();

        api_mock.assert();
        match err {
            SantaError::DispatchError { to, message } => {
                assert_eq!(to, "not-a-number");
                assert!(message.contains("21211"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_send_without_error_body_reports_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(503);
        });

        let err = sender(&server)
            .send("+33700000000", "+33600000001", "hi")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let sender =
            TwilioSender::with_options("AC1", "t", "http://localhost:9/", Duration::from_secs(1))
                .unwrap();
        assert_eq!(
            sender.messages_url(),
            "http://localhost:9/2010-04-01/Accounts/AC1/Messages.json"
        );
    }
}
