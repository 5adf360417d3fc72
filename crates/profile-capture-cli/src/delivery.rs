//! Webhook delivery of extracted records.

use crate::config::Config;
use profile_capture::ProfileRecord;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Records sent to this list are processed but never delivered.
pub const TEST_LIST: &str = "Test";

pub const TEST_MODE_MESSAGE: &str =
    "Test mode: Profile data processed successfully without sending to Zapier";
pub const DELIVERED_MESSAGE: &str = "Profile data successfully sent to Zapier webhook";

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Zapier webhook URL is not configured")]
    NotConfigured,
    #[error("Failed to send data to Zapier webhook (HTTP {status})")]
    HttpStatus { status: u16, body: String },
    #[error("Network error when sending data to Zapier webhook: {0}")]
    Network(#[source] reqwest::Error),
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("failed to encode profile record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// What happened to a record handed to [`WebhookDelivery::deliver`].
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryOutcome {
    /// Test list: nothing was sent.
    Skipped,
    /// The webhook accepted the record.
    Delivered {
        status: u16,
        /// Response body, parsed as JSON when possible.
        response: Value,
    },
}

impl DeliveryOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Skipped => TEST_MODE_MESSAGE,
            Self::Delivered { .. } => DELIVERED_MESSAGE,
        }
    }
}

/// Posts records to the configured webhook. One attempt per record.
pub struct WebhookDelivery {
    client: Client,
    url: Option<String>,
}

impl WebhookDelivery {
    pub fn new(url: Option<String>, timeout: Duration) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DeliveryError::Client)?;
        Ok(Self { client, url })
    }

    pub fn from_config(config: &Config) -> Result<Self, DeliveryError> {
        Self::new(
            config.webhook_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Send the record as a JSON body in a single POST.
    pub async fn deliver(&self, record: &ProfileRecord) -> Result<DeliveryOutcome, DeliveryError> {
        if record.list == TEST_LIST {
            info!(name = %record.person_name, "test list selected, skipping webhook");
            return Ok(DeliveryOutcome::Skipped);
        }
        let url = self.url.as_deref().ok_or(DeliveryError::NotConfigured)?;

        let body = serde_json::to_string(record)?;
        debug!(bytes = body.len(), "posting profile record");
        let response = self
            .client
            .post(url)
            .body(body)
            .send()
            .await
            .map_err(DeliveryError::Network)?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            warn!(status = status.as_u16(), body = %text, "webhook rejected profile record");
            return Err(DeliveryError::HttpStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        let response = serde_json::from_str(&text).unwrap_or(Value::String(text));
        info!(status = status.as_u16(), %response, "profile record delivered");
        Ok(DeliveryOutcome::Delivered {
            status: status.as_u16(),
            response,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn record(list: &str) -> ProfileRecord {
        ProfileRecord {
            list: list.to_string(),
            rating: 4,
            person_name: "Margaret Hamilton".to_string(),
            linkedin_url: "https://www.linkedin.com/in/mhamilton".to_string(),
            ..ProfileRecord::default()
        }
    }

    fn delivery(url: Option<String>) -> WebhookDelivery {
        WebhookDelivery::new(url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_deliver_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hooks/catch/1/abc"))
            .and(body_partial_json(json!({
                "list": "Prospects",
                "rating": 4,
                "personName": "Margaret Hamilton",
                "linkedinUrl": "https://www.linkedin.com/in/mhamilton"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = delivery(Some(format!("{}/hooks/catch/1/abc", server.uri())))
            .deliver(&record("Prospects"))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            DeliveryOutcome::Delivered {
                status: 200,
                response: json!({"status": "success"})
            }
        );
        assert_eq!(outcome.message(), DELIVERED_MESSAGE);
    }

    #[tokio::test]
    async fn test_non_json_response_is_kept_as_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_string("ok"))
            .mount(&server)
            .await;

        let outcome = delivery(Some(server.uri()))
            .deliver(&record("Prospects"))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            DeliveryOutcome::Delivered {
                status: 201,
                response: Value::String("ok".to_string())
            }
        );
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Error"))
            .expect(1)
            .mount(&server)
            .await;

        let err = delivery(Some(server.uri()))
            .deliver(&record("Prospects"))
            .await
            .unwrap_err();
        assert!(matches!(err, DeliveryError::HttpStatus { status: 500, .. }));
        assert_eq!(
            err.to_string(),
            "Failed to send data to Zapier webhook (HTTP 500)"
        );
    }

    #[tokio::test]
    async fn test_test_list_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let outcome = delivery(Some(server.uri()))
            .deliver(&record(TEST_LIST))
            .await
            .unwrap();
        assert_eq!(outcome, DeliveryOutcome::Skipped);
        assert_eq!(outcome.message(), TEST_MODE_MESSAGE);
    }

    #[tokio::test]
    async fn test_missing_url() {
        let err = delivery(None)
            .deliver(&record("Prospects"))
            .await
            .unwrap_err();
        assert!(matches!(err, DeliveryError::NotConfigured));
        assert_eq!(err.to_string(), "Zapier webhook URL is not configured");
    }

    #[tokio::test]
    async fn test_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = delivery(Some(format!("http://{addr}/hooks/catch/1/abc")))
            .deliver(&record("Prospects"))
            .await
            .unwrap_err();
        assert!(matches!(err, DeliveryError::Network(_)));
        assert!(err
            .to_string()
            .starts_with("Network error when sending data to Zapier webhook: "));
    }
}
