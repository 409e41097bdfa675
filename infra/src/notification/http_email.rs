//! HTTP mail relay implementation
//!
//! Messages are POSTed as JSON `{from, to, subject, text}` with a bearer API
//! key. Server errors, rate limiting and transport failures are retried with
//! exponential backoff; other client errors fail immediately.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use ac_shared::config::EmailConfig;
use ac_shared::utils::email::mask_email;

use super::email_service::EmailService;
use crate::InfrastructureError;

#[derive(Debug, Serialize)]
struct OutboundEmail<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct RelayResponse {
    id: Option<String>,
}

/// Outcome of a single delivery attempt
#[derive(Debug)]
enum Attempt {
    Sent(String),
    Retry(String),
    Fatal(String),
}

/// Whether a relay response status is worth retrying
pub fn is_retryable_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

/// HTTP mail relay email service
pub struct HttpEmailService {
    client: reqwest::Client,
    config: EmailConfig,
}

impl HttpEmailService {
    /// Create a new HTTP email service
    pub fn new(config: EmailConfig) -> Result<Self, InfrastructureError> {
        if config.api_url.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "EMAIL_API_URL must be set for the http email provider".to_string(),
            ));
        }
        if config.api_key.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "EMAIL_API_KEY must be set for the http email provider".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            api_url = %config.api_url,
            from = %mask_email(&config.from_address),
            "HTTP email service initialized"
        );

        Ok(Self { client, config })
    }

    async fn attempt(&self, payload: &OutboundEmail<'_>) -> Attempt {
        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(payload)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => return Attempt::Retry(format!("transport error: {}", e)),
        };

        let status = response.status();
        if status.is_success() {
            // A missing or unparsable body still counts as delivered
            let id = response
                .json::<RelayResponse>()
                .await
                .ok()
                .and_then(|r| r.id)
                .unwrap_or_else(|| format!("http_{}", uuid::Uuid::new_v4()));
            return Attempt::Sent(id);
        }

        let detail = format!("relay responded with {}", status);
        if is_retryable_status(status) {
            Attempt::Retry(detail)
        } else {
            Attempt::Fatal(detail)
        }
    }

    /// Send with retry logic
    async fn send_with_retry(
        &self,
        payload: &OutboundEmail<'_>,
    ) -> Result<String, InfrastructureError> {
        let max_attempts = self.config.max_retries.max(1);
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;
            debug!(
                attempt = attempts,
                max_attempts,
                recipient = %mask_email(payload.to),
                "Sending email"
            );

            match self.attempt(payload).await {
                Attempt::Sent(message_id) => {
                    info!(
                        recipient = %mask_email(payload.to),
                        message_id = %message_id,
                        "Email sent"
                    );
                    return Ok(message_id);
                }
                Attempt::Fatal(detail) => {
                    error!(recipient = %mask_email(payload.to), %detail, "Email rejected");
                    return Err(InfrastructureError::Email(format!(
                        "Invalid request: {}",
                        detail
                    )));
                }
                Attempt::Retry(detail) => {
                    if attempts >= max_attempts {
                        error!(attempts, %detail, "Email delivery failed");
                        return Err(InfrastructureError::Email(format!(
                            "Failed to send email after {} attempts: {}",
                            attempts, detail
                        )));
                    }

                    warn!(attempt = attempts, %detail, ?delay, "Retrying email delivery");
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }
}

#[async_trait]
impl EmailService for HttpEmailService {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError> {
        let payload = OutboundEmail {
            from: &self.config.from_address,
            to,
            subject,
            text: body,
        };

        self.send_with_retry(&payload).await
    }

    fn provider_name(&self) -> &str {
        "Http"
    }
}
