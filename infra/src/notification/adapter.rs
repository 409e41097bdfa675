//! Bridges an infrastructure `EmailService` to the core notification trait

use async_trait::async_trait;

use ac_core::services::verification::NotificationServiceTrait;

use super::email_service::EmailService;

/// Adapter that implements the core NotificationServiceTrait over email
pub struct EmailServiceAdapter {
    inner: Box<dyn EmailService>,
    subject: String,
}

impl EmailServiceAdapter {
    /// Wrap `inner`, sending every notification with `subject`
    pub fn new(inner: Box<dyn EmailService>, subject: impl Into<String>) -> Self {
        Self {
            inner,
            subject: subject.into(),
        }
    }

    /// Name of the wrapped provider
    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl NotificationServiceTrait for EmailServiceAdapter {
    async fn send(&self, recipient: &str, body: &str) -> Result<String, String> {
        self.inner
            .send_email(recipient, &self.subject, body)
            .await
            .map_err(|e| e.to_string())
    }
}
