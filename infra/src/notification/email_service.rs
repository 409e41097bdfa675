//! Email service trait

use async_trait::async_trait;

use crate::InfrastructureError;

/// Outbound email provider
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send a plain-text email
    ///
    /// # Returns
    /// * `Ok(String)` - Provider message ID
    /// * `Err(InfrastructureError)` - Delivery failed
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;

    /// Whether the provider is believed to be reachable
    async fn is_available(&self) -> bool {
        true
    }
}
