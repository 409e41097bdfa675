//! Trait for outbound notification delivery

use async_trait::async_trait;

/// Out-of-band channel used to deliver codes to users
#[async_trait]
pub trait NotificationServiceTrait: Send + Sync {
    /// Deliver `body` to `recipient`, returning a provider message ID
    async fn send(&self, recipient: &str, body: &str) -> Result<String, String>;
}
