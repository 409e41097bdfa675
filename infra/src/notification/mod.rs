//! Notification Module
//!
//! Email delivery for verification codes. Two backends are provided:
//!
//! - **Mock**: logs messages instead of sending them (development and tests)
//! - **Http**: JSON POST to a mail relay with bearer authentication and retries
//!
//! `EmailServiceAdapter` bridges either backend to the core
//! `NotificationServiceTrait`.

pub mod adapter;
pub mod email_service;
pub mod http_email;
pub mod mock_email;

pub use adapter::EmailServiceAdapter;
pub use email_service::EmailService;
pub use http_email::HttpEmailService;
pub use mock_email::MockEmailService;

#[cfg(test)]
mod tests;

use ac_shared::config::{EmailConfig, EmailProvider};

use crate::InfrastructureError;

/// Create an email service based on configuration
///
/// # Returns
///
/// A boxed email service, or a configuration error when the HTTP provider
/// is selected without an endpoint or API key
pub fn create_email_service(
    config: &EmailConfig,
) -> Result<Box<dyn EmailService>, InfrastructureError> {
    match config.provider {
        EmailProvider::Mock => {
            tracing::info!("Using mock email service");
            Ok(Box::new(MockEmailService::new()))
        }
        EmailProvider::Http => Ok(Box::new(HttpEmailService::new(config.clone())?)),
    }
}
