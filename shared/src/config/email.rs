//! Outbound email configuration

use serde::{Deserialize, Serialize};

/// Which email backend delivers verification codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Logs messages instead of sending them
    #[default]
    Mock,
    /// HTTP mail relay (JSON POST with bearer API key)
    Http,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(EmailProvider::Mock),
            "http" => Ok(EmailProvider::Http),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

/// Email delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Delivery backend
    pub provider: EmailProvider,

    /// Mail relay endpoint (HTTP provider only)
    #[serde(default)]
    pub api_url: String,

    /// Mail relay API key (HTTP provider only)
    #[serde(default)]
    pub api_key: String,

    /// Sender address
    pub from_address: String,

    /// Subject line for verification code emails
    pub subject: String,

    /// Maximum delivery attempts per message
    pub max_retries: u32,

    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::default(),
            api_url: String::new(),
            api_key: String::new(),
            from_address: String::from("no-reply@authcode.local"),
            subject: String::from("Your verification code"),
            max_retries: 3,
            retry_delay_ms: 500,
            request_timeout_secs: 10,
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("EMAIL_PROVIDER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.provider),
            api_url: std::env::var("EMAIL_API_URL").unwrap_or(defaults.api_url),
            api_key: std::env::var("EMAIL_API_KEY").unwrap_or(defaults.api_key),
            from_address: std::env::var("EMAIL_FROM").unwrap_or(defaults.from_address),
            subject: std::env::var("EMAIL_SUBJECT").unwrap_or(defaults.subject),
            max_retries: std::env::var("EMAIL_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_retries),
            retry_delay_ms: std::env::var("EMAIL_RETRY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.retry_delay_ms),
            request_timeout_secs: std::env::var("EMAIL_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parsing() {
        assert_eq!("HTTP".parse::<EmailProvider>().unwrap(), EmailProvider::Http);
        assert_eq!("mock".parse::<EmailProvider>().unwrap(), EmailProvider::Mock);
        assert!("smtp".parse::<EmailProvider>().is_err());
    }
}
