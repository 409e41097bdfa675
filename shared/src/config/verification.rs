//! Verification code policy configuration

use serde::{Deserialize, Serialize};

/// Longest accepted validity window (one week)
pub const MAX_WINDOW_MINUTES: i64 = 7 * 24 * 60;

/// Validity windows for the two code-consuming flows
///
/// Registration confirmation and login use separate windows even though
/// both default to 15 minutes.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Minutes a registration confirmation code stays consumable
    pub registration_window_minutes: i64,

    /// Minutes a login code stays consumable
    pub login_window_minutes: i64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            registration_window_minutes: 15,
            login_window_minutes: 15,
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            registration_window_minutes: std::env::var("VERIFICATION_REGISTRATION_WINDOW_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.registration_window_minutes),
            login_window_minutes: std::env::var("VERIFICATION_LOGIN_WINDOW_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.login_window_minutes),
        }
    }
}
