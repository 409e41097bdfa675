//! Configuration for the verification service

use ac_shared::config::verification::MAX_WINDOW_MINUTES;
use ac_shared::VerificationConfig;
use chrono::Duration;

use crate::domain::entities::verification_code::DEFAULT_WINDOW_MINUTES;

/// Validity windows for the two code-consuming flows
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Minutes a registration confirmation code stays consumable
    pub registration_window_minutes: i64,
    /// Minutes a login code stays consumable
    pub login_window_minutes: i64,
}

impl VerificationServiceConfig {
    pub fn registration_window(&self) -> Duration {
        window(self.registration_window_minutes)
    }

    pub fn login_window(&self) -> Duration {
        window(self.login_window_minutes)
    }
}

// Clamped so an unchecked value can never overflow `Duration::minutes`
fn window(minutes: i64) -> Duration {
    Duration::minutes(minutes.clamp(0, MAX_WINDOW_MINUTES))
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            registration_window_minutes: DEFAULT_WINDOW_MINUTES,
            login_window_minutes: DEFAULT_WINDOW_MINUTES,
        }
    }
}

impl From<&VerificationConfig> for VerificationServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            registration_window_minutes: config.registration_window_minutes,
            login_window_minutes: config.login_window_minutes,
        }
    }
}
