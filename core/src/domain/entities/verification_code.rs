//! Verification code entity for email-based account confirmation and login.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default validity window for verification codes (15 minutes)
pub const DEFAULT_WINDOW_MINUTES: i64 = 15;

/// A one-time code issued to a user
///
/// Records are never deleted; a consumed code keeps `used = true` as an
/// audit trail. Several unused codes for the same user may coexist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Unique identifier for the verification code
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// The 6-digit verification code
    pub code: String,

    /// Timestamp when the code was issued
    pub created_at: DateTime<Utc>,

    /// Whether the code has been consumed
    pub used: bool,
}

impl VerificationCode {
    /// Creates a new unused code with a cryptographically secure random value
    pub fn new(user_id: Uuid) -> Self {
        Self::with_code(user_id, Self::generate_code())
    }

    /// Creates a new unused code with an explicit value
    pub fn with_code(user_id: Uuid, code: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            code: code.into(),
            created_at: Utc::now(),
            used: false,
        }
    }

    /// Generates a random zero-padded 6-digit code from the OS CSPRNG
    pub fn generate_code() -> String {
        let code: u32 = OsRng.gen_range(0..1_000_000);
        format!("{:06}", code)
    }

    /// Checks whether a string has the shape of a verification code
    pub fn is_well_formed(code: &str) -> bool {
        code.len() == CODE_LENGTH && code.chars().all(|c| c.is_ascii_digit())
    }

    /// Time elapsed between issuance and `now`
    pub fn elapsed_at(&self, now: DateTime<Utc>) -> Duration {
        now - self.created_at
    }

    /// Whether more than `window` has elapsed since issuance at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.elapsed_at(now) > window
    }

    /// Constant-time comparison against a submitted value
    pub fn matches(&self, submitted: &str) -> bool {
        self.code.len() == submitted.len() && constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }

    /// Marks the verification code as used
    pub fn mark_used(&mut self) {
        self.used = true;
    }
}
