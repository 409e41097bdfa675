//! Verification code repository trait.
//!
//! Codes are append-only: the only mutation is the single `used` transition
//! performed by `mark_used`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainError;

/// Repository trait for VerificationCode persistence operations
#[async_trait]
pub trait VerificationCodeRepository: Send + Sync {
    /// Persist a freshly issued code
    async fn create(&self, code: VerificationCode) -> Result<VerificationCode, DomainError>;

    /// Find the most recently issued unused code for `user_id` whose value equals `code`
    ///
    /// Expired records are still returned; the caller decides expiry against
    /// its own window.
    async fn find_latest_unused(
        &self,
        user_id: Uuid,
        code: &str,
    ) -> Result<Option<VerificationCode>, DomainError>;

    /// Flip `used` from false to true as a single compare-and-set
    ///
    /// # Returns
    /// * `Ok(true)` - This call consumed the code
    /// * `Ok(false)` - The code was already used (or does not exist)
    async fn mark_used(&self, id: Uuid) -> Result<bool, DomainError>;

    /// All codes ever issued to `user_id`, newest first
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<VerificationCode>, DomainError>;
}
