//! Token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Refresh token store acting as the session revocation list
///
/// Tokens are stored hashed; callers look them up and revoke them by hash.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a new refresh token
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a refresh token by its hashed value
    ///
    /// # Returns
    /// * `Ok(Some(RefreshToken))` - Token found (possibly expired or revoked)
    /// * `Ok(None)` - No token with this hash
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Revoke a refresh token
    ///
    /// # Returns
    /// * `Ok(true)` - This call revoked the token
    /// * `Ok(false)` - Token not found or already revoked
    async fn revoke_token(&self, token_hash: &str) -> Result<bool, DomainError>;
}
