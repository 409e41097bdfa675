//! Main token service implementation

use chrono::Duration;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::domain::entities::token::{Claims, RefreshToken, TokenPair};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::TokenRepository;

use super::config::{TokenServiceConfig, REFRESH_TOKEN_LENGTH};

/// Service for managing JWT access tokens and refresh tokens
pub struct TokenService<R: TokenRepository> {
    repository: Arc<R>,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<R: TokenRepository> TokenService<R> {
    /// Creates a new token service instance
    pub fn new(repository: Arc<R>, config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            repository,
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Generates an access token and a persisted refresh token for `user`
    ///
    /// # Errors
    ///
    /// * `TokenError::TokenGenerationFailed` - Signing or persisting failed
    pub async fn generate_tokens(&self, user: &User) -> Result<TokenPair, DomainError> {
        let claims = Claims::new(
            user.id,
            user.is_email_verified,
            Duration::seconds(self.config.access_token_expiry_secs),
            self.config.issuer.clone(),
            self.config.audience.clone(),
        );
        let access_token = self.encode_jwt(&claims)?;

        let refresh_token = Self::generate_refresh_token_string();
        let record = RefreshToken::new(
            user.id,
            Self::hash_token(&refresh_token),
            Duration::seconds(self.config.refresh_token_expiry_secs),
        );
        self.repository
            .save_refresh_token(record)
            .await
            .map_err(|e| {
                tracing::error!(
                    user_id = %user.id,
                    error = %e,
                    event = "refresh_token_storage_failed",
                    "Failed to store refresh token"
                );
                DomainError::Token(TokenError::TokenGenerationFailed)
            })?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_expiry_secs,
            self.config.refresh_token_expiry_secs,
        ))
    }

    /// Verifies an access token's signature, lifetime, issuer and audience
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => DomainError::Token(TokenError::TokenExpired),
                _ => DomainError::Token(TokenError::InvalidTokenFormat),
            })
    }

    /// Revokes a refresh token, ending the session it belongs to
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidOrExpiredToken` - Unknown, expired or already revoked token
    /// * `AuthError::UnknownFailure` - The revocation list could not be consulted
    pub async fn revoke_refresh_token(&self, token: &str) -> Result<(), DomainError> {
        let token_hash = Self::hash_token(token);

        let stored = self
            .repository
            .find_refresh_token(&token_hash)
            .await
            .map_err(|e| Self::revocation_failure(&e))?;

        match stored {
            Some(record) if record.is_valid() => {}
            _ => return Err(AuthError::InvalidOrExpiredToken.into()),
        }

        let revoked = self
            .repository
            .revoke_token(&token_hash)
            .await
            .map_err(|e| Self::revocation_failure(&e))?;

        if !revoked {
            return Err(AuthError::InvalidOrExpiredToken.into());
        }
        Ok(())
    }

    fn revocation_failure(error: &DomainError) -> DomainError {
        tracing::error!(
            error = %error,
            event = "token_revocation_failed",
            "Failed to revoke refresh token"
        );
        AuthError::UnknownFailure.into()
    }

    fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    fn generate_refresh_token_string() -> String {
        OsRng
            .sample_iter(&Alphanumeric)
            .take(REFRESH_TOKEN_LENGTH)
            .map(char::from)
            .collect()
    }

    /// SHA-256 hex digest used as the refresh token storage key
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
