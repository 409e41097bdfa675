//! Main verification service implementation

use ac_shared::utils::email::mask_email;
use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::user::User;
use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::VerificationCodeRepository;

use super::config::VerificationServiceConfig;
use super::traits::NotificationServiceTrait;
use super::types::IssuedCode;

/// Verification service issuing and validating one-time codes
pub struct VerificationService<C: VerificationCodeRepository, N: NotificationServiceTrait> {
    /// Code store
    code_repository: Arc<C>,
    /// Delivery channel
    notification_service: Arc<N>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<C: VerificationCodeRepository, N: NotificationServiceTrait> VerificationService<C, N> {
    /// Create a new verification service
    pub fn new(
        code_repository: Arc<C>,
        notification_service: Arc<N>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            code_repository,
            notification_service,
            config,
        }
    }

    /// Service configuration
    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Issue a fresh code to `user`
    ///
    /// The code is persisted first, then delivered to the user's email if
    /// one is on file. Delivery failure is logged and reported through
    /// `IssuedCode::delivered`; it never fails the issuance. Earlier unused
    /// codes stay valid until their own window closes.
    ///
    /// # Errors
    ///
    /// * `DomainError::Internal` - The code could not be persisted
    pub async fn issue_code(&self, user: &User) -> DomainResult<IssuedCode> {
        let verification_code = self
            .code_repository
            .create(VerificationCode::new(user.id))
            .await
            .map_err(|e| {
                tracing::error!(
                    user_id = %user.id,
                    error = %e,
                    event = "code_storage_failed",
                    "Failed to store verification code"
                );
                DomainError::Internal {
                    message: format!("Failed to store verification code: {}", e),
                }
            })?;

        tracing::info!(
            user_id = %user.id,
            code_id = %verification_code.id,
            event = "code_issued",
            "Issued verification code"
        );

        let email = match user.email.as_deref().filter(|e| !e.is_empty()) {
            Some(email) => email,
            None => {
                tracing::debug!(
                    user_id = %user.id,
                    event = "code_delivery_skipped",
                    "User has no email address; code not delivered"
                );
                return Ok(IssuedCode {
                    verification_code,
                    delivered: false,
                    message_id: None,
                });
            }
        };

        let body = format!("Your verification code: {}", verification_code.code);
        match self.notification_service.send(email, &body).await {
            Ok(message_id) => {
                tracing::info!(
                    user_id = %user.id,
                    email = %mask_email(email),
                    message_id = %message_id,
                    event = "code_delivered",
                    "Verification code delivered"
                );
                Ok(IssuedCode {
                    verification_code,
                    delivered: true,
                    message_id: Some(message_id),
                })
            }
            Err(e) => {
                tracing::warn!(
                    user_id = %user.id,
                    email = %mask_email(email),
                    error = %e,
                    event = "code_delivery_failed",
                    "Failed to deliver verification code"
                );
                Ok(IssuedCode {
                    verification_code,
                    delivered: false,
                    message_id: None,
                })
            }
        }
    }

    /// Validate and consume a submitted code for `user`
    ///
    /// Looks up the newest unused code with the submitted value. A value that
    /// cannot be a code is rejected without touching storage. A code is
    /// expired only once strictly more than `window` has elapsed. Expired
    /// codes are rejected without being consumed.
    ///
    /// # Errors
    ///
    /// * `AuthError::CodeNotFound` - No unused code matches, or a concurrent
    ///   validation consumed it first
    /// * `AuthError::CodeExpired` - The matched code is older than `window`
    pub async fn validate_code(
        &self,
        user: &User,
        submitted: &str,
        window: Duration,
    ) -> DomainResult<VerificationCode> {
        if !VerificationCode::is_well_formed(submitted) {
            tracing::info!(
                user_id = %user.id,
                event = "code_malformed",
                "Submitted code is not a 6-digit value"
            );
            return Err(AuthError::CodeNotFound.into());
        }

        let mut code = match self
            .code_repository
            .find_latest_unused(user.id, submitted)
            .await?
        {
            Some(code) => code,
            None => {
                tracing::info!(
                    user_id = %user.id,
                    event = "code_not_found",
                    "No unused verification code matches"
                );
                return Err(AuthError::CodeNotFound.into());
            }
        };

        let now = Utc::now();
        if code.is_expired_at(now, window) {
            tracing::info!(
                user_id = %user.id,
                code_id = %code.id,
                elapsed_secs = code.elapsed_at(now).num_seconds(),
                event = "code_expired",
                "Verification code expired"
            );
            return Err(AuthError::CodeExpired.into());
        }

        if !self.code_repository.mark_used(code.id).await? {
            tracing::warn!(
                user_id = %user.id,
                code_id = %code.id,
                event = "code_consume_race_lost",
                "Verification code consumed concurrently"
            );
            return Err(AuthError::CodeNotFound.into());
        }

        code.mark_used();
        tracing::info!(
            user_id = %user.id,
            code_id = %code.id,
            event = "code_consumed",
            "Verification code consumed"
        );
        Ok(code)
    }
}
