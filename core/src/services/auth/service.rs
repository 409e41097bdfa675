//! Main authentication service implementation

use ac_shared::utils::{email as email_utils, phone as phone_utils};
use std::sync::Arc;

use crate::domain::entities::user::User;
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::{TokenRepository, UserRepository, VerificationCodeRepository};
use crate::services::token::TokenService;
use crate::services::verification::{IssuedCode, NotificationServiceTrait, VerificationService};

use super::config::AuthServiceConfig;
use super::credentials::{generate_password, generate_username, hash_password};
use super::types::RegistrationResult;

/// Authentication service for the code-based account flows
pub struct AuthService<U, C, N, T>
where
    U: UserRepository,
    C: VerificationCodeRepository,
    N: NotificationServiceTrait,
    T: TokenRepository,
{
    /// User directory
    user_repository: Arc<U>,
    /// Code issuance and validation
    verification_service: Arc<VerificationService<C, N>>,
    /// JWT and refresh token management
    token_service: Arc<TokenService<T>>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, C, N, T> AuthService<U, C, N, T>
where
    U: UserRepository,
    C: VerificationCodeRepository,
    N: NotificationServiceTrait,
    T: TokenRepository,
{
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        verification_service: Arc<VerificationService<C, N>>,
        token_service: Arc<TokenService<T>>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            verification_service,
            token_service,
            config,
        }
    }

    /// Token service used to issue and verify tokens
    pub fn token_service(&self) -> &Arc<TokenService<T>> {
        &self.token_service
    }

    /// Register a new inactive account and issue a confirmation code
    ///
    /// At least one of `email` and `phone_number` must be provided. The
    /// account gets a generated username and a random password that is never
    /// disclosed; it becomes usable only after `confirm_registration`.
    ///
    /// # Errors
    ///
    /// * `AuthError::MissingIdentity` - Neither email nor phone given
    /// * `AuthError::DuplicateIdentity` - Email or phone already registered
    /// * `ValidationError` - Malformed email or phone
    pub async fn register(
        &self,
        email: Option<&str>,
        phone_number: Option<&str>,
    ) -> DomainResult<RegistrationResult> {
        let email = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(email_utils::normalize_email);
        let phone_number = phone_number
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(phone_utils::normalize_phone_number);

        if email.is_none() && phone_number.is_none() {
            return Err(AuthError::MissingIdentity.into());
        }

        if let Some(ref email) = email {
            if !email_utils::is_valid_email(email) {
                return Err(ValidationError::InvalidEmail.into());
            }
            if self.user_repository.find_by_email(email).await?.is_some() {
                tracing::info!(
                    email = %email_utils::mask_email(email),
                    event = "registration_duplicate",
                    "Email already registered"
                );
                return Err(AuthError::DuplicateIdentity {
                    field: "email".to_string(),
                }
                .into());
            }
        }

        if let Some(ref phone_number) = phone_number {
            if !phone_utils::is_valid_phone(phone_number) {
                return Err(ValidationError::InvalidFormat {
                    field: "phone_number".to_string(),
                }
                .into());
            }
            if self
                .user_repository
                .find_by_phone(phone_number)
                .await?
                .is_some()
            {
                tracing::info!(
                    phone = %phone_utils::mask_phone_number(phone_number),
                    event = "registration_duplicate",
                    "Phone number already registered"
                );
                return Err(AuthError::DuplicateIdentity {
                    field: "phone_number".to_string(),
                }
                .into());
            }
        }

        let username = self.unique_username().await?;
        let password_hash = hash_password(
            generate_password(self.config.password_length),
            self.config.bcrypt_cost,
        )
        .await?;

        let user = self
            .user_repository
            .create(User::new(username, email, phone_number, password_hash))
            .await?;

        tracing::info!(
            user_id = %user.id,
            username = %user.username,
            event = "user_registered",
            "Registered new inactive user"
        );

        let issued = self.verification_service.issue_code(&user).await?;
        Ok(RegistrationResult { user, issued })
    }

    /// Confirm a registration with the emailed code
    ///
    /// On success the account is activated and its email marked verified.
    ///
    /// # Errors
    ///
    /// * `AuthError::UserNotFound` - No user with this email
    /// * `AuthError::CodeNotFound` / `AuthError::CodeExpired` - See `VerificationService::validate_code`
    pub async fn confirm_registration(&self, email: &str, code: &str) -> DomainResult<User> {
        let mut user = self.find_user_by_email(email).await?;

        let window = self.verification_service.config().registration_window();
        let consumed = self
            .verification_service
            .validate_code(&user, code, window)
            .await?;

        user.activate();
        let user = match self.user_repository.update(user).await {
            Ok(user) => user,
            Err(e) => {
                // The code is already spent; the account stays inactive
                tracing::error!(
                    user_id = %consumed.user_id,
                    code_id = %consumed.id,
                    error = %e,
                    event = "activation_failed_after_consume",
                    "Verification code consumed but user activation was not saved"
                );
                return Err(e);
            }
        };

        tracing::info!(
            user_id = %user.id,
            event = "registration_confirmed",
            "User activated"
        );
        Ok(user)
    }

    /// Issue a login code to an active user
    ///
    /// # Errors
    ///
    /// * `AuthError::UserNotFound` - No user with this email
    /// * `AuthError::EmailNotVerified` - Account not yet activated
    pub async fn request_login_code(&self, email: &str) -> DomainResult<IssuedCode> {
        let user = self.find_active_user(email).await?;
        self.verification_service.issue_code(&user).await
    }

    /// Log in with a code previously sent by `request_login_code`
    ///
    /// Activation is checked before any code is looked up, so an inactive
    /// account is rejected regardless of the submitted code.
    ///
    /// # Errors
    ///
    /// * `AuthError::UserNotFound` - No user with this email
    /// * `AuthError::EmailNotVerified` - Account not yet activated
    /// * `AuthError::CodeNotFound` / `AuthError::CodeExpired` - See `VerificationService::validate_code`
    pub async fn verify_login_code(&self, email: &str, code: &str) -> DomainResult<AuthResponse> {
        let mut user = self.find_active_user(email).await?;

        let window = self.verification_service.config().login_window();
        self.verification_service
            .validate_code(&user, code, window)
            .await?;

        user.update_last_login();
        let user = self.user_repository.update(user).await?;

        let tokens = self.token_service.generate_tokens(&user).await?;

        tracing::info!(
            user_id = %user.id,
            event = "login_succeeded",
            "User logged in with verification code"
        );
        Ok(AuthResponse::from_token_pair(tokens, user.id, user.username))
    }

    /// Log out by revoking a refresh token
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidOrExpiredToken` - Unknown, expired or already revoked token
    /// * `AuthError::UnknownFailure` - Any other failure
    pub async fn logout(&self, refresh_token: &str) -> DomainResult<()> {
        self.token_service.revoke_refresh_token(refresh_token).await?;
        tracing::info!(event = "logout", "Refresh token revoked");
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> DomainResult<User> {
        let email = email_utils::normalize_email(email.trim());
        match self.user_repository.find_by_email(&email).await? {
            Some(user) => Ok(user),
            None => {
                tracing::info!(
                    email = %email_utils::mask_email(&email),
                    event = "user_not_found",
                    "No user with this email"
                );
                Err(AuthError::UserNotFound.into())
            }
        }
    }

    async fn find_active_user(&self, email: &str) -> DomainResult<User> {
        let user = self.find_user_by_email(email).await?;
        if !user.is_active {
            tracing::info!(
                user_id = %user.id,
                event = "login_inactive_user",
                "Login attempted before email verification"
            );
            return Err(AuthError::EmailNotVerified.into());
        }
        Ok(user)
    }

    async fn unique_username(&self) -> DomainResult<String> {
        for _ in 0..self.config.username_max_attempts {
            let candidate = generate_username(
                &self.config.username_prefix,
                self.config.username_random_length,
            );
            if !self.user_repository.exists_by_username(&candidate).await? {
                return Ok(candidate);
            }
        }
        Err(DomainError::Internal {
            message: "Could not generate a unique username".to_string(),
        })
    }
}
