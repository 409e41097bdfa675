//! Error kinds for the verification-code and session flows
//!
//! Each variant carries a stable machine-readable code (see `error_code`)
//! that the HTTP layer forwards to clients alongside the display message.

use ac_shared::errors::error_codes;
use thiserror::Error;

/// Failures of registration, code validation, login and logout
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Either email or phone number must be provided.")]
    MissingIdentity,

    #[error("A user with this {field} already exists.")]
    DuplicateIdentity { field: String },

    #[error("User with this email does not exist.")]
    UserNotFound,

    #[error("Invalid or already used verification code.")]
    CodeNotFound,

    #[error("Verification code has expired.")]
    CodeExpired,

    #[error("Email is not verified.")]
    EmailNotVerified,

    #[error("Invalid or expired token.")]
    InvalidOrExpiredToken,

    #[error("Something went wrong.")]
    UnknownFailure,
}

impl AuthError {
    /// Stable error code for API clients
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingIdentity => error_codes::MISSING_IDENTITY,
            AuthError::DuplicateIdentity { .. } => error_codes::DUPLICATE_IDENTITY,
            AuthError::UserNotFound => error_codes::USER_NOT_FOUND,
            AuthError::CodeNotFound => error_codes::CODE_NOT_FOUND,
            AuthError::CodeExpired => error_codes::CODE_EXPIRED,
            AuthError::EmailNotVerified => error_codes::EMAIL_NOT_VERIFIED,
            AuthError::InvalidOrExpiredToken => error_codes::INVALID_OR_EXPIRED_TOKEN,
            AuthError::UnknownFailure => error_codes::UNKNOWN_FAILURE,
        }
    }
}

/// Access token failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::TokenExpired => error_codes::TOKEN_EXPIRED,
            TokenError::InvalidTokenFormat => error_codes::TOKEN_INVALID,
            TokenError::TokenGenerationFailed => error_codes::TOKEN_GENERATION_FAILED,
        }
    }
}

/// Input validation failures raised inside the domain
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid format for field: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid email format")]
    InvalidEmail,
}
