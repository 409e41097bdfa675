//! MySQL repository implementations

mod token_repository_impl;
pub(crate) mod user_repository_impl;
mod verification_code_repository_impl;

pub use token_repository_impl::MySqlTokenRepository;
pub use user_repository_impl::MySqlUserRepository;
pub use verification_code_repository_impl::MySqlVerificationCodeRepository;

use ac_core::errors::DomainError;

/// Maps a SQLx failure to a domain error, logging the cause
pub(crate) fn db_error(context: &str, error: sqlx::Error) -> DomainError {
    tracing::error!(error = %error, context, "Database operation failed");
    DomainError::Internal {
        message: format!("{}: {}", context, error),
    }
}

/// Parses a CHAR(36) UUID column
pub(crate) fn parse_uuid(value: &str) -> Result<uuid::Uuid, DomainError> {
    uuid::Uuid::parse_str(value).map_err(|e| DomainError::Internal {
        message: format!("Invalid UUID in database: {}", e),
    })
}
