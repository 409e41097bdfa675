//! Mapping of domain and request errors onto HTTP responses

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::collections::HashMap;
use thiserror::Error;
use validator::ValidationErrors;

use ac_core::errors::{AuthError, DomainError};
use ac_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};

/// Errors a handler can return
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failure reported by a core service
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Request body failed schema validation
    #[error("Invalid request data")]
    Validation(#[from] ValidationErrors),

    /// Missing or unusable bearer credentials
    #[error("{0}")]
    Unauthorized(String),
}

/// HTTP status for a domain error
pub fn domain_status(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Auth(AuthError::UserNotFound) => StatusCode::NOT_FOUND,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Token(ac_core::errors::TokenError::TokenGenerationFailed) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        DomainError::Auth(_)
        | DomainError::Token(_)
        | DomainError::Validation { .. }
        | DomainError::ValidationErr(_) => StatusCode::BAD_REQUEST,
    }
}

/// Per-field messages from a failed `validate()` call
fn field_messages(errors: &ValidationErrors) -> HashMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

impl ApiError {
    /// Body sent to the client
    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            ApiError::Domain(error) => error.to_error_response(),
            ApiError::Validation(errors) => ErrorResponse::new(
                error_codes::VALIDATION_ERROR,
                "Invalid request data.",
            )
            .add_detail("fields", field_messages(errors)),
            ApiError::Unauthorized(message) => {
                ErrorResponse::new(error_codes::UNAUTHORIZED, message.clone())
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(error) => domain_status(error),
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Request failed: {:?}", self);
        } else {
            log::warn!("Request rejected ({}): {}", status.as_u16(), self);
        }

        HttpResponse::build(status).json(self.to_error_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ac_core::errors::{TokenError, ValidationError};

    #[test]
    fn test_status_mapping() {
        let bad_request = [
            DomainError::Auth(AuthError::MissingIdentity),
            DomainError::Auth(AuthError::DuplicateIdentity {
                field: "email".to_string(),
            }),
            DomainError::Auth(AuthError::CodeNotFound),
            DomainError::Auth(AuthError::CodeExpired),
            DomainError::Auth(AuthError::EmailNotVerified),
            DomainError::Auth(AuthError::InvalidOrExpiredToken),
            DomainError::Auth(AuthError::UnknownFailure),
            DomainError::ValidationErr(ValidationError::InvalidEmail),
            DomainError::Token(TokenError::InvalidTokenFormat),
        ];
        for error in &bad_request {
            assert_eq!(domain_status(error), StatusCode::BAD_REQUEST, "{:?}", error);
        }

        assert_eq!(
            domain_status(&DomainError::Auth(AuthError::UserNotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            domain_status(&DomainError::internal("boom")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unauthorized_body() {
        let error = ApiError::Unauthorized("Missing bearer token".to_string());
        assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);

        let body = error.to_error_response();
        assert_eq!(body.error, error_codes::UNAUTHORIZED);
        assert_eq!(body.message, "Missing bearer token");
    }
}
