//! Shared utilities and common types for the Authcode server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Utility functions (email and phone validation, masking)
//! - Health check response

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, DatabaseConfig, EmailConfig, Environment, JwtConfig, LoggingConfig,
    ServerConfig, VerificationConfig,
};
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
pub use types::HealthResponse;
pub use utils::{email, phone};
