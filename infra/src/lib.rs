//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators that `ac_core` expresses
//! as traits.
//!
//! ## Architecture
//!
//! - **Database**: MySQL repositories using SQLx, plus pool management and migrations
//! - **Notification**: Email delivery through an HTTP mail relay, or a logging mock
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Notification module - outbound email delivery
pub mod notification;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email delivery error
    #[error("Email service error: {0}")]
    Email(String),
}
