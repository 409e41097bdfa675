//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management and migrations
//! - Repository implementations for users, verification codes and refresh tokens

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use mysql::{MySqlTokenRepository, MySqlUserRepository, MySqlVerificationCodeRepository};
