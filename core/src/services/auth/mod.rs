//! Authentication service module
//!
//! Registration by email and/or phone, confirmation with an emailed code,
//! passwordless login by code, and logout by refresh token revocation.

mod config;
mod credentials;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use credentials::{generate_password, generate_username, hash_password};
pub use service::AuthService;
pub use types::RegistrationResult;
