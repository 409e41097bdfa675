//! Token service module for JWT management
//!
//! Issues HS256 access tokens and opaque refresh tokens, and revokes
//! refresh tokens at logout.

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
