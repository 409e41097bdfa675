//! # Authcode Core
//!
//! Core business logic and domain layer for the Authcode backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types that form the foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Claims, RefreshToken, TokenPair, User, VerificationCode};
pub use domain::value_objects::AuthResponse;
pub use errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
pub use repositories::{
    InMemoryTokenRepository, InMemoryUserRepository, InMemoryVerificationCodeRepository,
    TokenRepository, UserRepository, VerificationCodeRepository,
};
pub use services::{
    AuthService, AuthServiceConfig, IssuedCode, NotificationServiceTrait, RegistrationResult,
    TokenService, TokenServiceConfig, VerificationService, VerificationServiceConfig,
};
