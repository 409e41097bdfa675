//! Verification code lifecycle: issuance, delivery and single-use validation
//!
//! Codes are persisted through a `VerificationCodeRepository` and delivered
//! through a `NotificationServiceTrait`. Validation consumes a code with a
//! compare-and-set, so a code can succeed at most once.

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use traits::NotificationServiceTrait;
pub use types::IssuedCode;
