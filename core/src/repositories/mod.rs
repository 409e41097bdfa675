pub mod token;
pub mod user;
pub mod verification_code;

pub use token::{InMemoryTokenRepository, TokenRepository};
pub use user::{InMemoryUserRepository, UserRepository};
pub use verification_code::{InMemoryVerificationCodeRepository, VerificationCodeRepository};
