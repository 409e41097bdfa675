pub mod auth;

pub use auth::{AuthContext, JwtAuth, TokenVerifier};
