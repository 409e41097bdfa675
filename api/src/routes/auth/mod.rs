//! Authentication route handlers
//!
//! - Registration and its confirmation code
//! - Login by emailed code
//! - Logout (refresh token revocation)

pub mod login;
pub mod logout;
pub mod register;
pub mod verify;

use std::sync::Arc;

use ac_core::repositories::{TokenRepository, UserRepository, VerificationCodeRepository};
use ac_core::services::auth::AuthService;
use ac_core::services::verification::NotificationServiceTrait;

/// Application state that holds shared services
pub struct AppState<U, C, N, T>
where
    U: UserRepository,
    C: VerificationCodeRepository,
    N: NotificationServiceTrait,
    T: TokenRepository,
{
    pub auth_service: Arc<AuthService<U, C, N, T>>,
}

impl<U, C, N, T> AppState<U, C, N, T>
where
    U: UserRepository,
    C: VerificationCodeRepository,
    N: NotificationServiceTrait,
    T: TokenRepository,
{
    pub fn new(auth_service: Arc<AuthService<U, C, N, T>>) -> Self {
        Self { auth_service }
    }
}
