//! Types for authentication service results

use crate::domain::entities::user::User;
use crate::services::verification::IssuedCode;

/// Outcome of a registration
#[derive(Debug, Clone)]
pub struct RegistrationResult {
    /// The newly created, inactive user
    pub user: User,
    /// The confirmation code issued to the user
    pub issued: IssuedCode,
}
