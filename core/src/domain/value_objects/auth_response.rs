//! Authentication response value object for API responses.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::token::TokenPair;

/// Session credentials returned after a successful code login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// Refresh token, presented again at logout
    pub refresh_token: String,

    /// Access token expiration time in seconds
    pub expires_in: i64,

    /// Authenticated user's ID
    pub user_id: Uuid,

    /// Authenticated user's generated username
    pub username: String,
}

impl AuthResponse {
    /// Creates an authentication response from a token pair and user information
    pub fn from_token_pair(token_pair: TokenPair, user_id: Uuid, username: String) -> Self {
        Self {
            access_token: token_pair.access_token,
            refresh_token: token_pair.refresh_token,
            expires_in: token_pair.access_expires_in,
            user_id,
            username,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token_pair() {
        let user_id = Uuid::new_v4();
        let pair = TokenPair::new("a".to_string(), "r".to_string(), 900, 604800);
        let response = AuthResponse::from_token_pair(pair, user_id, "user_abc".to_string());

        assert_eq!(response.access_token, "a");
        assert_eq!(response.refresh_token, "r");
        assert_eq!(response.expires_in, 900);
        assert_eq!(response.user_id, user_id);
        assert_eq!(response.username, "user_abc");
    }
}
