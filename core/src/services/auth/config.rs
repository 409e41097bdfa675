//! Configuration for the authentication service

/// Configuration for generated account credentials
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Prefix of generated usernames
    pub username_prefix: String,
    /// Number of random characters after the prefix
    pub username_random_length: usize,
    /// Attempts at finding a free username before giving up
    pub username_max_attempts: u32,
    /// Length of the generated (never disclosed) password
    pub password_length: usize,
    /// Bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            username_prefix: "user_".to_string(),
            username_random_length: 10,
            username_max_attempts: 5,
            password_length: 16,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}
