//! Generated account credentials
//!
//! Users never choose a username or password: both are generated at
//! registration and the password is only ever stored as a bcrypt hash.

use rand::{distributions::Alphanumeric, rngs::OsRng, seq::SliceRandom, Rng};

use crate::errors::{DomainError, DomainResult};

const USERNAME_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generates a username candidate: `prefix` followed by `length` lowercase alphanumerics
pub fn generate_username(prefix: &str, length: usize) -> String {
    let suffix: String = (0..length)
        .filter_map(|_| USERNAME_CHARSET.choose(&mut OsRng))
        .map(|&b| b as char)
        .collect();
    format!("{}{}", prefix, suffix)
}

/// Generates a random alphanumeric password
pub fn generate_password(length: usize) -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Hashes a password with bcrypt on the blocking thread pool
pub async fn hash_password(password: String, cost: u32) -> DomainResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Password hashing task failed: {}", e),
        })?
        .map_err(|e| DomainError::Internal {
            message: format!("Password hashing failed: {}", e),
        })
}
