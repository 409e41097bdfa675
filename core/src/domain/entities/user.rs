//! User entity representing an account that signs in with emailed codes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity
///
/// Accounts are created inactive with a generated username and an unknown
/// random password. Confirming the first emailed code activates the account
/// and marks the email as verified in one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// System-generated unique username
    pub username: String,

    /// Email address, unique when present
    pub email: Option<String>,

    /// Phone number, unique when present
    pub phone_number: Option<String>,

    /// Bcrypt hash of the generated password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Whether the account may log in
    pub is_active: bool,

    /// Whether the email address has been confirmed
    pub is_email_verified: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the user's last login
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new inactive, unverified user
    pub fn new(
        username: String,
        email: Option<String>,
        phone_number: Option<String>,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            phone_number,
            password_hash,
            is_active: false,
            is_email_verified: false,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Activates the account and marks its email as verified
    pub fn activate(&mut self) {
        self.is_active = true;
        self.is_email_verified = true;
        self.updated_at = Utc::now();
    }

    /// Updates the last login timestamp
    pub fn update_last_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    /// Whether codes issued to this user can be delivered
    pub fn has_email(&self) -> bool {
        self.email.as_deref().map_or(false, |e| !e.is_empty())
    }
}
