//! MySQL implementation of the UserRepository trait.
//!
//! Uniqueness of username, email and phone number is enforced by unique
//! keys; a violation is translated back into `AuthError::DuplicateIdentity`
//! naming the clashing column.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ac_core::domain::entities::user::User;
use ac_core::errors::{AuthError, DomainError};
use ac_core::repositories::UserRepository;

use super::{db_error, parse_uuid};

const USER_COLUMNS: &str = "id, username, email, phone_number, password_hash, is_active, \
     is_email_verified, created_at, updated_at, last_login_at";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let column = |name: &str, e: sqlx::Error| DomainError::Internal {
            message: format!("Failed to get {}: {}", name, e),
        };

        let id: String = row.try_get("id").map_err(|e| column("id", e))?;

        Ok(User {
            id: parse_uuid(&id)?,
            username: row.try_get("username").map_err(|e| column("username", e))?,
            email: row.try_get("email").map_err(|e| column("email", e))?,
            phone_number: row
                .try_get("phone_number")
                .map_err(|e| column("phone_number", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| column("password_hash", e))?,
            is_active: row.try_get("is_active").map_err(|e| column("is_active", e))?,
            is_email_verified: row
                .try_get("is_email_verified")
                .map_err(|e| column("is_email_verified", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column("updated_at", e))?,
            last_login_at: row
                .try_get("last_login_at")
                .map_err(|e| column("last_login_at", e))?,
        })
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE {} = ? LIMIT 1",
            USER_COLUMNS, column
        );

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("user lookup", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }
}

/// Name of the user column whose unique key rejected an insert, if any
pub(crate) fn duplicate_field(error: &sqlx::Error) -> Option<&'static str> {
    let db_err = error.as_database_error()?;
    if !db_err.is_unique_violation() {
        return None;
    }

    let message = db_err.message();
    let field = if message.contains("uq_users_email") {
        "email"
    } else if message.contains("uq_users_phone_number") {
        "phone_number"
    } else {
        "username"
    };
    Some(field)
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_one("email", email).await
    }

    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>, DomainError> {
        self.find_one("phone_number", phone_number).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.find_one("id", &id.to_string()).await
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("username lookup", e))?;

        let count: i64 = row.try_get("count").map_err(|e| db_error("username lookup", e))?;
        Ok(count > 0)
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, username, email, phone_number, password_hash, is_active,
                is_email_verified, created_at, updated_at, last_login_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.phone_number)
            .bind(&user.password_hash)
            .bind(user.is_active)
            .bind(user.is_email_verified)
            .bind(user.created_at)
            .bind(user.updated_at)
            .bind(user.last_login_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => {
                tracing::debug!(user_id = %user.id, "User row inserted");
                Ok(user)
            }
            Err(e) => match duplicate_field(&e) {
                Some(field) => Err(DomainError::Auth(AuthError::DuplicateIdentity {
                    field: field.to_string(),
                })),
                None => Err(db_error("user insert", e)),
            },
        }
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users
            SET username = ?, email = ?, phone_number = ?, password_hash = ?,
                is_active = ?, is_email_verified = ?, updated_at = ?, last_login_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.phone_number)
            .bind(&user.password_hash)
            .bind(user.is_active)
            .bind(user.is_email_verified)
            .bind(user.updated_at)
            .bind(user.last_login_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await;

        let result = match result {
            Ok(result) => result,
            Err(e) => {
                return match duplicate_field(&e) {
                    Some(field) => Err(DomainError::Auth(AuthError::DuplicateIdentity {
                        field: field.to_string(),
                    })),
                    None => Err(db_error("user update", e)),
                }
            }
        };

        // MySQL reports matched-but-unchanged rows as 0 affected, so confirm existence
        if result.rows_affected() == 0 && self.find_by_id(user.id).await?.is_none() {
            return Err(DomainError::NotFound {
                resource: format!("User {}", user.id),
            });
        }

        Ok(user)
    }
}
