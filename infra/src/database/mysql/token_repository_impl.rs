//! MySQL implementation of the TokenRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use ac_core::domain::entities::token::RefreshToken;
use ac_core::errors::DomainError;
use ac_core::repositories::TokenRepository;

use super::{db_error, parse_uuid};

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<RefreshToken, DomainError> {
        let id: String = row.try_get("id").map_err(|e| db_error("token id", e))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| db_error("token user_id", e))?;

        Ok(RefreshToken {
            id: parse_uuid(&id)?,
            user_id: parse_uuid(&user_id)?,
            token_hash: row
                .try_get("token_hash")
                .map_err(|e| db_error("token hash", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| db_error("token created_at", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| db_error("token expires_at", e))?,
            is_revoked: row
                .try_get("is_revoked")
                .map_err(|e| db_error("token is_revoked", e))?,
        })
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let result = sqlx::query(
            "INSERT INTO refresh_tokens (id, user_id, token_hash, created_at, expires_at, is_revoked) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(token.id.to_string())
        .bind(token.user_id.to_string())
        .bind(&token.token_hash)
        .bind(token.created_at)
        .bind(token.expires_at)
        .bind(token.is_revoked)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(token),
            Err(e)
                if e.as_database_error()
                    .map_or(false, |db| db.is_unique_violation()) =>
            {
                Err(DomainError::Validation {
                    message: "Refresh token already exists".to_string(),
                })
            }
            Err(e) => Err(db_error("refresh token insert", e)),
        }
    }

    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let row = sqlx::query(
            "SELECT id, user_id, token_hash, created_at, expires_at, is_revoked \
             FROM refresh_tokens WHERE token_hash = ? LIMIT 1",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("refresh token lookup", e))?;

        row.as_ref().map(Self::row_to_token).transpose()
    }

    async fn revoke_token(&self, token_hash: &str) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET is_revoked = TRUE WHERE token_hash = ? AND is_revoked = FALSE",
        )
        .bind(token_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("refresh token revoke", e))?;

        Ok(result.rows_affected() == 1)
    }
}
