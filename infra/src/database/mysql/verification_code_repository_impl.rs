//! MySQL implementation of the VerificationCodeRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ac_core::domain::entities::verification_code::VerificationCode;
use ac_core::errors::DomainError;
use ac_core::repositories::VerificationCodeRepository;

use super::{db_error, parse_uuid};

/// MySQL implementation of VerificationCodeRepository
pub struct MySqlVerificationCodeRepository {
    pool: MySqlPool,
}

impl MySqlVerificationCodeRepository {
    /// Create a new MySQL verification code repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_code(row: &sqlx::mysql::MySqlRow) -> Result<VerificationCode, DomainError> {
        let id: String = row.try_get("id").map_err(|e| db_error("code id", e))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| db_error("code user_id", e))?;

        Ok(VerificationCode {
            id: parse_uuid(&id)?,
            user_id: parse_uuid(&user_id)?,
            code: row.try_get("code").map_err(|e| db_error("code value", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| db_error("code created_at", e))?,
            used: row.try_get("used").map_err(|e| db_error("code used", e))?,
        })
    }
}

#[async_trait]
impl VerificationCodeRepository for MySqlVerificationCodeRepository {
    async fn create(&self, code: VerificationCode) -> Result<VerificationCode, DomainError> {
        sqlx::query(
            "INSERT INTO verification_codes (id, user_id, code, created_at, used) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(code.id.to_string())
        .bind(code.user_id.to_string())
        .bind(&code.code)
        .bind(code.created_at)
        .bind(code.used)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("verification code insert", e))?;

        Ok(code)
    }

    async fn find_latest_unused(
        &self,
        user_id: Uuid,
        code: &str,
    ) -> Result<Option<VerificationCode>, DomainError> {
        let query = r#"
            SELECT id, user_id, code, created_at, used
            FROM verification_codes
            WHERE user_id = ? AND code = ? AND used = FALSE
            ORDER BY created_at DESC
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(user_id.to_string())
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("verification code lookup", e))?;

        row.as_ref().map(Self::row_to_code).transpose()
    }

    async fn mark_used(&self, id: Uuid) -> Result<bool, DomainError> {
        let result =
            sqlx::query("UPDATE verification_codes SET used = TRUE WHERE id = ? AND used = FALSE")
                .bind(id.to_string())
                .execute(&self.pool)
                .await
                .map_err(|e| db_error("verification code consume", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<VerificationCode>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, user_id, code, created_at, used FROM verification_codes \
             WHERE user_id = ? ORDER BY created_at DESC",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("verification code history", e))?;

        rows.iter().map(Self::row_to_code).collect()
    }
}
