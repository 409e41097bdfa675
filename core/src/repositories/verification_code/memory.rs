//! In-memory implementation of VerificationCodeRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainError;

use super::r#trait::VerificationCodeRepository;

/// Code store backed by a `HashMap`
///
/// `mark_used` checks and flips the flag under one write guard, so two
/// concurrent validations of the same record cannot both succeed.
#[derive(Clone)]
pub struct InMemoryVerificationCodeRepository {
    codes: Arc<RwLock<HashMap<Uuid, VerificationCode>>>,
}

impl InMemoryVerificationCodeRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            codes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Overwrite the issuance timestamp of a stored code
    ///
    /// Lets tests move a code outside its validity window.
    pub async fn set_created_at(&self, id: Uuid, created_at: DateTime<Utc>) -> bool {
        let mut codes = self.codes.write().await;
        match codes.get_mut(&id) {
            Some(code) => {
                code.created_at = created_at;
                true
            }
            None => false,
        }
    }

    /// Fetch a stored code by ID
    pub async fn get(&self, id: Uuid) -> Option<VerificationCode> {
        self.codes.read().await.get(&id).cloned()
    }
}

impl Default for InMemoryVerificationCodeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationCodeRepository for InMemoryVerificationCodeRepository {
    async fn create(&self, code: VerificationCode) -> Result<VerificationCode, DomainError> {
        let mut codes = self.codes.write().await;
        codes.insert(code.id, code.clone());
        Ok(code)
    }

    async fn find_latest_unused(
        &self,
        user_id: Uuid,
        code: &str,
    ) -> Result<Option<VerificationCode>, DomainError> {
        let codes = self.codes.read().await;
        Ok(codes
            .values()
            .filter(|c| c.user_id == user_id && !c.used && c.matches(code))
            .max_by_key(|c| c.created_at)
            .cloned())
    }

    async fn mark_used(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut codes = self.codes.write().await;
        match codes.get_mut(&id) {
            Some(code) if !code.used => {
                code.mark_used();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<VerificationCode>, DomainError> {
        let codes = self.codes.read().await;
        let mut result: Vec<VerificationCode> = codes
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }
}
