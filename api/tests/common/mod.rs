//! Shared wiring for the HTTP tests: in-memory stores and a notifier that
//! remembers what it sent.

#![allow(dead_code)]

use actix_web::web;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use ac_api::routes::auth::AppState;
use ac_core::repositories::{
    InMemoryTokenRepository, InMemoryUserRepository, InMemoryVerificationCodeRepository,
};
use ac_core::services::auth::{AuthService, AuthServiceConfig};
use ac_core::services::token::{TokenService, TokenServiceConfig};
use ac_core::services::verification::{
    NotificationServiceTrait, VerificationService, VerificationServiceConfig,
};

/// Notifier that keeps every message body per recipient
#[derive(Clone, Default)]
pub struct Inbox {
    messages: Arc<Mutex<HashMap<String, Vec<String>>>>,
}

impl Inbox {
    /// Code contained in the latest message sent to `recipient`
    pub fn last_code(&self, recipient: &str) -> Option<String> {
        let messages = self.messages.lock().unwrap();
        let body = messages.get(recipient)?.last()?;
        body.rsplit(' ').next().map(str::to_string)
    }

    pub fn count(&self, recipient: &str) -> usize {
        self.messages
            .lock()
            .unwrap()
            .get(recipient)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl NotificationServiceTrait for Inbox {
    async fn send(&self, recipient: &str, body: &str) -> Result<String, String> {
        self.messages
            .lock()
            .unwrap()
            .entry(recipient.to_string())
            .or_default()
            .push(body.to_string());
        Ok(format!("inbox_{}", uuid::Uuid::new_v4()))
    }
}

pub type TestState = AppState<
    InMemoryUserRepository,
    InMemoryVerificationCodeRepository,
    Inbox,
    InMemoryTokenRepository,
>;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub inbox: Inbox,
    pub users: Arc<InMemoryUserRepository>,
    pub codes: Arc<InMemoryVerificationCodeRepository>,
    pub tokens: Arc<InMemoryTokenRepository>,
}

pub fn test_context() -> TestContext {
    let inbox = Inbox::default();
    let users = Arc::new(InMemoryUserRepository::new());
    let codes = Arc::new(InMemoryVerificationCodeRepository::new());
    let tokens = Arc::new(InMemoryTokenRepository::new());

    let verification_service = Arc::new(VerificationService::new(
        codes.clone(),
        Arc::new(inbox.clone()),
        VerificationServiceConfig::default(),
    ));
    let token_service = Arc::new(TokenService::new(
        tokens.clone(),
        TokenServiceConfig {
            jwt_secret: "test_secret".to_string(),
            ..Default::default()
        },
    ));
    let auth_service = Arc::new(AuthService::new(
        users.clone(),
        verification_service,
        token_service,
        AuthServiceConfig {
            bcrypt_cost: 4,
            ..Default::default()
        },
    ));

    TestContext {
        state: web::Data::new(AppState::new(auth_service)),
        inbox,
        users,
        codes,
        tokens,
    }
}
