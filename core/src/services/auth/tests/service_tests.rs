//! Unit tests for authentication service

use chrono::{Duration, Utc};
use std::sync::Arc;

use super::mocks::{RecordingNotifier, UpdateFailingUserRepository};
use crate::errors::{AuthError, DomainError, ValidationError};
use crate::repositories::{
    InMemoryTokenRepository, InMemoryUserRepository, InMemoryVerificationCodeRepository,
    UserRepository, VerificationCodeRepository,
};
use crate::services::auth::{AuthService, AuthServiceConfig};
use crate::services::token::{TokenService, TokenServiceConfig};
use crate::services::verification::{VerificationService, VerificationServiceConfig};

type TestAuthService = AuthService<
    InMemoryUserRepository,
    InMemoryVerificationCodeRepository,
    RecordingNotifier,
    InMemoryTokenRepository,
>;

struct Harness {
    service: TestAuthService,
    users: Arc<InMemoryUserRepository>,
    codes: Arc<InMemoryVerificationCodeRepository>,
    notifier: Arc<RecordingNotifier>,
}

fn harness() -> Harness {
    let users = Arc::new(InMemoryUserRepository::new());
    let codes = Arc::new(InMemoryVerificationCodeRepository::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let tokens = Arc::new(InMemoryTokenRepository::new());

    let verification = Arc::new(VerificationService::new(
        codes.clone(),
        notifier.clone(),
        VerificationServiceConfig::default(),
    ));
    let token_service = Arc::new(TokenService::new(
        tokens,
        TokenServiceConfig {
            jwt_secret: "auth-service-test-secret".to_string(),
            ..Default::default()
        },
    ));
    let config = AuthServiceConfig {
        bcrypt_cost: 4,
        ..Default::default()
    };

    Harness {
        service: AuthService::new(users.clone(), verification, token_service, config),
        users,
        codes,
        notifier,
    }
}

const EMAIL: &str = "jane@example.com";

async fn registered_and_confirmed(h: &Harness) {
    h.service.register(Some(EMAIL), None).await.unwrap();
    let code = h.notifier.last_code_for(EMAIL).unwrap();
    h.service.confirm_registration(EMAIL, &code).await.unwrap();
}

#[tokio::test]
async fn test_register_creates_inactive_user_and_sends_code() {
    let h = harness();

    let result = h.service.register(Some(EMAIL), None).await.unwrap();

    assert!(!result.user.is_active);
    assert!(!result.user.is_email_verified);
    assert!(result.user.username.starts_with("user_"));
    assert_eq!(result.user.username.len(), 15);
    assert!(result.user.password_hash.starts_with("$2"));
    assert!(result.issued.delivered);
    assert_eq!(
        h.notifier.last_code_for(EMAIL).unwrap(),
        result.issued.verification_code.code
    );
    assert!(h.users.find_by_email(EMAIL).await.unwrap().is_some());
}

#[tokio::test]
async fn test_register_requires_identity() {
    let h = harness();

    let result = h.service.register(None, None).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::MissingIdentity))
    ));

    let blank = h.service.register(Some("  "), Some("")).await;
    assert!(matches!(
        blank,
        Err(DomainError::Auth(AuthError::MissingIdentity))
    ));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let h = harness();
    h.service.register(Some(EMAIL), None).await.unwrap();

    let result = h.service.register(Some(EMAIL), None).await;
    match result {
        Err(DomainError::Auth(AuthError::DuplicateIdentity { field })) => {
            assert_eq!(field, "email")
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_register_duplicate_phone() {
    let h = harness();
    h.service.register(None, Some("+61412345678")).await.unwrap();

    let result = h
        .service
        .register(Some("other@example.com"), Some("+61 412 345 678"))
        .await;
    match result {
        Err(DomainError::Auth(AuthError::DuplicateIdentity { field })) => {
            assert_eq!(field, "phone_number")
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_register_phone_only_issues_undelivered_code() {
    let h = harness();

    let result = h.service.register(None, Some("+61412345678")).await.unwrap();

    assert!(!result.issued.delivered);
    assert_eq!(h.notifier.count(), 0);
    let history = h.codes.find_by_user(result.user.id).await.unwrap();
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn test_register_rejects_malformed_email() {
    let h = harness();

    let result = h.service.register(Some("not-an-email"), None).await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::InvalidEmail))
    ));
}

#[tokio::test]
async fn test_confirm_registration_activates_user() {
    let h = harness();
    h.service.register(Some(EMAIL), None).await.unwrap();
    let code = h.notifier.last_code_for(EMAIL).unwrap();

    let user = h.service.confirm_registration(EMAIL, &code).await.unwrap();

    assert!(user.is_active);
    assert!(user.is_email_verified);
    let stored = h.users.find_by_email(EMAIL).await.unwrap().unwrap();
    assert!(stored.is_active);

    let replay = h.service.confirm_registration(EMAIL, &code).await;
    assert!(matches!(
        replay,
        Err(DomainError::Auth(AuthError::CodeNotFound))
    ));
}

#[tokio::test]
async fn test_confirm_registration_activation_failure_is_reported() {
    let users = Arc::new(UpdateFailingUserRepository::default());
    let codes = Arc::new(InMemoryVerificationCodeRepository::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let verification = Arc::new(VerificationService::new(
        codes.clone(),
        notifier.clone(),
        VerificationServiceConfig::default(),
    ));
    let token_service = Arc::new(TokenService::new(
        Arc::new(InMemoryTokenRepository::new()),
        TokenServiceConfig {
            jwt_secret: "auth-service-test-secret".to_string(),
            ..Default::default()
        },
    ));
    let service = AuthService::new(
        users.clone(),
        verification,
        token_service,
        AuthServiceConfig {
            bcrypt_cost: 4,
            ..Default::default()
        },
    );

    let registered = service.register(Some(EMAIL), None).await.unwrap();
    let code = registered.issued.verification_code;

    let result = service.confirm_registration(EMAIL, &code.code).await;

    assert!(matches!(result, Err(DomainError::Internal { .. })));
    assert!(codes.get(code.id).await.unwrap().used);
    assert!(!users.find_by_email(EMAIL).await.unwrap().unwrap().is_active);
}

#[tokio::test]
async fn test_confirm_registration_unknown_user() {
    let h = harness();

    let result = h
        .service
        .confirm_registration("ghost@example.com", "123456")
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}

#[tokio::test]
async fn test_confirm_registration_expired_code() {
    let h = harness();
    let registered = h.service.register(Some(EMAIL), None).await.unwrap();
    let code = registered.issued.verification_code;
    h.codes
        .set_created_at(code.id, Utc::now() - Duration::minutes(16))
        .await;

    let result = h.service.confirm_registration(EMAIL, &code.code).await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::CodeExpired))
    ));
    assert!(!h.codes.get(code.id).await.unwrap().used);
    assert!(!h.users.find_by_email(EMAIL).await.unwrap().unwrap().is_active);
}

#[tokio::test]
async fn test_request_login_code_requires_active_user() {
    let h = harness();
    h.service.register(Some(EMAIL), None).await.unwrap();

    let result = h.service.request_login_code(EMAIL).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailNotVerified))
    ));

    let unknown = h.service.request_login_code("ghost@example.com").await;
    assert!(matches!(
        unknown,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}

#[tokio::test]
async fn test_login_flow_issues_tokens() {
    let h = harness();
    registered_and_confirmed(&h).await;

    let issued = h.service.request_login_code(EMAIL).await.unwrap();
    assert!(issued.delivered);

    let response = h
        .service
        .verify_login_code(EMAIL, &issued.verification_code.code)
        .await
        .unwrap();

    let user = h.users.find_by_email(EMAIL).await.unwrap().unwrap();
    assert_eq!(response.user_id, user.id);
    assert_eq!(response.username, user.username);
    assert!(user.last_login_at.is_some());

    let claims = h
        .service
        .token_service()
        .verify_access_token(&response.access_token)
        .unwrap();
    assert_eq!(claims.user_id().unwrap(), user.id);
    assert!(claims.is_verified);
}

#[tokio::test]
async fn test_login_inactive_user_rejected_before_code_lookup() {
    let h = harness();
    let registered = h.service.register(Some(EMAIL), None).await.unwrap();
    let code = registered.issued.verification_code;

    // Even the correct, fresh code is refused
    let result = h.service.verify_login_code(EMAIL, &code.code).await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailNotVerified))
    ));
    assert!(!h.codes.get(code.id).await.unwrap().used);
}

#[tokio::test]
async fn test_login_code_single_use() {
    let h = harness();
    registered_and_confirmed(&h).await;
    let issued = h.service.request_login_code(EMAIL).await.unwrap();
    let code = issued.verification_code.code;

    h.service.verify_login_code(EMAIL, &code).await.unwrap();
    let replay = h.service.verify_login_code(EMAIL, &code).await;

    assert!(matches!(
        replay,
        Err(DomainError::Auth(AuthError::CodeNotFound))
    ));
}

#[tokio::test]
async fn test_login_expired_code() {
    let h = harness();
    registered_and_confirmed(&h).await;
    let issued = h.service.request_login_code(EMAIL).await.unwrap();
    h.codes
        .set_created_at(
            issued.verification_code.id,
            Utc::now() - Duration::minutes(15) - Duration::seconds(1),
        )
        .await;

    let result = h
        .service
        .verify_login_code(EMAIL, &issued.verification_code.code)
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::CodeExpired))
    ));
}

#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    let h = harness();
    registered_and_confirmed(&h).await;
    let issued = h.service.request_login_code(EMAIL).await.unwrap();
    let response = h
        .service
        .verify_login_code(EMAIL, &issued.verification_code.code)
        .await
        .unwrap();

    h.service.logout(&response.refresh_token).await.unwrap();

    let again = h.service.logout(&response.refresh_token).await;
    assert!(matches!(
        again,
        Err(DomainError::Auth(AuthError::InvalidOrExpiredToken))
    ));
}

#[tokio::test]
async fn test_logout_unknown_token() {
    let h = harness();

    let result = h.service.logout("never-issued").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidOrExpiredToken))
    ));
}
