//! Tests for the verification service

use chrono::{Duration, Utc};
use std::sync::Arc;

use super::mocks::{FailingCodeRepository, MockNotificationService, RaceLostCodeRepository};
use crate::domain::entities::user::User;
use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::{AuthError, DomainError};
use crate::repositories::{InMemoryVerificationCodeRepository, VerificationCodeRepository};
use crate::services::verification::{VerificationService, VerificationServiceConfig};

type TestService = VerificationService<InMemoryVerificationCodeRepository, MockNotificationService>;

fn create_test_service(
    notifier_fails: bool,
) -> (
    TestService,
    Arc<InMemoryVerificationCodeRepository>,
    Arc<MockNotificationService>,
) {
    let repo = Arc::new(InMemoryVerificationCodeRepository::new());
    let notifier = Arc::new(MockNotificationService::new(notifier_fails));
    let service = VerificationService::new(
        repo.clone(),
        notifier.clone(),
        VerificationServiceConfig::default(),
    );
    (service, repo, notifier)
}

fn email_user() -> User {
    User::new(
        "user_abcdefghij".to_string(),
        Some("jane@example.com".to_string()),
        None,
        "hash".to_string(),
    )
}

fn window() -> Duration {
    Duration::minutes(15)
}

#[tokio::test]
async fn test_issue_code_persists_and_delivers() {
    let (service, repo, notifier) = create_test_service(false);
    let user = email_user();

    let issued = service.issue_code(&user).await.unwrap();

    assert!(issued.delivered);
    assert!(issued.message_id.is_some());
    assert!(!issued.verification_code.used);
    assert!(issued.verification_code.elapsed_at(Utc::now()) < Duration::seconds(5));

    let stored = repo.get(issued.verification_code.id).await.unwrap();
    assert_eq!(stored.user_id, user.id);

    let (recipient, body) = notifier.last_message().unwrap();
    assert_eq!(recipient, "jane@example.com");
    assert_eq!(
        body,
        format!("Your verification code: {}", issued.verification_code.code)
    );
}

#[tokio::test]
async fn test_issue_code_delivery_failure_is_not_fatal() {
    let (service, repo, _notifier) = create_test_service(true);
    let user = email_user();

    let issued = service.issue_code(&user).await.unwrap();

    assert!(!issued.delivered);
    assert!(issued.message_id.is_none());
    assert!(repo.get(issued.verification_code.id).await.is_some());
}

#[tokio::test]
async fn test_issue_code_without_email_skips_delivery() {
    let (service, repo, notifier) = create_test_service(false);
    let user = User::new(
        "user_phoneonly".to_string(),
        None,
        Some("+61412345678".to_string()),
        "hash".to_string(),
    );

    let issued = service.issue_code(&user).await.unwrap();

    assert!(!issued.delivered);
    assert_eq!(notifier.sent_count(), 0);
    assert!(repo.get(issued.verification_code.id).await.is_some());
}

#[tokio::test]
async fn test_issue_code_storage_failure() {
    let service = VerificationService::new(
        Arc::new(FailingCodeRepository),
        Arc::new(MockNotificationService::new(false)),
        VerificationServiceConfig::default(),
    );

    let result = service.issue_code(&email_user()).await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
}

#[tokio::test]
async fn test_validate_code_succeeds_once() {
    let (service, repo, _) = create_test_service(false);
    let user = email_user();
    let issued = service.issue_code(&user).await.unwrap();
    let code = issued.verification_code.code.clone();

    let consumed = service.validate_code(&user, &code, window()).await.unwrap();
    assert!(consumed.used);
    assert!(repo.get(consumed.id).await.unwrap().used);

    let replay = service.validate_code(&user, &code, window()).await;
    assert!(matches!(
        replay,
        Err(DomainError::Auth(AuthError::CodeNotFound))
    ));
}

#[tokio::test]
async fn test_validate_wrong_code() {
    let (service, _, _) = create_test_service(false);
    let user = email_user();
    let issued = service.issue_code(&user).await.unwrap();
    let wrong = if issued.verification_code.code == "000000" {
        "000001"
    } else {
        "000000"
    };

    let result = service.validate_code(&user, wrong, window()).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::CodeNotFound))
    ));
}

#[tokio::test]
async fn test_validate_expired_code_is_not_consumed() {
    let (service, repo, _) = create_test_service(false);
    let user = email_user();
    let issued = service.issue_code(&user).await.unwrap();
    let id = issued.verification_code.id;
    repo.set_created_at(id, Utc::now() - Duration::minutes(16))
        .await;

    let result = service
        .validate_code(&user, &issued.verification_code.code, window())
        .await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::CodeExpired))
    ));
    assert!(!repo.get(id).await.unwrap().used);

    // Replaying an expired code keeps reporting expiry
    let again = service
        .validate_code(&user, &issued.verification_code.code, window())
        .await;
    assert!(matches!(
        again,
        Err(DomainError::Auth(AuthError::CodeExpired))
    ));
}

#[tokio::test]
async fn test_validate_code_inside_window() {
    let (service, repo, _) = create_test_service(false);
    let user = email_user();
    let issued = service.issue_code(&user).await.unwrap();
    repo.set_created_at(
        issued.verification_code.id,
        Utc::now() - Duration::minutes(14),
    )
    .await;

    let result = service
        .validate_code(&user, &issued.verification_code.code, window())
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_several_unused_codes_coexist() {
    let (service, _, _) = create_test_service(false);
    let user = email_user();
    let first = service.issue_code(&user).await.unwrap();
    let second = service.issue_code(&user).await.unwrap();

    // Issuing a new code does not invalidate the earlier one
    assert!(service
        .validate_code(&user, &first.verification_code.code, window())
        .await
        .is_ok());
    assert!(service
        .validate_code(&user, &second.verification_code.code, window())
        .await
        .is_ok());
}

#[tokio::test]
async fn test_codes_are_scoped_to_user() {
    let (service, _, _) = create_test_service(false);
    let owner = email_user();
    let other = User::new(
        "user_otherother".to_string(),
        Some("other@example.com".to_string()),
        None,
        "hash".to_string(),
    );
    let issued = service.issue_code(&owner).await.unwrap();

    let result = service
        .validate_code(&other, &issued.verification_code.code, window())
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::CodeNotFound))
    ));
}

#[tokio::test]
async fn test_lookup_failure_propagates() {
    let service = VerificationService::new(
        Arc::new(FailingCodeRepository),
        Arc::new(MockNotificationService::new(false)),
        VerificationServiceConfig::default(),
    );

    let result = service
        .validate_code(&email_user(), "123456", window())
        .await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
}

#[tokio::test]
async fn test_malformed_code_skips_storage() {
    let service = VerificationService::new(
        Arc::new(FailingCodeRepository),
        Arc::new(MockNotificationService::new(false)),
        VerificationServiceConfig::default(),
    );

    for submitted in ["12345", "1234567", "12a456", ""] {
        let result = service
            .validate_code(&email_user(), submitted, window())
            .await;
        assert!(
            matches!(result, Err(DomainError::Auth(AuthError::CodeNotFound))),
            "{:?}",
            submitted
        );
    }
}

#[tokio::test]
async fn test_consume_lost_to_concurrent_caller() {
    let user = email_user();
    let service = VerificationService::new(
        Arc::new(RaceLostCodeRepository {
            code: VerificationCode::with_code(user.id, "123456"),
        }),
        Arc::new(MockNotificationService::new(false)),
        VerificationServiceConfig::default(),
    );

    let result = service.validate_code(&user, "123456", window()).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::CodeNotFound))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_validation_single_winner() {
    let (service, repo, _) = create_test_service(false);
    let service = Arc::new(service);
    let user = email_user();
    let issued = service.issue_code(&user).await.unwrap();
    let code = issued.verification_code.code.clone();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = service.clone();
        let user = user.clone();
        let code = code.clone();
        handles.push(tokio::spawn(async move {
            service.validate_code(&user, &code, window()).await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(DomainError::Auth(AuthError::CodeNotFound)) => {}
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }

    assert_eq!(successes, 1);
    assert!(repo.get(issued.verification_code.id).await.unwrap().used);
}
