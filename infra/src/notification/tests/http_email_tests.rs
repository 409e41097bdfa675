use ac_shared::config::{EmailConfig, EmailProvider};
use reqwest::StatusCode;

use crate::notification::http_email::is_retryable_status;
use crate::notification::{create_email_service, EmailService, HttpEmailService};
use crate::InfrastructureError;

fn http_config(api_url: &str) -> EmailConfig {
    EmailConfig {
        provider: EmailProvider::Http,
        api_url: api_url.to_string(),
        api_key: "test-key".to_string(),
        max_retries: 2,
        retry_delay_ms: 1,
        request_timeout_secs: 2,
        ..Default::default()
    }
}

#[test]
fn test_missing_url_is_config_error() {
    let result = HttpEmailService::new(http_config(""));
    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}

#[test]
fn test_missing_key_is_config_error() {
    let mut config = http_config("http://127.0.0.1:1/send");
    config.api_key = "  ".to_string();

    let result = HttpEmailService::new(config);
    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}

#[test]
fn test_retryable_statuses() {
    assert!(is_retryable_status(StatusCode::INTERNAL_SERVER_ERROR));
    assert!(is_retryable_status(StatusCode::BAD_GATEWAY));
    assert!(is_retryable_status(StatusCode::SERVICE_UNAVAILABLE));
    assert!(is_retryable_status(StatusCode::TOO_MANY_REQUESTS));

    assert!(!is_retryable_status(StatusCode::BAD_REQUEST));
    assert!(!is_retryable_status(StatusCode::UNAUTHORIZED));
    assert!(!is_retryable_status(StatusCode::UNPROCESSABLE_ENTITY));
}

#[tokio::test]
async fn test_unreachable_relay_fails_after_retries() {
    let service = HttpEmailService::new(http_config("http://127.0.0.1:1/send")).unwrap();

    let result = service
        .send_email("alice@example.com", "Code", "Your verification code: 123456")
        .await;

    match result {
        Err(InfrastructureError::Email(message)) => {
            assert!(message.contains("after 2 attempts"), "{}", message)
        }
        other => panic!("expected email error, got {:?}", other),
    }
}

#[test]
fn test_factory_selects_provider() {
    let mock = create_email_service(&EmailConfig::default()).unwrap();
    assert_eq!(mock.provider_name(), "Mock");

    let http = create_email_service(&http_config("http://127.0.0.1:1/send")).unwrap();
    assert_eq!(http.provider_name(), "Http");

    assert!(create_email_service(&http_config("")).is_err());
}
