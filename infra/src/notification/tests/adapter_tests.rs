use ac_core::services::verification::NotificationServiceTrait;

use crate::notification::{EmailServiceAdapter, MockEmailService};

#[tokio::test]
async fn test_adapter_delivers_through_inner_service() {
    let mock = MockEmailService::new();
    let adapter = EmailServiceAdapter::new(Box::new(mock.clone()), "Your verification code");

    let id = adapter
        .send("alice@example.com", "Your verification code: 123456")
        .await
        .unwrap();

    assert!(id.starts_with("mock_"));
    assert_eq!(mock.get_message_count(), 1);
    assert_eq!(adapter.provider_name(), "Mock");
}

#[tokio::test]
async fn test_adapter_stringifies_errors() {
    let adapter = EmailServiceAdapter::new(Box::new(MockEmailService::failing()), "Code");

    let err = adapter.send("alice@example.com", "body").await.unwrap_err();
    assert!(err.contains("Simulated email sending failure"));
}
