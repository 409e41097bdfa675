use ac_core::errors::DomainError;

use crate::database::mysql::parse_uuid;
use crate::database::mysql::user_repository_impl::duplicate_field;

#[test]
fn test_duplicate_field_ignores_non_database_errors() {
    assert_eq!(duplicate_field(&sqlx::Error::RowNotFound), None);
    assert_eq!(duplicate_field(&sqlx::Error::PoolTimedOut), None);
}

#[test]
fn test_parse_uuid() {
    let id = uuid::Uuid::new_v4();
    assert_eq!(parse_uuid(&id.to_string()).unwrap(), id);

    let err = parse_uuid("not-a-uuid").unwrap_err();
    assert!(matches!(err, DomainError::Internal { .. }));
}
