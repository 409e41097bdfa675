//! Unit tests for token entities

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::{
    Claims, RefreshToken, TokenPair, ACCESS_TOKEN_EXPIRY_MINUTES, JWT_AUDIENCE, JWT_ISSUER,
    REFRESH_TOKEN_EXPIRY_DAYS,
};

fn access_claims(user_id: Uuid, is_verified: bool) -> Claims {
    Claims::new(
        user_id,
        is_verified,
        Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES),
        JWT_ISSUER,
        JWT_AUDIENCE,
    )
}

#[test]
fn test_access_token_claims() {
    let user_id = Uuid::new_v4();
    let claims = access_claims(user_id, true);

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.iss, JWT_ISSUER);
    assert_eq!(claims.aud, JWT_AUDIENCE);
    assert!(claims.is_verified);
    assert_eq!(claims.nbf, claims.iat);
    assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_EXPIRY_MINUTES * 60);
}

#[test]
fn test_custom_claims_lifetime() {
    let claims = Claims::new(Uuid::new_v4(), false, Duration::seconds(30), "iss", "aud");

    assert_eq!(claims.exp - claims.iat, 30);
    assert_eq!(claims.iss, "iss");
    assert_eq!(claims.aud, "aud");
}

#[test]
fn test_claims_have_unique_ids() {
    let user_id = Uuid::new_v4();
    let a = access_claims(user_id, false);
    let b = access_claims(user_id, false);

    assert_ne!(a.jti, b.jti);
}

#[test]
fn test_claims_user_id_parsing() {
    let user_id = Uuid::new_v4();
    let claims = access_claims(user_id, false);

    assert_eq!(claims.user_id().unwrap(), user_id);
}

#[test]
fn test_refresh_token_lifecycle() {
    let user_id = Uuid::new_v4();
    let mut token = RefreshToken::new(
        user_id,
        "hash".to_string(),
        Duration::days(REFRESH_TOKEN_EXPIRY_DAYS),
    );

    assert_eq!(token.user_id, user_id);
    assert!(token.is_valid());

    token.revoke();
    assert!(token.is_revoked);
    assert!(!token.is_valid());
}

#[test]
fn test_refresh_token_expiration() {
    let mut token = RefreshToken::new(Uuid::new_v4(), "hash".to_string(), Duration::days(1));
    token.expires_at = Utc::now() - Duration::seconds(1);

    assert!(token.is_expired());
    assert!(!token.is_valid());
}

#[test]
fn test_token_pair_creation() {
    let pair = TokenPair::new("access".to_string(), "refresh".to_string(), 900, 604800);

    assert_eq!(pair.access_token, "access");
    assert_eq!(pair.refresh_token, "refresh");
    assert_eq!(pair.access_expires_in, 900);
    assert_eq!(pair.refresh_expires_in, 604800);
}
