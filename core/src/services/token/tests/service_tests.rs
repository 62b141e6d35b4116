//! Unit tests for token service

use jsonwebtoken::{encode, EncodingKey, Header};

use crate::domain::entities::token::Claims;
use crate::errors::TokenError;
use crate::services::token::{TokenService, TokenServiceConfig};

const SECRET: &str = "test-secret-key-that-is-long-enough-for-hs256";

fn create_test_service() -> TokenService {
    TokenService::new(TokenServiceConfig {
        secret: SECRET.to_string(),
        ttl_seconds: 3600,
        issuer: "stazy".to_string(),
    })
    .unwrap()
}

#[test]
fn test_issue_then_verify_returns_subject() {
    let service = create_test_service();

    let token = service.issue("guest@example.com").unwrap();

    assert_eq!(service.verify(&token).unwrap(), "guest@example.com");
    assert!(!service.is_expired(&token));
}

#[test]
fn test_claims_carry_ttl_and_issuer() {
    let service = create_test_service();
    let token = service.issue("guest@example.com").unwrap();

    let claims = service.decode_claims(&token).unwrap();

    assert_eq!(claims.exp - claims.iat, 3600);
    assert_eq!(claims.iss, "stazy");
    assert_eq!(service.ttl_seconds(), 3600);
}

#[test]
fn test_zero_ttl_token_is_expired_immediately() {
    let service = TokenService::new(TokenServiceConfig {
        secret: SECRET.to_string(),
        ttl_seconds: 0,
        issuer: "stazy".to_string(),
    })
    .unwrap();

    let token = service.issue("guest@example.com").unwrap();

    assert_eq!(service.verify(&token), Err(TokenError::TokenExpired));
    assert!(service.is_expired(&token));
}

#[test]
fn test_expired_claims_are_reported_as_expired() {
    let service = create_test_service();
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: "guest@example.com".to_string(),
        iat: now - 7200,
        exp: now - 3600,
        nbf: now - 7200,
        iss: "stazy".to_string(),
        jti: "old".to_string(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    assert_eq!(service.verify(&token), Err(TokenError::TokenExpired));
}

#[test]
fn test_wrong_secret_is_invalid() {
    let service = create_test_service();
    let other = TokenService::new(TokenServiceConfig {
        secret: "another-secret-key-that-is-also-long-enough".to_string(),
        ttl_seconds: 3600,
        issuer: "stazy".to_string(),
    })
    .unwrap();

    let token = other.issue("guest@example.com").unwrap();

    assert_eq!(service.verify(&token), Err(TokenError::TokenInvalid));
    assert!(service.is_expired(&token));
}

#[test]
fn test_wrong_issuer_is_invalid() {
    let service = create_test_service();
    let other = TokenService::new(TokenServiceConfig {
        secret: SECRET.to_string(),
        ttl_seconds: 3600,
        issuer: "someone-else".to_string(),
    })
    .unwrap();

    let token = other.issue("guest@example.com").unwrap();

    assert_eq!(service.verify(&token), Err(TokenError::TokenInvalid));
}

#[test]
fn test_malformed_token_is_invalid() {
    let service = create_test_service();

    assert_eq!(service.verify("not.a.jwt"), Err(TokenError::TokenInvalid));
    assert_eq!(service.verify(""), Err(TokenError::TokenInvalid));
}

#[test]
fn test_short_secret_is_rejected() {
    let result = TokenService::new(TokenServiceConfig {
        secret: "too-short".to_string(),
        ttl_seconds: 3600,
        issuer: "stazy".to_string(),
    });

    assert!(matches!(
        result,
        Err(TokenError::KeyTooShort { min: 32, actual: 9 })
    ));
}
