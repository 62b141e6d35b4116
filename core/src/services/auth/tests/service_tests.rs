//! Unit tests for authentication service

use crate::errors::{AuthError, DomainError, ValidationError};
use crate::repositories::UserRepository;
use crate::services::auth::AuthServiceConfig;

use super::mocks::*;

const EMAIL: &str = "guest@example.com";
const PASSWORD: &str = "Secret123";

#[tokio::test]
async fn test_signup_returns_token_for_unverified_account() {
    let ctx = TestContext::new();

    let response = ctx.service.signup(EMAIL, PASSWORD).await.unwrap();

    assert_eq!(response.email, EMAIL);
    assert_eq!(response.token_type, "Bearer");
    assert_eq!(response.expires_in, 3600);
    assert!(!response.email_verified);
    assert!(!response.profile_completed);
    assert_eq!(ctx.tokens.verify(&response.token).unwrap(), EMAIL);

    let user = ctx.users.find_by_email(EMAIL).await.unwrap().unwrap();
    assert!(user.email_verification.is_some());
    assert_ne!(user.password_hash, PASSWORD);
    assert_eq!(ctx.mail.sent_count(), 1);
}

#[tokio::test]
async fn test_signup_normalizes_email() {
    let ctx = TestContext::new();

    let response = ctx.service.signup("  Guest@Example.COM ", PASSWORD).await.unwrap();

    assert_eq!(response.email, EMAIL);
    assert!(ctx.users.find_by_email(EMAIL).await.unwrap().is_some());
}

#[tokio::test]
async fn test_signup_rejects_duplicate_email() {
    let ctx = TestContext::new();
    ctx.service.signup(EMAIL, PASSWORD).await.unwrap();

    let result = ctx.service.signup("GUEST@example.com", "Another123").await;

    assert!(matches!(result, Err(DomainError::Auth(AuthError::DuplicateAccount))));
    assert_eq!(ctx.users.len().await, 1);
}

#[tokio::test]
async fn test_signup_validates_input() {
    let ctx = TestContext::new();

    let result = ctx.service.signup("not-an-email", PASSWORD).await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::InvalidEmail))
    ));

    let result = ctx.service.signup(EMAIL, "short").await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::TooShort { min: 8, .. }))
    ));
}

#[tokio::test]
async fn test_signup_survives_mail_failure() {
    let ctx = TestContext::new();
    ctx.mail.set_simulate_failure(true);

    let response = ctx.service.signup(EMAIL, PASSWORD).await;

    assert!(response.is_ok());
    assert_eq!(ctx.mail.sent_count(), 0);
}

#[tokio::test]
async fn test_login_success_and_failures() {
    let ctx = TestContext::new();
    ctx.service.signup(EMAIL, PASSWORD).await.unwrap();

    let response = ctx.service.login(" GUEST@example.com", PASSWORD).await.unwrap();
    assert_eq!(ctx.tokens.verify(&response.token).unwrap(), EMAIL);

    let result = ctx.service.login(EMAIL, "Wrong1234").await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::InvalidCredentials))));

    let result = ctx.service.login(EMAIL, "").await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::InvalidCredentials))));

    let result = ctx.service.login("nobody@example.com", PASSWORD).await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::AccountNotFound))));
}

#[tokio::test]
async fn test_verify_email_consumes_code() {
    let ctx = TestContext::new();
    ctx.service.signup(EMAIL, PASSWORD).await.unwrap();
    let code = ctx.mail.last_code_for(EMAIL).unwrap();

    let profile = ctx.service.verify_email(EMAIL, &code).await.unwrap();
    assert!(profile.email_verified);

    let user = ctx.users.find_by_email(EMAIL).await.unwrap().unwrap();
    assert!(user.email_verified);
    assert!(user.email_verification.is_none());

    // Replaying the same code fails
    let result = ctx.service.verify_email(EMAIL, &code).await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::AlreadyVerified))));

    let login = ctx.service.login(EMAIL, PASSWORD).await.unwrap();
    assert!(login.email_verified);
}

#[tokio::test]
async fn test_verify_email_wrong_code_keeps_pending_code() {
    let ctx = TestContext::new();
    ctx.service.signup(EMAIL, PASSWORD).await.unwrap();
    let code = ctx.mail.last_code_for(EMAIL).unwrap();

    let result = ctx.service.verify_email(EMAIL, &wrong_code(&code)).await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::InvalidToken))));

    // The right code still works afterwards
    assert!(ctx.service.verify_email(EMAIL, &code).await.is_ok());
}

#[tokio::test]
async fn test_verify_email_expired_code() {
    let ctx = TestContext::new();
    ctx.service.signup(EMAIL, PASSWORD).await.unwrap();
    let code = ctx.mail.last_code_for(EMAIL).unwrap();
    ctx.expire_verification_code(EMAIL).await;

    let result = ctx.service.verify_email(EMAIL, &code).await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::TokenExpired))));

    // A wrong code is still just invalid, even when the pending one expired
    let result = ctx.service.verify_email(EMAIL, &wrong_code(&code)).await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::InvalidToken))));

    let user = ctx.users.find_by_email(EMAIL).await.unwrap().unwrap();
    assert!(!user.email_verified);
}

#[tokio::test]
async fn test_resend_verification_replaces_code() {
    let ctx = TestContext::new();
    ctx.service.signup(EMAIL, PASSWORD).await.unwrap();
    let first = ctx.mail.last_code_for(EMAIL).unwrap();

    let expires_at = ctx.service.send_email_verification(EMAIL).await.unwrap();
    let second = ctx.mail.last_code_for(EMAIL).unwrap();

    assert!(expires_at > chrono::Utc::now());
    assert_eq!(ctx.mail.sent_count(), 2);
    if first != second {
        let result = ctx.service.verify_email(EMAIL, &first).await;
        assert!(matches!(result, Err(DomainError::Auth(AuthError::InvalidToken))));
    }
    assert!(ctx.service.verify_email(EMAIL, &second).await.is_ok());

    let result = ctx.service.send_email_verification(EMAIL).await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::AlreadyVerified))));
}

#[tokio::test]
async fn test_password_reset_flow() {
    let ctx = TestContext::new();
    ctx.service.signup(EMAIL, PASSWORD).await.unwrap();
    let salt_before = ctx.users.find_by_email(EMAIL).await.unwrap().unwrap().salt;

    ctx.service.send_password_reset(EMAIL).await.unwrap();
    let code = ctx.mail.last_code_for(EMAIL).unwrap();

    ctx.service
        .reset_password(EMAIL, &code, "NewSecret456")
        .await
        .unwrap();

    let user = ctx.users.find_by_email(EMAIL).await.unwrap().unwrap();
    assert!(user.password_reset.is_none());
    assert_eq!(user.salt, salt_before);

    assert!(ctx.service.login(EMAIL, "NewSecret456").await.is_ok());
    let result = ctx.service.login(EMAIL, PASSWORD).await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::InvalidCredentials))));

    // Reset code is single-use
    let result = ctx.service.reset_password(EMAIL, &code, "Third789!").await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::InvalidToken))));
}

#[tokio::test]
async fn test_password_reset_expired_and_wrong_codes() {
    let ctx = TestContext::new();
    ctx.service.signup(EMAIL, PASSWORD).await.unwrap();
    ctx.service.send_password_reset(EMAIL).await.unwrap();
    let code = ctx.mail.last_code_for(EMAIL).unwrap();

    let result = ctx.service.reset_password(EMAIL, &wrong_code(&code), "NewSecret456").await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::InvalidToken))));

    ctx.expire_reset_code(EMAIL).await;
    let result = ctx.service.reset_password(EMAIL, &code, "NewSecret456").await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::TokenExpired))));

    assert!(ctx.service.login(EMAIL, PASSWORD).await.is_ok());
}

#[tokio::test]
async fn test_password_reset_unknown_email_is_silent() {
    let ctx = TestContext::new();

    assert!(ctx.service.send_password_reset("nobody@example.com").await.is_ok());
    assert_eq!(ctx.mail.sent_count(), 0);

    let result = ctx
        .service
        .reset_password("nobody@example.com", "123456", "NewSecret456")
        .await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::InvalidToken))));
}

#[tokio::test]
async fn test_reset_and_verification_codes_are_independent() {
    let ctx = TestContext::new();
    ctx.service.signup(EMAIL, PASSWORD).await.unwrap();
    let verification = ctx.mail.last_code_for(EMAIL).unwrap();
    ctx.service.send_password_reset(EMAIL).await.unwrap();
    let reset = ctx.mail.last_code_for(EMAIL).unwrap();

    ctx.service.reset_password(EMAIL, &reset, "NewSecret456").await.unwrap();

    // The verification track is untouched by the reset
    assert!(ctx.service.verify_email(EMAIL, &verification).await.is_ok());
}

#[tokio::test]
async fn test_complete_profile_requires_verification() {
    let ctx = TestContext::new();
    ctx.service.signup(EMAIL, PASSWORD).await.unwrap();

    let result = ctx
        .service
        .complete_profile(EMAIL, "Jane", "Doe", "+15551234567")
        .await;

    assert!(matches!(result, Err(DomainError::Auth(AuthError::EmailNotVerified))));
}

#[tokio::test]
async fn test_complete_profile_once() {
    let ctx = TestContext::new();
    ctx.verified_user(EMAIL, PASSWORD).await;

    let profile = ctx
        .service
        .complete_profile(EMAIL, " Jane ", "Doe", "+15551234567")
        .await
        .unwrap();
    assert!(profile.profile_completed);
    assert_eq!(profile.first_name.as_deref(), Some("Jane"));

    let result = ctx
        .service
        .complete_profile(EMAIL, "Janet", "Doe", "+15551234567")
        .await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::ProfileAlreadyComplete))));

    let login = ctx.service.login(EMAIL, PASSWORD).await.unwrap();
    assert!(login.profile_completed);
}

#[tokio::test]
async fn test_complete_profile_overwrite_when_allowed() {
    let ctx = TestContext::with_config(AuthServiceConfig {
        allow_profile_overwrite: true,
        ..Default::default()
    });
    ctx.verified_user(EMAIL, PASSWORD).await;

    ctx.service
        .complete_profile(EMAIL, "Jane", "Doe", "+15551234567")
        .await
        .unwrap();
    let profile = ctx
        .service
        .complete_profile(EMAIL, "Janet", "Doe", "+15557654321")
        .await
        .unwrap();

    assert_eq!(profile.first_name.as_deref(), Some("Janet"));
    assert_eq!(profile.phone_number.as_deref(), Some("+15557654321"));
}

#[tokio::test]
async fn test_complete_profile_rejects_blank_fields() {
    let ctx = TestContext::new();
    ctx.verified_user(EMAIL, PASSWORD).await;

    let result = ctx.service.complete_profile(EMAIL, "  ", "Doe", "+15551234567").await;

    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::RequiredField { .. }))
    ));
}

#[tokio::test]
async fn test_profile_lookup() {
    let ctx = TestContext::new();
    ctx.service.signup(EMAIL, PASSWORD).await.unwrap();

    let profile = ctx.service.profile(EMAIL).await.unwrap();
    assert_eq!(profile.email, EMAIL);

    let result = ctx.service.profile("nobody@example.com").await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::AccountNotFound))));
}

#[tokio::test]
async fn test_code_lifetime_is_clamped() {
    let ctx = TestContext::with_config(AuthServiceConfig {
        otp_expiry_minutes: 240,
        ..Default::default()
    });
    assert_eq!(ctx.service.config().otp_expiry_minutes, 15);

    let before = chrono::Utc::now();
    ctx.service.signup(EMAIL, PASSWORD).await.unwrap();
    let user = ctx.users.find_by_email(EMAIL).await.unwrap().unwrap();
    let expires_at = user.email_verification.unwrap().expires_at;
    assert!(expires_at <= chrono::Utc::now() + chrono::Duration::minutes(15));
    assert!(expires_at > before + chrono::Duration::minutes(14));

    let ctx = TestContext::with_config(AuthServiceConfig {
        otp_expiry_minutes: 0,
        ..Default::default()
    });
    assert_eq!(ctx.service.config().otp_expiry_minutes, 5);
}
