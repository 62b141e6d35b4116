//! Unit tests for user entity

use chrono::{Duration, Utc};

use crate::domain::entities::user::{OneTimeCode, User};

fn new_user() -> User {
    User::new(
        "jane@example.com".to_string(),
        "digest".to_string(),
        "salt".to_string(),
    )
}

#[test]
fn test_new_user_creation() {
    let user = new_user();

    assert_eq!(user.email, "jane@example.com");
    assert!(!user.email_verified);
    assert!(!user.profile_completed);
    assert!(user.email_verification.is_none());
    assert!(user.password_reset.is_none());
}

#[test]
fn test_mark_email_verified_clears_code() {
    let mut user = new_user();
    user.set_email_verification(OneTimeCode::new(
        "code-digest".to_string(),
        Utc::now() + Duration::minutes(5),
    ));
    assert!(user.email_verification.is_some());

    user.mark_email_verified();
    assert!(user.email_verified);
    assert!(user.email_verification.is_none());
}

#[test]
fn test_change_password_clears_reset_code_only() {
    let mut user = new_user();
    let expires = Utc::now() + Duration::minutes(5);
    user.set_email_verification(OneTimeCode::new("verify".to_string(), expires));
    user.set_password_reset(OneTimeCode::new("reset".to_string(), expires));

    user.change_password("new-digest".to_string());
    assert_eq!(user.password_hash, "new-digest");
    assert!(user.password_reset.is_none());
    assert!(user.email_verification.is_some());
}

#[test]
fn test_one_time_code_expiry_boundary() {
    let now = Utc::now();
    let code = OneTimeCode::new("x".to_string(), now);
    assert!(code.is_expired_at(now));
    assert!(!code.is_expired_at(now - Duration::seconds(1)));
}

#[test]
fn test_serialization_hides_secrets() {
    let mut user = new_user();
    user.set_password_reset(OneTimeCode::new("reset".to_string(), Utc::now()));
    let json = serde_json::to_value(&user).unwrap();

    assert!(json.get("password_hash").is_none());
    assert!(json.get("salt").is_none());
    assert!(json.get("password_reset").is_none());
    assert_eq!(json["email"], "jane@example.com");
}
