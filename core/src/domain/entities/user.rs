//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A pending one-time code, stored only as a salted digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneTimeCode {
    /// Credential-hasher digest of the 6-digit code
    pub code_hash: String,

    pub expires_at: DateTime<Utc>,
}

impl OneTimeCode {
    pub fn new(code_hash: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            code_hash,
            expires_at,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// User entity
///
/// Email verification and password reset are independent tracks, each with
/// its own optional pending code. A code is cleared once it has been consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,

    /// Normalized (trimmed, lowercase) email; unique
    pub email: String,

    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Base64 salt shared by the password digest and pending code digests
    #[serde(skip_serializing)]
    pub salt: String,

    pub email_verified: bool,

    pub profile_completed: bool,

    pub first_name: Option<String>,

    pub last_name: Option<String>,

    pub phone_number: Option<String>,

    #[serde(skip_serializing)]
    pub email_verification: Option<OneTimeCode>,

    #[serde(skip_serializing)]
    pub password_reset: Option<OneTimeCode>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates an unverified user with an incomplete profile
    pub fn new(email: String, password_hash: String, salt: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            salt,
            email_verified: false,
            profile_completed: false,
            first_name: None,
            last_name: None,
            phone_number: None,
            email_verification: None,
            password_reset: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_email_verification(&mut self, code: OneTimeCode) {
        self.email_verification = Some(code);
        self.updated_at = Utc::now();
    }

    /// Marks the email verified and consumes the pending code
    pub fn mark_email_verified(&mut self) {
        self.email_verified = true;
        self.email_verification = None;
        self.updated_at = Utc::now();
    }

    pub fn set_password_reset(&mut self, code: OneTimeCode) {
        self.password_reset = Some(code);
        self.updated_at = Utc::now();
    }

    /// Replaces the password digest and consumes the pending reset code
    pub fn change_password(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.password_reset = None;
        self.updated_at = Utc::now();
    }

    pub fn complete_profile(&mut self, first_name: String, last_name: String, phone_number: String) {
        self.first_name = Some(first_name);
        self.last_name = Some(last_name);
        self.phone_number = Some(phone_number);
        self.profile_completed = true;
        self.updated_at = Utc::now();
    }
}
