//! Authentication response and profile view returned to clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::user::User;

/// Returned by signup and login
///
/// The status flags let the client route the user through onboarding
/// (email verification, then profile completion).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Signed identity token
    pub token: String,

    pub token_type: String,

    /// Token lifetime in seconds
    pub expires_in: i64,

    pub email: String,

    pub email_verified: bool,

    pub profile_completed: bool,
}

impl AuthResponse {
    pub fn for_user(token: String, expires_in: i64, user: &User) -> Self {
        Self {
            token,
            token_type: String::from("Bearer"),
            expires_in,
            email: user.email.clone(),
            email_verified: user.email_verified,
            profile_completed: user.profile_completed,
        }
    }
}

/// Public view of an account; never carries secrets
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub email_verified: bool,
    pub profile_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone_number: user.phone_number.clone(),
            email_verified: user.email_verified,
            profile_completed: user.profile_completed,
            created_at: user.created_at,
        }
    }
}
