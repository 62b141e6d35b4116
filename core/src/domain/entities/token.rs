//! Identity token claims.

use serde::{Deserialize, Serialize};

/// JWT claims carried by an identity token
///
/// The subject is the account email. Timestamps are Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub nbf: i64,
    pub iss: String,
    pub jti: String,
}

impl Claims {
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}
