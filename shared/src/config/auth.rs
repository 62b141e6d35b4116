//! Authentication configuration: identity tokens and one-time codes

use serde::{Deserialize, Serialize};

use super::env_or;

/// Shortest HMAC-SHA256 key accepted for signing identity tokens.
pub const MIN_JWT_SECRET_BYTES: usize = 32;

/// JWT configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric signing key
    pub secret: String,

    /// Token lifetime in seconds
    pub ttl_seconds: i64,

    /// `iss` claim stamped on issued tokens
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("stazy-development-secret-change-me-in-production"),
            ttl_seconds: 3600,
            issuer: String::from("stazy"),
        }
    }
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret: std::env::var("JWT_SECRET").unwrap_or(defaults.secret),
            ttl_seconds: env_or("JWT_TTL_SECONDS", defaults.ttl_seconds),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        }
    }

    pub fn with_ttl_seconds(mut self, ttl: i64) -> Self {
        self.ttl_seconds = ttl;
        self
    }

    /// Whether the secret is long enough for HS256
    pub fn has_valid_secret(&self) -> bool {
        self.secret.len() >= MIN_JWT_SECRET_BYTES
    }
}

/// One-time code (email verification / password reset) settings
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Minutes a freshly issued code stays valid
    pub expiry_minutes: i64,
}

impl OtpConfig {
    pub const MIN_EXPIRY_MINUTES: i64 = 5;
    pub const MAX_EXPIRY_MINUTES: i64 = 15;

    /// Build a config, clamping the expiry into the supported window
    pub fn new(expiry_minutes: i64) -> Self {
        Self {
            expiry_minutes: expiry_minutes.clamp(Self::MIN_EXPIRY_MINUTES, Self::MAX_EXPIRY_MINUTES),
        }
    }

    pub fn from_env() -> Self {
        Self::new(env_or("OTP_EXPIRY_MINUTES", Self::MIN_EXPIRY_MINUTES))
    }
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self::new(Self::MIN_EXPIRY_MINUTES)
    }
}
