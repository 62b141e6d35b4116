//! Configuration for the authentication service

use stazy_shared::config::OtpConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Minutes a one-time code stays valid
    pub otp_expiry_minutes: i64,
    /// Whether a completed profile may be completed again (overwritten)
    pub allow_profile_overwrite: bool,
    /// Minimum password length in characters
    pub min_password_length: usize,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            otp_expiry_minutes: OtpConfig::default().expiry_minutes,
            allow_profile_overwrite: false,
            min_password_length: 8,
        }
    }
}

impl AuthServiceConfig {
    pub fn from_otp(otp: &OtpConfig) -> Self {
        Self {
            otp_expiry_minutes: otp.expiry_minutes,
            ..Default::default()
        }
    }
}
