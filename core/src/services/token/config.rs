//! Configuration for the token service

use stazy_shared::config::JwtConfig;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// HS256 signing secret
    pub secret: String,
    /// Token lifetime in seconds
    pub ttl_seconds: i64,
    /// Expected and stamped `iss` claim
    pub issuer: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        JwtConfig::default().into()
    }
}

impl From<JwtConfig> for TokenServiceConfig {
    fn from(config: JwtConfig) -> Self {
        Self {
            secret: config.secret,
            ttl_seconds: config.ttl_seconds,
            issuer: config.issuer,
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        config.clone().into()
    }
}
