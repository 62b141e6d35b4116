//! Server configuration module

use serde::{Deserialize, Serialize};

use super::{env_or, Environment};

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    #[serde(default)]
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
            workers: 0,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("SERVER_HOST").unwrap_or(defaults.host),
            port: env_or("SERVER_PORT", defaults.port),
            workers: env_or("SERVER_WORKERS", defaults.workers),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origins; empty together with `allow_any_origin = false` means same-origin only
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    #[serde(default)]
    pub allow_any_origin: bool,

    /// Max age for preflight cache in seconds
    #[serde(default = "default_max_age")]
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![],
            allow_any_origin: false,
            max_age: default_max_age(),
        }
    }
}

impl CorsConfig {
    /// A permissive CORS configuration for development
    pub fn development() -> Self {
        Self {
            allowed_origins: vec![],
            allow_any_origin: true,
            max_age: 3600,
        }
    }

    pub fn from_env(env: Environment) -> Self {
        let mut config = if env.is_production() {
            Self::default()
        } else {
            Self::development()
        };
        if let Ok(origins) = std::env::var("ALLOWED_ORIGINS") {
            config.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }
        config.max_age = env_or("CORS_MAX_AGE", config.max_age);
        config
    }
}

fn default_max_age() -> usize {
    86400 // 24 hours
}
