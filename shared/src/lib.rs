//! Shared utilities and common types for the Stazy server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Error and response envelopes
//! - Email normalization and validation helpers

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CorsConfig, DatabaseConfig, Environment, JwtConfig, LoggingConfig, MailConfig,
    OtpConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{ApiResponse, MessageResponse};
pub use utils::validation;
