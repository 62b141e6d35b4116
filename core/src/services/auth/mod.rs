//! Authentication service module
//!
//! This module covers the account lifecycle:
//! - Signup and login with salted password digests
//! - Email verification by one-time code
//! - Password reset by one-time code
//! - Profile completion

mod config;
mod otp;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use otp::generate_code;
pub use service::AuthService;
