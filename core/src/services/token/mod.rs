//! Token service module for identity tokens
//!
//! Tokens are stateless HS256 JWTs whose subject is the account email.
//! They cannot be revoked server-side; logging out means the client
//! discards its token.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;
