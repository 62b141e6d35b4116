//! Outbound mail dispatch
//!
//! The auth workflow only needs fire-and-forget delivery, so the trait
//! reports failures as plain strings for logging.

mod mock;
mod templates;

pub use mock::{MockMailService, SentMail};
pub use templates::{password_reset_mail, verification_mail, MailContent};

use async_trait::async_trait;

/// Trait for mail delivery integration
#[async_trait]
pub trait MailServiceTrait: Send + Sync {
    /// Send a plain-text mail; returns a provider message id
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, String>;
}
