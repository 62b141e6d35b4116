//! Outbound mail configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Which mail dispatcher the server wires in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    Smtp,
    Mock,
}

impl std::str::FromStr for MailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smtp" => Ok(MailProvider::Smtp),
            "mock" | "log" => Ok(MailProvider::Mock),
            _ => Err(format!("Invalid mail provider: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    pub provider: MailProvider,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    #[serde(skip_serializing)]
    pub smtp_password: String,
    /// RFC 5322 mailbox used in the From header
    pub from_address: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: MailProvider::Mock,
            smtp_host: String::from("localhost"),
            smtp_port: 587,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: String::from("Stazy <no-reply@stazy.app>"),
        }
    }
}

impl MailConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: env_or("MAIL_PROVIDER", defaults.provider),
            smtp_host: std::env::var("SMTP_HOST").unwrap_or(defaults.smtp_host),
            smtp_port: env_or("SMTP_PORT", defaults.smtp_port),
            smtp_username: std::env::var("SMTP_USERNAME").unwrap_or(defaults.smtp_username),
            smtp_password: std::env::var("SMTP_PASSWORD").unwrap_or(defaults.smtp_password),
            from_address: std::env::var("MAIL_FROM").unwrap_or(defaults.from_address),
        }
    }
}
