//! Outbound mail dispatchers
//!
//! Both dispatchers implement the core `MailServiceTrait`, so the auth
//! workflow never knows which one the server wired in.

mod log_mail;
mod smtp;

pub use log_mail::LogMailService;
pub use smtp::SmtpMailService;

use std::sync::Arc;

use stazy_core::services::MailServiceTrait;
use stazy_shared::config::{MailConfig, MailProvider};

use crate::InfrastructureError;

/// Create the mail dispatcher selected by configuration
///
/// `Smtp` requires a reachable relay host name; `Mock` logs every mail
/// instead of delivering it.
pub fn create_mail_service(
    config: &MailConfig,
) -> Result<Arc<dyn MailServiceTrait>, InfrastructureError> {
    match config.provider {
        MailProvider::Smtp => {
            tracing::info!(host = %config.smtp_host, port = config.smtp_port, "Using SMTP mail service");
            Ok(Arc::new(SmtpMailService::new(config)?))
        }
        MailProvider::Mock => {
            tracing::info!("Using logging mail service");
            Ok(Arc::new(LogMailService::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_logs_instead_of_sending() {
        let service = create_mail_service(&MailConfig::default()).unwrap();

        let id = service
            .send("guest@example.com", "Subject", "Body")
            .await
            .unwrap();
        assert!(id.starts_with("log-mail-"));
    }

    #[tokio::test]
    async fn test_smtp_provider_builds_transport() {
        let config = MailConfig {
            provider: MailProvider::Smtp,
            smtp_host: "smtp.example.com".to_string(),
            smtp_username: "mailer".to_string(),
            smtp_password: "secret".to_string(),
            ..MailConfig::default()
        };

        assert!(create_mail_service(&config).is_ok());
    }
}
