//! SMTP delivery through lettre.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use uuid::Uuid;

use stazy_core::services::MailServiceTrait;
use stazy_shared::config::MailConfig;
use stazy_shared::validation::mask_email;

use crate::InfrastructureError;

/// Mail dispatcher backed by an authenticated STARTTLS relay
#[derive(Clone)]
pub struct SmtpMailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    /// Domain part used for generated Message-ID headers
    id_domain: String,
}

impl SmtpMailService {
    /// # Errors
    /// Returns `InfrastructureError::Config` when the relay host or the
    /// from address is invalid.
    pub fn new(config: &MailConfig) -> Result<Self, InfrastructureError> {
        let from: Mailbox = config.from_address.parse().map_err(|e| {
            InfrastructureError::Config(format!(
                "Invalid mail from address {}: {}",
                config.from_address, e
            ))
        })?;

        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.clone(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| InfrastructureError::Config(format!("Invalid SMTP relay: {}", e)))?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            id_domain: from.email.domain().to_string(),
            mailer,
            from,
        })
    }

    /// Build the outgoing message and its Message-ID
    fn build_message(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<(Message, String), InfrastructureError> {
        let recipient: Mailbox = to
            .parse()
            .map_err(|_| InfrastructureError::Mail(format!("Invalid recipient: {}", mask_email(to))))?;
        let message_id = format!("<{}@{}>", Uuid::new_v4(), self.id_domain);

        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(subject)
            .message_id(Some(message_id.clone()))
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| InfrastructureError::Mail(format!("Failed to build message: {}", e)))?;

        Ok((message, message_id))
    }
}

#[async_trait]
impl MailServiceTrait for SmtpMailService {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, String> {
        let (message, message_id) = self
            .build_message(to, subject, body)
            .map_err(|e| e.to_string())?;

        match self.mailer.send(message).await {
            Ok(_) => {
                tracing::info!(to = %mask_email(to), subject = %subject, "Mail sent");
                Ok(message_id)
            }
            Err(e) => {
                tracing::error!(to = %mask_email(to), error = %e, "SMTP delivery failed");
                Err(InfrastructureError::Mail(e.to_string()).to_string())
            }
        }
    }
}
