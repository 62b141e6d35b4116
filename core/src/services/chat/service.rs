//! Main chat service implementation

use std::sync::Arc;
use tokio::sync::broadcast;

use stazy_shared::validation::{is_valid_email, normalize_email};

use crate::domain::entities::message::ChatMessage;
use crate::errors::{DomainResult, ValidationError};
use crate::repositories::MessageRepository;

use super::hub::ChatHub;

/// Longest accepted message body, in characters
pub const MAX_MESSAGE_LENGTH: usize = 2000;

pub struct ChatService<M: MessageRepository + ?Sized> {
    message_repository: Arc<M>,
    hub: Arc<ChatHub>,
}

impl<M: MessageRepository + ?Sized> ChatService<M> {
    pub fn new(message_repository: Arc<M>, hub: Arc<ChatHub>) -> Self {
        Self {
            message_repository,
            hub,
        }
    }

    /// Persist a message, then push it to both participants' live sessions
    ///
    /// # Errors
    ///
    /// * `ValidationError::RequiredField` - blank recipient or content
    /// * `ValidationError::InvalidEmail` - malformed recipient
    /// * `ValidationError::TooLong` - content over 2000 characters
    pub async fn send(
        &self,
        sender_email: &str,
        recipient_email: &str,
        content: &str,
    ) -> DomainResult<ChatMessage> {
        let recipient = normalize_email(recipient_email);
        if recipient.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "recipientEmail".to_string(),
            }
            .into());
        }
        if !is_valid_email(&recipient) {
            return Err(ValidationError::InvalidEmail.into());
        }

        let content = content.trim();
        if content.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "content".to_string(),
            }
            .into());
        }
        if content.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(ValidationError::TooLong {
                field: "content".to_string(),
                max: MAX_MESSAGE_LENGTH,
            }
            .into());
        }

        let message = ChatMessage::new(normalize_email(sender_email), recipient, content.to_string());
        let message = self.message_repository.save(message).await?;

        let delivered = self.hub.publish(&message.recipient_email, &message).await;
        if message.sender_email != message.recipient_email {
            self.hub.publish(&message.sender_email, &message).await;
        }
        tracing::debug!(message_id = %message.id, live_receivers = delivered, "Chat message sent");

        Ok(message)
    }

    /// People `email` has talked to, most recent conversation first
    pub async fn threads(&self, email: &str) -> DomainResult<Vec<String>> {
        self.message_repository
            .thread_partners(&normalize_email(email))
            .await
    }

    /// Messages between two users, oldest first
    pub async fn history(&self, email: &str, other: &str) -> DomainResult<Vec<ChatMessage>> {
        self.message_repository
            .conversation(&normalize_email(email), &normalize_email(other))
            .await
    }

    /// Live feed of messages sent to or by `email`
    pub async fn subscribe(&self, email: &str) -> broadcast::Receiver<ChatMessage> {
        self.hub.subscribe(&normalize_email(email)).await
    }

    /// End a live feed obtained from [`ChatService::subscribe`]
    pub async fn unsubscribe(&self, email: &str, feed: broadcast::Receiver<ChatMessage>) {
        drop(feed);
        self.hub.release(&normalize_email(email)).await;
    }

    /// Number of users with an open live feed
    pub async fn live_topics(&self) -> usize {
        self.hub.topic_count().await
    }
}
