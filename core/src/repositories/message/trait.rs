//! Chat message repository trait.

use async_trait::async_trait;

use crate::domain::entities::message::ChatMessage;
use crate::errors::DomainError;

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn save(&self, message: ChatMessage) -> Result<ChatMessage, DomainError>;

    /// Messages exchanged between two users in either direction, oldest first
    async fn conversation(&self, a: &str, b: &str) -> Result<Vec<ChatMessage>, DomainError>;

    /// Distinct users `email` has exchanged messages with, most recent
    /// conversation first
    async fn thread_partners(&self, email: &str) -> Result<Vec<String>, DomainError>;
}
