//! Mock implementation of MessageRepository for testing

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::message::ChatMessage;
use crate::errors::DomainError;

use super::trait_::MessageRepository;

#[derive(Clone, Default)]
pub struct MockMessageRepository {
    messages: Arc<RwLock<Vec<ChatMessage>>>,
}

impl MockMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageRepository for MockMessageRepository {
    async fn save(&self, message: ChatMessage) -> Result<ChatMessage, DomainError> {
        self.messages.write().await.push(message.clone());
        Ok(message)
    }

    async fn conversation(&self, a: &str, b: &str) -> Result<Vec<ChatMessage>, DomainError> {
        let messages = self.messages.read().await;
        let mut found: Vec<ChatMessage> = messages
            .iter()
            .filter(|m| m.involves(a) && m.counterpart(a) == b)
            .cloned()
            .collect();
        found.sort_by_key(|m| m.timestamp);
        Ok(found)
    }

    async fn thread_partners(&self, email: &str) -> Result<Vec<String>, DomainError> {
        let messages = self.messages.read().await;
        let mut involving: Vec<&ChatMessage> = messages.iter().filter(|m| m.involves(email)).collect();
        involving.sort_by(|x, y| y.timestamp.cmp(&x.timestamp));

        let mut partners: Vec<String> = Vec::new();
        for message in involving {
            let other = message.counterpart(email);
            if !partners.iter().any(|p| p == other) {
                partners.push(other.to_string());
            }
        }
        Ok(partners)
    }
}
