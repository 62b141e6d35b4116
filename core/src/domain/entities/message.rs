//! Chat message exchanged between two users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender_email: String,
    pub recipient_email: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(sender_email: String, recipient_email: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender_email,
            recipient_email,
            content,
            timestamp: Utc::now(),
        }
    }

    /// The other participant, seen from `email`
    pub fn counterpart(&self, email: &str) -> &str {
        if self.sender_email == email {
            &self.recipient_email
        } else {
            &self.sender_email
        }
    }

    pub fn involves(&self, email: &str) -> bool {
        self.sender_email == email || self.recipient_email == email
    }
}
