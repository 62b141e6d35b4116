use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stazy_core::domain::entities::message::ChatMessage;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageResponse {
    pub id: Uuid,
    pub sender_email: String,
    pub recipient_email: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl From<ChatMessage> for ChatMessageResponse {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.id,
            sender_email: message.sender_email,
            recipient_email: message.recipient_email,
            content: message.content,
            timestamp: message.timestamp,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatThreadResponse {
    pub email: String,
}

/// Query of the WebSocket upgrade; browsers cannot set headers there
#[derive(Debug, Clone, Deserialize)]
pub struct ChatSocketQuery {
    pub token: Option<String>,
}

/// Frame sent by a connected client
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingChatFrame {
    pub recipient_email: String,
    pub content: String,
}

/// Frame pushed to a connected client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutgoingChatFrame {
    Message(ChatMessageResponse),
    Error { error: String, message: String },
}
