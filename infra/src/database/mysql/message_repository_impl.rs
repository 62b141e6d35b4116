//! MySQL implementation of the MessageRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

use stazy_core::domain::entities::message::ChatMessage;
use stazy_core::errors::DomainError;
use stazy_core::repositories::MessageRepository;

use super::{db_error, parse_uuid};

/// MySQL implementation of MessageRepository
pub struct MySqlMessageRepository {
    pool: MySqlPool,
}

impl MySqlMessageRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_message(row: &MySqlRow) -> Result<ChatMessage, DomainError> {
        let get_err = |column: &str, e: sqlx::Error| DomainError::Internal {
            message: format!("Failed to get {}: {}", column, e),
        };

        let id: String = row.try_get("id").map_err(|e| get_err("id", e))?;

        Ok(ChatMessage {
            id: parse_uuid(&id, "messages.id")?,
            sender_email: row
                .try_get("sender_email")
                .map_err(|e| get_err("sender_email", e))?,
            recipient_email: row
                .try_get("recipient_email")
                .map_err(|e| get_err("recipient_email", e))?,
            content: row.try_get("content").map_err(|e| get_err("content", e))?,
            timestamp: row
                .try_get::<DateTime<Utc>, _>("sent_at")
                .map_err(|e| get_err("sent_at", e))?,
        })
    }
}

#[async_trait]
impl MessageRepository for MySqlMessageRepository {
    async fn save(&self, message: ChatMessage) -> Result<ChatMessage, DomainError> {
        sqlx::query(
            "INSERT INTO messages (id, sender_email, recipient_email, content, sent_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(message.id.to_string())
        .bind(&message.sender_email)
        .bind(&message.recipient_email)
        .bind(&message.content)
        .bind(message.timestamp)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to save message"))?;

        Ok(message)
    }

    async fn conversation(&self, a: &str, b: &str) -> Result<Vec<ChatMessage>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, sender_email, recipient_email, content, sent_at
            FROM messages
            WHERE (sender_email = ? AND recipient_email = ?)
               OR (sender_email = ? AND recipient_email = ?)
            ORDER BY sent_at ASC
            "#,
        )
        .bind(a)
        .bind(b)
        .bind(b)
        .bind(a)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to load conversation"))?;

        rows.iter().map(Self::row_to_message).collect()
    }

    async fn thread_partners(&self, email: &str) -> Result<Vec<String>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT partner, MAX(sent_at) AS last_at
            FROM (
                SELECT
                    CASE WHEN sender_email = ? THEN recipient_email ELSE sender_email END AS partner,
                    sent_at
                FROM messages
                WHERE sender_email = ? OR recipient_email = ?
            ) AS exchanged
            GROUP BY partner
            ORDER BY last_at DESC
            "#,
        )
        .bind(email)
        .bind(email)
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to load chat threads"))?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("partner"))
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_error("Failed to read chat partner"))
    }
}
