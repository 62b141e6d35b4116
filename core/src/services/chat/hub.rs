//! Per-user broadcast topics

use std::collections::HashMap;
use tokio::sync::{broadcast, RwLock};

use crate::domain::entities::message::ChatMessage;

/// Messages buffered per topic before slow receivers start lagging
pub const TOPIC_CAPACITY: usize = 64;

/// One broadcast channel per user email
#[derive(Default)]
pub struct ChatHub {
    topics: RwLock<HashMap<String, broadcast::Sender<ChatMessage>>>,
}

impl ChatHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to messages addressed to or sent by `email`
    pub async fn subscribe(&self, email: &str) -> broadcast::Receiver<ChatMessage> {
        let mut topics = self.topics.write().await;
        topics
            .entry(email.to_string())
            .or_insert_with(|| broadcast::channel(TOPIC_CAPACITY).0)
            .subscribe()
    }

    /// Push a message to a topic; returns how many receivers got it
    ///
    /// A topic whose receivers have all gone away is dropped.
    pub async fn publish(&self, email: &str, message: &ChatMessage) -> usize {
        let delivered = {
            let topics = self.topics.read().await;
            match topics.get(email) {
                Some(sender) => sender.send(message.clone()).ok(),
                None => return 0,
            }
        };

        match delivered {
            Some(count) => count,
            None => {
                let mut topics = self.topics.write().await;
                if topics.get(email).map_or(false, |s| s.receiver_count() == 0) {
                    topics.remove(email);
                }
                0
            }
        }
    }

    /// Drop the topic for `email` once nobody listens on it any more
    ///
    /// Returns whether the topic was removed.
    pub async fn release(&self, email: &str) -> bool {
        let mut topics = self.topics.write().await;
        if topics.get(email).map_or(false, |s| s.receiver_count() == 0) {
            topics.remove(email);
            return true;
        }
        false
    }

    pub async fn topic_count(&self) -> usize {
        self.topics.read().await.len()
    }
}
