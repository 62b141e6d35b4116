//! Recording mail service for tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use super::MailServiceTrait;

/// A mail captured by [`MockMailService`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mail service that records every mail instead of delivering it
#[derive(Clone, Default)]
pub struct MockMailService {
    sent: Arc<Mutex<Vec<SentMail>>>,
    message_counter: Arc<AtomicU64>,
    simulate_failure: Arc<AtomicBool>,
}

impl MockMailService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent sends fail (or succeed again)
    pub fn set_simulate_failure(&self, fail: bool) {
        self.simulate_failure.store(fail, Ordering::SeqCst);
    }

    /// Number of mails delivered so far
    pub fn sent_count(&self) -> u64 {
        self.message_counter.load(Ordering::SeqCst)
    }

    pub fn sent_mails(&self) -> Vec<SentMail> {
        self.sent.lock().map(|m| m.clone()).unwrap_or_default()
    }

    /// The 6-digit code in the most recent mail to `to`, if any
    pub fn last_code_for(&self, to: &str) -> Option<String> {
        let sent = self.sent.lock().ok()?;
        sent.iter()
            .rev()
            .filter(|m| m.to == to)
            .find_map(|m| extract_code(&m.body))
    }
}

fn extract_code(body: &str) -> Option<String> {
    body.split(|c: char| !c.is_ascii_digit())
        .find(|chunk| chunk.len() == 6)
        .map(str::to_string)
}

#[async_trait]
impl MailServiceTrait for MockMailService {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, String> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            return Err("Simulated mail failure".to_string());
        }

        let id = self.message_counter.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(SentMail {
                to: to.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
            });
        }

        Ok(format!("mock-mail-{}", id))
    }
}
