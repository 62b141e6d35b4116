//! Mail dispatcher that writes to the log instead of delivering.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use stazy_core::services::MailServiceTrait;
use stazy_shared::validation::mask_email;

/// Development dispatcher
///
/// The body is logged at debug level so verification codes can be read from
/// local logs; the recipient is always masked.
#[derive(Debug, Default)]
pub struct LogMailService {
    sent: AtomicU64,
}

impl LogMailService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent_count(&self) -> u64 {
        self.sent.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MailServiceTrait for LogMailService {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, String> {
        let n = self.sent.fetch_add(1, Ordering::SeqCst) + 1;
        let id = format!("log-mail-{}", n);

        tracing::info!(to = %mask_email(to), subject = %subject, message_id = %id, "Mail dispatched to log");
        tracing::debug!(body = %body, "Mail body");

        Ok(id)
    }
}
