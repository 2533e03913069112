//! Logging sender - writes replies to the log instead of sending them.
//!
//! Used when no SMS provider is configured, e.g. in local development.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::chat::Message;
use crate::domain::foundation::{MessageId, Timestamp};
use crate::ports::{MessageSender, TransportError};

/// Sender that logs each message and confirms it with a generated id.
#[derive(Debug, Clone)]
pub struct LoggingSender {
    from_number: String,
    sent: Arc<RwLock<Vec<Message>>>,
}

impl LoggingSender {
    pub fn new(from_number: impl Into<String>) -> Self {
        Self {
            from_number: from_number.into(),
            sent: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Messages confirmed so far, oldest first.
    pub async fn sent(&self) -> Vec<Message> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl MessageSender for LoggingSender {
    async fn send(&self, message: &Message) -> Result<Message, TransportError> {
        let confirmed = message
            .clone()
            .confirmed(MessageId::generate(), self.from_number.clone())
            .with_created_at(Timestamp::now());

        tracing::info!(
            message_id = %confirmed.id(),
            recipient = %confirmed.recipient(),
            body = %confirmed.body(),
            "SMS delivery skipped, no provider configured"
        );

        self.sent.write().await.push(confirmed.clone());
        Ok(confirmed)
    }
}
