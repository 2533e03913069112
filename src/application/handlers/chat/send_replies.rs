//! SendRepliesHandler - Delivers replies in order and logs each one sent.

use std::sync::Arc;

use super::record_sent_message::{RecordSentMessageCommand, RecordSentMessageHandler};
use crate::domain::chat::Message;
use crate::ports::{MessageSender, TransportError};

/// Command to deliver the replies produced for one inbound message.
#[derive(Debug, Clone)]
pub struct SendRepliesCommand {
    pub replies: Vec<Message>,
}

/// Result of delivering replies.
#[derive(Debug, Clone, Default)]
pub struct SendRepliesResult {
    /// Messages as confirmed by the transport, in delivery order.
    pub sent: Vec<Message>,
}

/// Handler for outbound delivery.
///
/// Delivery stops at the first transport failure so the contact never sees
/// replies out of order. A delivered message that cannot be logged is only
/// warned about.
pub struct SendRepliesHandler {
    sender: Arc<dyn MessageSender>,
    recorder: Arc<RecordSentMessageHandler>,
}

impl SendRepliesHandler {
    pub fn new(sender: Arc<dyn MessageSender>, recorder: Arc<RecordSentMessageHandler>) -> Self {
        Self { sender, recorder }
    }

    pub async fn handle(&self, cmd: SendRepliesCommand) -> Result<SendRepliesResult, TransportError> {
        let mut result = SendRepliesResult::default();

        for reply in cmd.replies {
            let confirmed = self.sender.send(&reply).await.map_err(|err| {
                tracing::error!(
                    recipient = %reply.recipient(),
                    delivered = result.sent.len(),
                    error = %err,
                    "Failed to deliver reply"
                );
                err
            })?;

            tracing::info!(
                message_id = %confirmed.id(),
                recipient = %confirmed.recipient(),
                "Delivered reply"
            );

            if let Err(err) = self
                .recorder
                .handle(RecordSentMessageCommand {
                    message: confirmed.clone(),
                })
                .await
            {
                tracing::warn!(
                    message_id = %confirmed.id(),
                    code = %err.code(),
                    error = %err,
                    "Failed to log delivered reply"
                );
            }

            result.sent.push(confirmed);
        }

        Ok(result)
    }
}
