//! Message entity - one SMS exchanged with a contact.
//!
//! Messages are immutable once created. Ordering between messages for the
//! same contact comes from `created_at`; the id detects re-delivery.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MessageId, Timestamp};

/// A single inbound or outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,

    /// Transport address of the sender. Empty for replies not yet sent.
    #[serde(default)]
    sender: String,

    /// Transport address of the recipient.
    #[serde(default)]
    recipient: String,

    #[serde(default)]
    body: String,

    created_at: Timestamp,
}

impl Message {
    /// Creates a message stamped with the current time.
    pub fn new(
        id: MessageId,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id,
            sender: sender.into(),
            recipient: recipient.into(),
            body: body.into(),
            created_at: Timestamp::now(),
        }
    }

    /// Creates an outbound reply to `recipient` with a local id and no
    /// sender; the transport fills in the sending number.
    pub fn reply(recipient: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(MessageId::generate(), "", recipient, body)
    }

    /// Returns a copy with the given creation time.
    pub fn with_created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = created_at;
        self
    }

    /// Returns a copy with the given id and sender, as confirmed by the
    /// transport after delivery.
    pub fn confirmed(mut self, id: MessageId, sender: impl Into<String>) -> Self {
        self.id = id;
        self.sender = sender.into();
        self
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}
