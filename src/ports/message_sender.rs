//! Message sender port - outbound SMS delivery.

use async_trait::async_trait;

use crate::domain::chat::Message;
use crate::domain::foundation::ErrorCode;

/// Errors from the outbound transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Transport request failed: {0}")]
    Request(String),

    #[error("Transport rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Invalid transport response: {0}")]
    InvalidResponse(String),
}

impl TransportError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::TransportFailed
    }
}

/// Port for delivering one outbound message.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Sends `message` and returns it as confirmed by the transport, carrying
    /// the transport's id and sending address.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if delivery fails.
    async fn send(&self, message: &Message) -> Result<Message, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_sender_is_object_safe() {
        fn _accepts_dyn(_sender: &dyn MessageSender) {}
    }

    #[test]
    fn rejected_error_includes_status() {
        let err = TransportError::Rejected {
            status: 400,
            body: "invalid number".to_string(),
        };
        assert!(err.to_string().contains("400"));
        assert_eq!(err.code(), ErrorCode::TransportFailed);
    }
}
