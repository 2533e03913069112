//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod chat;

pub use chat::{
    CleanupInactiveCommand, CleanupInactiveHandler, CleanupInactiveResult,
    HandleInboundMessageCommand, HandleInboundMessageHandler, HandleInboundMessageResult,
    HandleMessageError, RecordSentError, RecordSentMessageCommand, RecordSentMessageHandler,
    RecordSentMessageResult, SendRepliesCommand, SendRepliesHandler, SendRepliesResult,
};
