//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    CleanupInactiveCommand, CleanupInactiveHandler, CleanupInactiveResult,
    HandleInboundMessageCommand, HandleInboundMessageHandler, HandleInboundMessageResult,
    HandleMessageError, RecordSentError, RecordSentMessageCommand, RecordSentMessageHandler,
    RecordSentMessageResult, SendRepliesCommand, SendRepliesHandler, SendRepliesResult,
};
