//! Chat command handlers.

mod cleanup_inactive;
mod contact_lease;
mod handle_inbound_message;
mod record_sent_message;
mod send_replies;

pub use cleanup_inactive::{CleanupInactiveCommand, CleanupInactiveHandler, CleanupInactiveResult};
pub use handle_inbound_message::{
    HandleInboundMessageCommand, HandleInboundMessageHandler, HandleInboundMessageResult,
    HandleMessageError,
};
pub use record_sent_message::{
    RecordSentError, RecordSentMessageCommand, RecordSentMessageHandler, RecordSentMessageResult,
};
pub use send_replies::{SendRepliesCommand, SendRepliesHandler, SendRepliesResult};
