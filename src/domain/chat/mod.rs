//! Chat module - the directory menu conversation.
//!
//! - `ChatSession` - mutable per-contact state (language, filters, page)
//! - `ChatEngine` - consumes one inbound message and produces replies
//! - `handlers` - one `StateHandler` per menu state
//! - `Conversation` - persisted envelope around a session

mod conversation;
mod engine;
mod errors;
pub mod handlers;
mod message;
pub mod prompts;
mod session;
mod state;

pub use conversation::Conversation;
pub use engine::ChatEngine;
pub use errors::ChatError;
pub use handlers::{handler_for, StateHandler, TurnContext};
pub use message::Message;
pub use prompts::PUNCTUATION_SPACE;
pub use session::{ChatSession, DIRECTORY_CATEGORY};
pub use state::ChatState;
