//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `directory` - Resources, filter matching, paging and message splitting
//! - `chat` - Menu conversation state machine and its persisted envelope

pub mod chat;
pub mod directory;
pub mod foundation;
