//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Chat Engine Collaborators
//!
//! - `ResourceSource` - Directory snapshot retrieval
//! - `TextResolver` - Localized message lookup with language fallback
//!
//! ## Service Ports
//!
//! - `ConversationRepository` - Active conversation persistence
//! - `MessageSender` - Outbound SMS delivery
//! - `ContactLock` - Per-contact serialization of message handling

mod contact_lock;
mod conversation_repository;
mod message_sender;
mod resource_source;
mod text_resolver;

pub use contact_lock::{ContactLock, LockError, LockLease};
pub use conversation_repository::{ConversationRepository, RepositoryError};
pub use message_sender::{MessageSender, TransportError};
pub use resource_source::{DirectoryError, ResourceSource};
pub use text_resolver::{Localizer, TemplateParams, TextResolver};
