//! Conversation repository port.
//!
//! Defines the contract for persisting conversations and their session
//! snapshots.
//!
//! # Design
//!
//! - **Contact-scoped**: at most one active conversation per contact
//! - **Snapshot storage**: the chat session is stored as one serialized blob
//! - **Corruption is loud**: a blob that fails to parse is an error, never a
//!   silently reset session

use async_trait::async_trait;

use crate::domain::chat::Conversation;
use crate::domain::foundation::{ContactId, ConversationId, ErrorCode, Timestamp};

/// Errors that can occur during conversation persistence.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("No active conversation for contact: {0}")]
    NotFound(ContactId),

    #[error("Stored conversation {id} is corrupt: {reason}")]
    Corrupt { id: ConversationId, reason: String },

    #[error("Database error: {0}")]
    Database(String),
}

impl RepositoryError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RepositoryError::NotFound(_) => ErrorCode::ConversationNotFound,
            RepositoryError::Corrupt { .. } => ErrorCode::CorruptConversation,
            RepositoryError::Database(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns true for the "no active conversation" case that triggers
    /// session creation.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound(_))
    }
}

/// Repository port for conversation persistence.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Finds the single active conversation for a contact.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the contact has no active conversation
    /// - `Corrupt` if the stored session cannot be parsed
    /// - `Database` on persistence failure
    async fn find_active(&self, contact: &ContactId) -> Result<Conversation, RepositoryError>;

    /// Stores a new conversation.
    ///
    /// # Errors
    ///
    /// - `Database` on persistence failure
    async fn create(&self, conversation: &Conversation) -> Result<(), RepositoryError>;

    /// Writes back an active conversation's session and active flag.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the conversation is unknown or was deactivated since
    ///   it was read
    /// - `Database` on persistence failure
    async fn save(&self, conversation: &Conversation) -> Result<(), RepositoryError>;

    /// Marks every active conversation not updated since `cutoff` inactive.
    ///
    /// Returns the number of conversations deactivated.
    async fn deactivate_idle(&self, cutoff: &Timestamp) -> Result<u64, RepositoryError>;
}
