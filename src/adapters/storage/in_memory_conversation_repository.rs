//! In-Memory Conversation Repository Adapter
//!
//! Stores conversations in memory. Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::chat::Conversation;
use crate::domain::foundation::{ContactId, ConversationId, Timestamp};
use crate::ports::{ConversationRepository, RepositoryError};

/// In-memory storage for conversations.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationRepository {
    conversations: Arc<RwLock<HashMap<ConversationId, Conversation>>>,
}

impl InMemoryConversationRepository {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored conversations, active or not
    pub async fn count(&self) -> usize {
        self.conversations.read().await.len()
    }

    /// Get every stored conversation for a contact, oldest first
    pub async fn all_for(&self, contact: &ContactId) -> Vec<Conversation> {
        let mut found: Vec<Conversation> = self
            .conversations
            .read()
            .await
            .values()
            .filter(|c| c.contact_id() == contact)
            .cloned()
            .collect();
        found.sort_by_key(|c| *c.created_at());
        found
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn find_active(&self, contact: &ContactId) -> Result<Conversation, RepositoryError> {
        self.conversations
            .read()
            .await
            .values()
            .filter(|c| c.is_active() && c.contact_id() == contact)
            .max_by_key(|c| *c.created_at())
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(contact.clone()))
    }

    async fn create(&self, conversation: &Conversation) -> Result<(), RepositoryError> {
        let mut conversations = self.conversations.write().await;
        let duplicate_active = conversation.is_active()
            && conversations
                .values()
                .any(|c| c.is_active() && c.contact_id() == conversation.contact_id());
        if duplicate_active {
            return Err(RepositoryError::Database(format!(
                "Active conversation already exists for contact: {}",
                conversation.contact_id()
            )));
        }
        conversations.insert(conversation.id(), conversation.clone());
        Ok(())
    }

    async fn save(&self, conversation: &Conversation) -> Result<(), RepositoryError> {
        let mut conversations = self.conversations.write().await;
        match conversations.get_mut(&conversation.id()) {
            Some(stored) if stored.is_active() => {
                *stored = conversation.clone();
                Ok(())
            }
            None => Err(RepositoryError::NotFound(conversation.contact_id().clone())),
        }
    }

    async fn deactivate_idle(&self, cutoff: &Timestamp) -> Result<u64, RepositoryError> {
        let mut conversations = self.conversations.write().await;
        let mut deactivated = 0;
        for conversation in conversations.values_mut() {
            if conversation.is_active() && conversation.is_idle_since(cutoff) {
                conversation.deactivate();
                deactivated += 1;
            }
        }
        Ok(deactivated)
    }
}
