//! Conversation - the persisted envelope around a chat session.

use serde::{Deserialize, Serialize};

use super::session::ChatSession;
use crate::domain::foundation::{ContactId, ConversationId, Timestamp};

/// A stored chat session plus its bookkeeping.
///
/// # Invariants
///
/// - At most one active conversation exists per contact
/// - `updated_at` moves forward on every save
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    id: ConversationId,
    active: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
    session: ChatSession,
}

impl Conversation {
    /// Starts a new active conversation for `session`.
    pub fn start(session: ChatSession) -> Self {
        let now = Timestamp::now();
        Self {
            id: ConversationId::new(),
            active: true,
            created_at: now,
            updated_at: now,
            session,
        }
    }

    /// Reconstitutes a conversation from storage.
    pub fn reconstitute(
        id: ConversationId,
        active: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
        session: ChatSession,
    ) -> Self {
        Self {
            id,
            active,
            created_at,
            updated_at,
            session,
        }
    }

    pub fn id(&self) -> ConversationId {
        self.id
    }

    pub fn contact_id(&self) -> &ContactId {
        self.session.contact_id()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ChatSession {
        &mut self.session
    }

    /// Returns true if the conversation has not been updated since `cutoff`.
    pub fn is_idle_since(&self, cutoff: &Timestamp) -> bool {
        self.updated_at.is_before(cutoff)
    }

    /// Stamps the conversation as updated now.
    pub fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }

    /// Marks the conversation and its session inactive.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.session.deactivate();
        self.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> ChatSession {
        ChatSession::new(ContactId::new("+15550001111").unwrap())
    }

    #[test]
    fn start_is_active_with_equal_timestamps() {
        let conversation = Conversation::start(session());
        assert!(conversation.is_active());
        assert_eq!(conversation.created_at(), conversation.updated_at());
        assert_eq!(conversation.contact_id().as_str(), "+15550001111");
    }

    #[test]
    fn deactivate_marks_conversation_and_session() {
        let mut conversation = Conversation::start(session());
        conversation.deactivate();
        assert!(!conversation.is_active());
        assert!(!conversation.session().is_active());
    }

    #[test]
    fn idle_check_compares_updated_at() {
        let conversation = Conversation::reconstitute(
            ConversationId::new(),
            true,
            Timestamp::now().minus_minutes(120),
            Timestamp::now().minus_minutes(90),
            session(),
        );
        assert!(conversation.is_idle_since(&Timestamp::now().minus_minutes(60)));
        assert!(!conversation.is_idle_since(&Timestamp::now().minus_minutes(100)));
    }
}
