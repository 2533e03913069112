//! Chat session - the mutable per-contact menu state.

use serde::{Deserialize, Serialize};

use super::message::Message;
use super::state::ChatState;
use crate::domain::directory::{FilterParams, DEFAULT_LANGUAGE};
use crate::domain::foundation::{ContactId, StateMachine};

/// Category tag stored on every directory session.
pub const DIRECTORY_CATEGORY: &str = "directory";

/// Everything known about one contact's conversation.
///
/// A session is created when a contact with no active conversation writes in,
/// mutated by the chat engine on every inbound message, and persisted by the
/// caller afterwards. The engine never deactivates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    contact_id: ContactId,
    active: bool,
    category: String,
    language: String,
    #[serde(default)]
    messages: Vec<Message>,
    state: ChatState,
    #[serde(default)]
    params: FilterParams,
    #[serde(default)]
    page: usize,
}

impl ChatSession {
    /// Creates a fresh session in the `Started` state.
    pub fn new(contact_id: ContactId) -> Self {
        Self {
            contact_id,
            active: true,
            category: DIRECTORY_CATEGORY.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            messages: Vec::new(),
            state: ChatState::Started,
            params: FilterParams::default(),
            page: 0,
        }
    }

    pub fn contact_id(&self) -> &ContactId {
        &self.contact_id
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns true if a message with this id is already in the log.
    pub fn has_message(&self, message: &Message) -> bool {
        self.messages.iter().any(|logged| logged.id() == message.id())
    }

    /// Logs an inbound message unless it was already delivered once.
    ///
    /// Returns false for a re-delivery, which the caller must not answer.
    pub fn record_inbound(&mut self, message: Message) -> bool {
        if self.has_message(&message) {
            return false;
        }
        self.messages.push(message);
        true
    }

    /// Logs a transport-confirmed outbound message.
    ///
    /// The message is appended only if its id differs from the last logged
    /// message and it was created strictly after it. Returns whether it was
    /// appended.
    pub fn record_sent(&mut self, message: Message) -> bool {
        if let Some(last) = self.messages.last() {
            if last.id() == message.id() || !message.created_at().is_after(last.created_at()) {
                return false;
            }
        }
        self.messages.push(message);
        true
    }

    /// Marks the session inactive.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub(crate) fn advance_to(&mut self, next: ChatState) {
        debug_assert!(
            self.state.can_transition_to(&next),
            "invalid chat transition {} -> {}",
            self.state,
            next
        );
        self.state = next;
    }

    pub(crate) fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    pub(crate) fn params_mut(&mut self) -> &mut FilterParams {
        &mut self.params
    }

    pub(crate) fn next_page(&mut self) {
        self.page += 1;
    }

    /// Clears filters and paging and returns to the what menu, keeping the
    /// language.
    pub(crate) fn restart(&mut self) {
        self.params = FilterParams::default();
        self.page = 0;
        self.advance_to(ChatState::SetWhat);
    }
}
