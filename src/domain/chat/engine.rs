//! Chat engine - drives one session through the directory menu.
//!
//! The engine holds no per-contact state. Callers load a session, pass it in
//! by `&mut`, and persist it after a successful call. Two calls for the same
//! contact must not overlap.

use std::sync::Arc;

use super::errors::ChatError;
use super::handlers::{handler_for, TurnContext};
use super::message::Message;
use super::session::ChatSession;
use crate::domain::directory::{split_message, ZipIndex, DEFAULT_MAX_MESSAGE_LENGTH};
use crate::ports::{ResourceSource, TextResolver};

/// Conversation state machine over the resource directory.
pub struct ChatEngine {
    resources: Arc<dyn ResourceSource>,
    resolver: Arc<dyn TextResolver>,
    zip_index: Option<ZipIndex>,
    city_zips: Option<Vec<String>>,
    max_message_length: usize,
}

impl ChatEngine {
    pub fn new(resources: Arc<dyn ResourceSource>, resolver: Arc<dyn TextResolver>) -> Self {
        Self {
            resources,
            resolver,
            zip_index: None,
            city_zips: None,
            max_message_length: DEFAULT_MAX_MESSAGE_LENGTH,
        }
    }

    /// Sets the ZIP to service-area index used for neighborhood resources.
    pub fn with_zip_index(mut self, zip_index: ZipIndex) -> Self {
        self.zip_index = Some(zip_index);
        self
    }

    /// Sets the ZIP codes that count as inside the city.
    pub fn with_city_zips(mut self, city_zips: Vec<String>) -> Self {
        self.city_zips = Some(city_zips);
        self
    }

    /// Sets the longest body a single outbound message may carry.
    pub fn with_max_message_length(mut self, max_message_length: usize) -> Self {
        self.max_message_length = max_message_length;
        self
    }

    /// Handles one inbound message, returning the replies to send.
    ///
    /// Mutates the session's state, filters, page and language in place.
    /// Replies are addressed to the inbound sender and already split to fit
    /// the transport.
    ///
    /// # Errors
    ///
    /// `ChatError::DirectoryUnavailable` if the resource list cannot be
    /// loaded. No reply is produced in that case.
    pub fn handle_message(
        &self,
        session: &mut ChatSession,
        message: &Message,
    ) -> Result<Vec<Message>, ChatError> {
        let ctx = TurnContext {
            resources: self.resources.as_ref(),
            resolver: self.resolver.as_ref(),
            zip_index: self.zip_index.as_ref(),
            city_zips: self.city_zips.as_deref(),
        };

        let bodies = handler_for(session.state()).handle(session, message.body(), &ctx)?;

        Ok(bodies
            .iter()
            .flat_map(|body| split_message(body, self.max_message_length))
            .map(|body| Message::reply(message.sender(), body))
            .collect())
    }
}

impl std::fmt::Debug for ChatEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatEngine")
            .field("zip_index", &self.zip_index.as_ref().map(|index| index.len()))
            .field("city_zips", &self.city_zips.as_ref().map(|zips| zips.len()))
            .field("max_message_length", &self.max_message_length)
            .finish_non_exhaustive()
    }
}
