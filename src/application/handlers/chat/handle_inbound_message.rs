//! HandleInboundMessageHandler - Command handler for one inbound SMS.

use std::sync::Arc;
use thiserror::Error;

use super::contact_lease::ContactLeaseGuard;
use crate::domain::chat::{ChatEngine, ChatError, ChatSession, ChatState, Conversation, Message};
use crate::domain::foundation::{ContactId, ConversationId, ErrorCode, ValidationError};
use crate::ports::{ContactLock, ConversationRepository, LockError, RepositoryError};

/// Command to process a message received from a contact.
#[derive(Debug, Clone)]
pub struct HandleInboundMessageCommand {
    pub message: Message,
}

impl HandleInboundMessageCommand {
    pub fn new(message: Message) -> Self {
        Self { message }
    }
}

/// Result of processing an inbound message.
#[derive(Debug, Clone)]
pub struct HandleInboundMessageResult {
    pub conversation_id: ConversationId,
    /// Replies to deliver, in order.
    pub replies: Vec<Message>,
    /// Session state after the message was handled.
    pub state: ChatState,
    /// True if the message was a re-delivery and was not answered.
    pub duplicate: bool,
}

/// Errors that can occur while handling an inbound message.
#[derive(Debug, Error)]
pub enum HandleMessageError {
    #[error("Invalid sender: {0}")]
    InvalidSender(#[from] ValidationError),

    #[error(transparent)]
    Lock(#[from] LockError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Chat(#[from] ChatError),
}

impl HandleMessageError {
    pub fn code(&self) -> ErrorCode {
        match self {
            HandleMessageError::InvalidSender(_) => ErrorCode::ValidationFailed,
            HandleMessageError::Lock(err) => err.code(),
            HandleMessageError::Repository(err) => err.code(),
            HandleMessageError::Chat(err) => err.code(),
        }
    }
}

/// Handler that runs one inbound message through the chat engine.
///
/// Load, handle and save happen under the sender's contact lock, which is
/// handed back even if the caller stops waiting. Nothing is persisted when
/// the engine fails.
pub struct HandleInboundMessageHandler {
    repository: Arc<dyn ConversationRepository>,
    lock: Arc<dyn ContactLock>,
    engine: Arc<ChatEngine>,
}

impl HandleInboundMessageHandler {
    pub fn new(
        repository: Arc<dyn ConversationRepository>,
        lock: Arc<dyn ContactLock>,
        engine: Arc<ChatEngine>,
    ) -> Self {
        Self {
            repository,
            lock,
            engine,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandleInboundMessageCommand,
    ) -> Result<HandleInboundMessageResult, HandleMessageError> {
        let contact = ContactId::new(cmd.message.sender())?;

        let lease = ContactLeaseGuard::acquire(&self.lock, &contact).await?;
        let outcome = self.process(contact, cmd.message).await;
        lease.release().await;

        outcome
    }

    async fn process(
        &self,
        contact: ContactId,
        message: Message,
    ) -> Result<HandleInboundMessageResult, HandleMessageError> {
        // 1. Load the active conversation, starting one for a new contact
        let (mut conversation, is_new) = match self.repository.find_active(&contact).await {
            Ok(conversation) => (conversation, false),
            Err(err) if err.is_not_found() => {
                let conversation = Conversation::start(ChatSession::new(contact.clone()));
                tracing::info!(
                    conversation_id = %conversation.id(),
                    contact = %contact,
                    "Starting conversation"
                );
                (conversation, true)
            }
            Err(err) => {
                tracing::error!(contact = %contact, error = %err, "Failed to load conversation");
                return Err(err.into());
            }
        };

        // 2. Drop re-deliveries
        if !conversation.session_mut().record_inbound(message.clone()) {
            tracing::warn!(
                conversation_id = %conversation.id(),
                message_id = %message.id(),
                "Ignoring re-delivered message"
            );
            return Ok(HandleInboundMessageResult {
                conversation_id: conversation.id(),
                replies: Vec::new(),
                state: conversation.session().state(),
                duplicate: true,
            });
        }

        // 3. Run the state machine
        let conversation_id = conversation.id();
        let before = conversation.session().state();
        let replies = self
            .engine
            .handle_message(conversation.session_mut(), &message)
            .map_err(|err| {
                tracing::error!(
                    conversation_id = %conversation_id,
                    error = %err,
                    "Chat engine failed"
                );
                err
            })?;
        let after = conversation.session().state();

        tracing::debug!(
            conversation_id = %conversation_id,
            from = %before,
            to = %after,
            page = conversation.session().page(),
            params = ?conversation.session().params(),
            replies = replies.len(),
            "Handled inbound message"
        );

        // 4. Persist
        conversation.touch();
        if is_new {
            self.repository.create(&conversation).await?;
        } else {
            self.repository.save(&conversation).await?;
        }

        Ok(HandleInboundMessageResult {
            conversation_id,
            replies,
            state: after,
            duplicate: false,
        })
    }
}
