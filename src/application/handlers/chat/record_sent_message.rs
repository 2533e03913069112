//! RecordSentMessageHandler - Logs a delivered reply on the recipient's session.

use std::sync::Arc;
use thiserror::Error;

use super::contact_lease::ContactLeaseGuard;
use crate::domain::chat::{ChatSession, Conversation, Message};
use crate::domain::foundation::{ContactId, ConversationId, ErrorCode, ValidationError};
use crate::ports::{ContactLock, ConversationRepository, LockError, RepositoryError};

/// Command to record a transport-confirmed outbound message.
#[derive(Debug, Clone)]
pub struct RecordSentMessageCommand {
    pub message: Message,
}

/// Result of recording a sent message.
#[derive(Debug, Clone)]
pub struct RecordSentMessageResult {
    pub conversation_id: ConversationId,
    /// False when the message was a duplicate or arrived out of order.
    pub appended: bool,
}

/// Errors that can occur while recording a sent message.
#[derive(Debug, Error)]
pub enum RecordSentError {
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(#[from] ValidationError),

    #[error(transparent)]
    Lock(#[from] LockError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl RecordSentError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RecordSentError::InvalidRecipient(_) => ErrorCode::ValidationFailed,
            RecordSentError::Lock(err) => err.code(),
            RecordSentError::Repository(err) => err.code(),
        }
    }
}

/// Handler that appends delivered replies to the recipient's message log.
pub struct RecordSentMessageHandler {
    repository: Arc<dyn ConversationRepository>,
    lock: Arc<dyn ContactLock>,
}

impl RecordSentMessageHandler {
    pub fn new(repository: Arc<dyn ConversationRepository>, lock: Arc<dyn ContactLock>) -> Self {
        Self { repository, lock }
    }

    pub async fn handle(
        &self,
        cmd: RecordSentMessageCommand,
    ) -> Result<RecordSentMessageResult, RecordSentError> {
        let contact = ContactId::new(cmd.message.recipient())?;

        let lease = ContactLeaseGuard::acquire(&self.lock, &contact).await?;
        let outcome = self.record(contact, cmd.message).await;
        lease.release().await;

        outcome
    }

    async fn record(
        &self,
        contact: ContactId,
        message: Message,
    ) -> Result<RecordSentMessageResult, RecordSentError> {
        let (mut conversation, is_new) = match self.repository.find_active(&contact).await {
            Ok(conversation) => (conversation, false),
            Err(err) if err.is_not_found() => {
                (Conversation::start(ChatSession::new(contact)), true)
            }
            Err(err) => return Err(err.into()),
        };

        let message_id = message.id().clone();
        if !conversation.session_mut().record_sent(message) {
            tracing::warn!(
                conversation_id = %conversation.id(),
                message_id = %message_id,
                "Skipping duplicate or out-of-order sent message"
            );
            return Ok(RecordSentMessageResult {
                conversation_id: conversation.id(),
                appended: false,
            });
        }

        conversation.touch();
        if is_new {
            self.repository.create(&conversation).await?;
        } else {
            self.repository.save(&conversation).await?;
        }

        Ok(RecordSentMessageResult {
            conversation_id: conversation.id(),
            appended: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{MessageId, Timestamp};
    use crate::ports::LockLease;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockConversationRepository {
        conversations: Mutex<Vec<Conversation>>,
    }

    impl MockConversationRepository {
        fn new() -> Self {
            Self {
                conversations: Mutex::new(Vec::new()),
            }
        }

        fn with_conversation(conversation: Conversation) -> Self {
            Self {
                conversations: Mutex::new(vec![conversation]),
            }
        }

        fn stored(&self) -> Vec<Conversation> {
            self.conversations.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ConversationRepository for MockConversationRepository {
        async fn find_active(&self, contact: &ContactId) -> Result<Conversation, RepositoryError> {
            self.conversations
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.is_active() && c.contact_id() == contact)
                .cloned()
                .ok_or_else(|| RepositoryError::NotFound(contact.clone()))
        }

        async fn create(&self, conversation: &Conversation) -> Result<(), RepositoryError> {
            self.conversations.lock().unwrap().push(conversation.clone());
            Ok(())
        }

        async fn save(&self, conversation: &Conversation) -> Result<(), RepositoryError> {
            let mut conversations = self.conversations.lock().unwrap();
            if let Some(pos) = conversations.iter().position(|c| c.id() == conversation.id()) {
                conversations[pos] = conversation.clone();
            }
            Ok(())
        }

        async fn deactivate_idle(&self, _cutoff: &Timestamp) -> Result<u64, RepositoryError> {
            Ok(0)
        }
    }

    struct NoopLock;

    #[async_trait]
    impl ContactLock for NoopLock {
        async fn acquire(&self, contact: &ContactId) -> Result<LockLease, LockError> {
            Ok(LockLease::new(contact.clone()))
        }

        async fn release(&self, _lease: LockLease) -> Result<(), LockError> {
            Ok(())
        }
    }

    const CONTACT: &str = "+15550001111";

    fn sent(id: &str, minutes_ago: i64) -> Message {
        Message::new(MessageId::new(id), "+15559990000", CONTACT, "reply")
            .with_created_at(Timestamp::now().minus_minutes(minutes_ago))
    }

    fn existing_conversation() -> Conversation {
        let mut session = ChatSession::new(ContactId::new(CONTACT).unwrap());
        session.record_inbound(
            Message::new(MessageId::new("SM0"), CONTACT, "+15559990000", "hi")
                .with_created_at(Timestamp::now().minus_minutes(10)),
        );
        Conversation::start(session)
    }

    fn handler(repo: Arc<MockConversationRepository>) -> RecordSentMessageHandler {
        RecordSentMessageHandler::new(repo, Arc::new(NoopLock))
    }

    #[tokio::test]
    async fn appends_to_existing_conversation() {
        let repo = Arc::new(MockConversationRepository::with_conversation(
            existing_conversation(),
        ));

        let result = handler(repo.clone())
            .handle(RecordSentMessageCommand {
                message: sent("SM1", 5),
            })
            .await
            .unwrap();

        assert!(result.appended);
        let messages = repo.stored()[0].session().messages().to_vec();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].id().as_str(), "SM1");
    }

    #[tokio::test]
    async fn skips_repeated_confirmation() {
        let repo = Arc::new(MockConversationRepository::with_conversation(
            existing_conversation(),
        ));
        let handler = handler(repo.clone());
        let message = sent("SM1", 5);

        handler
            .handle(RecordSentMessageCommand {
                message: message.clone(),
            })
            .await
            .unwrap();
        let result = handler
            .handle(RecordSentMessageCommand { message })
            .await
            .unwrap();

        assert!(!result.appended);
        assert_eq!(repo.stored()[0].session().messages().len(), 2);
    }

    #[tokio::test]
    async fn skips_message_older_than_last_logged() {
        let repo = Arc::new(MockConversationRepository::with_conversation(
            existing_conversation(),
        ));

        let result = handler(repo.clone())
            .handle(RecordSentMessageCommand {
                message: sent("SM1", 30),
            })
            .await
            .unwrap();

        assert!(!result.appended);
        assert_eq!(repo.stored()[0].session().messages().len(), 1);
    }

    #[tokio::test]
    async fn creates_conversation_for_unknown_recipient() {
        let repo = Arc::new(MockConversationRepository::new());

        let result = handler(repo.clone())
            .handle(RecordSentMessageCommand {
                message: sent("SM1", 0),
            })
            .await
            .unwrap();

        assert!(result.appended);
        let stored = repo.stored();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].contact_id().as_str(), CONTACT);
    }
}
