//! CleanupInactiveHandler - Deactivates conversations that went quiet.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::ports::{ConversationRepository, RepositoryError};

/// Command to deactivate conversations idle for longer than a threshold.
#[derive(Debug, Clone, Copy)]
pub struct CleanupInactiveCommand {
    pub inactive_after_mins: i64,
}

/// Result of a cleanup sweep.
#[derive(Debug, Clone)]
pub struct CleanupInactiveResult {
    pub cutoff: Timestamp,
    pub deactivated: u64,
}

/// Handler for the idle conversation sweep.
pub struct CleanupInactiveHandler {
    repository: Arc<dyn ConversationRepository>,
}

impl CleanupInactiveHandler {
    pub fn new(repository: Arc<dyn ConversationRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: CleanupInactiveCommand,
    ) -> Result<CleanupInactiveResult, RepositoryError> {
        let cutoff = Timestamp::now().minus_minutes(cmd.inactive_after_mins);
        let deactivated = self.repository.deactivate_idle(&cutoff).await?;

        if deactivated > 0 {
            tracing::info!(deactivated, cutoff = %cutoff, "Deactivated idle conversations");
        }

        Ok(CleanupInactiveResult {
            cutoff,
            deactivated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chat::Conversation;
    use crate::domain::foundation::ContactId;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockConversationRepository {
        cutoffs: Mutex<Vec<Timestamp>>,
        result: u64,
    }

    #[async_trait]
    impl ConversationRepository for MockConversationRepository {
        async fn find_active(&self, contact: &ContactId) -> Result<Conversation, RepositoryError> {
            Err(RepositoryError::NotFound(contact.clone()))
        }

        async fn create(&self, _conversation: &Conversation) -> Result<(), RepositoryError> {
            Ok(())
        }

        async fn save(&self, _conversation: &Conversation) -> Result<(), RepositoryError> {
            Ok(())
        }

        async fn deactivate_idle(&self, cutoff: &Timestamp) -> Result<u64, RepositoryError> {
            self.cutoffs.lock().unwrap().push(*cutoff);
            Ok(self.result)
        }
    }

    #[tokio::test]
    async fn passes_cutoff_in_the_past() {
        let repo = Arc::new(MockConversationRepository {
            cutoffs: Mutex::new(Vec::new()),
            result: 3,
        });
        let handler = CleanupInactiveHandler::new(repo.clone());
        let before = Timestamp::now().minus_minutes(60);

        let result = handler
            .handle(CleanupInactiveCommand {
                inactive_after_mins: 60,
            })
            .await
            .unwrap();

        assert_eq!(result.deactivated, 3);
        let cutoffs = repo.cutoffs.lock().unwrap();
        assert_eq!(cutoffs.len(), 1);
        assert!(!cutoffs[0].is_before(&before));
        assert!(cutoffs[0].is_before(&Timestamp::now().minus_minutes(59)));
    }
}
