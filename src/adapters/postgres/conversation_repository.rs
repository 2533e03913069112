//! PostgreSQL implementation of ConversationRepository.
//!
//! Each conversation is one row; the chat session is stored as JSONB in
//! `data`. A partial unique index keeps one active row per contact.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::chat::{ChatSession, Conversation};
use crate::domain::foundation::{ContactId, ConversationId, Timestamp};
use crate::ports::{ConversationRepository, RepositoryError};

/// PostgreSQL implementation of ConversationRepository.
#[derive(Clone)]
pub struct PostgresConversationRepository {
    pool: PgPool,
}

impl PostgresConversationRepository {
    /// Creates a new PostgresConversationRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn session_json(conversation: &Conversation) -> Result<serde_json::Value, RepositoryError> {
        serde_json::to_value(conversation.session()).map_err(|e| {
            RepositoryError::Database(format!("Failed to serialize session: {}", e))
        })
    }
}

#[async_trait]
impl ConversationRepository for PostgresConversationRepository {
    async fn find_active(&self, contact: &ContactId) -> Result<Conversation, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, active, data, created_at, updated_at
            FROM conversations
            WHERE contact_id = $1 AND active IS TRUE
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(contact.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(format!("Failed to fetch conversation: {}", e)))?;

        let row = match row {
            Some(row) => row,
            None => return Err(RepositoryError::NotFound(contact.clone())),
        };

        let id = ConversationId::from_uuid(row.get("id"));
        let active: bool = row.get("active");
        let data: serde_json::Value = row.get("data");
        let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");
        let updated_at: chrono::DateTime<chrono::Utc> = row.get("updated_at");

        let session: ChatSession =
            serde_json::from_value(data).map_err(|e| RepositoryError::Corrupt {
                id,
                reason: e.to_string(),
            })?;

        Ok(Conversation::reconstitute(
            id,
            active,
            Timestamp::from_datetime(created_at),
            Timestamp::from_datetime(updated_at),
            session,
        ))
    }

    async fn create(&self, conversation: &Conversation) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO conversations (id, contact_id, active, data, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(conversation.id().as_uuid())
        .bind(conversation.contact_id().as_str())
        .bind(conversation.is_active())
        .bind(Self::session_json(conversation)?)
        .bind(conversation.created_at().as_datetime())
        .bind(conversation.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(format!("Failed to insert conversation: {}", e)))?;

        Ok(())
    }

    async fn save(&self, conversation: &Conversation) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE conversations SET
                active = $2,
                data = $3,
                updated_at = $4
            WHERE id = $1 AND active IS TRUE
            "#,
        )
        .bind(conversation.id().as_uuid())
        .bind(conversation.is_active())
        .bind(Self::session_json(conversation)?)
        .bind(conversation.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(format!("Failed to update conversation: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(conversation.contact_id().clone()));
        }

        Ok(())
    }

    async fn deactivate_idle(&self, cutoff: &Timestamp) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE conversations SET
                active = FALSE,
                data = jsonb_set(data, '{active}', 'false'::jsonb),
                updated_at = NOW()
            WHERE active IS TRUE AND updated_at < $1
            "#,
        )
        .bind(cutoff.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            RepositoryError::Database(format!("Failed to deactivate conversations: {}", e))
        })?;

        Ok(result.rows_affected())
    }
}
