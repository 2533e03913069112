//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresConversationRepository` - Conversations with JSONB session snapshots

mod conversation_repository;

pub use conversation_repository::PostgresConversationRepository;

use sqlx::PgPool;

/// Applies the embedded schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
