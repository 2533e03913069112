//! Conversation store settings
//!
//! Only present when conversations should outlive the process; without it the
//! service keeps them in memory.

use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use super::error::ValidationError;

/// PostgreSQL conversation store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `postgres://` connection string
    pub url: String,

    /// Upper bound on pooled connections. Each in-flight webhook holds at
    /// most one at a time.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait for a free connection
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Apply the embedded migrations before serving
    #[serde(default)]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !matches!(
            self.url.split_once("://"),
            Some(("postgres" | "postgresql", _))
        ) {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.max_connections == 0 {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.acquire_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_url(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_string(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            run_migrations: false,
        }
    }

    #[test]
    fn accepts_both_postgres_schemes() {
        assert!(with_url("postgres://chat@db/directory").validate().is_ok());
        assert!(with_url("postgresql://chat@db/directory").validate().is_ok());
    }

    #[test]
    fn rejects_other_urls() {
        for url in ["", "mysql://db/directory", "postgres-db/directory"] {
            assert_eq!(
                with_url(url).validate(),
                Err(ValidationError::InvalidDatabaseUrl),
                "{url}"
            );
        }
    }

    #[test]
    fn empty_pool_is_rejected() {
        let config = DatabaseConfig {
            max_connections: 0,
            ..with_url("postgres://chat@db/directory")
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidPoolSize));
    }
}
