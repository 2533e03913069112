//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `DIRECTORY_CHAT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use directory_chat::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod chat;
mod database;
mod directory;
mod error;
mod lock;
mod server;
mod twilio;

pub use chat::ChatConfig;
pub use database::DatabaseConfig;
pub use directory::DirectoryConfig;
pub use error::{ConfigError, ValidationError};
pub use lock::LockConfig;
pub use server::{Environment, ServerConfig, PROVIDER_WEBHOOK_TIMEOUT_SECS};
pub use twilio::TwilioConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults except the optional backends. Without
/// `database`, `lock.redis_url` or `twilio` the service falls back to
/// in-memory storage, in-process locks and logged replies.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Webhook listener (address, environment, timeouts)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Per-contact locking, optionally shared through Redis
    #[serde(default)]
    pub lock: LockConfig,

    /// Twilio configuration (outbound SMS)
    #[serde(default)]
    pub twilio: Option<TwilioConfig>,

    /// Directory data locations
    #[serde(default)]
    pub directory: DirectoryConfig,

    /// Chat behaviour
    #[serde(default)]
    pub chat: ChatConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `DIRECTORY_CHAT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `DIRECTORY_CHAT__SERVER__LISTEN_ADDR=0.0.0.0:8080` -> `server.listen_addr`
    /// - `DIRECTORY_CHAT__LOCK__REDIS_URL=redis://...` -> `lock.redis_url`
    /// - `DIRECTORY_CHAT__DATABASE__URL=...` -> `database.url = ...`
    /// - `DIRECTORY_CHAT__TWILIO__AUTH_TOKEN=...` -> `twilio.auth_token = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DIRECTORY_CHAT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.lock.validate()?;
        if let Some(twilio) = &self.twilio {
            twilio.validate()?;
        }
        self.directory.validate()?;
        self.chat.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
