//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Timeout must be positive and shorter than the provider's webhook timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,

    #[error("Database pool needs at least one connection")]
    InvalidPoolSize,

    #[error("Invalid Twilio account SID format")]
    InvalidTwilioAccountSid,

    #[error("Invalid Twilio API base URL")]
    InvalidTwilioBaseUrl,

    #[error("Maximum message length must be at least 160 characters")]
    InvalidMessageLength,

    #[error("Chat timing setting must be positive: {0}")]
    InvalidChatTiming(&'static str),

    #[error("Invalid contact lock timing: {0}")]
    InvalidLockTiming(&'static str),
}
