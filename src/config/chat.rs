//! Chat configuration - message limits and idle cleanup

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::directory::DEFAULT_MAX_MESSAGE_LENGTH;

/// Chat behaviour configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Longest body a single outbound SMS may carry
    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,

    /// Minutes without updates before a conversation is deactivated
    #[serde(default = "default_inactive_after_mins")]
    pub inactive_after_mins: i64,

    /// Seconds between cleanup sweeps
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_secs: u64,
}

impl ChatConfig {
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }

    /// Validate chat configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_message_length < 160 {
            return Err(ValidationError::InvalidMessageLength);
        }
        if self.inactive_after_mins <= 0 {
            return Err(ValidationError::InvalidChatTiming("inactive_after_mins"));
        }
        if self.cleanup_interval_secs == 0 {
            return Err(ValidationError::InvalidChatTiming("cleanup_interval_secs"));
        }
        Ok(())
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_message_length: default_max_message_length(),
            inactive_after_mins: default_inactive_after_mins(),
            cleanup_interval_secs: default_cleanup_interval(),
        }
    }
}

fn default_max_message_length() -> usize {
    DEFAULT_MAX_MESSAGE_LENGTH
}

fn default_inactive_after_mins() -> i64 {
    60
}

fn default_cleanup_interval() -> u64 {
    300
}
