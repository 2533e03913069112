//! Contact lock settings
//!
//! With `redis_url` set, locks are shared between instances; otherwise each
//! process locks contacts in memory.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Per-contact lock configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LockConfig {
    /// `redis://` or `rediss://` URL of the shared lock store
    pub redis_url: Option<String>,

    /// Seconds allowed for the initial Redis connection
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Seconds a message waits for the contact's previous message to finish
    #[serde(default = "default_wait")]
    pub wait_secs: u64,

    /// Seconds after which a lease nobody released is given up
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,
}

impl LockConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn wait(&self) -> Duration {
        Duration::from_secs(self.wait_secs)
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// A lease must outlive the wait, or a waiter could take over a contact
    /// that is still being handled.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = &self.redis_url {
            if !url.starts_with("redis://") && !url.starts_with("rediss://") {
                return Err(ValidationError::InvalidRedisUrl);
            }
        }
        if self.wait_secs == 0 {
            return Err(ValidationError::InvalidLockTiming("wait_secs"));
        }
        if self.ttl_secs <= self.wait_secs {
            return Err(ValidationError::InvalidLockTiming("ttl_secs"));
        }
        Ok(())
    }
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            connect_timeout_secs: default_connect_timeout(),
            wait_secs: default_wait(),
            ttl_secs: default_ttl(),
        }
    }
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_wait() -> u64 {
    10
}

fn default_ttl() -> u64 {
    30
}
