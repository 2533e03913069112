//! HTTP listener settings for the webhook server

use serde::Deserialize;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use super::error::ValidationError;

/// The SMS provider abandons a webhook call after this many seconds.
pub const PROVIDER_WEBHOOK_TIMEOUT_SECS: u64 = 15;

/// Webhook server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the webhook listens on, e.g. `0.0.0.0:8080`
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,

    #[serde(default)]
    pub environment: Environment,

    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Seconds a webhook request may run before it is cut off
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Deployment environment; production switches logs to JSON
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Rejects timeouts the provider would never wait for.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.request_timeout_secs == 0
            || self.request_timeout_secs >= PROVIDER_WEBHOOK_TIMEOUT_SECS
        {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            environment: Environment::default(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8080))
}

fn default_log_level() -> String {
    "info,directory_chat=debug,sqlx=warn".to_string()
}

fn default_request_timeout() -> u64 {
    12
}
