//! Twilio SMS sender - Implementation of MessageSender over the Messages API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = TwilioConfig::new(account_sid, auth_token, "+15559990000")
//!     .with_base_url("https://api.twilio.com");
//!
//! let sender = TwilioSender::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::chat::Message;
use crate::domain::foundation::{MessageId, Timestamp};
use crate::ports::{MessageSender, TransportError};

/// Configuration for the Twilio sender.
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Account SID, also the basic auth user.
    pub account_sid: String,
    /// Auth token, the basic auth password.
    auth_token: Secret<String>,
    /// Number replies are sent from.
    pub from_number: String,
    /// API base URL (default: https://api.twilio.com).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl TwilioConfig {
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: Secret<String>,
        from_number: impl Into<String>,
    ) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token,
            from_number: from_number.into(),
            base_url: "https://api.twilio.com".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn auth_token(&self) -> &str {
        self.auth_token.expose_secret()
    }
}

/// Twilio Messages API sender.
pub struct TwilioSender {
    config: TwilioConfig,
    client: Client,
}

impl TwilioSender {
    /// Creates a sender with its own HTTP client.
    pub fn new(config: TwilioConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.base_url.trim_end_matches('/'),
            self.config.account_sid
        )
    }
}

/// The subset of the Messages API response we use.
#[derive(Debug, Deserialize)]
struct TwilioMessageResponse {
    sid: String,
    #[serde(default)]
    from: Option<String>,
}

#[async_trait]
impl MessageSender for TwilioSender {
    async fn send(&self, message: &Message) -> Result<Message, TransportError> {
        let form = [
            ("To", message.recipient()),
            ("From", self.config.from_number.as_str()),
            ("Body", message.body()),
        ];

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(self.config.auth_token()))
            .form(&form)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let sent: TwilioMessageResponse = response
            .json()
            .await
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))?;

        let from = sent.from.unwrap_or_else(|| self.config.from_number.clone());
        Ok(message
            .clone()
            .confirmed(MessageId::new(sent.sid), from)
            .with_created_at(Timestamp::now()))
    }
}

impl std::fmt::Debug for TwilioSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioSender")
            .field("account_sid", &self.config.account_sid)
            .field("from_number", &self.config.from_number)
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}
