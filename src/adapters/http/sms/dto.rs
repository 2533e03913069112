//! HTTP DTOs for the SMS webhook.
//!
//! Field names follow the provider's form-encoded webhook payload.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::chat::Message;
use crate::domain::foundation::MessageId;

/// Empty TwiML document; replies are sent through the REST API instead.
pub const EMPTY_TWIML: &str = r#"<?xml version="1.0" encoding="UTF-8"?><Response></Response>"#;

/// Inbound SMS webhook form.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundSmsForm {
    #[serde(rename = "MessageSid")]
    pub message_sid: String,
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "To")]
    pub to: String,
    #[serde(rename = "Body", default)]
    pub body: String,
}

impl InboundSmsForm {
    /// Converts the webhook payload into a domain message stamped now.
    pub fn into_message(self) -> Message {
        Message::new(MessageId::new(self.message_sid), self.from, self.to, self.body)
    }
}

/// Error body returned when a webhook cannot be processed.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Context such as the offending form field.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub details: HashMap<String, String>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: HashMap::new(),
        }
    }

    pub fn with_details(mut self, details: HashMap<String, String>) -> Self {
        self.details = details;
        self
    }
}

/// Health check body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
