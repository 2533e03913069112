//! Twilio configuration
//!
//! Optional: without it, replies are logged instead of sent.

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Twilio Messages API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TwilioConfig {
    /// Account SID (starts with `AC`)
    pub account_sid: String,

    /// Auth token
    pub auth_token: Secret<String>,

    /// Number replies are sent from
    pub from_number: String,

    /// API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl TwilioConfig {
    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate Twilio configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.account_sid.starts_with("AC") {
            return Err(ValidationError::InvalidTwilioAccountSid);
        }
        if self.from_number.trim().is_empty() {
            return Err(ValidationError::MissingRequired("TWILIO_FROM_NUMBER"));
        }
        if !self.api_base_url.starts_with("https://") && !self.api_base_url.starts_with("http://") {
            return Err(ValidationError::InvalidTwilioBaseUrl);
        }
        Ok(())
    }
}

fn default_api_base_url() -> String {
    "https://api.twilio.com".to_string()
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn config(account_sid: &str) -> TwilioConfig {
        TwilioConfig {
            account_sid: account_sid.to_string(),
            auth_token: Secret::new("token".to_string()),
            from_number: "+15559990000".to_string(),
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout(),
        }
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(config("AC123").validate().is_ok());
    }

    #[test]
    fn test_validation_invalid_account_sid() {
        assert_eq!(
            config("SK123").validate(),
            Err(ValidationError::InvalidTwilioAccountSid)
        );
    }

    #[test]
    fn test_validation_missing_from_number() {
        let config = TwilioConfig {
            from_number: " ".to_string(),
            ..config("AC123")
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_auth_token() {
        let config = config("AC123");
        assert_eq!(config.auth_token.expose_secret(), "token");
        assert!(!format!("{:?}", config).contains("\"token\""));
    }
}
