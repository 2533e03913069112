//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Unique identifier for a persisted conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(Uuid);

impl ConversationId {
    /// Creates a new random ConversationId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a ConversationId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConversationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Transport-level address of a contact (usually an E.164 phone number).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    /// Creates a ContactId, rejecting blank addresses.
    pub fn new(address: impl Into<String>) -> Result<Self, ValidationError> {
        let address = address.into();
        let trimmed = address.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("contact_id"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContactId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Identifier of a single message.
///
/// Inbound and delivered messages carry the transport's own id, which is what
/// makes re-delivery detectable. Replies that have not been sent yet get a
/// locally generated placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Wraps a transport-assigned id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a random local id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if no id has been assigned.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod conversation_id {
        use super::*;

        #[test]
        fn generates_unique_values() {
            assert_ne!(ConversationId::new(), ConversationId::new());
        }

        #[test]
        fn parses_from_valid_string() {
            let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
            let id: ConversationId = uuid_str.parse().unwrap();
            assert_eq!(id.to_string(), uuid_str);
        }

        #[test]
        fn rejects_invalid_string() {
            assert!("not-a-uuid".parse::<ConversationId>().is_err());
        }
    }

    mod contact_id {
        use super::*;

        #[test]
        fn trims_surrounding_whitespace() {
            let id = ContactId::new("  +15555550100 ").unwrap();
            assert_eq!(id.as_str(), "+15555550100");
        }

        #[test]
        fn rejects_blank_address() {
            assert!(matches!(
                ContactId::new("   "),
                Err(ValidationError::EmptyField { .. })
            ));
        }

        #[test]
        fn serializes_as_plain_string() {
            let id = ContactId::new("+15555550100").unwrap();
            assert_eq!(serde_json::to_string(&id).unwrap(), "\"+15555550100\"");
        }
    }

    mod message_id {
        use super::*;

        #[test]
        fn generated_ids_are_unique_and_non_empty() {
            let a = MessageId::generate();
            let b = MessageId::generate();
            assert_ne!(a, b);
            assert!(!a.is_empty());
        }

        #[test]
        fn default_is_empty() {
            assert!(MessageId::default().is_empty());
        }
    }
}
