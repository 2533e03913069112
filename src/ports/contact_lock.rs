//! Contact lock port - serializes message handling per contact.
//!
//! Handling one inbound message is a read-modify-write of the contact's
//! session. Holding the lease across load, handle and save keeps two messages
//! from the same contact from overwriting each other's state.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::foundation::{ContactId, ErrorCode};

/// Errors from the lock backend.
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("Timed out waiting for lock on contact: {0}")]
    Timeout(ContactId),

    #[error("Lock backend error: {0}")]
    Backend(String),
}

impl LockError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LockError::Timeout(_) => ErrorCode::LockUnavailable,
            LockError::Backend(_) => ErrorCode::CacheError,
        }
    }
}

/// Proof of holding the lock for one contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockLease {
    contact: ContactId,
    token: String,
}

impl LockLease {
    /// Creates a lease with a fresh random token.
    pub fn new(contact: ContactId) -> Self {
        Self {
            contact,
            token: Uuid::new_v4().to_string(),
        }
    }

    pub fn contact(&self) -> &ContactId {
        &self.contact
    }

    /// Token identifying this holder; release only succeeds with it.
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Port for per-contact mutual exclusion.
#[async_trait]
pub trait ContactLock: Send + Sync {
    /// Waits for exclusive access to `contact`.
    ///
    /// # Errors
    ///
    /// - `Timeout` if the lock is not obtained within the backend's wait limit
    /// - `Backend` if the lock store fails
    async fn acquire(&self, contact: &ContactId) -> Result<LockLease, LockError>;

    /// Releases a lease. Releasing an expired lease is not an error.
    async fn release(&self, lease: LockLease) -> Result<(), LockError>;
}
