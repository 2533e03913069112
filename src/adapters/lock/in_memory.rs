//! In-memory contact lock for single-server deployments and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Notify};
use tokio::time::Instant;

use crate::domain::foundation::ContactId;
use crate::ports::{ContactLock, LockError, LockLease};

const DEFAULT_TTL: Duration = Duration::from_secs(30);

#[derive(Debug)]
struct Held {
    token: String,
    expires_at: Instant,
}

/// Per-contact lock held in process memory.
///
/// Waiters are woken on every release and retry; acquisition gives up after
/// the configured wait. A lease that is never released lapses after its TTL,
/// matching the Redis lock's `PX` expiry.
#[derive(Debug, Clone)]
pub struct InMemoryContactLock {
    held: Arc<Mutex<HashMap<ContactId, Held>>>,
    released: Arc<Notify>,
    wait: Duration,
    ttl: Duration,
}

impl InMemoryContactLock {
    /// Creates a lock that waits at most `wait` for a busy contact.
    pub fn new(wait: Duration) -> Self {
        Self {
            held: Arc::new(Mutex::new(HashMap::new())),
            released: Arc::new(Notify::new()),
            wait,
            ttl: DEFAULT_TTL,
        }
    }

    /// Sets how long a lease lasts without being released.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Returns true if some caller holds an unexpired lease for `contact`.
    pub async fn is_held(&self, contact: &ContactId) -> bool {
        self.held
            .lock()
            .await
            .get(contact)
            .is_some_and(|held| held.expires_at > Instant::now())
    }
}

#[async_trait]
impl ContactLock for InMemoryContactLock {
    async fn acquire(&self, contact: &ContactId) -> Result<LockLease, LockError> {
        let lease = LockLease::new(contact.clone());

        let wait_turn = async {
            loop {
                let released = self.released.notified();
                let expires_at = {
                    let mut held = self.held.lock().await;
                    let now = Instant::now();
                    match held.get(contact) {
                        Some(current) if current.expires_at > now => current.expires_at,
                        _ => {
                            held.insert(
                                contact.clone(),
                                Held {
                                    token: lease.token().to_string(),
                                    expires_at: now + self.ttl,
                                },
                            );
                            return;
                        }
                    }
                };
                // Either a release or the current lease lapsing lets us retry
                let _ = tokio::time::timeout_at(expires_at, released).await;
            }
        };

        tokio::time::timeout(self.wait, wait_turn)
            .await
            .map_err(|_| LockError::Timeout(contact.clone()))?;

        Ok(lease)
    }

    async fn release(&self, lease: LockLease) -> Result<(), LockError> {
        let mut held = self.held.lock().await;
        if held.get(lease.contact()).map(|h| h.token.as_str()) == Some(lease.token()) {
            held.remove(lease.contact());
        }
        drop(held);
        self.released.notify_waiters();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(address: &str) -> ContactId {
        ContactId::new(address).unwrap()
    }

    #[tokio::test]
    async fn acquire_and_release() {
        let lock = InMemoryContactLock::new(Duration::from_millis(50));
        let lease = lock.acquire(&contact("+1555")).await.unwrap();
        assert!(lock.is_held(&contact("+1555")).await);

        lock.release(lease).await.unwrap();

        assert!(!lock.is_held(&contact("+1555")).await);
    }

    #[tokio::test]
    async fn busy_contact_times_out() {
        let lock = InMemoryContactLock::new(Duration::from_millis(20));
        let _lease = lock.acquire(&contact("+1555")).await.unwrap();

        let err = lock.acquire(&contact("+1555")).await.unwrap_err();

        assert!(matches!(err, LockError::Timeout(_)));
    }

    #[tokio::test]
    async fn different_contacts_do_not_block() {
        let lock = InMemoryContactLock::new(Duration::from_millis(20));
        let _a = lock.acquire(&contact("+1001")).await.unwrap();
        assert!(lock.acquire(&contact("+1002")).await.is_ok());
    }

    #[tokio::test]
    async fn waiter_proceeds_after_release() {
        let lock = InMemoryContactLock::new(Duration::from_secs(2));
        let lease = lock.acquire(&contact("+1555")).await.unwrap();

        let waiter = {
            let lock = lock.clone();
            tokio::spawn(async move { lock.acquire(&contact("+1555")).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        lock.release(lease).await.unwrap();

        assert!(waiter.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn unreleased_lease_lapses_after_ttl() {
        let lock =
            InMemoryContactLock::new(Duration::from_secs(1)).with_ttl(Duration::from_millis(30));
        let abandoned = lock.acquire(&contact("+1555")).await.unwrap();

        let next = lock.acquire(&contact("+1555")).await.unwrap();

        assert_ne!(next.token(), abandoned.token());
        lock.release(abandoned).await.unwrap();
        assert!(lock.is_held(&contact("+1555")).await);
    }

    #[tokio::test]
    async fn stale_lease_does_not_release_new_holder() {
        let lock = InMemoryContactLock::new(Duration::from_millis(20));
        let stale = LockLease::new(contact("+1555"));
        let _current = lock.acquire(&contact("+1555")).await.unwrap();

        lock.release(stale).await.unwrap();

        assert!(lock.is_held(&contact("+1555")).await);
    }
}
