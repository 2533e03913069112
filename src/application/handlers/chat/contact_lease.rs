//! Contact lease guard shared by the handlers that mutate a conversation.
//!
//! Axum drops a handler future when the request times out or the provider
//! hangs up. The guard hands the lease back on drop so the contact is not
//! left locked until its TTL runs out.

use std::sync::Arc;

use crate::domain::foundation::ContactId;
use crate::ports::{ContactLock, LockError, LockLease};

/// Holds a contact lease until released or dropped.
pub(super) struct ContactLeaseGuard {
    lock: Arc<dyn ContactLock>,
    lease: Option<LockLease>,
}

impl ContactLeaseGuard {
    pub(super) async fn acquire(
        lock: &Arc<dyn ContactLock>,
        contact: &ContactId,
    ) -> Result<Self, LockError> {
        let lease = lock.acquire(contact).await?;
        Ok(Self {
            lock: Arc::clone(lock),
            lease: Some(lease),
        })
    }

    /// Releases in place. If this future is itself dropped, `Drop` retries.
    pub(super) async fn release(mut self) {
        let Some(lease) = self.lease.clone() else {
            return;
        };
        if let Err(err) = self.lock.release(lease).await {
            tracing::warn!(error = %err, "Failed to release contact lock");
        }
        self.lease = None;
    }
}

impl Drop for ContactLeaseGuard {
    fn drop(&mut self) {
        let Some(lease) = self.lease.take() else {
            return;
        };
        tracing::warn!(contact = %lease.contact(), "Handling abandoned, releasing contact lock");

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                let lock = Arc::clone(&self.lock);
                runtime.spawn(async move {
                    if let Err(err) = lock.release(lease).await {
                        tracing::warn!(error = %err, "Failed to release contact lock");
                    }
                });
            }
            Err(_) => {
                tracing::warn!(
                    contact = %lease.contact(),
                    "No runtime to release contact lock, leaving it to expire"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::lock::InMemoryContactLock;
    use std::time::Duration;

    fn contact() -> ContactId {
        ContactId::new("+15550001111").unwrap()
    }

    fn lock() -> (Arc<InMemoryContactLock>, Arc<dyn ContactLock>) {
        let lock = Arc::new(InMemoryContactLock::new(Duration::from_secs(1)));
        let port: Arc<dyn ContactLock> = lock.clone();
        (lock, port)
    }

    #[tokio::test]
    async fn release_frees_contact() {
        let (lock, port) = lock();
        let guard = ContactLeaseGuard::acquire(&port, &contact()).await.unwrap();
        assert!(lock.is_held(&contact()).await);

        guard.release().await;

        assert!(!lock.is_held(&contact()).await);
    }

    #[tokio::test]
    async fn dropped_guard_frees_contact() {
        let (_lock, port) = lock();
        let guard = ContactLeaseGuard::acquire(&port, &contact()).await.unwrap();

        drop(guard);

        assert!(ContactLeaseGuard::acquire(&port, &contact()).await.is_ok());
    }

    #[tokio::test]
    async fn guard_dropped_mid_await_frees_contact() {
        let (_lock, port) = lock();
        let stalled = {
            let port = Arc::clone(&port);
            async move {
                let _guard = ContactLeaseGuard::acquire(&port, &contact()).await?;
                std::future::pending::<()>().await;
                Ok::<_, LockError>(())
            }
        };

        let outcome = tokio::time::timeout(Duration::from_millis(20), stalled).await;

        assert!(outcome.is_err());
        let next = ContactLeaseGuard::acquire(&port, &contact()).await;
        assert!(next.is_ok());
    }
}
