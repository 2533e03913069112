//! Redis-backed contact lock for multi-server deployments.
//!
//! Acquires with `SET key token NX PX ttl` and releases with a
//! compare-and-delete script, so a lease that outlived its TTL cannot
//! release a lock someone else now holds.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use std::time::Duration;
use tokio::time::Instant;

use crate::domain::foundation::ContactId;
use crate::ports::{ContactLock, LockError, LockLease};

const RELEASE_SCRIPT: &str = r#"
if redis.call("GET", KEYS[1]) == ARGV[1] then
    return redis.call("DEL", KEYS[1])
else
    return 0
end
"#;

/// How often a busy lock is retried.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Redis contact lock.
#[derive(Clone)]
pub struct RedisContactLock {
    conn: MultiplexedConnection,
    ttl: Duration,
    wait: Duration,
}

impl RedisContactLock {
    /// Creates a lock whose leases expire after `ttl` and whose acquisition
    /// gives up after `wait`.
    pub fn new(conn: MultiplexedConnection, ttl: Duration, wait: Duration) -> Self {
        Self {
            conn,
            ttl,
            wait,
        }
    }

    fn key(contact: &ContactId) -> String {
        format!("directory-chat:lock:{}", contact)
    }
}

#[async_trait]
impl ContactLock for RedisContactLock {
    async fn acquire(&self, contact: &ContactId) -> Result<LockLease, LockError> {
        let lease = LockLease::new(contact.clone());
        let key = Self::key(contact);
        let deadline = Instant::now() + self.wait;
        let mut conn = self.conn.clone();

        loop {
            let acquired: Option<String> = redis::cmd("SET")
                .arg(&key)
                .arg(lease.token())
                .arg("NX")
                .arg("PX")
                .arg(self.ttl.as_millis() as u64)
                .query_async(&mut conn)
                .await
                .map_err(|e: redis::RedisError| LockError::Backend(e.to_string()))?;

            if acquired.is_some() {
                return Ok(lease);
            }
            if Instant::now() >= deadline {
                return Err(LockError::Timeout(contact.clone()));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn release(&self, lease: LockLease) -> Result<(), LockError> {
        let mut conn = self.conn.clone();
        redis::Script::new(RELEASE_SCRIPT)
            .key(Self::key(lease.contact()))
            .arg(lease.token())
            .invoke_async::<_, i64>(&mut conn)
            .await
            .map_err(|e: redis::RedisError| LockError::Backend(e.to_string()))?;
        Ok(())
    }
}

impl std::fmt::Debug for RedisContactLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisContactLock")
            .field("ttl", &self.ttl)
            .field("wait", &self.wait)
            .finish_non_exhaustive()
    }
}
