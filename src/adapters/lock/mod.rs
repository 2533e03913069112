//! Contact lock adapters.
//!
//! - `InMemoryContactLock` - single process
//! - `RedisContactLock` - shared across servers

mod in_memory;
mod redis;

pub use in_memory::InMemoryContactLock;
pub use self::redis::RedisContactLock;
