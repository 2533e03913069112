//! Adapters - Implementations of port interfaces.
//!
//! - `directory` - Resource snapshots from JSON files or memory
//! - `http` - SMS webhook endpoints
//! - `i18n` - Message catalogs
//! - `lock` - Per-contact locks (in-memory, Redis)
//! - `postgres` - PostgreSQL conversation storage
//! - `storage` - In-memory conversation storage
//! - `transport` - Outbound SMS senders

pub mod directory;
pub mod http;
pub mod i18n;
pub mod lock;
pub mod postgres;
pub mod storage;
pub mod transport;
