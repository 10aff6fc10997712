//! Backend cache engines
//!
//! Every store here implements `CacheEngine`; the registry picks one per
//! declared `EngineKind`.

/// In-memory LRU store
pub mod memory;
/// Redis standalone and cluster stores
#[cfg(feature = "redis")]
pub mod redis;

pub use memory::MemoryStore;
#[cfg(feature = "redis")]
pub use self::redis::{RedisClusterStore, RedisStore};
