//! In-memory storage implementation
//!
//! - `store` - LRU store with TTL, implements `CacheEngine`
//! - `tests` - Module tests

mod store;

pub use store::MemoryStore;
