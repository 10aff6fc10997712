//! Configuration models

pub mod engine;
pub mod module;

pub use engine::*;
pub use module::*;

use crate::core::keys::DEFAULT_CACHE_SEPARATOR;

/// Default memory engine capacity
pub const DEFAULT_MEMORY_CACHE_MAX: usize = 100;
/// Default memory engine TTL, 15 minutes
pub const DEFAULT_MEMORY_CACHE_TTL_MS: u64 = 15 * 60 * 1000;

pub(crate) fn default_cache_separator() -> char {
    DEFAULT_CACHE_SEPARATOR
}

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_memory_max_entries() -> usize {
    DEFAULT_MEMORY_CACHE_MAX
}

pub(crate) fn default_memory_ttl_ms() -> u64 {
    DEFAULT_MEMORY_CACHE_TTL_MS
}

pub(crate) fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

pub(crate) fn default_connection_timeout() -> u64 {
    5
}
