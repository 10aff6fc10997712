//! Cache engine trait
//!
//! The narrow capability every backend store satisfies. The orchestrator only
//! ever talks to engines through this trait.

use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Backend store capability
///
/// Implementations must be safe for concurrent use: a single engine instance
/// is shared by every manager built on the same registry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheEngine: Send + Sync {
    /// Get a value, `None` on miss
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Store a value. `None` uses the engine's default TTL, a zero duration
    /// stores without expiry.
    async fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> Result<()>;

    /// Delete a single key. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Delete several keys
    async fn delete_many(&self, keys: &[String]) -> Result<()> {
        for key in keys {
            self.delete(key).await?;
        }
        Ok(())
    }

    /// List keys matching a `*` glob. Engines without native pattern support
    /// may return every key; callers re-filter.
    async fn list_keys(&self, pattern: &str) -> Result<Vec<String>>;

    /// Remove every entry held by this engine
    async fn reset(&self) -> Result<()>;
}
