//! In-memory LRU store with per-entry TTL

use crate::config::MemoryStoreConfig;
use crate::core::traits::CacheEngine;
use crate::utils::error::{CacheError, Result};
use async_trait::async_trait;
use lru::LruCache;
use parking_lot::Mutex;
use serde_json::Value;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tracing::debug;

/// Stored value with its expiry
#[derive(Debug, Clone)]
struct MemoryEntry {
    value: Value,
    expires_at: Option<Instant>,
}

impl MemoryEntry {
    fn new(value: Value, ttl: Option<Duration>) -> Self {
        Self {
            value,
            // A TTL past the clock's range never expires
            expires_at: ttl.and_then(|ttl| Instant::now().checked_add(ttl)),
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

/// In-process cache engine
///
/// Eviction is least-recently-used once `max_entries` is reached; expired
/// entries are dropped lazily when touched or listed.
#[derive(Debug)]
pub struct MemoryStore {
    entries: Mutex<LruCache<String, MemoryEntry>>,
    default_ttl: Option<Duration>,
}

impl MemoryStore {
    /// Create a new memory store
    pub fn new(config: &MemoryStoreConfig) -> Result<Self> {
        let capacity = NonZeroUsize::new(config.max_entries).ok_or_else(|| {
            CacheError::config("Invalid memory cache configuration: max_entries must be greater than 0")
        })?;

        debug!(
            "Creating memory store: max_entries={}, ttl_ms={}",
            config.max_entries, config.ttl_ms
        );

        Ok(Self {
            entries: Mutex::new(LruCache::new(capacity)),
            default_ttl: config.default_ttl(),
        })
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .iter()
            .filter(|(_, entry)| !entry.is_expired(now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn effective_ttl(&self, ttl: Option<Duration>) -> Option<Duration> {
        match ttl {
            Some(ttl) if ttl.is_zero() => None,
            Some(ttl) => Some(ttl),
            None => self.default_ttl,
        }
    }
}

#[async_trait]
impl CacheEngine for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut entries = self.entries.lock();
        let expired = match entries.get(key) {
            Some(entry) if !entry.is_expired(Instant::now()) => {
                return Ok(Some(entry.value.clone()));
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            entries.pop(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> Result<()> {
        let entry = MemoryEntry::new(value, self.effective_ttl(ttl));
        self.entries.lock().put(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.lock().pop(key);
        Ok(())
    }

    async fn delete_many(&self, keys: &[String]) -> Result<()> {
        let mut entries = self.entries.lock();
        for key in keys {
            entries.pop(key);
        }
        Ok(())
    }

    /// Returns every live key, most recently used first. The pattern is not
    /// applied here.
    async fn list_keys(&self, _pattern: &str) -> Result<Vec<String>> {
        let now = Instant::now();
        let mut entries = self.entries.lock();

        let mut live = Vec::with_capacity(entries.len());
        let mut expired = Vec::new();
        for (key, entry) in entries.iter() {
            if entry.is_expired(now) {
                expired.push(key.clone());
            } else {
                live.push(key.clone());
            }
        }

        for key in &expired {
            entries.pop(key);
        }
        Ok(live)
    }

    async fn reset(&self) -> Result<()> {
        self.entries.lock().clear();
        Ok(())
    }
}
