//! Cache manager implementation
//!
//! A `CacheManager` is a namespaced view over an `EngineRegistry`. Several
//! managers with different prefixes can share one registry; each only ever
//! sees its own keys.

use super::fanout::{any_success, fan_out, keep_successes, log_engine_failure};
use crate::config::{CacheModuleConfig, ReadWriteMode};
use crate::core::pattern::{PatternMatcher, is_pattern_like};
use crate::core::registry::{EngineRegistry, RegisteredEngine};
use crate::utils::error::{CacheError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Namespaced cache facade over a shared engine registry
#[derive(Debug, Clone)]
pub struct CacheManager {
    registry: Arc<EngineRegistry>,
    module_prefix: Option<String>,
    separator: char,
    mode: ReadWriteMode,
}

impl CacheManager {
    /// Build a registry from `config` and a manager on top of it
    pub async fn new(config: &CacheModuleConfig) -> Result<Self> {
        let registry = Arc::new(EngineRegistry::build(config).await?);
        Ok(Self::with_registry(registry, config))
    }

    /// Create a manager over an existing registry. Only the namespace and
    /// read/write settings of `config` are used.
    pub fn with_registry(registry: Arc<EngineRegistry>, config: &CacheModuleConfig) -> Self {
        Self {
            registry,
            module_prefix: config.module_prefix().map(str::to_string),
            separator: config.cache_separator,
            mode: config.read_write_mode,
        }
    }

    pub fn registry(&self) -> &Arc<EngineRegistry> {
        &self.registry
    }

    pub fn module_prefix(&self) -> Option<&str> {
        self.module_prefix.as_deref()
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn read_write_mode(&self) -> ReadWriteMode {
        self.mode
    }

    /// Physical key for a logical key
    pub fn namespaced_key(&self, key: &str) -> String {
        match &self.module_prefix {
            Some(prefix) => format!("{}{}{}", prefix, self.separator, key),
            None => key.to_string(),
        }
    }

    fn strip_namespace<'k>(&self, key: &'k str) -> &'k str {
        match &self.module_prefix {
            Some(prefix) => key
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_prefix(self.separator))
                .unwrap_or(key),
            None => key,
        }
    }

    fn namespaced_pattern(&self, pattern: Option<&str>) -> String {
        match (&self.module_prefix, pattern) {
            (Some(_), Some(pattern)) => self.namespaced_key(pattern),
            (Some(_), None) => self.namespaced_key("*"),
            (None, Some(pattern)) => pattern.to_string(),
            (None, None) => "*".to_string(),
        }
    }

    /// Read a value, `Ok(None)` on miss
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let key = self.namespaced_key(key);
        debug!("Cache get: {}", key);

        match self.read(&key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Store a value. `None` uses each engine's default TTL.
    pub async fn set<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> Result<()> {
        let key = self.namespaced_key(key);
        debug!("Cache set: {} (ttl: {:?})", key, ttl);

        let value = serde_json::to_value(value)?;
        self.write(&key, value, ttl).await
    }

    /// Return the cached value, or compute it with `supplier` and cache it.
    ///
    /// A supplier error is returned unchanged and nothing is stored. Failing
    /// to store a computed value is logged and the value still returned.
    /// Concurrent misses on the same key may each run the supplier.
    pub async fn wrap<T, E, F, Fut>(
        &self,
        key: &str,
        supplier: F,
        ttl: Option<Duration>,
    ) -> std::result::Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<CacheError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        if let Some(hit) = self.get::<T>(key).await? {
            debug!("Cache hit: {}", key);
            return Ok(hit);
        }

        debug!("Cache miss: {}", key);
        let value = supplier().await?;
        if let Err(e) = self.set(key, &value, ttl).await {
            warn!(key = %key, error = %e, "Failed to store computed value");
        }
        Ok(value)
    }

    /// Delete one key, or every key matching a pattern.
    ///
    /// Patterns are expanded through `list_keys` first, so keys written
    /// between listing and deleting survive. Engine failures are logged.
    pub async fn delete(&self, key_or_pattern: &str) -> Result<()> {
        let keys = if is_pattern_like(key_or_pattern, self.separator) {
            self.list_keys(Some(key_or_pattern)).await?
        } else {
            vec![key_or_pattern.to_string()]
        };

        if keys.is_empty() {
            debug!("Cache delete: nothing matches {}", key_or_pattern);
            return Ok(());
        }

        let keys: Vec<String> = keys.iter().map(|key| self.namespaced_key(key)).collect();
        debug!("Cache delete: {:?}", keys);

        let outcomes = fan_out(self.registry.engines(), |registered| {
            registered.engine().delete_many(&keys)
        })
        .await;
        keep_successes(outcomes, "delete", key_or_pattern);
        Ok(())
    }

    /// Logical keys matching `pattern` (everything when `None`), with the
    /// module prefix stripped. Order is first-seen across engines.
    pub async fn list_keys(&self, pattern: Option<&str>) -> Result<Vec<String>> {
        let pattern = self.namespaced_pattern(pattern);
        let matcher = PatternMatcher::compile(&pattern)?;

        let outcomes = fan_out(self.registry.engines(), |registered| {
            registered.engine().list_keys(&pattern)
        })
        .await;

        let mut seen = HashSet::new();
        let keys = keep_successes(outcomes, "list keys", &pattern)
            .into_iter()
            .flat_map(|(_, keys)| keys)
            .filter(|key| seen.insert(key.clone()))
            .filter(|key| matcher.test(key))
            .map(|key| self.strip_namespace(&key).to_string())
            .collect();

        Ok(keys)
    }

    /// Clear every engine. Fails only when every engine failed.
    pub async fn reset(&self) -> Result<()> {
        debug!("Cache reset");
        let outcomes = fan_out(self.registry.engines(), |registered| {
            registered.engine().reset()
        })
        .await;
        any_success(outcomes, "reset", "*")
    }

    async fn read(&self, key: &str) -> Result<Option<Value>> {
        let engines = self.registry.engines();
        if self.mode == ReadWriteMode::Primary || engines.len() == 1 {
            return read_one(self.registry.primary(), key).await;
        }

        for registered in engines {
            match registered.engine().get(key).await {
                Ok(Some(value)) => return Ok(Some(value)),
                Ok(None) => {}
                Err(e) => log_engine_failure(registered, "get", key, &e),
            }
        }
        Ok(None)
    }

    async fn write(&self, key: &str, value: Value, ttl: Option<Duration>) -> Result<()> {
        if self.mode == ReadWriteMode::Primary {
            let primary = self.registry.primary();
            return primary
                .engine()
                .set(key, value, ttl)
                .await
                .inspect_err(|e| log_engine_failure(primary, "set", key, e));
        }

        let outcomes = fan_out(self.registry.engines(), |registered| {
            registered.engine().set(key, value.clone(), ttl)
        })
        .await;
        any_success(outcomes, "set", key)
    }
}

async fn read_one(registered: &RegisteredEngine, key: &str) -> Result<Option<Value>> {
    registered
        .engine()
        .get(key)
        .await
        .inspect_err(|e| log_engine_failure(registered, "get", key, e))
}
