//! Test engines
//!
//! `RecordingEngine` delegates to a real memory store and records every call
//! it receives. `FailingEngine` fails every call.

use async_trait::async_trait;
use multicache::{CacheEngine, CacheError, MemoryStore, MemoryStoreConfig, Result};
use parking_lot::Mutex;
use serde_json::Value;
use std::time::Duration;

/// Memory-backed engine that logs the calls it receives
pub struct RecordingEngine {
    inner: MemoryStore,
    calls: Mutex<Vec<String>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(&MemoryStoreConfig {
                max_entries: 1000,
                ttl_ms: 0,
            })
            .unwrap(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Calls so far, formatted as `op(arg)`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn calls_to(&self, operation: &str) -> Vec<String> {
        let prefix = format!("{}(", operation);
        self.calls
            .lock()
            .iter()
            .filter(|call| call.starts_with(&prefix))
            .cloned()
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.lock().push(call);
    }
}

impl Default for RecordingEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheEngine for RecordingEngine {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        self.record(format!("get({})", key));
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> Result<()> {
        self.record(format!("set({})", key));
        self.inner.set(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.record(format!("delete({})", key));
        self.inner.delete(key).await
    }

    async fn delete_many(&self, keys: &[String]) -> Result<()> {
        self.record(format!("delete_many({})", keys.join(",")));
        self.inner.delete_many(keys).await
    }

    async fn list_keys(&self, pattern: &str) -> Result<Vec<String>> {
        self.record(format!("list_keys({})", pattern));
        self.inner.list_keys(pattern).await
    }

    async fn reset(&self) -> Result<()> {
        self.record("reset()".to_string());
        self.inner.reset().await
    }
}

/// Engine whose every operation fails
#[derive(Debug, Default)]
pub struct FailingEngine;

impl FailingEngine {
    fn fail<T>(operation: &'static str) -> Result<T> {
        Err(CacheError::engine_operation("failing", operation, "engine unavailable"))
    }
}

#[async_trait]
impl CacheEngine for FailingEngine {
    async fn get(&self, _key: &str) -> Result<Option<Value>> {
        Self::fail("get")
    }

    async fn set(&self, _key: &str, _value: Value, _ttl: Option<Duration>) -> Result<()> {
        Self::fail("set")
    }

    async fn delete(&self, _key: &str) -> Result<()> {
        Self::fail("delete")
    }

    async fn list_keys(&self, _pattern: &str) -> Result<Vec<String>> {
        Self::fail("list keys")
    }

    async fn reset(&self) -> Result<()> {
        Self::fail("reset")
    }
}
