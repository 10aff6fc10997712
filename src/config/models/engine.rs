//! Engine creation configuration

use super::*;
use crate::core::traits::CacheEngine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// One declared backend engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineCreationConfig {
    /// Engine name, used in logs
    pub name: String,
    /// Backend kind and its settings
    #[serde(flatten)]
    pub kind: EngineKind,
}

impl EngineCreationConfig {
    pub fn memory(name: impl Into<String>, config: MemoryStoreConfig) -> Self {
        Self {
            name: name.into(),
            kind: EngineKind::Memory(config),
        }
    }

    pub fn redis(name: impl Into<String>, config: RedisStoreConfig) -> Self {
        Self {
            name: name.into(),
            kind: EngineKind::Redis(config),
        }
    }

    pub fn redis_cluster(name: impl Into<String>, config: RedisClusterConfig) -> Self {
        Self {
            name: name.into(),
            kind: EngineKind::RedisCluster(config),
        }
    }

    /// Adopt an engine the caller already built
    pub fn instance(name: impl Into<String>, engine: Arc<dyn CacheEngine>) -> Self {
        Self {
            name: name.into(),
            kind: EngineKind::Instance(EngineInstance(engine)),
        }
    }
}

/// Backend kind
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EngineKind {
    /// In-process LRU store with TTL
    Memory(MemoryStoreConfig),
    /// Standalone Redis server
    Redis(RedisStoreConfig),
    /// Redis Cluster
    RedisCluster(RedisClusterConfig),
    /// Externally constructed engine (code-only)
    #[serde(skip)]
    Instance(EngineInstance),
}

impl EngineKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Redis(_) => "redis",
            Self::RedisCluster(_) => "redis-cluster",
            Self::Instance(_) => "instance",
        }
    }
}

/// Wrapper giving a caller-supplied engine a `Debug` impl
#[derive(Clone)]
pub struct EngineInstance(pub Arc<dyn CacheEngine>);

impl fmt::Debug for EngineInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EngineInstance(..)")
    }
}

/// In-memory store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStoreConfig {
    /// Maximum number of entries before LRU eviction
    #[serde(default = "default_memory_max_entries")]
    pub max_entries: usize,
    /// Default TTL in milliseconds, 0 disables expiry
    #[serde(default = "default_memory_ttl_ms")]
    pub ttl_ms: u64,
}

impl Default for MemoryStoreConfig {
    fn default() -> Self {
        Self {
            max_entries: default_memory_max_entries(),
            ttl_ms: default_memory_ttl_ms(),
        }
    }
}

impl MemoryStoreConfig {
    pub fn default_ttl(&self) -> Option<Duration> {
        ttl_from_millis(self.ttl_ms)
    }
}

/// Standalone Redis configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedisStoreConfig {
    /// Redis URL
    #[serde(default = "default_redis_url")]
    pub url: String,
    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
    /// Default TTL in milliseconds when a write carries none
    #[serde(default)]
    pub default_ttl_ms: Option<u64>,
}

impl Default for RedisStoreConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            connection_timeout: default_connection_timeout(),
            default_ttl_ms: None,
        }
    }
}

/// Redis Cluster configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RedisClusterConfig {
    /// Seed node URLs
    pub nodes: Vec<String>,
    /// Route reads to replicas
    #[serde(default)]
    pub read_from_replicas: bool,
    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
    /// Default TTL in milliseconds when a write carries none
    #[serde(default)]
    pub default_ttl_ms: Option<u64>,
}

/// `0` means "no expiry"
pub(crate) fn ttl_from_millis(ms: u64) -> Option<Duration> {
    if ms == 0 {
        None
    } else {
        Some(Duration::from_millis(ms))
    }
}
