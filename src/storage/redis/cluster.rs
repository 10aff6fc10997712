//! Redis Cluster engine
//!
//! `KEYS` and `FLUSHALL` are routed to every primary by the cluster client
//! and their replies merged. Deletes go out one key at a time since a batch
//! may span hash slots.

use super::{decode_value, encode_value, expiry_millis};
use crate::config::RedisClusterConfig;
use crate::config::models::engine::ttl_from_millis;
use crate::core::pattern::to_redis_glob;
use crate::core::traits::CacheEngine;
use crate::utils::error::{CacheError, Result};
use crate::utils::sanitize_url;
use async_trait::async_trait;
use futures::future::try_join_all;
use redis::cluster::ClusterClient;
use redis::cluster_async::ClusterConnection;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// Cache engine backed by a Redis Cluster
#[derive(Clone)]
pub struct RedisClusterStore {
    connection: ClusterConnection,
    default_ttl: Option<Duration>,
    nodes: Vec<String>,
}

impl RedisClusterStore {
    /// Connect to the cluster through its seed nodes
    pub async fn connect(config: &RedisClusterConfig) -> Result<Self> {
        if config.nodes.is_empty() {
            return Err(CacheError::config("Redis cluster requires at least one node"));
        }

        let nodes: Vec<String> = config.nodes.iter().map(|n| sanitize_url(n)).collect();
        info!("Connecting Redis cluster cache engine ({} seed nodes)", nodes.len());
        debug!("Redis cluster nodes: {:?}", nodes);

        let timeout = Duration::from_secs(config.connection_timeout);
        let mut builder = ClusterClient::builder(config.nodes.clone())
            .connection_timeout(timeout)
            .response_timeout(timeout);
        if config.read_from_replicas {
            builder = builder.read_from_replicas();
        }
        let client = builder.build()?;

        let connection = tokio::time::timeout(timeout, client.get_async_connection())
            .await
            .map_err(|_| {
                std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    format!(
                        "Timed out connecting to Redis cluster after {}s",
                        config.connection_timeout
                    ),
                )
            })??;

        info!("Redis cluster cache engine connected");
        Ok(Self {
            connection,
            default_ttl: config.default_ttl_ms.and_then(ttl_from_millis),
            nodes,
        })
    }
}

impl fmt::Debug for RedisClusterStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisClusterStore")
            .field("nodes", &self.nodes)
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

#[async_trait]
impl CacheEngine for RedisClusterStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut conn = self.connection.clone();
        let raw: Option<String> = redis::cmd("GET").arg(key).query_async(&mut conn).await?;
        raw.as_deref().map(decode_value).transpose()
    }

    async fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> Result<()> {
        let payload = encode_value(&value)?;
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(payload);
        if let Some(ms) = expiry_millis(ttl, self.default_ttl) {
            cmd.arg("PX").arg(ms);
        }

        let mut conn = self.connection.clone();
        let _: () = cmd.query_async(&mut conn).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.connection.clone();
        let _: () = redis::cmd("DEL").arg(key).query_async(&mut conn).await?;
        Ok(())
    }

    async fn delete_many(&self, keys: &[String]) -> Result<()> {
        try_join_all(keys.iter().map(|key| self.delete(key))).await?;
        Ok(())
    }

    async fn list_keys(&self, pattern: &str) -> Result<Vec<String>> {
        let glob = to_redis_glob(pattern);
        let mut conn = self.connection.clone();
        let keys: Vec<String> = redis::cmd("KEYS").arg(&glob).query_async(&mut conn).await?;
        debug!("KEYS {} returned {} keys across primaries", glob, keys.len());
        Ok(keys)
    }

    async fn reset(&self) -> Result<()> {
        let mut conn = self.connection.clone();
        let _: () = redis::cmd("FLUSHALL").query_async(&mut conn).await?;
        Ok(())
    }
}
