//! Standalone Redis engine
//!
//! Values are stored as JSON strings. Key listing walks the keyspace with
//! `SCAN MATCH` so large databases are not blocked by `KEYS`.

use super::{SCAN_BATCH_SIZE, decode_value, encode_value, expiry_millis};
use crate::config::RedisStoreConfig;
use crate::config::models::engine::ttl_from_millis;
use crate::core::pattern::to_redis_glob;
use crate::core::traits::CacheEngine;
use crate::utils::error::Result;
use crate::utils::sanitize_url;
use async_trait::async_trait;
use redis::{Client, aio::MultiplexedConnection};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// Cache engine backed by a single Redis server
#[derive(Clone)]
pub struct RedisStore {
    connection: MultiplexedConnection,
    default_ttl: Option<Duration>,
    url: String,
}

impl RedisStore {
    /// Connect to the configured server
    pub async fn connect(config: &RedisStoreConfig) -> Result<Self> {
        let url = sanitize_url(&config.url);
        info!("Connecting Redis cache engine");
        debug!("Redis URL: {}", url);

        let client = Client::open(config.url.as_str())?;
        let timeout = Duration::from_secs(config.connection_timeout);
        let connection = tokio::time::timeout(timeout, client.get_multiplexed_async_connection())
            .await
            .map_err(|_| {
                std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    format!(
                        "Timed out connecting to {} after {}s",
                        url, config.connection_timeout
                    ),
                )
            })??;

        info!("Redis cache engine connected");
        Ok(Self {
            connection,
            default_ttl: config.default_ttl_ms.and_then(ttl_from_millis),
            url,
        })
    }

    /// Round-trip a `PING`
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.connection.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

impl fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisStore")
            .field("url", &self.url)
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

#[async_trait]
impl CacheEngine for RedisStore {
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
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.connection.clone();
        let _: () = redis::cmd("DEL").arg(keys).query_async(&mut conn).await?;
        Ok(())
    }

    async fn list_keys(&self, pattern: &str) -> Result<Vec<String>> {
        let glob = to_redis_glob(pattern);
        let mut conn = self.connection.clone();
        let mut keys = Vec::new();
        let mut cursor: u64 = 0;

        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .cursor_arg(cursor)
                .arg("MATCH")
                .arg(&glob)
                .arg("COUNT")
                .arg(SCAN_BATCH_SIZE)
                .query_async(&mut conn)
                .await?;
            keys.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }

        debug!("SCAN {} returned {} keys", glob, keys.len());
        Ok(keys)
    }

    async fn reset(&self) -> Result<()> {
        let mut conn = self.connection.clone();
        let _: () = redis::cmd("FLUSHDB").query_async(&mut conn).await?;
        Ok(())
    }
}
