//! Configuration management for the cache layer
//!
//! Loads, merges and validates `CacheModuleConfig` from YAML files and
//! environment variables.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{CacheError, Result};
use std::env;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable names read by `CacheModuleConfig::from_env`
pub mod env_vars {
    pub const PREFIX: &str = "MULTICACHE_PREFIX";
    pub const SEPARATOR: &str = "MULTICACHE_SEPARATOR";
    pub const REDIS_URL: &str = "MULTICACHE_REDIS_URL";
    pub const REDIS_CLUSTER_NODES: &str = "MULTICACHE_REDIS_CLUSTER_NODES";
    pub const ALWAYS_MEMORY: &str = "MULTICACHE_ALWAYS_MEMORY";
    pub const FALLBACK_MEMORY: &str = "MULTICACHE_FALLBACK_MEMORY";
    pub const READ_WRITE_MODE: &str = "MULTICACHE_READ_WRITE_MODE";
}

impl CacheModuleConfig {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading cache configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CacheError::config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml_str(&content)?;
        debug!("Cache configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| CacheError::config(format!("Failed to parse config: {}", e)))?;

        config.validate().map_err(CacheError::Validation)?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        debug!("Loading cache configuration from environment variables");

        let mut config = Self::default();

        if let Ok(prefix) = env::var(env_vars::PREFIX) {
            config.cache_module_prefix = Some(prefix);
        }
        if let Ok(separator) = env::var(env_vars::SEPARATOR) {
            let mut chars = separator.chars();
            config.cache_separator = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(CacheError::config(format!(
                        "Invalid cache separator: {:?} (expected one character)",
                        separator
                    )));
                }
            };
        }
        if let Ok(url) = env::var(env_vars::REDIS_URL) {
            config.engine_creation_configs.push(EngineCreationConfig::redis(
                "redis",
                RedisStoreConfig {
                    url,
                    ..Default::default()
                },
            ));
        }
        if let Ok(nodes) = env::var(env_vars::REDIS_CLUSTER_NODES) {
            let nodes = nodes
                .split(',')
                .map(str::trim)
                .filter(|node| !node.is_empty())
                .map(str::to_string)
                .collect();
            config
                .engine_creation_configs
                .push(EngineCreationConfig::redis_cluster(
                    "redis-cluster",
                    RedisClusterConfig {
                        nodes,
                        connection_timeout: models::default_connection_timeout(),
                        ..Default::default()
                    },
                ));
        }
        if let Ok(flag) = env::var(env_vars::ALWAYS_MEMORY) {
            config.always_setup_default_memory_engine = parse_flag(env_vars::ALWAYS_MEMORY, &flag)?;
        }
        if let Ok(flag) = env::var(env_vars::FALLBACK_MEMORY) {
            config.fallback_to_default_memory_engine =
                parse_flag(env_vars::FALLBACK_MEMORY, &flag)?;
        }
        if let Ok(mode) = env::var(env_vars::READ_WRITE_MODE) {
            config.read_write_mode = match mode.trim().to_ascii_lowercase().as_str() {
                "aggregate" => ReadWriteMode::Aggregate,
                "primary" => ReadWriteMode::Primary,
                other => {
                    return Err(CacheError::config(format!(
                        "Invalid read/write mode: {}",
                        other
                    )));
                }
            };
        }

        config.validate().map_err(CacheError::Validation)?;
        Ok(config)
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(CacheError::config(format!("Invalid {}: {}", name, raw))),
    }
}
