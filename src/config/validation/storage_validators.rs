//! Storage configuration validators
//!
//! Validation for the Redis-backed engine configurations.

use super::trait_def::Validate;
use crate::config::models::*;

fn validate_redis_url(url: &str) -> Result<(), String> {
    if url.is_empty() {
        return Err("Redis URL cannot be empty".to_string());
    }

    if !url.starts_with("redis://") && !url.starts_with("rediss://") {
        return Err("Redis URL must start with redis:// or rediss://".to_string());
    }

    Ok(())
}

impl Validate for RedisStoreConfig {
    fn validate(&self) -> Result<(), String> {
        validate_redis_url(&self.url)?;

        if self.connection_timeout == 0 {
            return Err("Redis connection timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for RedisClusterConfig {
    fn validate(&self) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("Redis cluster requires at least one node".to_string());
        }

        for node in &self.nodes {
            validate_redis_url(node)?;
        }

        if self.connection_timeout == 0 {
            return Err("Redis connection timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}
