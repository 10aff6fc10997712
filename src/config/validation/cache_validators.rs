//! Cache module configuration validators
//!
//! Validation for CacheModuleConfig, EngineCreationConfig and MemoryStoreConfig.

use super::trait_def::Validate;
use crate::config::models::*;
use std::collections::HashSet;
use tracing::debug;

impl Validate for CacheModuleConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating cache module configuration");

        if let Some(prefix) = self.module_prefix() {
            if prefix.contains('*') {
                return Err("Cache module prefix must not contain `*`".to_string());
            }
        }

        if self.cache_separator == '*' {
            return Err("Cache separator must not be `*`".to_string());
        }

        // Per-engine settings are validated by `create_engine`
        let mut names = HashSet::new();
        for engine in &self.engine_creation_configs {
            if !names.insert(engine.name.as_str()) {
                return Err(format!("Duplicate cache engine name: {}", engine.name));
            }
        }

        if let Some(memory) = &self.default_memory_engine_config {
            memory.validate()?;
        }

        Ok(())
    }
}

impl Validate for EngineCreationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Cache engine name cannot be empty".to_string());
        }

        match &self.kind {
            EngineKind::Memory(config) => config.validate(),
            EngineKind::Redis(config) => config.validate(),
            EngineKind::RedisCluster(config) => config.validate(),
            EngineKind::Instance(_) => Ok(()),
        }
        .map_err(|e| format!("Cache engine `{}`: {}", self.name, e))
    }
}

impl Validate for MemoryStoreConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_entries == 0 {
            return Err("Memory cache max entries must be greater than 0".to_string());
        }

        Ok(())
    }
}
