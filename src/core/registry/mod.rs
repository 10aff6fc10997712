//! Engine registry
//!
//! Builds the ordered set of cache engines once at startup. Engines come
//! from three places, in this order:
//!
//! 1. the caller's `create_engine` factory, if any
//! 2. `engine_creation_configs`, constructed concurrently
//! 3. the default memory engine, when forced or as a fallback
//!
//! A failing source is logged and skipped. The build only fails when the
//! final set is empty.


use crate::config::{
    CacheModuleConfig, EngineCreationConfig, EngineKind, MemoryStoreConfig, Validate,
};
use crate::core::traits::CacheEngine;
use crate::storage::MemoryStore;
use crate::utils::error::{CacheError, Result};
use futures::future::join_all;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Name given to the fallback memory engine
pub const DEFAULT_MEMORY_ENGINE_NAME: &str = "default-memory";

/// An engine plus the name used in logs
#[derive(Clone)]
pub struct RegisteredEngine {
    name: String,
    engine: Arc<dyn CacheEngine>,
}

impl RegisteredEngine {
    pub fn new(name: impl Into<String>, engine: Arc<dyn CacheEngine>) -> Self {
        Self {
            name: name.into(),
            engine,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn engine(&self) -> &Arc<dyn CacheEngine> {
        &self.engine
    }
}

impl fmt::Debug for RegisteredEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredEngine")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Ordered, immutable, never-empty set of engines
///
/// Share it between managers through an `Arc`.
#[derive(Debug, Clone)]
pub struct EngineRegistry {
    engines: Vec<RegisteredEngine>,
}

impl EngineRegistry {
    /// Build the registry from module configuration
    pub async fn build(config: &CacheModuleConfig) -> Result<Self> {
        let mut engines = Vec::new();

        if let Some(factory) = &config.create_engine {
            match factory.create().await {
                Ok(created) => {
                    debug!("Engine factory produced {} engines", created.len());
                    engines.extend(
                        created
                            .into_iter()
                            .enumerate()
                            .map(|(i, engine)| RegisteredEngine::new(format!("custom-{}", i), engine)),
                    );
                }
                Err(e) => {
                    error!(engine = "custom", error = %e, "Failed to create cache engines from factory");
                }
            }
        }

        let results = join_all(config.engine_creation_configs.iter().map(create_engine)).await;
        for (descriptor, result) in config.engine_creation_configs.iter().zip(results) {
            match result {
                Ok(engine) => engines.push(RegisteredEngine::new(descriptor.name.clone(), engine)),
                Err(e) => {
                    error!(
                        engine = %descriptor.name,
                        kind = descriptor.kind.label(),
                        error = %e,
                        "Failed to create cache engine"
                    );
                }
            }
        }

        let needs_default = config.always_setup_default_memory_engine
            || (engines.is_empty() && config.fallback_to_default_memory_engine);
        if needs_default {
            match create_default_memory_engine(config.default_memory_engine_config.as_ref()) {
                Ok(engine) => engines.push(RegisteredEngine::new(DEFAULT_MEMORY_ENGINE_NAME, engine)),
                Err(e) => {
                    error!(engine = DEFAULT_MEMORY_ENGINE_NAME, error = %e, "Failed to create cache engine");
                }
            }
        }

        let registry = Self::from_registered(engines)?;
        info!(
            "Cache engine registry ready: [{}]",
            registry
                .engines
                .iter()
                .map(RegisteredEngine::name)
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(registry)
    }

    /// Build a registry from engines the caller already holds
    pub fn from_engines<I, S>(engines: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Arc<dyn CacheEngine>)>,
        S: Into<String>,
    {
        Self::from_registered(
            engines
                .into_iter()
                .map(|(name, engine)| RegisteredEngine::new(name, engine))
                .collect(),
        )
    }

    fn from_registered(engines: Vec<RegisteredEngine>) -> Result<Self> {
        if engines.is_empty() {
            return Err(CacheError::NoCacheEngineConfigured);
        }
        Ok(Self { engines })
    }

    pub fn engines(&self) -> &[RegisteredEngine] {
        &self.engines
    }

    /// First engine in registration order
    pub fn primary(&self) -> &RegisteredEngine {
        &self.engines[0]
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    /// Always false for a constructed registry
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.engines.iter().map(RegisteredEngine::name).collect()
    }
}

/// Construct the engine described by `config`
pub async fn create_engine(config: &EngineCreationConfig) -> Result<Arc<dyn CacheEngine>> {
    debug!("Creating cache engine `{}` ({})", config.name, config.kind.label());

    config
        .validate()
        .map_err(|e| CacheError::engine_construction(&config.name, e))?;

    let engine: Arc<dyn CacheEngine> = match &config.kind {
        EngineKind::Memory(memory) => Arc::new(
            MemoryStore::new(memory)
                .map_err(|e| CacheError::engine_construction(&config.name, e.to_string()))?,
        ),
        #[cfg(feature = "redis")]
        EngineKind::Redis(redis) => Arc::new(
            crate::storage::RedisStore::connect(redis)
                .await
                .map_err(|e| CacheError::engine_construction(&config.name, e.to_string()))?,
        ),
        #[cfg(feature = "redis")]
        EngineKind::RedisCluster(cluster) => Arc::new(
            crate::storage::RedisClusterStore::connect(cluster)
                .await
                .map_err(|e| CacheError::engine_construction(&config.name, e.to_string()))?,
        ),
        #[cfg(not(feature = "redis"))]
        EngineKind::Redis(_) | EngineKind::RedisCluster(_) => {
            return Err(CacheError::engine_construction(
                &config.name,
                "Redis support is not enabled (build with the `redis` feature)",
            ));
        }
        EngineKind::Instance(instance) => Arc::clone(&instance.0),
    };

    Ok(engine)
}

/// Construct the default memory engine, 100 entries and 15 minutes unless
/// overridden
pub fn create_default_memory_engine(
    config: Option<&MemoryStoreConfig>,
) -> Result<Arc<dyn CacheEngine>> {
    let config = config.cloned().unwrap_or_default();
    Ok(Arc::new(MemoryStore::new(&config)?))
}
