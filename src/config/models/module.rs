//! Cache module configuration

use super::*;
use crate::core::traits::CacheEngine;
use crate::utils::error::BoxError;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Everything needed to build an engine registry and a namespaced manager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheModuleConfig {
    /// Prefix prepended to every logical key
    #[serde(default)]
    pub cache_module_prefix: Option<String>,
    /// Namespace separator
    #[serde(default = "default_cache_separator")]
    pub cache_separator: char,
    /// Declared engines, constructed in order
    #[serde(default)]
    pub engine_creation_configs: Vec<EngineCreationConfig>,
    /// Settings for the default memory engine
    #[serde(default)]
    pub default_memory_engine_config: Option<MemoryStoreConfig>,
    /// Append a default memory engine even when other engines exist
    #[serde(default)]
    pub always_setup_default_memory_engine: bool,
    /// Append a default memory engine when nothing else could be built
    #[serde(default = "default_true")]
    pub fallback_to_default_memory_engine: bool,
    /// How `get`/`set` reach the engines
    #[serde(default)]
    pub read_write_mode: ReadWriteMode,
    /// Caller-supplied engine factory (code-only)
    #[serde(skip)]
    pub create_engine: Option<CreateEngineFn>,
}

impl Default for CacheModuleConfig {
    fn default() -> Self {
        Self {
            cache_module_prefix: None,
            cache_separator: default_cache_separator(),
            engine_creation_configs: Vec::new(),
            default_memory_engine_config: None,
            always_setup_default_memory_engine: false,
            fallback_to_default_memory_engine: default_true(),
            read_write_mode: ReadWriteMode::default(),
            create_engine: None,
        }
    }
}

impl CacheModuleConfig {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.cache_module_prefix = Some(prefix.into());
        self
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.cache_separator = separator;
        self
    }

    pub fn with_engine(mut self, engine: EngineCreationConfig) -> Self {
        self.engine_creation_configs.push(engine);
        self
    }

    pub fn with_engine_factory(mut self, factory: CreateEngineFn) -> Self {
        self.create_engine = Some(factory);
        self
    }

    /// Effective prefix; an empty string counts as no prefix
    pub fn module_prefix(&self) -> Option<&str> {
        self.cache_module_prefix
            .as_deref()
            .filter(|prefix| !prefix.is_empty())
    }

    /// Merge cache module configurations, `other` wins where it differs
    /// from the defaults
    pub fn merge(mut self, other: Self) -> Self {
        if other.module_prefix().is_some() {
            self.cache_module_prefix = other.cache_module_prefix;
        }
        if other.cache_separator != default_cache_separator() {
            self.cache_separator = other.cache_separator;
        }
        self.engine_creation_configs
            .extend(other.engine_creation_configs);
        if other.default_memory_engine_config.is_some() {
            self.default_memory_engine_config = other.default_memory_engine_config;
        }
        if other.always_setup_default_memory_engine {
            self.always_setup_default_memory_engine = true;
        }
        if !other.fallback_to_default_memory_engine {
            self.fallback_to_default_memory_engine = false;
        }
        if other.read_write_mode != ReadWriteMode::default() {
            self.read_write_mode = other.read_write_mode;
        }
        if other.create_engine.is_some() {
            self.create_engine = other.create_engine;
        }
        self
    }
}

/// How single-target operations reach the engine set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadWriteMode {
    /// Reads try engines in order until a hit, writes go to every engine
    #[default]
    Aggregate,
    /// Reads and writes go to the first engine only
    Primary,
}

/// Future returned by an engine factory
pub type EngineFactoryFuture =
    BoxFuture<'static, std::result::Result<Vec<Arc<dyn CacheEngine>>, BoxError>>;

/// Caller-supplied factory producing one or many engines at registry build
#[derive(Clone)]
pub struct CreateEngineFn(Arc<dyn Fn() -> EngineFactoryFuture + Send + Sync>);

impl CreateEngineFn {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<Vec<Arc<dyn CacheEngine>>, BoxError>>
            + Send
            + 'static,
    {
        Self(Arc::new(move || Box::pin(f())))
    }

    pub async fn create(&self) -> std::result::Result<Vec<Arc<dyn CacheEngine>>, BoxError> {
        (self.0)().await
    }
}

impl fmt::Debug for CreateEngineFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CreateEngineFn(..)")
    }
}
