//! Registry and manager fixtures

use multicache::{
    CacheEngine, CacheManager, CacheModuleConfig, EngineRegistry, MemoryStore, MemoryStoreConfig,
};
use std::sync::Arc;

/// Memory engine without expiry
pub fn memory_engine() -> Arc<dyn CacheEngine> {
    Arc::new(
        MemoryStore::new(&MemoryStoreConfig {
            max_entries: 1000,
            ttl_ms: 0,
        })
        .unwrap(),
    )
}

/// Registry over the given named engines
pub fn shared_registry(engines: Vec<(&str, Arc<dyn CacheEngine>)>) -> Arc<EngineRegistry> {
    Arc::new(EngineRegistry::from_engines(engines).unwrap())
}

/// Manager with `prefix` over an existing registry
pub fn manager_over(registry: &Arc<EngineRegistry>, prefix: Option<&str>) -> CacheManager {
    let mut config = CacheModuleConfig::default();
    config.cache_module_prefix = prefix.map(str::to_string);
    CacheManager::with_registry(Arc::clone(registry), &config)
}
