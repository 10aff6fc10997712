//! Engine registry integration tests
//!
//! Registry construction from YAML files, factories and unreachable
//! backends.

#[cfg(test)]
mod tests {
    use crate::common::RecordingEngine;
    use multicache::{
        BoxError, CacheEngine, CacheError, CacheManager, CacheModuleConfig, CreateEngineFn,
        EngineCreationConfig, EngineRegistry,
    };
    use std::sync::Arc;

    #[tokio::test]
    async fn test_registry_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.yaml");
        tokio::fs::write(
            &path,
            r#"
cache_module_prefix: post-service
always_setup_default_memory_engine: true
engine_creation_configs:
  - name: hot
    type: memory
    max_entries: 10
  - name: warm
    type: memory
    max_entries: 1000
    ttl_ms: 0
"#,
        )
        .await
        .unwrap();

        let config = CacheModuleConfig::from_file(&path).await.unwrap();
        let manager = CacheManager::new(&config).await.unwrap();

        assert_eq!(
            manager.registry().names(),
            vec!["hot", "warm", "default-memory"]
        );
        assert_eq!(manager.module_prefix(), Some("post-service"));

        manager.set("posts-1", &"hello", None).await.unwrap();
        for registered in manager.registry().engines() {
            assert_eq!(
                registered.engine().get("post-service:posts-1").await.unwrap(),
                Some(serde_json::json!("hello"))
            );
        }
    }

    #[tokio::test]
    async fn test_factory_and_declared_engines() {
        let recording = Arc::new(RecordingEngine::new());
        let shared = Arc::clone(&recording);
        let factory = CreateEngineFn::new(move || {
            let engine = Arc::clone(&shared) as Arc<dyn CacheEngine>;
            async move { Ok::<_, BoxError>(vec![engine]) }
        });
        let config = CacheModuleConfig::default()
            .with_engine_factory(factory)
            .with_engine(EngineCreationConfig::memory("declared", Default::default()));

        let manager = CacheManager::new(&config).await.unwrap();
        assert_eq!(manager.registry().names(), vec!["custom-0", "declared"]);

        manager.set("k", &1, None).await.unwrap();
        assert_eq!(recording.calls_to("set"), vec!["set(k)"]);
    }

    #[cfg(feature = "redis")]
    #[tokio::test]
    async fn test_unreachable_redis_falls_back_to_memory() {
        let config = CacheModuleConfig::from_yaml_str(
            r#"
engine_creation_configs:
  - name: redis-down
    type: redis
    url: redis://127.0.0.1:1
    connection_timeout: 1
"#,
        )
        .unwrap();

        let registry = EngineRegistry::build(&config).await.unwrap();
        assert_eq!(registry.names(), vec!["default-memory"]);
    }

    #[cfg(feature = "redis")]
    #[tokio::test]
    async fn test_unreachable_redis_without_fallback_fails() {
        let config = CacheModuleConfig::from_yaml_str(
            r#"
fallback_to_default_memory_engine: false
engine_creation_configs:
  - name: redis-down
    type: redis
    url: redis://127.0.0.1:1
    connection_timeout: 1
"#,
        )
        .unwrap();

        let err = CacheManager::new(&config).await.unwrap_err();
        assert!(matches!(err, CacheError::NoCacheEngineConfigured));
    }

    #[tokio::test]
    async fn test_two_managers_over_one_built_registry() {
        let config = CacheModuleConfig::default();
        let registry = Arc::new(EngineRegistry::build(&config).await.unwrap());

        let a = CacheManager::with_registry(Arc::clone(&registry), &config.clone().with_prefix("a"));
        let b = CacheManager::with_registry(Arc::clone(&registry), &config.with_prefix("b"));

        a.set("k", &"from-a", None).await.unwrap();
        assert_eq!(b.get::<String>("k").await.unwrap(), None);
        assert!(Arc::ptr_eq(a.registry(), b.registry()));
    }
}
