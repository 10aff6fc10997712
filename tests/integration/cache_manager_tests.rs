//! Cache manager integration tests
//!
//! Multi-engine behavior through the public API: namespacing over a shared
//! registry, fan-out and failure isolation.

#[cfg(test)]
mod tests {
    use crate::common::{FailingEngine, RecordingEngine, manager_over, memory_engine, shared_registry};
    use multicache::{CacheEngine, CacheManager, CacheModuleConfig, ReadWriteMode};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_managers_share_engines_but_not_keys() {
        let recording = Arc::new(RecordingEngine::new());
        let memory = memory_engine();
        let registry = shared_registry(vec![
            ("recording", Arc::clone(&recording) as Arc<dyn CacheEngine>),
            ("memory", Arc::clone(&memory)),
        ]);
        let users = manager_over(&registry, Some("users"));
        let posts = manager_over(&registry, Some("posts"));

        users.set("1", &json!({"name": "bob"}), None).await.unwrap();
        posts.set("1", &json!({"title": "hello"}), None).await.unwrap();

        assert_eq!(
            users.get::<serde_json::Value>("1").await.unwrap(),
            Some(json!({"name": "bob"}))
        );
        assert_eq!(
            posts.get::<serde_json::Value>("1").await.unwrap(),
            Some(json!({"title": "hello"}))
        );

        // Writes reach every engine under the namespaced key
        assert_eq!(recording.calls_to("set"), vec!["set(users:1)", "set(posts:1)"]);
        assert_eq!(memory.get("users:1").await.unwrap(), Some(json!({"name": "bob"})));

        posts.delete("*").await.unwrap();
        assert!(posts.list_keys(None).await.unwrap().is_empty());
        assert_eq!(users.list_keys(None).await.unwrap(), vec!["1"]);
    }

    #[tokio::test]
    async fn test_delete_pattern_sends_one_batch_per_engine() {
        let first = Arc::new(RecordingEngine::new());
        let second = Arc::new(RecordingEngine::new());
        let registry = shared_registry(vec![
            ("first", Arc::clone(&first) as Arc<dyn CacheEngine>),
            ("second", Arc::clone(&second) as Arc<dyn CacheEngine>),
        ]);
        let manager = manager_over(&registry, Some("svc"));

        for key in ["users-1", "users-2", "users-3", "posts-1"] {
            manager.set(key, &key, None).await.unwrap();
        }

        manager.delete("users-*").await.unwrap();

        let expected = vec!["delete_many(svc:users-3,svc:users-2,svc:users-1)"];
        assert_eq!(first.calls_to("delete_many"), expected);
        assert_eq!(second.calls_to("delete_many"), expected);
        assert_eq!(first.calls_to("list_keys"), vec!["list_keys(svc:users-*)"]);
        assert_eq!(manager.list_keys(None).await.unwrap(), vec!["posts-1"]);
    }

    #[tokio::test]
    async fn test_literal_delete_skips_listing() {
        let engine = Arc::new(RecordingEngine::new());
        let registry = shared_registry(vec![("engine", Arc::clone(&engine) as Arc<dyn CacheEngine>)]);
        let manager = manager_over(&registry, Some("svc"));

        manager.delete("users:1").await.unwrap();

        assert_eq!(engine.calls(), vec!["delete_many(svc:users:1)"]);
    }

    #[tokio::test]
    async fn test_failing_engine_does_not_break_fan_out() {
        let memory = memory_engine();
        let registry = shared_registry(vec![
            ("failing", Arc::new(FailingEngine) as Arc<dyn CacheEngine>),
            ("memory", Arc::clone(&memory)),
        ]);
        let manager = manager_over(&registry, Some("svc"));

        manager.set("a", &1, None).await.unwrap();
        manager.set("b", &2, None).await.unwrap();

        assert_eq!(manager.list_keys(None).await.unwrap(), vec!["b", "a"]);
        assert_eq!(manager.get::<i32>("a").await.unwrap(), Some(1));

        manager.delete("*").await.unwrap();
        assert!(manager.list_keys(None).await.unwrap().is_empty());

        manager.set("c", &3, None).await.unwrap();
        manager.reset().await.unwrap();
        assert_eq!(memory.get("svc:c").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_every_engine_failing_surfaces_write_errors() {
        let registry = shared_registry(vec![
            ("a", Arc::new(FailingEngine) as Arc<dyn CacheEngine>),
            ("b", Arc::new(FailingEngine) as Arc<dyn CacheEngine>),
        ]);
        let manager = manager_over(&registry, None);

        assert!(manager.set("k", &1, None).await.is_err());
        assert!(manager.reset().await.is_err());

        // Reads and listings degrade to empty results
        assert_eq!(manager.get::<i32>("k").await.unwrap(), None);
        assert!(manager.list_keys(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_primary_mode_reads_and_writes_first_engine() {
        let first = Arc::new(RecordingEngine::new());
        let second = Arc::new(RecordingEngine::new());
        let registry = shared_registry(vec![
            ("first", Arc::clone(&first) as Arc<dyn CacheEngine>),
            ("second", Arc::clone(&second) as Arc<dyn CacheEngine>),
        ]);
        let config = CacheModuleConfig {
            read_write_mode: ReadWriteMode::Primary,
            ..Default::default()
        };
        let manager = CacheManager::with_registry(registry, &config);

        manager.set("k", &1, None).await.unwrap();
        assert_eq!(manager.get::<i32>("k").await.unwrap(), Some(1));

        assert_eq!(first.calls(), vec!["set(k)", "get(k)"]);
        assert!(second.calls().is_empty());
    }

    #[tokio::test]
    async fn test_ttl_reaches_the_engine() {
        let registry = shared_registry(vec![("memory", memory_engine())]);
        let manager = manager_over(&registry, Some("svc"));

        manager
            .set("short", &"x", Some(Duration::from_millis(20)))
            .await
            .unwrap();
        manager.set("long", &"y", None).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(manager.get::<String>("short").await.unwrap(), None);
        assert_eq!(manager.list_keys(None).await.unwrap(), vec!["long"]);
    }

    #[tokio::test]
    async fn test_manager_is_shareable_across_tasks() {
        let registry = shared_registry(vec![("memory", memory_engine())]);
        let manager = manager_over(&registry, Some("svc"));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let manager = manager.clone();
                tokio::spawn(async move {
                    manager.set(&format!("task-{}", i), &i, None).await.unwrap();
                    manager.get::<i32>(&format!("task-{}", i)).await.unwrap()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.await.unwrap(), Some(i as i32));
        }

        let mut keys = manager.list_keys(Some("task-*")).await.unwrap();
        keys.sort();
        assert_eq!(keys.len(), 16);
        assert_eq!(keys[0], "task-0");
    }
}
