//! Redis integration tests
//!
//! Need a running server: `REDIS_URL=redis://localhost:6379 cargo test -- --ignored`

#[cfg(all(test, feature = "redis"))]
mod tests {
    use crate::common::{manager_over, shared_registry};
    use crate::skip_without_env;
    use multicache::{CacheEngine, RedisStore, RedisStoreConfig};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    async fn redis_engine() -> Arc<dyn CacheEngine> {
        let url = std::env::var("REDIS_URL").unwrap();
        let store = RedisStore::connect(&RedisStoreConfig {
            url,
            ..Default::default()
        })
        .await
        .unwrap();
        Arc::new(store)
    }

    #[tokio::test]
    #[ignore]
    async fn test_namespaced_managers_over_redis() {
        skip_without_env!("REDIS_URL");

        let registry = shared_registry(vec![("redis", redis_engine().await)]);
        let users = manager_over(&registry, Some("it-users"));
        let posts = manager_over(&registry, Some("it-posts"));
        users.delete("*").await.unwrap();
        posts.delete("*").await.unwrap();

        users.set("1", &json!({"name": "bob"}), None).await.unwrap();
        posts.set("1", &json!({"title": "hi"}), None).await.unwrap();

        assert_eq!(
            users.get::<serde_json::Value>("1").await.unwrap(),
            Some(json!({"name": "bob"}))
        );
        assert_eq!(users.list_keys(None).await.unwrap(), vec!["1"]);

        users.delete("*").await.unwrap();
        assert!(users.list_keys(None).await.unwrap().is_empty());
        assert_eq!(posts.list_keys(None).await.unwrap(), vec!["1"]);

        posts.delete("*").await.unwrap();
    }

    #[tokio::test]
    #[ignore]
    async fn test_delete_by_pattern_over_redis() {
        skip_without_env!("REDIS_URL");

        let registry = shared_registry(vec![("redis", redis_engine().await)]);
        let manager = manager_over(&registry, Some("it-pattern"));
        manager.delete("*").await.unwrap();

        for key in ["users-1", "users-2", "posts-1"] {
            manager.set(key, &key, None).await.unwrap();
        }
        manager.delete("users-*").await.unwrap();

        assert_eq!(manager.list_keys(None).await.unwrap(), vec!["posts-1"]);
        manager.delete("*").await.unwrap();
    }

    #[tokio::test]
    #[ignore]
    async fn test_ttl_over_redis() {
        skip_without_env!("REDIS_URL");

        let registry = shared_registry(vec![("redis", redis_engine().await)]);
        let manager = manager_over(&registry, Some("it-ttl"));

        manager
            .set("short", &1, Some(Duration::from_millis(50)))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(manager.get::<i32>("short").await.unwrap(), None);
    }
}
