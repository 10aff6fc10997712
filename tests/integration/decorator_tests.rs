//! Call-site adapter integration tests

#[cfg(test)]
mod tests {
    use crate::common::{manager_over, memory_engine, shared_registry};
    use multicache::{
        ArgsSerializer, CacheDelOptions, CacheError, CacheManager, CacheWrapOptions, CallContext,
        KeyGenerator, cache_evict, cache_wrap,
    };
    use serde::{Deserialize, Serialize};
    use serde_json::{Value, json};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Product {
        sku: String,
        price: u32,
    }

    struct Catalog {
        cache: CacheManager,
        loads: AtomicUsize,
    }

    impl Catalog {
        fn call(&self, operation: &str, sku: &str) -> CallContext {
            CallContext::new(operation).owner("Catalog").arg(json!(sku))
        }

        async fn product(&self, sku: &str) -> Result<Product, CacheError> {
            let options = CacheWrapOptions::default()
                .key(KeyGenerator::new(|args: &[Value]| {
                    Ok(format!("products:{}", args[0].as_str().unwrap_or_default()))
                }))
                .ttl(Duration::from_secs(60));

            cache_wrap(&self.cache, &options, &self.call("product", sku), || async {
                self.loads.fetch_add(1, Ordering::SeqCst);
                Ok(Product {
                    sku: sku.to_string(),
                    price: 100,
                })
            })
            .await
        }

        async fn reprice_all(&self) -> Result<usize, CacheError> {
            let options = CacheDelOptions::default().key("products:*");
            cache_evict(
                &self.cache,
                &options,
                &CallContext::new("reprice_all").owner("Catalog"),
                || async { Ok(3) },
            )
            .await
        }
    }

    #[tokio::test]
    async fn test_wrap_and_evict_pattern() {
        let registry = shared_registry(vec![("memory", memory_engine())]);
        let catalog = Catalog {
            cache: manager_over(&registry, Some("shop")),
            loads: AtomicUsize::new(0),
        };
        let other = manager_over(&registry, Some("other"));
        other.set("products:a", &1, None).await.unwrap();

        catalog.product("a").await.unwrap();
        catalog.product("b").await.unwrap();
        catalog.product("a").await.unwrap();
        assert_eq!(catalog.loads.load(Ordering::SeqCst), 2);
        assert_eq!(
            catalog.cache.list_keys(None).await.unwrap(),
            vec!["products:a", "products:b"]
        );

        assert_eq!(catalog.reprice_all().await.unwrap(), 3);
        assert!(catalog.cache.list_keys(None).await.unwrap().is_empty());
        assert_eq!(other.list_keys(None).await.unwrap(), vec!["products:a"]);

        catalog.product("a").await.unwrap();
        assert_eq!(catalog.loads.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_custom_serializer_digest_is_verbatim() {
        let registry = shared_registry(vec![("memory", memory_engine())]);
        let manager = manager_over(&registry, None);
        let options = CacheWrapOptions::default().args_serializer(ArgsSerializer::new(
            |args: &[Value]| Ok(format!("n{}", args.len())),
        ));
        let call = CallContext::new("search")
            .owner("Catalog")
            .args(vec![json!("shoes"), json!(2)]);

        let hits: Result<Vec<String>, CacheError> =
            cache_wrap(&manager, &options, &call, || async { Ok(vec!["sku-1".to_string()]) })
                .await;
        assert_eq!(hits.unwrap(), vec!["sku-1"]);

        assert_eq!(
            manager.list_keys(None).await.unwrap(),
            vec!["Catalog:search:n2"]
        );
    }

    #[tokio::test]
    async fn test_evict_key_failure_skips_call() {
        let registry = shared_registry(vec![("memory", memory_engine())]);
        let manager = manager_over(&registry, None);
        let generator = KeyGenerator::new(|_: &[Value]| Err("no key for you".into()));
        let calls = AtomicUsize::new(0);

        let result: Result<(), CacheError> = cache_evict(
            &manager,
            &CacheDelOptions::default().key(generator),
            &CallContext::new("update"),
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
        )
        .await;

        let err = result.unwrap_err();
        assert!(matches!(err, CacheError::KeyGeneration(ref msg) if msg == "no key for you"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
