//! Read-through caching around a call

use super::{CallContext, log_all_keys};
use crate::core::cache_manager::CacheManager;
use crate::core::keys::{ArgsSerializer, KeyIdentity};
use crate::utils::error::CacheError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::debug;

/// Options for `cache_wrap`
#[derive(Debug, Clone, Default)]
pub struct CacheWrapOptions {
    /// Key identity, derived from the call by default
    pub key: KeyIdentity,
    /// TTL for stored values, engine default when `None`
    pub ttl: Option<Duration>,
    /// Replaces the default argument digest
    pub args_serializer: Option<ArgsSerializer>,
    /// Log every visible key before and after the call
    pub debug: bool,
}

impl CacheWrapOptions {
    pub fn key(mut self, key: impl Into<KeyIdentity>) -> Self {
        self.key = key.into();
        self
    }

    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn args_serializer(mut self, serializer: ArgsSerializer) -> Self {
        self.args_serializer = Some(serializer);
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Serve `call` from the cache, running `f` and caching its `Ok` value on a
/// miss.
///
/// Key derivation errors abort before `f` runs. Errors from `f` are returned
/// unchanged and nothing is cached.
pub async fn cache_wrap<T, E, F, Fut>(
    manager: &CacheManager,
    options: &CacheWrapOptions,
    call: &CallContext,
    f: F,
) -> Result<T, E>
where
    T: Serialize + DeserializeOwned,
    E: From<CacheError>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let key = call.derive_key(
        &options.key,
        options.args_serializer.as_ref(),
        manager.separator(),
    )?;

    if options.debug {
        log_all_keys(manager, "Before", call, &key).await;
    }

    let computed = AtomicBool::new(false);
    let result = manager
        .wrap(
            &key,
            || {
                computed.store(true, Ordering::Relaxed);
                f()
            },
            options.ttl,
        )
        .await;

    if options.debug {
        debug!(
            key = %key,
            hit = !computed.load(Ordering::Relaxed),
            failed = result.is_err(),
            ttl = ?options.ttl,
            "Cache wrap finished"
        );
        log_all_keys(manager, "After", call, &key).await;
    }

    result
}
