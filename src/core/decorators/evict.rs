//! Cache eviction after a call

use super::{CallContext, log_all_keys};
use crate::core::cache_manager::CacheManager;
use crate::core::keys::{ArgsSerializer, KeyIdentity};
use crate::utils::error::CacheError;
use std::future::Future;
use tracing::{debug, warn};

/// Options for `cache_evict`
#[derive(Debug, Clone, Default)]
pub struct CacheDelOptions {
    /// Key or pattern identity, derived from the call by default
    pub key: KeyIdentity,
    /// Replaces the default argument digest
    pub args_serializer: Option<ArgsSerializer>,
    /// Log every visible key before and after the call
    pub debug: bool,
}

impl CacheDelOptions {
    pub fn key(mut self, key: impl Into<KeyIdentity>) -> Self {
        self.key = key.into();
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

/// Run `f`, then delete the derived key or pattern whether or not `f`
/// succeeded.
///
/// The call's own error wins over an eviction error; an eviction error
/// after a successful call is returned.
pub async fn cache_evict<T, E, F, Fut>(
    manager: &CacheManager,
    options: &CacheDelOptions,
    call: &CallContext,
    f: F,
) -> Result<T, E>
where
    E: From<CacheError>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let target = call.derive_key(
        &options.key,
        options.args_serializer.as_ref(),
        manager.separator(),
    )?;

    if options.debug {
        log_all_keys(manager, "Before", call, &target).await;
    }

    let result = f().await;
    let evicted = manager.delete(&target).await;

    if options.debug {
        debug!(
            target = %target,
            failed = result.is_err(),
            "Cache evict finished"
        );
        log_all_keys(manager, "After", call, &target).await;
    }

    match (result, evicted) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(e.into()),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(evict_error)) => {
            warn!(target = %target, error = %evict_error, "Failed to evict after failed call");
            Err(e)
        }
    }
}
