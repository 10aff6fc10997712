//! Call-site caching adapters
//!
//! `cache_wrap` serves a call from the cache and `cache_evict` drops cache
//! entries after a call. Both derive the key from a `CallContext` the same
//! way, so a reader and the writer that invalidates it agree on key shape.
//!
//! ```rust,no_run
//! use multicache::{CacheManager, CacheModuleConfig, CallContext, CacheWrapOptions, cache_wrap};
//! use serde_json::json;
//!
//! # async fn example() -> multicache::Result<()> {
//! let manager = CacheManager::new(&CacheModuleConfig::default().with_prefix("users")).await?;
//! let call = CallContext::new("find_user").owner("UserService").arg(json!(42));
//!
//! let name: String = cache_wrap(&manager, &CacheWrapOptions::default(), &call, || async {
//!     Ok::<_, multicache::CacheError>("alice".to_string())
//! })
//! .await?;
//! # Ok(())
//! # }
//! ```

mod evict;
mod wrap;


pub use evict::{CacheDelOptions, cache_evict};
pub use wrap::{CacheWrapOptions, cache_wrap};

use crate::core::cache_manager::CacheManager;
use crate::core::keys::{ArgsSerializer, KeyContext, KeyIdentity, derive_key};
use crate::utils::error::Result;
use serde_json::Value;
use tracing::{debug, warn};

/// The call being cached: who, what, and with which arguments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallContext {
    /// Owning type name, `UnknownClassName` when absent
    pub owner: Option<String>,
    /// Operation (method) name
    pub operation: String,
    /// Call arguments in order
    pub args: Vec<Value>,
}

impl CallContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            owner: None,
            operation: operation.into(),
            args: Vec::new(),
        }
    }

    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn arg(mut self, arg: Value) -> Self {
        self.args.push(arg);
        self
    }

    pub fn args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }

    /// Logical key for this call under `identity`
    pub fn derive_key(
        &self,
        identity: &KeyIdentity,
        serializer: Option<&ArgsSerializer>,
        separator: char,
    ) -> Result<String> {
        let mut ctx = KeyContext::new(&self.operation)
            .args(&self.args)
            .serializer(serializer)
            .separator(separator);
        if let Some(owner) = self.owner.as_deref() {
            ctx = ctx.owner(owner);
        }
        derive_key(identity, &ctx)
    }

    fn label(&self) -> String {
        format!(
            "{}:{}",
            self.owner.as_deref().unwrap_or(crate::core::keys::DEFAULT_OWNER_NAME),
            self.operation
        )
    }
}

/// Debug dump of every key visible to `manager`
async fn log_all_keys(manager: &CacheManager, stage: &str, call: &CallContext, key: &str) {
    match manager.list_keys(None).await {
        Ok(all_keys) => debug!(
            call = %call.label(),
            key = %key,
            args = ?call.args,
            all_keys = ?all_keys,
            "{} called",
            stage
        ),
        Err(e) => warn!(call = %call.label(), error = %e, "Failed to list cache keys"),
    }
}
