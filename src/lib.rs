//! # multicache
//!
//! Multi-engine cache orchestration for async Rust services.
//!
//! ## Features
//!
//! - **Namespaced keys**: every manager prefixes its keys, so services can
//!   share one set of engines without seeing each other's entries
//! - **Deterministic keys**: `Owner:operation:digest` keys derived from call
//!   arguments, independent of object key order
//! - **Wildcard invalidation**: `*` patterns for listing and deleting keys
//! - **Multiple engines**: in-memory LRU, Redis and Redis Cluster, or any
//!   `CacheEngine` implementation
//! - **Failure isolation**: one broken engine never fails a fan-out
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use multicache::{CacheManager, CacheModuleConfig};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CacheModuleConfig::default().with_prefix("post-service");
//!     let cache = CacheManager::new(&config).await?;
//!
//!     cache.set("posts-1", &"hello", Some(Duration::from_secs(60))).await?;
//!     let post: Option<String> = cache.get("posts-1").await?;
//!     println!("{:?}", post);
//!
//!     cache.delete("posts-*").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## From a configuration file
//!
//! ```rust,no_run
//! use multicache::{CacheManager, CacheModuleConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CacheModuleConfig::from_file("config/cache.yaml").await?;
//!     let cache = CacheManager::new(&config).await?;
//!     println!("keys: {:?}", cache.list_keys(None).await?);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::{
    CacheModuleConfig, CreateEngineFn, EngineCreationConfig, EngineKind, MemoryStoreConfig,
    ReadWriteMode, RedisClusterConfig, RedisStoreConfig,
};
pub use utils::error::{BoxError, CacheError, Result};

pub use core::cache_manager::CacheManager;
pub use core::decorators::{CacheDelOptions, CacheWrapOptions, CallContext, cache_evict, cache_wrap};
pub use core::keys::{ArgsSerializer, KeyContext, KeyGenerator, KeyIdentity, derive_key};
pub use core::pattern::{PatternMatcher, filter_by_pattern, is_pattern_like};
pub use core::registry::{EngineRegistry, RegisteredEngine};
pub use core::traits::CacheEngine;
pub use storage::MemoryStore;
#[cfg(feature = "redis")]
pub use storage::{RedisClusterStore, RedisStore};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
