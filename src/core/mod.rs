//! Core cache logic
//!
//! - **keys**: deterministic key derivation
//! - **pattern**: `*` glob matching
//! - **registry**: ordered engine set built from configuration
//! - **cache_manager**: namespaced fan-out over the registry
//! - **decorators**: cache-wrap and cache-evict call adapters
//! - **traits**: the `CacheEngine` backend capability

pub mod cache_manager;
pub mod decorators;
pub mod keys;
pub mod pattern;
pub mod registry;
pub mod traits;
