//! Core traits

pub mod cache;

pub use cache::CacheEngine;

#[cfg(test)]
pub use cache::MockCacheEngine;
