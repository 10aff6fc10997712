//! Namespaced cache orchestration
//!
//! `CacheManager` fans single operations out over every engine in an
//! `EngineRegistry` and merges the results.

mod fanout;
pub mod manager;


pub use manager::CacheManager;
