//! Configuration validation
//!
//! - `trait_def`: core Validate trait definition
//! - `cache_validators`: module-level and memory engine validators
//! - `storage_validators`: Redis and Redis Cluster validators
//! - `tests`: test suite for all validators

mod cache_validators;
mod storage_validators;
mod trait_def;

pub use trait_def::Validate;
