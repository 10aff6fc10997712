//! Redis storage implementation
//!
//! - `store` - standalone server engine
//! - `cluster` - Redis Cluster engine
//! - `tests` - Module tests

mod cluster;
mod store;

pub use cluster::RedisClusterStore;
pub use store::RedisStore;

use crate::utils::error::Result;
use serde_json::Value;
use std::time::Duration;

/// `COUNT` hint for each `SCAN` round trip
pub(crate) const SCAN_BATCH_SIZE: usize = 100;

pub(crate) fn encode_value(value: &Value) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

pub(crate) fn decode_value(raw: &str) -> Result<Value> {
    Ok(serde_json::from_str(raw)?)
}

/// `PX` argument for a write, `None` stores without expiry.
///
/// A zero `ttl` disables expiry, a missing one falls back to the engine
/// default. Sub-millisecond TTLs round up so `PX` never receives `0`.
pub(crate) fn expiry_millis(ttl: Option<Duration>, default_ttl: Option<Duration>) -> Option<u64> {
    let ttl = match ttl {
        Some(ttl) if ttl.is_zero() => return None,
        Some(ttl) => ttl,
        None => default_ttl?,
    };
    Some(u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1))
}
