//! Concurrent per-engine dispatch
//!
//! Every engine gets the call, nothing short-circuits, and each engine's
//! outcome stays paired with the engine that produced it.

use crate::core::registry::RegisteredEngine;
use crate::utils::error::{CacheError, Result};
use futures::future::join_all;
use std::future::Future;
use tracing::warn;

/// One engine's outcome
pub(crate) type EngineOutcome<'a, T> = (&'a RegisteredEngine, Result<T>);

/// Run `op` against every engine concurrently
pub(crate) async fn fan_out<'a, T, F, Fut>(
    engines: &'a [RegisteredEngine],
    op: F,
) -> Vec<EngineOutcome<'a, T>>
where
    F: Fn(&'a RegisteredEngine) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let results = join_all(engines.iter().map(&op)).await;
    engines.iter().zip(results).collect()
}

/// Log every failed outcome and keep the successful values
pub(crate) fn keep_successes<'a, T>(
    outcomes: Vec<EngineOutcome<'a, T>>,
    operation: &'static str,
    target: &str,
) -> Vec<(&'a RegisteredEngine, T)> {
    outcomes
        .into_iter()
        .filter_map(|(engine, result)| match result {
            Ok(value) => Some((engine, value)),
            Err(e) => {
                log_engine_failure(engine, operation, target, &e);
                None
            }
        })
        .collect()
}

/// Collapse the outcomes of a write-like fan-out.
///
/// Succeeds when at least one engine succeeded; otherwise returns the first
/// engine's error unchanged. Every failure is logged with its engine.
pub(crate) fn any_success(
    outcomes: Vec<EngineOutcome<'_, ()>>,
    operation: &'static str,
    target: &str,
) -> Result<()> {
    let mut first_failure = None;
    let mut succeeded = false;

    for (engine, result) in outcomes {
        match result {
            Ok(()) => succeeded = true,
            Err(e) => {
                log_engine_failure(engine, operation, target, &e);
                first_failure.get_or_insert(e);
            }
        }
    }

    match first_failure {
        Some(e) if !succeeded => Err(e),
        _ => Ok(()),
    }
}

pub(crate) fn log_engine_failure(
    engine: &RegisteredEngine,
    operation: &'static str,
    target: &str,
    error: &CacheError,
) {
    warn!(
        operation,
        engine = %engine.name(),
        target = %target,
        error = %error,
        "Cache engine operation failed"
    );
}
