//! Glob matching with `*` as the only wildcard
//!
//! Patterns are anchored and every `*` matches zero or more characters,
//! separators included. There is no escaping syntax, so a literal `*` cannot
//! be expressed in a pattern.

use crate::utils::error::{CacheError, Result};
use regex::Regex;

/// Compiled glob pattern
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: String,
    regex: Regex,
}

impl PatternMatcher {
    /// Compile `pattern` into an anchored matcher
    pub fn compile(pattern: &str) -> Result<Self> {
        let body = pattern
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");

        let regex = Regex::new(&format!("(?s)^{body}$")).map_err(|e| CacheError::Pattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn test(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Keep the candidates that match, preserving order
    pub fn filter<I, S>(&self, candidates: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        candidates
            .into_iter()
            .map(Into::into)
            .filter(|candidate| self.test(candidate))
            .collect()
    }
}

/// Compile `pattern` and filter `candidates` through it
pub fn filter_by_pattern<I, S>(pattern: &str, candidates: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Ok(PatternMatcher::compile(pattern)?.filter(candidates))
}

/// Whether a delete target should be expanded as a pattern.
///
/// True for a bare `*`, or when a `*` touches a segment boundary: the
/// separator on either side, or the start/end of the string. A wildcard
/// buried inside a segment (`abc*def`) is treated as part of a literal key.
pub fn is_pattern_like(candidate: &str, separator: char) -> bool {
    if candidate == "*" {
        return true;
    }
    if candidate.starts_with('*') || candidate.ends_with('*') {
        return true;
    }

    let mut previous: Option<char> = None;
    for current in candidate.chars() {
        if let Some(previous) = previous {
            if (previous == '*' && current == separator) || (previous == separator && current == '*')
            {
                return true;
            }
        }
        previous = Some(current);
    }
    false
}

/// Translate a `*` glob into a Redis `MATCH` pattern by escaping the other
/// Redis glob metacharacters
pub fn to_redis_glob(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if matches!(c, '?' | '[' | ']' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
