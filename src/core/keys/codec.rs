//! Cache key derivation
//!
//! Turns a logical key specification (explicit key, generator, or the
//! owner/operation/arguments triple) into one canonical string.

use super::canonical::canonical_args_json;
use crate::utils::error::{BoxError, CacheError, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Separator used when none is configured
pub const DEFAULT_CACHE_SEPARATOR: char = ':';
/// Owner name used when the caller cannot supply one
pub const DEFAULT_OWNER_NAME: &str = "UnknownClassName";
/// Digest used for empty or absent argument lists
pub const EMPTY_ARGS_DIGEST: &str = "EmptyArgs";

type ArgsFn = dyn Fn(&[Value]) -> std::result::Result<String, BoxError> + Send + Sync;

/// Caller-supplied function computing a key from call arguments
#[derive(Clone)]
pub struct KeyGenerator(Arc<ArgsFn>);

impl KeyGenerator {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> std::result::Result<String, BoxError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn generate(&self, args: &[Value]) -> std::result::Result<String, BoxError> {
        (self.0)(args)
    }
}

impl fmt::Debug for KeyGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyGenerator(..)")
    }
}

/// Caller-supplied replacement for the default argument digest.
///
/// Its output is used as the digest verbatim, so it owns its own encoding.
#[derive(Clone)]
pub struct ArgsSerializer(Arc<ArgsFn>);

impl ArgsSerializer {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> std::result::Result<String, BoxError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn serialize(&self, args: &[Value]) -> std::result::Result<String, BoxError> {
        (self.0)(args)
    }
}

impl fmt::Debug for ArgsSerializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ArgsSerializer(..)")
    }
}

/// Logical identity of a cache entry
#[derive(Debug, Clone, Default)]
pub enum KeyIdentity {
    /// Used verbatim
    Explicit(String),
    /// Invoked with the call arguments, result used verbatim
    Generator(KeyGenerator),
    /// `owner<sep>operation<sep>digest`
    #[default]
    Derived,
}

impl From<&str> for KeyIdentity {
    fn from(key: &str) -> Self {
        Self::Explicit(key.to_string())
    }
}

impl From<String> for KeyIdentity {
    fn from(key: String) -> Self {
        Self::Explicit(key)
    }
}

impl From<KeyGenerator> for KeyIdentity {
    fn from(generator: KeyGenerator) -> Self {
        Self::Generator(generator)
    }
}

/// Everything key derivation may need about the call being cached
#[derive(Debug, Clone, Copy)]
pub struct KeyContext<'a> {
    pub owner: Option<&'a str>,
    pub operation: &'a str,
    pub args: &'a [Value],
    pub serializer: Option<&'a ArgsSerializer>,
    pub separator: Option<char>,
}

impl<'a> KeyContext<'a> {
    pub fn new(operation: &'a str) -> Self {
        Self {
            owner: None,
            operation,
            args: &[],
            serializer: None,
            separator: None,
        }
    }

    pub fn owner(mut self, owner: &'a str) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn args(mut self, args: &'a [Value]) -> Self {
        self.args = args;
        self
    }

    pub fn serializer(mut self, serializer: Option<&'a ArgsSerializer>) -> Self {
        self.serializer = serializer;
        self
    }

    pub fn separator(mut self, separator: char) -> Self {
        self.separator = Some(separator);
        self
    }
}

/// Derive the logical key for `identity`
pub fn derive_key(identity: &KeyIdentity, ctx: &KeyContext<'_>) -> Result<String> {
    match identity {
        KeyIdentity::Explicit(key) => Ok(key.clone()),
        KeyIdentity::Generator(generator) => generator
            .generate(ctx.args)
            .map_err(|e| CacheError::key_generation(e.to_string())),
        KeyIdentity::Derived => derive_programmatic_key(ctx),
    }
}

/// Build `owner<sep>operation<sep>digest`
pub fn derive_programmatic_key(ctx: &KeyContext<'_>) -> Result<String> {
    let digest = args_digest(ctx.args, ctx.serializer)?;
    let separator = ctx.separator.unwrap_or(DEFAULT_CACHE_SEPARATOR);
    let owner = match ctx.owner {
        Some(owner) if !owner.is_empty() => owner,
        _ => DEFAULT_OWNER_NAME,
    };

    Ok(format!(
        "{owner}{separator}{}{separator}{digest}",
        ctx.operation
    ))
}

/// Digest of an argument list: `EmptyArgs` when empty, else the serializer
/// output (base64 of canonical JSON by default)
pub fn args_digest(args: &[Value], serializer: Option<&ArgsSerializer>) -> Result<String> {
    if args.is_empty() {
        return Ok(EMPTY_ARGS_DIGEST.to_string());
    }

    let serialized = match serializer {
        Some(serializer) => serializer.serialize(args),
        None => Ok(default_args_serializer(args)),
    };

    serialized.map_err(|e| {
        let original = e.to_string();
        if original.is_empty() {
            CacheError::key_generation("Error generate postfix from function args")
        } else {
            CacheError::key_generation(format!(
                "Error generate postfix from function args: {original}"
            ))
        }
    })
}

/// base64 of the canonical JSON array of `args`
pub fn default_args_serializer(args: &[Value]) -> String {
    STANDARD.encode(canonical_args_json(args))
}
