//! Deterministic cache key derivation
//!
//! - `canonical` - key-sorted JSON serialization of call arguments
//! - `codec` - explicit / generated / derived key identities

pub mod canonical;
pub mod codec;


pub use canonical::{canonical_args_json, canonical_json};
pub use codec::{
    ArgsSerializer, DEFAULT_CACHE_SEPARATOR, DEFAULT_OWNER_NAME, EMPTY_ARGS_DIGEST, KeyContext,
    KeyGenerator, KeyIdentity, args_digest, default_args_serializer, derive_key,
    derive_programmatic_key,
};
