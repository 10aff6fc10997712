//! Error types for the cache layer

use thiserror::Error;

/// Result type alias for the cache layer
pub type Result<T> = std::result::Result<T, CacheError>;

/// Boxed error returned by caller-supplied callbacks (key generators,
/// argument serializers, engine factories)
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for the cache layer
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key derivation failed (custom generator or argument serializer)
    #[error("{0}")]
    KeyGeneration(String),

    /// A single engine could not be created. Logged and skipped by the registry.
    #[error("Failed to create cache engine `{engine}`: {message}")]
    EngineConstruction { engine: String, message: String },

    /// Every construction path and fallback produced zero engines
    #[error("Cache engines has not setup")]
    NoCacheEngineConfigured,

    /// A single engine failed at call time
    #[error("Cache engine `{engine}` failed to {operation}: {message}")]
    EngineOperation {
        engine: String,
        operation: &'static str,
        message: String,
    },

    /// Pattern could not be compiled into a matcher
    #[error("Invalid key pattern `{pattern}`: {message}")]
    Pattern { pattern: String, message: String },

    /// Redis errors
    #[cfg(feature = "redis")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CacheError {
    pub fn key_generation(msg: impl Into<String>) -> Self {
        Self::KeyGeneration(msg.into())
    }

    pub fn engine_construction(engine: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::EngineConstruction {
            engine: engine.into(),
            message: msg.into(),
        }
    }

    pub fn engine_operation(
        engine: impl Into<String>,
        operation: &'static str,
        msg: impl Into<String>,
    ) -> Self {
        Self::EngineOperation {
            engine: engine.into(),
            operation,
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error is fatal to a whole operation rather than to a
    /// single engine's contribution
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::KeyGeneration(_) | Self::NoCacheEngineConfigured | Self::Pattern { .. }
        )
    }
}
