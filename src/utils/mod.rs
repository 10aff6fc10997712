//! Utility modules
//!
//! - **error**: error taxonomy and `Result` alias
//! - **logging**: tracing subscriber setup

pub mod error;
pub mod logging;

pub use error::{BoxError, CacheError, Result};
pub use logging::{LogFormat, init_tracing};

/// Sanitize a connection URL for logging (hide password)
pub fn sanitize_url(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url) {
        let mut sanitized = parsed.clone();
        if sanitized.password().is_some() {
            let _ = sanitized.set_password(Some("***"));
        }
        sanitized.to_string()
    } else {
        "invalid_url".to_string()
    }
}
