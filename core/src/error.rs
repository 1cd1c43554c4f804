//! Error types for the accounts API request router.
//!
//! # Design
//! Request construction is atomic: either a complete `HttpRequest` comes back
//! or one of these errors does. Nothing is retried and nothing falls back to a
//! different encoding; the caller decides what to do.

use thiserror::Error;

/// Errors returned by `AccountsApiRouter::build`.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The configured base URL could not be parsed, or cannot have paths
    /// joined onto it (e.g. `mailto:` URLs).
    #[error("malformed base URL {url:?}: {reason}")]
    MalformedBaseUrl { url: String, reason: String },

    /// A parameter record could not be turned into a key-value mapping, or
    /// the mapping could not be encoded for the wire.
    #[error("parameter encoding failed: {0}")]
    Encoding(String),
}

impl RouterError {
    pub(crate) fn malformed_base_url(url: &str, reason: impl ToString) -> Self {
        RouterError::MalformedBaseUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for RouterError {
    fn from(err: serde_json::Error) -> Self {
        RouterError::Encoding(err.to_string())
    }
}
