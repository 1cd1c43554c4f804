//! Router configuration.
//!
//! The base URL is injected rather than hard-wired so hosts can point the
//! router at staging or at a local mock server.

use serde::{Deserialize, Serialize};

/// Production base URL of the accounts API.
pub const DEFAULT_BASE_URL: &str = "https://accounts.paysera.com/public";

/// Configuration for `AccountsApiRouter`.
///
/// Deserializes from any serde format the host already uses; missing fields
/// fall back to the production defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    pub base_url: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}
