//! Stateless request router for the accounts API.
//!
//! # Design
//! `AccountsApiRouter` holds only a base URL and carries no mutable state
//! between calls, so one instance can be shared freely across threads. Each
//! call to `build` turns an `Operation` into an `HttpRequest`; the caller
//! executes the HTTP round-trip and handles the response.

use tracing::{debug, warn};
use url::Url;

use crate::config::{RouterConfig, DEFAULT_BASE_URL};
use crate::encoding;
use crate::error::RouterError;
use crate::http::{HttpRequest, ParameterEncoding};
use crate::operation::Operation;

const JSON_CONTENT_TYPE: (&str, &str) = ("content-type", "application/json");

/// Synchronous, stateless request builder for the accounts API.
#[derive(Debug, Clone)]
pub struct AccountsApiRouter {
    base_url: String,
}

impl AccountsApiRouter {
    /// Create a router for `base_url`. The URL is validated on each `build`
    /// call, not here.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &RouterConfig) -> Self {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the HTTP request for `operation`.
    ///
    /// GET parameters are appended to the URL as a query string. POST and PUT
    /// parameters become a JSON body with a `content-type` header. Operations
    /// without parameters get neither. The typed parameter records always
    /// serialize to a mapping, so `Encoding` errors come from path values
    /// that cannot stay a single segment.
    pub fn build(&self, operation: &Operation) -> Result<HttpRequest, RouterError> {
        let method = operation.method();
        let mut url = self.endpoint(operation)?;

        let mut headers = Vec::new();
        let mut body = None;
        if let Some(parameters) = operation.parameters()? {
            match method.encoding() {
                ParameterEncoding::Query => encoding::append_query(&mut url, &parameters),
                ParameterEncoding::JsonBody => {
                    body = Some(encoding::json_body(&parameters)?);
                    headers.push((
                        JSON_CONTENT_TYPE.0.to_string(),
                        JSON_CONTENT_TYPE.1.to_string(),
                    ));
                }
            }
        }

        debug!(
            operation = operation.name(),
            method = %method,
            url = %url,
            "built accounts API request"
        );

        Ok(HttpRequest {
            method,
            url: url.into(),
            headers,
            body,
        })
    }

    /// Append the operation's path segments to the base URL's path.
    ///
    /// Each segment is percent-encoded on its own, so `/`, `%`, `?` and `#`
    /// inside a value stay inside that segment. `.` and `..` are rejected
    /// because URL parsing would resolve them into a different endpoint.
    fn endpoint(&self, operation: &Operation) -> Result<Url, RouterError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| RouterError::malformed_base_url(&self.base_url, e))?;

        let segments = operation.path_segments();
        if let Some(segment) = segments.iter().find(|s| matches!(s.as_str(), "." | "..")) {
            warn!(
                operation = operation.name(),
                segment = %segment,
                "rejected dot segment in request path"
            );
            return Err(RouterError::Encoding(format!(
                "path segment {segment:?} would change the endpoint"
            )));
        }

        url.path_segments_mut()
            .map_err(|()| {
                RouterError::malformed_base_url(&self.base_url, "URL cannot be used as a base")
            })?
            .pop_if_empty()
            .extend(&segments);
        Ok(url)
    }
}

impl Default for AccountsApiRouter {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
