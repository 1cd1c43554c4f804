//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe requests as plain data. The router builds
//! `HttpRequest` values without touching the network; the host application
//! owns transport, TLS, authentication and response handling.

use std::fmt;

use serde::{Deserialize, Serialize};

/// HTTP method for a request.
///
/// Only the methods the accounts API surface actually uses are listed.
/// Adding one forces an explicit entry in [`HttpMethod::encoding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

/// Where request parameters travel on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterEncoding {
    /// Appended to the URL as a query string.
    Query,
    /// Serialized as a JSON request body.
    JsonBody,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }

    pub fn encoding(self) -> ParameterEncoding {
        match self {
            HttpMethod::Get => ParameterEncoding::Query,
            HttpMethod::Post | HttpMethod::Put => ParameterEncoding::JsonBody,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Built by `AccountsApiRouter::build`. `url` is absolute and already carries
/// the query string for GET requests. `body` is JSON text and is present only
/// when the operation has parameters and its method encodes them as a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_uses_query_and_writes_use_json() {
        assert_eq!(HttpMethod::Get.encoding(), ParameterEncoding::Query);
        assert_eq!(HttpMethod::Post.encoding(), ParameterEncoding::JsonBody);
        assert_eq!(HttpMethod::Put.encoding(), ParameterEncoding::JsonBody);
    }

    #[test]
    fn method_displays_uppercase() {
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
        assert_eq!(serde_json::to_value(HttpMethod::Get).unwrap(), "GET");
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest {
            method: HttpMethod::Post,
            url: "https://example.test/cards".to_string(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some("{}".to_string()),
        };
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert_eq!(req.header("accept"), None);
    }
}
