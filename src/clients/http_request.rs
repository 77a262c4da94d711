//! HTTP request types for the Mailchimp API SDK.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests to the Mailchimp Marketing API.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clients::errors::HttpError;
use crate::clients::query::{render_query, QueryParams};

/// HTTP methods supported by the Marketing API.
///
/// Serializes to the upper-case verb, which is also the form used inside
/// batch sub-operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources and triggering actions.
    Post,
    /// HTTP PUT method for add-or-update operations.
    Put,
    /// HTTP PATCH method for partial updates.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the upper-case verb.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// An HTTP request to be sent to the Marketing API.
///
/// Use [`HttpRequest::builder`] to construct requests. The body is stored
/// already serialized, so a request that exists can always be sent.
///
/// # Example
///
/// ```rust
/// use mailchimp_api::clients::{BasicQueryParams, HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let request = HttpRequest::builder(HttpMethod::Post, "/lists/abc123/members")
///     .json(&json!({"email_address": "ada@example.com", "status": "subscribed"}))
///     .query(&BasicQueryParams { count: Some(10), ..Default::default() })
///     .build()
///     .unwrap();
///
/// assert_eq!(request.query.get("count").map(String::as_str), Some("10"));
/// assert!(!request.query.contains_key("offset"));
/// assert!(request.body.is_some());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path relative to the endpoint, starting with `/`.
    pub path: String,
    /// The serialized JSON body, if any.
    pub body: Option<String>,
    /// Rendered query parameters, empty values already removed.
    pub query: BTreeMap<String, String>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<Result<String, serde_json::Error>>,
    query: BTreeMap<String, String>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            body: None,
            query: BTreeMap::new(),
        }
    }

    /// Serializes `body` as the JSON request body.
    ///
    /// A serialization failure is reported by [`build`](Self::build).
    #[must_use]
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.body = Some(serde_json::to_string(body));
        self
    }

    /// Uses `body` verbatim as the JSON request body.
    #[must_use]
    pub fn raw_json(mut self, body: impl Into<String>) -> Self {
        self.body = Some(Ok(body.into()));
        self
    }

    /// Merges the non-empty parameters of `params` into the query string.
    #[must_use]
    pub fn query(mut self, params: &dyn QueryParams) -> Self {
        self.query.extend(render_query(params));
        self
    }

    /// Adds a single query parameter. Empty values are ignored.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.query.insert(key.into(), value);
        }
        self
    }

    /// Builds the [`HttpRequest`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Encode`] if the body could not be serialized.
    pub fn build(self) -> Result<HttpRequest, HttpError> {
        let body = self.body.transpose().map_err(HttpError::Encode)?;
        Ok(HttpRequest {
            http_method: self.http_method,
            path: self.path,
            body,
            query: self.query,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::query::BasicQueryParams;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_http_method_serializes_upper_case() {
        assert_eq!(serde_json::to_value(HttpMethod::Patch).unwrap(), json!("PATCH"));
        let method: HttpMethod = serde_json::from_value(json!("DELETE")).unwrap();
        assert_eq!(method, HttpMethod::Delete);
    }

    #[test]
    fn test_builder_creates_get_request_without_body() {
        let request = HttpRequest::builder(HttpMethod::Get, "/lists")
            .build()
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(request.path, "/lists");
        assert!(request.body.is_none());
        assert!(request.query.is_empty());
    }

    #[test]
    fn test_builder_serializes_json_body() {
        let request = HttpRequest::builder(HttpMethod::Patch, "/lists/abc")
            .json(&json!({"name": "Newsletter"}))
            .build()
            .unwrap();

        assert_eq!(request.body.as_deref(), Some(r#"{"name":"Newsletter"}"#));
    }

    #[test]
    fn test_builder_reports_encode_failure() {
        let mut bad = HashMap::new();
        bad.insert(vec![1u8], "non-string key");

        let result = HttpRequest::builder(HttpMethod::Post, "/lists")
            .json(&bad)
            .build();

        assert!(matches!(result, Err(HttpError::Encode(_))));
    }

    #[test]
    fn test_builder_query_skips_empty_values() {
        let request = HttpRequest::builder(HttpMethod::Get, "/campaigns")
            .query(&BasicQueryParams {
                fields: vec!["campaigns.id".to_string()],
                ..Default::default()
            })
            .query_param("status", "")
            .query_param("type", "regular")
            .build()
            .unwrap();

        assert_eq!(request.query.len(), 2);
        assert_eq!(request.query.get("fields"), Some(&"campaigns.id".to_string()));
        assert_eq!(request.query.get("type"), Some(&"regular".to_string()));
    }
}
