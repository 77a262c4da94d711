//! HTTP engine for Mailchimp API communication.
//!
//! This module provides the [`HttpClient`] type, the single path every
//! request takes to the network. It authenticates, serializes, sends, and
//! classifies the response as success or API failure.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;

use crate::clients::errors::{ApiError, HttpError};
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::config::{Endpoint, MailchimpConfig};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

const REDACTED: &str = "[REDACTED]";

/// HTTP engine for making requests to the Mailchimp Marketing API.
///
/// The client handles:
/// - URL construction from the configured endpoint and a relative path
/// - Default headers (`User-Agent`, `Accept`)
/// - HTTP Basic and bearer credentials
/// - The optional per-request timeout
/// - Request/response dumps when debugging is enabled
///
/// Nothing is retried: each call performs exactly one HTTP exchange.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`. The only mutable state is the debug flag,
/// which is atomic.
///
/// # Example
///
/// ```rust,ignore
/// use mailchimp_api::clients::{HttpClient, HttpMethod, HttpRequest};
/// use mailchimp_api::{ApiKey, MailchimpConfig};
///
/// let config = MailchimpConfig::builder()
///     .api_key(ApiKey::new("0123456789abcdef-us6")?)
///     .build()?;
/// let client = HttpClient::new(&config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "/ping").build()?;
/// let response = client.request(request).await?;
/// println!("{}", response.body);
/// ```
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Scheme, host and versioned base path.
    endpoint: Endpoint,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// `Authorization` values, in the order they are sent.
    authorization: Vec<String>,
    /// Per-request timeout.
    timeout: Option<Duration>,
    /// Whether request/response dumps are logged.
    debug: AtomicBool,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("endpoint", &self.endpoint)
            .field("default_headers", &self.default_headers)
            .field("authorization", &vec![REDACTED; self.authorization.len()])
            .field("timeout", &self.timeout)
            .field("debug", &self.is_debug())
            .finish()
    }
}

impl HttpClient {
    /// Creates a new HTTP engine from the given configuration.
    ///
    /// Uses the configured transport when one was supplied, otherwise
    /// creates a rustls-backed `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the default transport cannot be
    /// initialized (e.g., TLS backend failure).
    pub fn new(config: &MailchimpConfig) -> Result<Self, HttpError> {
        let client = match config.http_client() {
            Some(client) => client.clone(),
            None => reqwest::Client::builder().use_rustls_tls().build()?,
        };

        // Build User-Agent header
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}Mailchimp API Library v{SDK_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        Ok(Self {
            client,
            endpoint: config.endpoint().clone(),
            default_headers,
            authorization: authorization_headers(config),
            timeout: config.timeout(),
            debug: AtomicBool::new(config.debug()),
        })
    }

    /// Returns the endpoint requests are sent to.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the per-request timeout, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns whether request/response dumps are logged.
    #[must_use]
    pub fn is_debug(&self) -> bool {
        self.debug.load(Ordering::Relaxed)
    }

    /// Enables or disables request/response dumps.
    ///
    /// Dumps are emitted with `tracing::debug!` and never include credentials.
    pub fn set_debug(&self, debug: bool) {
        self.debug.store(debug, Ordering::Relaxed);
    }

    /// Sends a request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] on transport failure and
    /// [`HttpError::Api`] for any status outside 200..300.
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = format!("{}{}", self.endpoint, request.path);
        let debug = self.is_debug();

        let mut req_builder = self.client.request(request.http_method.into(), &url);

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        for value in &self.authorization {
            req_builder = req_builder.header(AUTHORIZATION, value);
        }

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        if let Some(body) = request.body {
            if debug {
                tracing::debug!("Mailchimp request body: {}", body);
            }
            req_builder = req_builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        if let Some(timeout) = self.timeout {
            req_builder = req_builder.timeout(timeout);
        }

        let req = req_builder.build()?;
        if debug {
            tracing::debug!("Mailchimp request: {} {}", request.http_method, url);
            tracing::debug!("Mailchimp query params: {:?}", request.query);
            tracing::debug!("{}", dump_request(&req));
        }

        let res = self.client.execute(req).await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        if debug {
            tracing::debug!("{}", dump_headers(&format!("HTTP {}", res.status()), res.headers()));
        }
        let body = res.text().await?;
        if debug {
            tracing::debug!("Mailchimp response body: {}", body);
        }

        let response = HttpResponse::new(code, res_headers, body);
        if response.is_ok() {
            return Ok(response);
        }

        Err(ApiError::from_body(code, &response.body).into())
    }

    /// Sends a request and decodes the response body.
    ///
    /// Returns `Ok(None)` for a successful response without a body.
    ///
    /// # Errors
    ///
    /// Everything [`request`](Self::request) returns, plus
    /// [`HttpError::Decode`] when the body does not match `T`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
    ) -> Result<Option<T>, HttpError> {
        self.request(request).await?.decode()
    }

    /// Sends a request whose only outcome is success or failure.
    ///
    /// The response body is ignored.
    ///
    /// # Errors
    ///
    /// Everything [`request`](Self::request) returns.
    pub async fn execute_ok(&self, request: HttpRequest) -> Result<bool, HttpError> {
        let response = self.request(request).await?;
        Ok(response.is_ok())
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(headers: &HeaderMap) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

/// Computes the `Authorization` header values for a configuration.
///
/// An API key yields `Basic base64(user:key)`, an access token yields
/// `Bearer <token>`. Both may be present; neither yields no header.
#[must_use]
pub fn authorization_headers(config: &MailchimpConfig) -> Vec<String> {
    let mut values = Vec::with_capacity(2);
    if let Some(key) = config.api_key() {
        let credentials = format!("{}:{}", config.basic_auth_user(), key.as_ref());
        values.push(format!("Basic {}", STANDARD.encode(credentials)));
    }
    if let Some(token) = config.access_token() {
        values.push(format!("Bearer {}", token.as_ref()));
    }
    values
}

fn redact(name: &str, value: &str) -> String {
    if name.eq_ignore_ascii_case(AUTHORIZATION.as_str()) {
        let scheme = value.split_whitespace().next().unwrap_or_default();
        format!("{scheme} {REDACTED}")
    } else {
        value.to_string()
    }
}

fn dump_headers(start_line: &str, headers: &HeaderMap) -> String {
    let mut out = String::from(start_line);
    for (name, value) in headers {
        let value = value.to_str().unwrap_or_default();
        out.push('\n');
        out.push_str(name.as_str());
        out.push_str(": ");
        out.push_str(&redact(name.as_str(), value));
    }
    out
}

fn dump_request(req: &reqwest::Request) -> String {
    let mut out = dump_headers(&format!("{} {}", req.method(), req.url()), req.headers());
    if let Some(body) = req.body().and_then(reqwest::Body::as_bytes) {
        out.push_str("\n\n");
        out.push_str(&String::from_utf8_lossy(body));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessToken, ApiKey};
    use reqwest::header::HeaderValue;

    fn config_with(key: Option<&str>, token: Option<&str>) -> MailchimpConfig {
        let mut builder = MailchimpConfig::builder();
        if let Some(key) = key {
            builder = builder.api_key(ApiKey::new(key).unwrap());
        }
        if let Some(token) = token {
            builder = builder.access_token(AccessToken::new(token).unwrap());
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_authorization_with_api_key_only() {
        let values = authorization_headers(&config_with(Some("key"), None));
        assert_eq!(values, vec!["Basic dXNlcjprZXk=".to_string()]);
    }

    #[test]
    fn test_authorization_with_token_only() {
        let values = authorization_headers(&config_with(None, Some("tok")));
        assert_eq!(values, vec!["Bearer tok".to_string()]);
    }

    #[test]
    fn test_authorization_with_both_credentials() {
        let values = authorization_headers(&config_with(Some("key"), Some("tok")));
        assert_eq!(
            values,
            vec!["Basic dXNlcjprZXk=".to_string(), "Bearer tok".to_string()]
        );
    }

    #[test]
    fn test_authorization_without_credentials() {
        assert!(authorization_headers(&config_with(None, None)).is_empty());
    }

    #[test]
    fn test_authorization_uses_custom_basic_user() {
        let config = MailchimpConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .basic_auth_user("anystring")
            .build()
            .unwrap();
        assert_eq!(
            authorization_headers(&config),
            vec!["Basic YW55c3RyaW5nOmtleQ==".to_string()]
        );
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&config_with(Some("key"), None)).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("Mailchimp API Library v"));
        assert!(user_agent.contains("| Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = MailchimpConfig::builder()
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | Mailchimp API Library"));
    }

    #[test]
    fn test_accept_header_is_json() {
        let client = HttpClient::new(&config_with(None, None)).unwrap();
        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_debug_flag_toggles() {
        let client = HttpClient::new(&config_with(None, None)).unwrap();
        assert!(!client.is_debug());
        client.set_debug(true);
        assert!(client.is_debug());
    }

    #[test]
    fn test_debug_output_hides_credentials() {
        let client = HttpClient::new(&config_with(Some("secret-key"), Some("secret-token"))).unwrap();
        let output = format!("{client:?}");
        assert!(!output.contains("secret"));
        assert!(!output.contains("dXNlcj"));
    }

    #[test]
    fn test_dump_redacts_authorization() {
        let mut headers = HeaderMap::new();
        headers.append(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjprZXk="));
        headers.append(AUTHORIZATION, HeaderValue::from_static("Bearer tok"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let dump = dump_headers("GET https://us6.api.mailchimp.com/3.0/lists", &headers);
        assert!(dump.contains("authorization: Basic [REDACTED]"));
        assert!(dump.contains("authorization: Bearer [REDACTED]"));
        assert!(dump.contains("content-type: application/json"));
        assert!(!dump.contains("dXNlcjprZXk="));
        assert!(!dump.contains("Bearer tok"));
    }
}
