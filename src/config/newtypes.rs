//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// Default API host when no data center can be derived.
pub const DEFAULT_HOST: &str = "server.api.mailchimp.com";

/// Versioned base path of the Marketing API.
pub const API_VERSION_PATH: &str = "/3.0";

/// A validated Mailchimp API key.
///
/// Mailchimp keys carry their data center as a suffix (`<key>-us6`). The
/// `Debug` implementation masks the value so keys never end up in logs.
///
/// # Example
///
/// ```rust
/// use mailchimp_api::ApiKey;
///
/// let key = ApiKey::new("0123456789abcdef-us6").unwrap();
/// assert_eq!(key.datacenter(), Some("us6"));
/// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key.to_string()))
    }

    /// Returns the data center suffix of the key, if any.
    #[must_use]
    pub fn datacenter(&self) -> Option<&str> {
        self.0
            .rsplit_once('-')
            .map(|(_, dc)| dc)
            .filter(|dc| !dc.is_empty() && dc.chars().all(|c| c.is_ascii_alphanumeric()))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}

/// A validated OAuth access token, sent as a bearer credential.
///
/// # Example
///
/// ```rust
/// use mailchimp_api::AccessToken;
///
/// let token = AccessToken::new("oauth-token").unwrap();
/// assert_eq!(token.as_ref(), "oauth-token");
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        let token = token.trim();
        if token.is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token.to_string()))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// A validated API endpoint: scheme, host and versioned base path.
///
/// Relative resource paths are appended to this value verbatim, so any
/// trailing slash is stripped on construction.
///
/// # Example
///
/// ```rust
/// use mailchimp_api::Endpoint;
///
/// let endpoint = Endpoint::new("https://us6.api.mailchimp.com/3.0/").unwrap();
/// assert_eq!(endpoint.as_ref(), "https://us6.api.mailchimp.com/3.0");
/// assert_eq!(endpoint.host_name(), "us6.api.mailchimp.com");
///
/// assert_eq!(Endpoint::default().as_ref(), "https://server.api.mailchimp.com/3.0");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    url: String,
    host_start: usize,
    host_end: usize,
}

impl Endpoint {
    /// Creates a new validated endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] if the URL has no `http`/`https`
    /// scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidEndpoint { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if !scheme.eq_ignore_ascii_case("https") && !scheme.eq_ignore_ascii_case("http") {
            return Err(ConfigError::InvalidEndpoint { url });
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        if remainder.contains(['?', '#']) {
            return Err(ConfigError::InvalidEndpoint { url });
        }

        let host_end = remainder
            .find([':', '/'])
            .map_or(url.len(), |i| host_start + i);
        if host_end == host_start {
            return Err(ConfigError::InvalidEndpoint { url });
        }

        Ok(Self {
            url,
            host_start,
            host_end,
        })
    }

    /// Returns the endpoint for a Mailchimp data center (e.g. `us6`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] if the data center is not a
    /// valid host label.
    pub fn for_datacenter(dc: &str) -> Result<Self, ConfigError> {
        Self::new(format!("https://{dc}.api.mailchimp.com{API_VERSION_PATH}"))
    }

    /// Returns the host name portion of the endpoint.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        let url = format!("https://{DEFAULT_HOST}{API_VERSION_PATH}");
        let host_start = "https://".len();
        let host_end = host_start + DEFAULT_HOST.len();
        Self {
            url,
            host_start,
            host_end,
        }
    }
}

impl AsRef<str> for Endpoint {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
