//! Configuration types for the Mailchimp API SDK.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`MailchimpConfig`]: The immutable configuration consumed by the client
//! - [`MailchimpConfigBuilder`]: A builder for constructing [`MailchimpConfig`] instances
//! - [`ApiKey`]: A validated API key with masked debug output
//! - [`AccessToken`]: A validated OAuth access token with masked debug output
//! - [`Endpoint`]: The scheme, host and versioned base path requests go to
//!
//! # Example
//!
//! ```rust
//! use mailchimp_api::{MailchimpConfig, ApiKey};
//! use std::time::Duration;
//!
//! let config = MailchimpConfig::builder()
//!     .api_key(ApiKey::new("0123456789abcdef-us6").unwrap())
//!     .timeout(Duration::from_secs(10))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.endpoint().as_ref(), "https://us6.api.mailchimp.com/3.0");
//! ```

mod newtypes;

pub use newtypes::{AccessToken, ApiKey, Endpoint, API_VERSION_PATH, DEFAULT_HOST};

use std::time::Duration;

use crate::error::ConfigError;

/// Username sent with the API key in HTTP Basic credentials.
pub const DEFAULT_BASIC_AUTH_USER: &str = "user";

/// Configuration for the Mailchimp API SDK.
///
/// Holds the credentials, the endpoint, the optional per-request timeout and
/// an optional transport override. Both credentials are optional and may be
/// combined: the API key is sent as HTTP Basic credentials, the access token
/// as a bearer token.
///
/// # Thread Safety
///
/// `MailchimpConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct MailchimpConfig {
    api_key: Option<ApiKey>,
    access_token: Option<AccessToken>,
    basic_auth_user: String,
    endpoint: Endpoint,
    timeout: Option<Duration>,
    http_client: Option<reqwest::Client>,
    user_agent_prefix: Option<String>,
    debug: bool,
}

impl MailchimpConfig {
    /// Creates a new builder for constructing a `MailchimpConfig`.
    #[must_use]
    pub fn builder() -> MailchimpConfigBuilder {
        MailchimpConfigBuilder::new()
    }

    /// Returns the API key, if configured.
    #[must_use]
    pub const fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    /// Returns the OAuth access token, if configured.
    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Returns the username used for HTTP Basic credentials.
    #[must_use]
    pub fn basic_auth_user(&self) -> &str {
        &self.basic_auth_user
    }

    /// Returns the endpoint requests are sent to.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the transport override, if configured.
    #[must_use]
    pub const fn http_client(&self) -> Option<&reqwest::Client> {
        self.http_client.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns whether request/response dumps are logged.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }
}

// Verify MailchimpConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MailchimpConfig>();
};

/// Builder for constructing [`MailchimpConfig`] instances.
///
/// # Defaults
///
/// - `api_key` / `access_token`: `None` (no credentials are sent)
/// - `endpoint`: derived from the API key's data center, otherwise
///   `https://server.api.mailchimp.com/3.0`
/// - `basic_auth_user`: `"user"`
/// - `timeout`: `None` (transport default)
/// - `http_client`: `None` (a rustls-backed `reqwest::Client` is created)
/// - `debug`: `false`
///
/// # Example
///
/// ```rust
/// use mailchimp_api::{MailchimpConfig, AccessToken, Endpoint};
///
/// let config = MailchimpConfig::builder()
///     .access_token(AccessToken::new("oauth-token").unwrap())
///     .endpoint(Endpoint::new("https://us19.api.mailchimp.com/3.0").unwrap())
///     .user_agent_prefix("MyApp/1.0")
///     .build()
///     .unwrap();
///
/// assert!(config.api_key().is_none());
/// ```
#[derive(Debug, Default)]
pub struct MailchimpConfigBuilder {
    api_key: Option<ApiKey>,
    access_token: Option<AccessToken>,
    basic_auth_user: Option<String>,
    endpoint: Option<Endpoint>,
    timeout: Option<Duration>,
    http_client: Option<reqwest::Client>,
    user_agent_prefix: Option<String>,
    debug: bool,
}

impl MailchimpConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key sent as HTTP Basic credentials.
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the OAuth access token sent as a bearer credential.
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Overrides the HTTP Basic username.
    #[must_use]
    pub fn basic_auth_user(mut self, user: impl Into<String>) -> Self {
        self.basic_auth_user = Some(user.into());
        self
    }

    /// Overrides the endpoint (scheme, host and versioned base path).
    #[must_use]
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets the overall timeout applied to every request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Supplies the `reqwest::Client` used to send requests.
    ///
    /// Use this to intercept traffic, configure a proxy, or share a
    /// connection pool with the rest of an application.
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Enables request/response dumps through `tracing`.
    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Builds the [`MailchimpConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTimeout`] if a zero timeout was set,
    /// [`ConfigError::EmptyBasicAuthUser`] if the Basic username is blank,
    /// and [`ConfigError::InvalidEndpoint`] if the API key's data center does
    /// not form a valid host.
    pub fn build(self) -> Result<MailchimpConfig, ConfigError> {
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::ZeroTimeout);
        }

        let basic_auth_user = match self.basic_auth_user {
            Some(user) if user.trim().is_empty() => return Err(ConfigError::EmptyBasicAuthUser),
            Some(user) => user,
            None => DEFAULT_BASIC_AUTH_USER.to_string(),
        };

        let endpoint = match (self.endpoint, self.api_key.as_ref().and_then(ApiKey::datacenter)) {
            (Some(endpoint), _) => endpoint,
            (None, Some(dc)) => {
                tracing::debug!("Using endpoint for data center {} derived from API key", dc);
                Endpoint::for_datacenter(dc)?
            }
            (None, None) => Endpoint::default(),
        };

        Ok(MailchimpConfig {
            api_key: self.api_key,
            access_token: self.access_token,
            basic_auth_user,
            endpoint,
            timeout: self.timeout,
            http_client: self.http_client,
            user_agent_prefix: self.user_agent_prefix,
            debug: self.debug,
        })
    }
}
