//! Error types for the Mailchimp API SDK.
//!
//! This module contains the configuration error type. Errors raised while
//! talking to the API live in [`crate::clients`] ([`HttpError`](crate::clients::HttpError))
//! and [`crate::rest`] ([`ResourceError`](crate::rest::ResourceError)).
//!
//! # Example
//!
//! ```rust
//! use mailchimp_api::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Mailchimp API key.")]
    EmptyApiKey,

    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid OAuth access token.")]
    EmptyAccessToken,

    /// Basic auth username cannot be empty.
    #[error("Basic auth user cannot be empty.")]
    EmptyBasicAuthUser,

    /// Endpoint URL is invalid.
    #[error("Invalid endpoint '{url}'. Please provide an absolute URL with scheme (e.g., 'https://us6.api.mailchimp.com/3.0').")]
    InvalidEndpoint {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Timeout must be greater than zero.
    #[error("Invalid timeout: a request timeout must be greater than zero.")]
    ZeroTimeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_error_message() {
        let message = ConfigError::EmptyApiKey.to_string();
        assert!(message.contains("API key cannot be empty"));
        assert!(message.contains("Mailchimp"));
    }

    #[test]
    fn test_invalid_endpoint_error_message() {
        let error = ConfigError::InvalidEndpoint {
            url: "not a url".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("not a url"));
        assert!(message.contains("absolute URL"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::ZeroTimeout;
        let _: &dyn std::error::Error = &error;
    }
}
