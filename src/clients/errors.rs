//! HTTP-level error types for the Mailchimp API SDK.
//!
//! # Error Handling
//!
//! Every request made through the engine either succeeds or fails with one
//! [`HttpError`] variant:
//!
//! - [`HttpError::Api`]: The service answered with a non-2xx status; the body
//!   is available as a structured [`ApiError`]
//! - [`HttpError::Network`]: DNS, connect, TLS or timeout failure
//! - [`HttpError::Encode`]: The request body could not be serialized; nothing was sent
//! - [`HttpError::Decode`]: A 2xx body did not match the expected shape
//! - [`HttpError::EmptyBody`]: A 2xx response carried no body where one was required
//!
//! # Example
//!
//! ```rust,ignore
//! use mailchimp_api::clients::HttpError;
//!
//! match client.get_list("abc123", None).await {
//!     Ok(list) => println!("List: {}", list.name),
//!     Err(e) => match e.api_error() {
//!         Some(api) => {
//!             println!("Rejected: {} ({})", api.title, api.detail);
//!             for field in &api.errors {
//!                 println!("  {}: {}", field.field, field.message);
//!             }
//!         }
//!         None => println!("Local failure: {e}"),
//!     },
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A field-level validation problem reported inside an [`ApiError`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The request field the problem refers to.
    #[serde(default)]
    pub field: String,
    /// Human readable description of the problem.
    #[serde(default)]
    pub message: String,
}

/// The structured body of a non-2xx response.
///
/// Mailchimp returns problem documents of the form
/// `{type, title, status, detail, instance, errors: [{field, message}]}`.
/// `ApiError` is a value: it is returned as the failure half of a `Result`.
///
/// # Example
///
/// ```rust
/// use mailchimp_api::clients::ApiError;
///
/// let error = ApiError::from_body(
///     404,
///     r#"{"type":"https://mailchimp.com/developer/marketing/docs/errors/","title":"Resource Not Found","status":404,"detail":"The requested resource could not be found.","instance":"995c5cb0"}"#,
/// );
/// assert_eq!(error.title, "Resource Not Found");
/// assert_eq!(error.to_string(), "Error 404 Resource Not Found (The requested resource could not be found.)");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("Error {status} {title} ({detail})")]
pub struct ApiError {
    /// A URL identifying the error type.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// A short, human readable summary of the problem.
    #[serde(default)]
    pub title: String,
    /// The HTTP status code.
    #[serde(default)]
    pub status: u16,
    /// A human readable explanation specific to this occurrence.
    #[serde(default)]
    pub detail: String,
    /// A string identifying this occurrence, useful when contacting support.
    #[serde(default)]
    pub instance: String,
    /// Field-level validation problems, if any.
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

impl ApiError {
    /// Parses a non-2xx response body into an `ApiError`.
    ///
    /// A body that omits `status` inherits `code`. A body that is not an
    /// error document keeps its raw text in `detail` and takes its title
    /// from the status code's reason phrase.
    #[must_use]
    pub fn from_body(code: u16, body: &str) -> Self {
        match serde_json::from_str::<Self>(body) {
            Ok(mut error) => {
                if error.status == 0 {
                    error.status = code;
                }
                error
            }
            Err(_) => Self {
                title: reqwest::StatusCode::from_u16(code)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Unknown Error")
                    .to_string(),
                status: code,
                detail: body.trim().to_string(),
                ..Self::default()
            },
        }
    }

    /// Returns the messages reported for `field`.
    #[must_use]
    pub fn field_messages(&self, field: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }
}

/// Unified error type for requests sent through the engine.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The service rejected the request (non-2xx status).
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Network, TLS or timeout error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A successful response did not match the expected shape.
    #[error("Malformed response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// A successful response carried no body where one was required.
    #[error("Expected a response body but the service returned none (status {code})")]
    EmptyBody {
        /// The HTTP status code of the response.
        code: u16,
    },
}

impl HttpError {
    /// Returns the structured API error, if the service rejected the request.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the HTTP status code associated with the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(e) => Some(e.status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::EmptyBody { code } => Some(*code),
            Self::Encode(_) | Self::Decode(_) => None,
        }
    }
}

// Verify HttpError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpError>();
};
