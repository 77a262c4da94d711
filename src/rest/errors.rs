//! Resource-level error type.
//!
//! [`ResourceError`] extends [`HttpError`] with the precondition failures a
//! resource reports before any network I/O: a missing identity field or a
//! missing client handle.
//!
//! # Example
//!
//! ```rust,ignore
//! use mailchimp_api::rest::ResourceError;
//!
//! match member.get_notes(None).await {
//!     Ok(notes) => println!("{} notes", notes.total_items),
//!     Err(ResourceError::MissingIdentity { resource, field }) => {
//!         println!("{resource} has no {field}; nothing was sent");
//!     }
//!     Err(e) => match e.api_error() {
//!         Some(api) => println!("API said: {}", api.detail),
//!         None => println!("Other error: {e}"),
//!     },
//! }
//! ```

use thiserror::Error;

use crate::clients::{ApiError, HttpError};

/// Error type for resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// An identity field needed to build the request path is empty.
    ///
    /// Detected before any request is sent.
    #[error("{resource} has no {field}; it must be fetched from the API or built with a known {field}")]
    MissingIdentity {
        /// The type name of the resource (e.g., "Member").
        resource: &'static str,
        /// The empty field (e.g., "list_id").
        field: &'static str,
    },

    /// The resource carries no client handle.
    ///
    /// Resources built by hand instead of returned by an operation have no
    /// handle until one is attached.
    #[error("{resource} has no client attached; obtain it through a client operation or call attach_client")]
    MissingClient {
        /// The type name of the resource.
        resource: &'static str,
    },

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ResourceError {
    /// Returns the structured API error, if the service rejected the request.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Http(e) => e.api_error(),
            _ => None,
        }
    }

    /// Returns `true` for failures detected before any network I/O.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(self, Self::MissingIdentity { .. } | Self::MissingClient { .. })
    }
}

impl From<ApiError> for ResourceError {
    fn from(error: ApiError) -> Self {
        Self::Http(HttpError::Api(error))
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
