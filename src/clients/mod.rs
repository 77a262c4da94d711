//! HTTP client types for Mailchimp API communication.
//!
//! This module provides the request engine: the single path every call takes
//! to the network. It handles authentication, body serialization, query
//! parameters, and classification of the response.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`MailchimpClient`]: The shared, cloneable root client
//! - [`HttpClient`]: The async HTTP engine behind it
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A raw response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, PATCH, DELETE)
//! - [`QueryParams`]: Anything that renders itself as query parameters
//! - [`HttpError`] / [`ApiError`]: Request failures
//!
//! # Example
//!
//! ```rust,ignore
//! use mailchimp_api::clients::{HttpMethod, HttpRequest};
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "/ping").build()?;
//! let health: Option<serde_json::Value> = client.http_client().execute(request).await?;
//! ```
//!
//! # Classification
//!
//! - **2xx with a body**: decoded into the destination type
//! - **2xx without a body**: success with no value
//! - **Any other status**: [`HttpError::Api`] carrying the parsed [`ApiError`]
//!
//! Requests are never retried.

mod client;
mod errors;
mod http_client;
mod http_request;
mod http_response;
mod query;

pub use client::MailchimpClient;
pub use errors::{ApiError, FieldError, HttpError};
pub use http_client::{authorization_headers, HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use query::{render_query, BasicQueryParams, ExtendedQueryParams, QueryParams, SortDirection};
pub(crate) use query::render;
