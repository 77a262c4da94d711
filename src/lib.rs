//! # Mailchimp API Rust SDK
//!
//! A Rust SDK for the Mailchimp Marketing API v3.0, providing type-safe
//! configuration, a single request engine, typed resources that carry their
//! client, and batch operations.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`MailchimpConfig`] and [`MailchimpConfigBuilder`]
//! - Validated newtypes for credentials and the endpoint
//! - An async request engine with structured API errors ([`ApiError`])
//! - Typed resources (lists, members, campaigns, templates, ...) whose
//!   follow-up operations reuse the client that produced them
//! - Batch submission and polling via [`rest::resources::batches`]
//!
//! ## Quick Start
//!
//! ```rust
//! use mailchimp_api::{ApiKey, MailchimpClient, MailchimpConfig};
//!
//! let config = MailchimpConfig::builder()
//!     .api_key(ApiKey::new("0123456789abcdef-us6").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let client = MailchimpClient::new(&config).unwrap();
//! assert_eq!(client.endpoint().as_ref(), "https://us6.api.mailchimp.com/3.0");
//! ```
//!
//! ## Resources
//!
//! Every resource returned by an operation carries a handle to the client,
//! so follow-up calls need no credentials:
//!
//! ```rust,ignore
//! let list = client.get_list("abc123", None).await?;
//! let members = list.get_members(None).await?;
//! for member in members.iter() {
//!     member.update_tags(&[TagUpdate::add("imported")]).await?;
//! }
//! ```
//!
//! A member can also be addressed without fetching it:
//!
//! ```rust,ignore
//! let member = client.member_for_api_calls("abc123", "ada@example.com");
//! member.add_simple_event("signed_up").await?;
//! ```
//!
//! ## Batches
//!
//! ```rust,ignore
//! use mailchimp_api::rest::resources::{BatchOperation, BatchRequest};
//! use mailchimp_api::HttpMethod;
//!
//! let job = client
//!     .create_batch(&BatchRequest::new(vec![
//!         BatchOperation::new(HttpMethod::Get, "/lists/abc123"),
//!     ]))
//!     .await?;
//! let job = job.refresh().await?;
//! println!("{}: {}/{}", job.status, job.finished_operations, job.total_operations);
//! ```
//!
//! ## Errors
//!
//! - [`ConfigError`]: invalid configuration, reported by the builder
//! - [`HttpError`]: network, encode, decode and API failures
//! - [`ResourceError`]: [`HttpError`] plus failures detected before any
//!   request (a resource without identity or without a client)
//!
//! Nothing is retried.
//!
//! ## Logging
//!
//! The SDK logs through [`tracing`]. With [`MailchimpConfigBuilder::debug`]
//! (or [`MailchimpClient::set_debug`]) every request and response is dumped
//! at `debug` level with credentials redacted.
//!
//! ## Thread Safety
//!
//! All public types are `Send + Sync`; a [`MailchimpClient`] is meant to be
//! cloned and shared across tasks.

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{AccessToken, ApiKey, Endpoint, MailchimpConfig, MailchimpConfigBuilder};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiError, BasicQueryParams, ExtendedQueryParams, FieldError, HttpClient, HttpError,
    HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse, MailchimpClient, QueryParams,
    SortDirection,
};

// Re-export resource infrastructure
pub use rest::{ListEnvelope, Resource, ResourceError};
