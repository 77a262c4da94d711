//! REST resource infrastructure for the Mailchimp Marketing API.
//!
//! This module provides:
//!
//! - **[`Resource`] trait**: client handles carried by returned objects
//! - **[`ListEnvelope<T>`]**: a Deref-based wrapper for collection responses
//! - **Path building**: [`build_path`] fills and encodes path templates
//! - **[`ResourceError`]**: precondition failures on top of [`HttpError`](crate::HttpError)
//!
//! Typed operations live in the [`resources`] submodule.
//!
//! # Example
//!
//! ```rust,ignore
//! use mailchimp_api::{ApiKey, MailchimpClient, MailchimpConfig};
//!
//! let config = MailchimpConfig::builder()
//!     .api_key(ApiKey::new("0123456789abcdef-us6")?)
//!     .build()?;
//! let client = MailchimpClient::new(&config)?;
//!
//! // Every list carries the client; follow-up calls need no credentials.
//! let lists = client.get_lists(None).await?;
//! let first = &lists[0];
//! let members = first.get_members(None).await?;
//!
//! // Members carry it too.
//! for member in members.iter() {
//!     member.create_note("Imported from CRM").await?;
//! }
//! ```

mod errors;
mod path;
mod resource;
mod response;
pub mod resources;

pub use errors::ResourceError;
pub use path::build_path;
pub use resource::{require_identity, require_nonzero, Resource};
pub use response::{Link, ListEnvelope};

pub(crate) use resource::{as_query, fetch_list, fetch_one, fetch_records, send_one};
