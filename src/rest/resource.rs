//! The [`Resource`] trait: client handles carried by returned objects.
//!
//! Every object returned by an operation is stamped with a clone of the
//! [`MailchimpClient`] that produced it. Follow-up operations on the object
//! (`list.get_members()`, `member.add_note()`, `job.refresh()`) use that
//! handle, so callers never pass credentials twice.
//!
//! Before a follow-up call is sent, [`Resource::client`] checks that:
//!
//! 1. the identity fields the request path needs are set
//!    ([`Resource::ensure_identity`])
//! 2. a handle is attached
//!
//! Both failures are reported as [`ResourceError`] without touching the
//! network.
//!
//! # Implementing
//!
//! ```rust
//! use mailchimp_api::rest::{require_identity, Resource, ResourceError};
//! use mailchimp_api::MailchimpClient;
//!
//! #[derive(Default)]
//! struct Report {
//!     id: String,
//!     client: Option<MailchimpClient>,
//! }
//!
//! impl Resource for Report {
//!     const NAME: &'static str = "Report";
//!
//!     fn client_handle(&self) -> Option<&MailchimpClient> {
//!         self.client.as_ref()
//!     }
//!
//!     fn attach_client(&mut self, client: &MailchimpClient) {
//!         self.client = Some(client.clone());
//!     }
//!
//!     fn ensure_identity(&self) -> Result<(), ResourceError> {
//!         require_identity(Self::NAME, "id", &self.id)
//!     }
//! }
//!
//! let report = Report::default();
//! assert!(matches!(
//!     report.client(),
//!     Err(ResourceError::MissingIdentity { field: "id", .. })
//! ));
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::clients::{HttpMethod, MailchimpClient, QueryParams};
use crate::rest::errors::ResourceError;
use crate::rest::response::ListEnvelope;

/// A value that carries a handle back to the client that produced it.
pub trait Resource {
    /// The type name used in error messages (e.g., "Member").
    const NAME: &'static str;

    /// Returns the attached client handle, if any.
    fn client_handle(&self) -> Option<&MailchimpClient>;

    /// Attaches `client`, replacing any previous handle.
    fn attach_client(&mut self, client: &MailchimpClient);

    /// Checks that the identity fields follow-up paths need are set.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] naming the first empty field.
    fn ensure_identity(&self) -> Result<(), ResourceError> {
        Ok(())
    }

    /// Returns the client handle after validating identity.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] or
    /// [`ResourceError::MissingClient`].
    fn client(&self) -> Result<&MailchimpClient, ResourceError> {
        self.ensure_identity()?;
        self.client_handle()
            .ok_or(ResourceError::MissingClient { resource: Self::NAME })
    }

    /// Returns `true` if a client handle is attached.
    fn has_client(&self) -> bool {
        self.client_handle().is_some()
    }
}

/// Fails with [`ResourceError::MissingIdentity`] when `value` is empty.
///
/// # Errors
///
/// Returns [`ResourceError::MissingIdentity`] if `value` is empty or only
/// whitespace.
pub fn require_identity(
    resource: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ResourceError> {
    if value.trim().is_empty() {
        return Err(ResourceError::MissingIdentity { resource, field });
    }
    Ok(())
}

/// Fails with [`ResourceError::MissingIdentity`] when a numeric id is zero.
///
/// # Errors
///
/// Returns [`ResourceError::MissingIdentity`] if `value` is `0`.
pub const fn require_nonzero(
    resource: &'static str,
    field: &'static str,
    value: u64,
) -> Result<(), ResourceError> {
    if value == 0 {
        return Err(ResourceError::MissingIdentity { resource, field });
    }
    Ok(())
}

/// Widens optional typed parameters to the engine's provider type.
pub(crate) fn as_query<Q: QueryParams>(params: Option<&Q>) -> Option<&dyn QueryParams> {
    params.map(|p| p as &dyn QueryParams)
}

/// GET a single resource and stamp it.
pub(crate) async fn fetch_one<T>(
    client: &MailchimpClient,
    path: &str,
    query: Option<&dyn QueryParams>,
) -> Result<T, ResourceError>
where
    T: Resource + DeserializeOwned,
{
    let mut item: T = client.get(path, query).await?;
    item.attach_client(client);
    Ok(item)
}

/// GET a collection and stamp every item.
pub(crate) async fn fetch_list<T>(
    client: &MailchimpClient,
    path: &str,
    key: &str,
    query: Option<&dyn QueryParams>,
) -> Result<ListEnvelope<T>, ResourceError>
where
    T: Resource + DeserializeOwned,
{
    let mut list = fetch_records(client, path, key, query).await?;
    list.attach_client(client);
    Ok(list)
}

/// GET a collection of plain records.
pub(crate) async fn fetch_records<T: DeserializeOwned>(
    client: &MailchimpClient,
    path: &str,
    key: &str,
    query: Option<&dyn QueryParams>,
) -> Result<ListEnvelope<T>, ResourceError> {
    let value: Value = client.get(path, query).await?;
    Ok(ListEnvelope::from_value(value, key)?)
}

/// Send `body` and stamp the returned resource.
pub(crate) async fn send_one<T, B>(
    client: &MailchimpClient,
    method: HttpMethod,
    path: &str,
    body: &B,
) -> Result<T, ResourceError>
where
    T: Resource + DeserializeOwned,
    B: Serialize + Sync + ?Sized,
{
    let mut item: T = client.send(method, path, body).await?;
    item.attach_client(client);
    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MailchimpConfig;

    #[derive(Default)]
    struct Folder {
        id: String,
        client: Option<MailchimpClient>,
    }

    impl Resource for Folder {
        const NAME: &'static str = "Folder";

        fn client_handle(&self) -> Option<&MailchimpClient> {
            self.client.as_ref()
        }

        fn attach_client(&mut self, client: &MailchimpClient) {
            self.client = Some(client.clone());
        }

        fn ensure_identity(&self) -> Result<(), ResourceError> {
            require_identity(Self::NAME, "id", &self.id)
        }
    }

    fn client() -> MailchimpClient {
        MailchimpClient::new(&MailchimpConfig::builder().build().unwrap()).unwrap()
    }

    #[test]
    fn test_identity_checked_before_client() {
        let folder = Folder::default();
        assert!(matches!(
            folder.client(),
            Err(ResourceError::MissingIdentity {
                resource: "Folder",
                field: "id"
            })
        ));
    }

    #[test]
    fn test_missing_client_reported() {
        let folder = Folder {
            id: "f1".to_string(),
            client: None,
        };
        assert!(matches!(
            folder.client(),
            Err(ResourceError::MissingClient { resource: "Folder" })
        ));
    }

    #[test]
    fn test_attached_client_is_returned() {
        let root = client();
        let mut folder = Folder {
            id: "f1".to_string(),
            client: None,
        };
        folder.attach_client(&root);

        assert!(folder.has_client());
        assert!(folder.client().unwrap().shares_engine_with(&root));
    }

    #[test]
    fn test_require_identity_rejects_whitespace() {
        assert!(require_identity("List", "id", "  ").is_err());
        assert!(require_identity("List", "id", "abc").is_ok());
    }

    #[test]
    fn test_require_nonzero() {
        assert!(matches!(
            require_nonzero("Template", "id", 0),
            Err(ResourceError::MissingIdentity { field: "id", .. })
        ));
        assert!(require_nonzero("Template", "id", 7).is_ok());
    }
}
