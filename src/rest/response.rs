//! Collection envelope for list endpoints.
//!
//! Every collection response has the same outer shape: the items under a
//! resource-specific key, `total_items`, `_links`, and sometimes extra
//! scalars such as `list_id`. [`ListEnvelope<T>`] captures that shape once.
//!
//! `ListEnvelope<T>` implements `Deref<Target = Vec<T>>`:
//!
//! ```rust
//! use mailchimp_api::rest::ListEnvelope;
//! use serde_json::json;
//!
//! let envelope: ListEnvelope<String> = ListEnvelope::from_value(
//!     json!({"tags": ["vip", "beta"], "total_items": 2, "list_id": "abc123"}),
//!     "tags",
//! )
//! .unwrap();
//!
//! assert_eq!(envelope.len(), 2);
//! assert_eq!(envelope[0], "vip");
//! assert_eq!(envelope.total_items, 2);
//! assert_eq!(envelope.list_id(), Some("abc123"));
//! ```

use std::ops::{Deref, DerefMut};

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clients::{HttpError, MailchimpClient};
use crate::rest::resource::Resource;

/// A hypermedia link attached to a resource or collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// The link relation (e.g., `self`, `parent`, `create`).
    #[serde(default)]
    pub rel: String,
    /// The absolute URL of the linked resource.
    #[serde(default)]
    pub href: String,
    /// The HTTP method to use with `href`.
    #[serde(default)]
    pub method: String,
    /// URL of the JSON schema of the response.
    #[serde(rename = "targetSchema", default, skip_serializing_if = "String::is_empty")]
    pub target_schema: String,
    /// URL of the JSON schema of the request body.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub schema: String,
}

/// A page of items from a collection endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEnvelope<T> {
    items: Vec<T>,
    /// Total number of items in the collection, across all pages.
    pub total_items: u64,
    /// Links attached to the collection.
    pub links: Vec<Link>,
    /// Remaining top-level fields (e.g., `list_id`, `campaign_id`).
    pub extra: Map<String, Value>,
}

impl<T: DeserializeOwned> ListEnvelope<T> {
    /// Builds an envelope from a decoded collection body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Decode`] if `value` is not an object, `key` is
    /// missing, or an item does not match `T`.
    pub fn from_value(value: Value, key: &str) -> Result<Self, HttpError> {
        let Value::Object(mut map) = value else {
            return Err(HttpError::Decode(serde_json::Error::custom(
                "expected a collection object",
            )));
        };

        let items = map.remove(key).ok_or_else(|| {
            HttpError::Decode(serde_json::Error::custom(format!("missing field `{key}`")))
        })?;
        let items: Vec<T> = serde_json::from_value(items).map_err(HttpError::Decode)?;

        let total_items = map
            .remove("total_items")
            .map(serde_json::from_value)
            .transpose()
            .map_err(HttpError::Decode)?
            .unwrap_or_default();

        let links = map
            .remove("_links")
            .map(serde_json::from_value)
            .transpose()
            .map_err(HttpError::Decode)?
            .unwrap_or_default();

        Ok(Self {
            items,
            total_items,
            links,
            extra: map,
        })
    }
}

impl<T> ListEnvelope<T> {
    /// Returns the items of this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the envelope and returns the items.
    #[must_use]
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }

    /// Returns the `list_id` the collection belongs to, if reported.
    #[must_use]
    pub fn list_id(&self) -> Option<&str> {
        self.extra_str("list_id")
    }

    /// Returns an extra top-level string field.
    #[must_use]
    pub fn extra_str(&self, name: &str) -> Option<&str> {
        self.extra.get(name).and_then(Value::as_str)
    }
}

impl<T: Resource> ListEnvelope<T> {
    /// Stamps every item with `client`.
    pub fn attach_client(&mut self, client: &MailchimpClient) {
        for item in &mut self.items {
            item.attach_client(client);
        }
    }
}

impl<T> Deref for ListEnvelope<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T> DerefMut for ListEnvelope<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.items
    }
}

impl<T> IntoIterator for ListEnvelope<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ListEnvelope<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    #[test]
    fn test_from_value_reads_shared_fields() {
        let envelope: ListEnvelope<Item> = ListEnvelope::from_value(
            json!({
                "lists": [{"id": "a"}, {"id": "b"}],
                "total_items": 7,
                "_links": [{"rel": "self", "href": "https://us6.api.mailchimp.com/3.0/lists", "method": "GET"}]
            }),
            "lists",
        )
        .unwrap();

        assert_eq!(envelope.len(), 2);
        assert_eq!(envelope.total_items, 7);
        assert_eq!(envelope.links[0].rel, "self");
        assert!(envelope.extra.is_empty());
    }

    #[test]
    fn test_from_value_missing_key_is_decode_error() {
        let result: Result<ListEnvelope<Item>, _> =
            ListEnvelope::from_value(json!({"total_items": 0}), "members");

        match result {
            Err(HttpError::Decode(e)) => assert!(e.to_string().contains("members")),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        let result: Result<ListEnvelope<Item>, _> = ListEnvelope::from_value(json!([1, 2]), "lists");
        assert!(matches!(result, Err(HttpError::Decode(_))));
    }

    #[test]
    fn test_missing_total_defaults_to_zero() {
        let envelope: ListEnvelope<Item> =
            ListEnvelope::from_value(json!({"lists": []}), "lists").unwrap();
        assert_eq!(envelope.total_items, 0);
        assert!(envelope.is_empty());
    }

    #[test]
    fn test_into_iterator() {
        let envelope: ListEnvelope<Item> =
            ListEnvelope::from_value(json!({"lists": [{"id": "a"}]}), "lists").unwrap();
        let ids: Vec<String> = envelope.into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["a".to_string()]);
    }
}
