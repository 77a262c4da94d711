//! Custom member events.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::timestamp;
use super::members::Member;
use crate::clients::HttpMethod;
use crate::rest::{Resource, ResourceError};

const MEMBER_EVENTS_PATH: &str = "/lists/{list_id}/members/{id}/events";

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}

/// A custom event recorded against a member.
///
/// # Example
///
/// ```rust
/// use mailchimp_api::rest::resources::EventRequest;
///
/// let event = EventRequest::new("signed_up").with_property("plan", "pro");
/// let wire = serde_json::to_value(&event).unwrap();
///
/// assert_eq!(wire["name"], "signed_up");
/// assert_eq!(wire["properties"]["plan"], "pro");
/// assert!(wire.get("is_syncing").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRequest {
    /// Event name: letters, numbers, underscores and dashes.
    pub name: String,
    /// String properties attached to the event.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
    /// Suppress automations triggered by the event.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_syncing: bool,
    /// When the event happened. Defaults to now on the service side.
    #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<DateTime<Utc>>,
}

impl EventRequest {
    /// Creates an event with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Adds a property.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

impl Member {
    /// Records a custom event for this member.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] or
    /// [`ResourceError::MissingClient`] before any request, and
    /// [`ResourceError::Http`] if the request fails.
    pub async fn add_event(&self, event: &EventRequest) -> Result<(), ResourceError> {
        let client = self.client()?;
        let path = self.path(MEMBER_EVENTS_PATH);
        client.send_ok(HttpMethod::Post, &path, event).await?;
        Ok(())
    }

    /// Records an event with only a name.
    ///
    /// # Errors
    ///
    /// See [`add_event`](Self::add_event).
    pub async fn add_simple_event(&self, name: &str) -> Result<(), ResourceError> {
        self.add_event(&EventRequest::new(name)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_simple_event_serializes_name_only() {
        let wire = serde_json::to_value(EventRequest::new("logged_in")).unwrap();
        assert_eq!(wire, json!({"name": "logged_in"}));
    }

    #[test]
    fn test_full_event_serializes_all_fields() {
        let event = EventRequest {
            is_syncing: true,
            occurred_at: Some(Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap()),
            ..EventRequest::new("purchase").with_property("sku", "A-1")
        };

        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "name": "purchase",
                "properties": {"sku": "A-1"},
                "is_syncing": true,
                "occurred_at": "2024-02-03T04:05:06+00:00"
            })
        );
    }

    #[test]
    fn test_event_on_unaddressed_member_fails_locally() {
        let member = Member::default();
        assert!(member.client().unwrap_err().is_precondition());
    }
}
