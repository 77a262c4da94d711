//! Segments of a list.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::timestamp;
use super::lists::List;
use super::members::Member;
use crate::clients::{render, BasicQueryParams, ExtendedQueryParams, HttpMethod, QueryParams};
use crate::rest::{
    as_query, build_path, fetch_list, fetch_records, require_nonzero, Link, ListEnvelope, Resource,
    ResourceError,
};

const SEGMENTS_PATH: &str = "/lists/{list_id}/segments";
const SEGMENT_PATH: &str = "/lists/{list_id}/segments/{segment_id}";
const SEGMENT_MEMBERS_PATH: &str = "/lists/{list_id}/segments/{segment_id}/members";

/// Filters for [`List::get_segments`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentQueryParams {
    pub extended: ExtendedQueryParams,
    /// `saved`, `static` or `fuzzy`.
    pub kind: Option<String>,
    pub since_created_at: Option<DateTime<Utc>>,
    pub before_created_at: Option<DateTime<Utc>>,
    pub since_updated_at: Option<DateTime<Utc>>,
    pub before_updated_at: Option<DateTime<Utc>>,
}

impl QueryParams for SegmentQueryParams {
    fn params(&self) -> BTreeMap<String, String> {
        let mut m = self.extended.params();
        m.insert("type".to_string(), render::text(self.kind.as_deref()));
        m.insert(
            "since_created_at".to_string(),
            render::timestamp(self.since_created_at),
        );
        m.insert(
            "before_created_at".to_string(),
            render::timestamp(self.before_created_at),
        );
        m.insert(
            "since_updated_at".to_string(),
            render::timestamp(self.since_updated_at),
        );
        m.insert(
            "before_updated_at".to_string(),
            render::timestamp(self.before_updated_at),
        );
        m
    }
}

/// One condition of a saved segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentCondition {
    /// Condition type (e.g., `TextMerge`, `Date`).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub condition_type: String,
    pub field: String,
    pub op: String,
    pub value: Value,
}

/// The conditions of a saved segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentOptions {
    /// `any` or `all`.
    #[serde(rename = "match", skip_serializing_if = "String::is_empty")]
    pub match_type: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<SegmentCondition>,
}

/// Body for creating or updating a segment.
///
/// Set `static_segment` to a list of emails for a static segment, or
/// `options` for a saved (condition based) one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_segment: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<SegmentOptions>,
}

/// A segment of a list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Segment {
    pub id: u64,
    pub name: String,
    pub member_count: u64,
    /// `saved`, `static` or `fuzzy`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub options: SegmentOptions,
    pub list_id: String,
    #[serde(rename = "_links", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

/// Body for [`List::batch_modify_segment`].
///
/// Both arrays are always sent, empty or not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentBatchRequest {
    pub members_to_add: Vec<String>,
    pub members_to_remove: Vec<String>,
}

/// Addresses that could not be added or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentBatchError {
    pub email_addresses: Vec<String>,
    pub error: String,
}

/// Result of [`List::batch_modify_segment`].
///
/// Returned members carry the client handle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentBatchResponse {
    pub members_added: Vec<Member>,
    pub members_removed: Vec<Member>,
    pub errors: Vec<SegmentBatchError>,
    pub total_added: u64,
    pub total_removed: u64,
    pub error_count: u64,
    #[serde(rename = "_links", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl List {
    fn segment_path(&self, template: &str, segment_id: u64) -> Result<String, ResourceError> {
        require_nonzero("Segment", "id", segment_id)?;
        let segment_id = segment_id.to_string();
        Ok(build_path(
            template,
            &[("list_id", self.id.as_str()), ("segment_id", segment_id.as_str())],
        ))
    }

    /// Fetches the segments of this list.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] or
    /// [`ResourceError::MissingClient`] before any request, and
    /// [`ResourceError::Http`] if the request fails.
    pub async fn get_segments(
        &self,
        params: Option<&SegmentQueryParams>,
    ) -> Result<ListEnvelope<Segment>, ResourceError> {
        let client = self.client()?;
        let path = build_path(SEGMENTS_PATH, &[("list_id", self.id.as_str())]);
        fetch_records(client, &path, "segments", as_query(params)).await
    }

    /// Fetches one segment.
    ///
    /// # Errors
    ///
    /// Also returns [`ResourceError::MissingIdentity`] for a zero `segment_id`.
    pub async fn get_segment(
        &self,
        segment_id: u64,
        params: Option<&BasicQueryParams>,
    ) -> Result<Segment, ResourceError> {
        let client = self.client()?;
        let path = self.segment_path(SEGMENT_PATH, segment_id)?;
        Ok(client.get(&path, as_query(params)).await?)
    }

    /// Creates a segment.
    ///
    /// # Errors
    ///
    /// See [`get_segments`](Self::get_segments).
    pub async fn create_segment(&self, body: &SegmentRequest) -> Result<Segment, ResourceError> {
        let client = self.client()?;
        let path = build_path(SEGMENTS_PATH, &[("list_id", self.id.as_str())]);
        Ok(client.send(HttpMethod::Post, &path, body).await?)
    }

    /// Updates a segment (`PATCH`).
    ///
    /// # Errors
    ///
    /// See [`get_segment`](Self::get_segment).
    pub async fn update_segment(
        &self,
        segment_id: u64,
        body: &SegmentRequest,
    ) -> Result<Segment, ResourceError> {
        let client = self.client()?;
        let path = self.segment_path(SEGMENT_PATH, segment_id)?;
        Ok(client.send(HttpMethod::Patch, &path, body).await?)
    }

    /// Deletes a segment.
    ///
    /// # Errors
    ///
    /// See [`get_segment`](Self::get_segment).
    pub async fn delete_segment(&self, segment_id: u64) -> Result<bool, ResourceError> {
        let client = self.client()?;
        Ok(client.delete(&self.segment_path(SEGMENT_PATH, segment_id)?).await?)
    }

    /// Fetches the members of a segment.
    ///
    /// # Errors
    ///
    /// See [`get_segment`](Self::get_segment).
    pub async fn get_segment_members(
        &self,
        segment_id: u64,
        params: Option<&BasicQueryParams>,
    ) -> Result<ListEnvelope<Member>, ResourceError> {
        let client = self.client()?;
        let path = self.segment_path(SEGMENT_MEMBERS_PATH, segment_id)?;
        fetch_list(client, &path, "members", as_query(params)).await
    }

    /// Adds and removes members of a static segment in one request.
    ///
    /// # Errors
    ///
    /// See [`get_segment`](Self::get_segment).
    pub async fn batch_modify_segment(
        &self,
        segment_id: u64,
        body: &SegmentBatchRequest,
    ) -> Result<SegmentBatchResponse, ResourceError> {
        let client = self.client()?;
        let path = self.segment_path(SEGMENT_PATH, segment_id)?;
        let mut response: SegmentBatchResponse = client.send(HttpMethod::Post, &path, body).await?;
        for member in response
            .members_added
            .iter_mut()
            .chain(response.members_removed.iter_mut())
        {
            member.attach_client(client);
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_batch_request_always_sends_both_arrays() {
        let body = SegmentBatchRequest {
            members_to_add: vec!["ada@example.com".to_string()],
            members_to_remove: Vec::new(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"members_to_add": ["ada@example.com"], "members_to_remove": []})
        );
    }

    #[test]
    fn test_saved_segment_request() {
        let body = SegmentRequest {
            name: "Recent".to_string(),
            static_segment: None,
            options: Some(SegmentOptions {
                match_type: "all".to_string(),
                conditions: vec![SegmentCondition {
                    condition_type: "Date".to_string(),
                    field: "timestamp_opt".to_string(),
                    op: "greater".to_string(),
                    value: json!("last_campaign_sent"),
                }],
            }),
        };

        let wire = serde_json::to_value(&body).unwrap();
        assert_eq!(wire["options"]["match"], "all");
        assert_eq!(wire["options"]["conditions"][0]["op"], "greater");
        assert!(wire.get("static_segment").is_none());
    }

    #[test]
    fn test_segment_query_params() {
        let params = SegmentQueryParams {
            kind: Some("static".to_string()),
            ..Default::default()
        };
        let query = crate::clients::render_query(&params);
        assert_eq!(query.len(), 1);
        assert_eq!(query.get("type").map(String::as_str), Some("static"));
    }

    #[test]
    fn test_zero_segment_id_is_rejected() {
        let mut list = List::default();
        list.id = "l1".to_string();
        assert!(list.segment_path(SEGMENT_PATH, 0).unwrap_err().is_precondition());
        assert_eq!(
            list.segment_path(SEGMENT_MEMBERS_PATH, 12).unwrap(),
            "/lists/l1/segments/12/members"
        );
    }
}
