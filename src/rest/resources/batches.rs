//! Batch operations.
//!
//! A batch bundles many sub-requests into one submission. The service runs
//! them asynchronously; the client only submits and polls. A job moves
//! through `pending → preprocessing → started → finalizing → finished`.
//! There is no failed state: failing sub-operations only increase
//! `errored_operations`, and their responses are in the archive at
//! [`BatchJob::result_url`] once the job has finished.
//!
//! # Example
//!
//! ```rust,ignore
//! use mailchimp_api::rest::resources::{BatchOperation, BatchRequest};
//! use mailchimp_api::HttpMethod;
//! use serde_json::json;
//! use std::time::Duration;
//!
//! let request = BatchRequest::new(vec![
//!     BatchOperation::new(HttpMethod::Post, "/lists/abc123/members")
//!         .with_body(&json!({"email_address": "ada@example.com", "status": "subscribed"}))?
//!         .with_operation_id("ada"),
//!     BatchOperation::new(HttpMethod::Get, "/lists/abc123"),
//! ]);
//!
//! let mut job = client.create_batch(&request).await?;
//! while !job.status.is_finished() {
//!     tokio::time::sleep(Duration::from_secs(5)).await;
//!     job = job.refresh().await?;
//! }
//! println!("{} errored, results at {:?}", job.errored_operations, job.result_url());
//! ```

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::timestamp;
use crate::clients::{
    render_query, BasicQueryParams, ExtendedQueryParams, HttpError, HttpMethod, MailchimpClient,
    QueryParams,
};
use crate::rest::{
    as_query, build_path, fetch_list, fetch_one, require_identity, send_one, Link, ListEnvelope,
    Resource, ResourceError,
};

const BATCHES_PATH: &str = "/batches";
const BATCH_PATH: &str = "/batches/{id}";

/// The processing state of a batch job.
///
/// Statuses the SDK does not know are kept verbatim in [`BatchStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BatchStatus {
    /// Accepted, not yet processed.
    #[default]
    Pending,
    /// Operations are being validated.
    Preprocessing,
    /// Operations are running.
    Started,
    /// Results are being collected.
    Finalizing,
    /// All operations ran; results are available.
    Finished,
    /// A status this SDK does not know.
    Other(String),
}

impl BatchStatus {
    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Preprocessing => "preprocessing",
            Self::Started => "started",
            Self::Finalizing => "finalizing",
            Self::Finished => "finished",
            Self::Other(s) => s,
        }
    }

    /// Returns `true` once the job has finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }

    /// Returns `true` if the job has not started yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns `true` while the job is being processed.
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::Preprocessing | Self::Started | Self::Finalizing)
    }
}

impl From<String> for BatchStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => Self::Pending,
            "preprocessing" => Self::Preprocessing,
            "started" => Self::Started,
            "finalizing" => Self::Finalizing,
            "finished" => Self::Finished,
            _ => Self::Other(s),
        }
    }
}

impl From<BatchStatus> for String {
    fn from(status: BatchStatus) -> Self {
        match status {
            BatchStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sub-request of a batch.
///
/// # Example
///
/// ```rust
/// use mailchimp_api::rest::resources::BatchOperation;
/// use mailchimp_api::clients::{BasicQueryParams, HttpMethod};
/// use serde_json::json;
///
/// let op = BatchOperation::new(HttpMethod::Put, "/lists/abc123/members/62eeb292278cc15f5817cb78f7790b08")
///     .with_body(&json!({"status_if_new": "subscribed"}))
///     .unwrap()
///     .with_params(&BasicQueryParams { fields: vec!["id".into()], ..Default::default() })
///     .with_operation_id("member-1");
///
/// let wire = serde_json::to_value(&op).unwrap();
/// assert_eq!(wire["method"], "PUT");
/// assert_eq!(wire["body"], r#"{"status_if_new":"subscribed"}"#);
/// assert_eq!(wire["params"]["fields"], "id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOperation {
    /// HTTP method of the sub-request.
    pub method: HttpMethod,
    /// Path relative to the API base (e.g., `/lists/abc123/members`).
    pub path: String,
    /// Query parameters of the sub-request.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
    /// The sub-request body as JSON text. Empty for no body.
    #[serde(default)]
    pub body: String,
    /// Caller-chosen identifier echoed in the results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
}

impl BatchOperation {
    /// Creates a sub-request without body or parameters.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: BTreeMap::new(),
            body: String::new(),
            operation_id: None,
        }
    }

    /// Serializes `body` as the sub-request body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Encode`] if `body` cannot be serialized.
    pub fn with_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, HttpError> {
        self.body = serde_json::to_string(body).map_err(HttpError::Encode)?;
        Ok(self)
    }

    /// Uses `body` verbatim as the sub-request body.
    #[must_use]
    pub fn with_raw_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Merges the non-empty parameters of `params`.
    #[must_use]
    pub fn with_params(mut self, params: &dyn QueryParams) -> Self {
        self.params.extend(render_query(params));
        self
    }

    /// Sets the operation id.
    #[must_use]
    pub fn with_operation_id(mut self, id: impl Into<String>) -> Self {
        self.operation_id = Some(id.into());
        self
    }
}

/// The body of a batch submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRequest {
    /// Sub-requests, in submission order.
    pub operations: Vec<BatchOperation>,
}

impl BatchRequest {
    /// Creates a submission from `operations`.
    #[must_use]
    pub fn new(operations: Vec<BatchOperation>) -> Self {
        Self { operations }
    }

    /// Appends a sub-request.
    pub fn push(&mut self, operation: BatchOperation) {
        self.operations.push(operation);
    }

    /// Returns the number of sub-requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if there are no sub-requests.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl FromIterator<BatchOperation> for BatchRequest {
    fn from_iter<I: IntoIterator<Item = BatchOperation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A submitted batch job.
///
/// Returned by [`MailchimpClient::create_batch`] and
/// [`MailchimpClient::get_batch`]. The job carries its client handle, so
/// [`refresh`](Self::refresh) polls without further arguments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchJob {
    /// The batch id.
    pub id: String,
    /// The processing state.
    pub status: BatchStatus,
    /// Number of submitted sub-requests.
    pub total_operations: u64,
    /// Number of sub-requests that ran.
    pub finished_operations: u64,
    /// Number of sub-requests that failed.
    pub errored_operations: u64,
    /// When the job was submitted.
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "String::is_empty")]
    response_body_url: String,
    /// Links attached to the job.
    #[serde(rename = "_links", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip)]
    client: Option<MailchimpClient>,
}

impl BatchJob {
    /// Returns when the job finished, once it has.
    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at.filter(|_| self.status.is_finished())
    }

    /// Returns the URL of the results archive, once the job has finished.
    #[must_use]
    pub fn result_url(&self) -> Option<&str> {
        Some(self.response_body_url.as_str())
            .filter(|url| self.status.is_finished() && !url.is_empty())
    }

    /// Returns the number of sub-requests that have not run yet.
    #[must_use]
    pub const fn remaining_operations(&self) -> u64 {
        self.total_operations.saturating_sub(self.finished_operations)
    }

    /// Returns `true` if any sub-request failed so far.
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.errored_operations > 0
    }

    /// Fetches the current state of this job.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] or
    /// [`ResourceError::MissingClient`] before any request, and
    /// [`ResourceError::Http`] if the request fails.
    pub async fn refresh(&self) -> Result<Self, ResourceError> {
        let client = self.client()?;
        client.get_batch(&self.id, None).await
    }

    /// Deletes this job and its results.
    ///
    /// # Errors
    ///
    /// See [`refresh`](Self::refresh).
    pub async fn delete(&self) -> Result<bool, ResourceError> {
        let client = self.client()?;
        client.delete_batch(&self.id).await
    }
}

impl Resource for BatchJob {
    const NAME: &'static str = "BatchJob";

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

impl MailchimpClient {
    /// Submits a batch (`POST /batches`).
    ///
    /// Returns as soon as the service has accepted the job; it does not wait
    /// for completion. An empty submission is passed through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn create_batch(&self, request: &BatchRequest) -> Result<BatchJob, ResourceError> {
        tracing::debug!("Submitting batch with {} operations", request.len());
        send_one(self, HttpMethod::Post, BATCHES_PATH, request).await
    }

    /// Fetches a batch job (`GET /batches/{id}`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] for an empty `id` and
    /// [`ResourceError::Http`] if the request fails.
    pub async fn get_batch(
        &self,
        id: &str,
        params: Option<&BasicQueryParams>,
    ) -> Result<BatchJob, ResourceError> {
        require_identity(BatchJob::NAME, "id", id)?;
        let path = build_path(BATCH_PATH, &[("id", id)]);
        fetch_one(self, &path, as_query(params)).await
    }

    /// Lists batch jobs (`GET /batches`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn get_batches(
        &self,
        params: Option<&ExtendedQueryParams>,
    ) -> Result<ListEnvelope<BatchJob>, ResourceError> {
        fetch_list(self, BATCHES_PATH, "batches", as_query(params)).await
    }

    /// Deletes a batch job and its results (`DELETE /batches/{id}`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] for an empty `id` and
    /// [`ResourceError::Http`] if the request fails.
    pub async fn delete_batch(&self, id: &str) -> Result<bool, ResourceError> {
        require_identity(BatchJob::NAME, "id", id)?;
        let path = build_path(BATCH_PATH, &[("id", id)]);
        Ok(self.delete(&path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_round_trips_known_and_unknown_values() {
        let status: BatchStatus = serde_json::from_value(json!("finalizing")).unwrap();
        assert_eq!(status, BatchStatus::Finalizing);
        assert!(status.is_in_progress());

        let status: BatchStatus = serde_json::from_value(json!("paused")).unwrap();
        assert_eq!(status, BatchStatus::Other("paused".to_string()));
        assert_eq!(serde_json::to_value(&status).unwrap(), json!("paused"));
    }

    #[test]
    fn test_operation_without_params_omits_them() {
        let op = BatchOperation::new(HttpMethod::Get, "/lists");
        let wire = serde_json::to_value(&op).unwrap();

        assert_eq!(wire, json!({"method": "GET", "path": "/lists", "body": ""}));
    }

    #[test]
    fn test_operation_params_drop_empty_values() {
        let op = BatchOperation::new(HttpMethod::Get, "/campaigns").with_params(&BasicQueryParams {
            count: Some(5),
            ..Default::default()
        });
        assert_eq!(op.params.len(), 1);
        assert_eq!(op.params.get("count"), Some(&"5".to_string()));
    }

    #[test]
    fn test_operation_body_encode_failure() {
        let mut bad = std::collections::HashMap::new();
        bad.insert((1, 2), "tuple keys cannot be JSON object keys");

        let result = BatchOperation::new(HttpMethod::Post, "/lists").with_body(&bad);
        assert!(matches!(result, Err(HttpError::Encode(_))));
    }

    #[test]
    fn test_finished_fields_hidden_until_finished() {
        let mut job: BatchJob = serde_json::from_value(json!({
            "id": "b1",
            "status": "started",
            "total_operations": 3,
            "finished_operations": 1,
            "errored_operations": 0,
            "submitted_at": "2024-01-01T00:00:00+00:00",
            "completed_at": "",
            "response_body_url": "https://example.com/results.tar.gz"
        }))
        .unwrap();

        assert!(job.result_url().is_none());
        assert!(job.completed_at().is_none());
        assert_eq!(job.remaining_operations(), 2);
        assert!(job.submitted_at.is_some());

        job.status = BatchStatus::Finished;
        assert_eq!(job.result_url(), Some("https://example.com/results.tar.gz"));
    }

    #[test]
    fn test_refresh_without_identity_is_precondition_error() {
        let job = BatchJob::default();
        assert!(matches!(
            job.client(),
            Err(ResourceError::MissingIdentity { resource: "BatchJob", field: "id" })
        ));
    }

    #[test]
    fn test_batch_request_from_iterator() {
        let request: BatchRequest = (0..3)
            .map(|i| BatchOperation::new(HttpMethod::Delete, format!("/lists/{i}")))
            .collect();
        assert_eq!(request.len(), 3);
        assert_eq!(request.operations[2].path, "/lists/2");
    }
}
