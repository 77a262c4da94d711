//! Lists (audiences) and their read-only reports.
//!
//! A [`List`] returned by the client carries the client handle, so list
//! scoped operations (members, merge fields, segments, ...) are methods on
//! the list itself. Those live next to their own types; this module covers
//! the list CRUD operations, the list reports, and batch subscribe.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{timestamp, Contact};
use super::members::{Member, MemberRequest};
use crate::clients::{
    render, BasicQueryParams, ExtendedQueryParams, HttpMethod, MailchimpClient, QueryParams,
};
use crate::rest::{
    as_query, build_path, fetch_list, fetch_one, fetch_records, require_identity, send_one, Link,
    ListEnvelope, Resource, ResourceError,
};

const LISTS_PATH: &str = "/lists";
const LIST_PATH: &str = "/lists/{list_id}";
const ABUSE_REPORTS_PATH: &str = "/lists/{list_id}/abuse-reports";
const ABUSE_REPORT_PATH: &str = "/lists/{list_id}/abuse-reports/{id}";
const ACTIVITY_PATH: &str = "/lists/{list_id}/activity";
const CLIENTS_PATH: &str = "/lists/{list_id}/clients";
const GROWTH_HISTORY_PATH: &str = "/lists/{list_id}/growth-history";
const GROWTH_HISTORY_MONTH_PATH: &str = "/lists/{list_id}/growth-history/{month}";

/// Filters for [`MailchimpClient::get_lists`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQueryParams {
    /// Pagination, sorting and field filters.
    pub extended: ExtendedQueryParams,
    /// Lists created before this time.
    pub before_date_created: Option<DateTime<Utc>>,
    /// Lists created after this time.
    pub since_date_created: Option<DateTime<Utc>>,
    /// Lists whose last campaign was sent before this time.
    pub before_campaign_last_sent: Option<DateTime<Utc>>,
    /// Lists whose last campaign was sent after this time.
    pub since_campaign_last_sent: Option<DateTime<Utc>>,
    /// Only lists this address is subscribed to.
    pub email: Option<String>,
}

impl QueryParams for ListQueryParams {
    fn params(&self) -> BTreeMap<String, String> {
        let mut m = self.extended.params();
        m.insert(
            "before_date_created".to_string(),
            render::timestamp(self.before_date_created),
        );
        m.insert(
            "since_date_created".to_string(),
            render::timestamp(self.since_date_created),
        );
        m.insert(
            "before_campaign_last_sent".to_string(),
            render::timestamp(self.before_campaign_last_sent),
        );
        m.insert(
            "since_campaign_last_sent".to_string(),
            render::timestamp(self.since_campaign_last_sent),
        );
        m.insert("email".to_string(), render::text(self.email.as_deref()));
        m
    }
}

/// Default values for campaigns sent to a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignDefaults {
    pub from_name: String,
    pub from_email: String,
    pub subject: String,
    pub language: String,
}

/// Body for creating or updating a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListRequest {
    /// The list name.
    pub name: String,
    /// Footer contact information.
    pub contact: Contact,
    /// Reminder of how the recipient joined the list.
    pub permission_reminder: String,
    /// Whether campaigns show the archive bar.
    pub use_archive_bar: bool,
    /// Campaign defaults.
    pub campaign_defaults: CampaignDefaults,
    /// Address notified on new subscriptions.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notify_on_subscribe: String,
    /// Address notified on unsubscriptions.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notify_on_unsubscribe: String,
    /// Whether members may choose between HTML and plain-text email.
    pub email_type_option: bool,
    /// `pub` or `prv`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub visibility: String,
}

/// Aggregate statistics of a list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListStats {
    pub member_count: u64,
    pub unsubscribe_count: u64,
    pub cleaned_count: u64,
    pub member_count_since_send: u64,
    pub unsubscribe_count_since_send: u64,
    pub cleaned_count_since_send: u64,
    pub campaign_count: u64,
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub campaign_last_sent: Option<DateTime<Utc>>,
    pub merge_field_count: u64,
    pub avg_sub_rate: f64,
    pub avg_unsub_rate: f64,
    pub target_sub_rate: f64,
    pub open_rate: f64,
    pub click_rate: f64,
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub last_sub_date: Option<DateTime<Utc>>,
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub last_unsub_date: Option<DateTime<Utc>>,
}

/// A Mailchimp list (audience).
///
/// Obtain one from [`MailchimpClient::get_list`], [`MailchimpClient::get_lists`],
/// or, without a request, from [`MailchimpClient::list_handle`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct List {
    /// The list id.
    pub id: String,
    /// The id used in the Mailchimp web application.
    pub web_id: u64,
    pub name: String,
    pub contact: Contact,
    pub permission_reminder: String,
    pub use_archive_bar: bool,
    pub campaign_defaults: CampaignDefaults,
    pub notify_on_subscribe: String,
    pub notify_on_unsubscribe: String,
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    /// Star rating, 0 to 5.
    pub list_rating: u8,
    pub email_type_option: bool,
    pub subscribe_url_short: String,
    pub subscribe_url_long: String,
    pub beamer_address: String,
    pub visibility: String,
    pub modules: Vec<String>,
    pub stats: ListStats,
    #[serde(rename = "_links", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip)]
    client: Option<MailchimpClient>,
}

impl Resource for List {
    const NAME: &'static str = "List";

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

/// An abuse complaint against a list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbuseReport {
    /// The report id.
    pub id: u64,
    /// The campaign that drew the complaint.
    pub campaign_id: String,
    pub list_id: String,
    /// Subscriber hash of the complaining member.
    pub email_id: String,
    pub email_address: String,
    /// When the complaint was received.
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(rename = "_links", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

/// Daily activity of a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListActivity {
    /// `YYYY-MM-DD`.
    pub day: String,
    pub emails_sent: u64,
    pub unique_opens: u64,
    pub recipient_clicks: u64,
    pub hard_bounce: u64,
    pub soft_bounce: u64,
    pub subs: u64,
    pub unsubs: u64,
    pub other_adds: u64,
    pub other_removes: u64,
}

/// An email client used by list members.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailClient {
    /// Client name (e.g., `Gmail`).
    pub client: String,
    /// Number of members using it.
    pub members: u64,
}

/// Monthly growth of a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthHistory {
    pub list_id: String,
    /// `YYYY-MM`.
    pub month: String,
    /// Members at the end of the month.
    pub existing: u64,
    /// Members added by import during the month.
    pub imports: u64,
    /// Members added by opt-in during the month.
    pub optins: u64,
    #[serde(rename = "_links", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

/// Body for [`List::batch_subscribe_members`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSubscribeRequest {
    /// Members to add or update.
    pub members: Vec<MemberRequest>,
    /// Update members that already exist instead of reporting an error.
    pub update_existing: bool,
}

/// A member that could not be added by a batch subscribe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSubscribeError {
    pub email_address: String,
    pub error: String,
    pub error_code: String,
}

/// Result of [`List::batch_subscribe_members`].
///
/// Returned members carry the client handle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSubscribeResponse {
    pub new_members: Vec<Member>,
    pub updated_members: Vec<Member>,
    pub errors: Vec<BatchSubscribeError>,
    pub total_created: u64,
    pub total_updated: u64,
    pub error_count: u64,
    #[serde(rename = "_links", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl List {
    fn path(&self, template: &str) -> String {
        build_path(template, &[("list_id", self.id.as_str())])
    }

    /// Updates this list (`PATCH /lists/{list_id}`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] or
    /// [`ResourceError::MissingClient`] before any request, and
    /// [`ResourceError::Http`] if the request fails.
    pub async fn update(&self, body: &ListRequest) -> Result<Self, ResourceError> {
        self.client()?.update_list(&self.id, body).await
    }

    /// Deletes this list.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn delete(&self) -> Result<bool, ResourceError> {
        self.client()?.delete_list(&self.id).await
    }

    /// Fetches the abuse reports of this list.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn get_abuse_reports(
        &self,
        params: Option<&ExtendedQueryParams>,
    ) -> Result<ListEnvelope<AbuseReport>, ResourceError> {
        let client = self.client()?;
        let path = self.path(ABUSE_REPORTS_PATH);
        fetch_records(client, &path, "abuse_reports", as_query(params)).await
    }

    /// Fetches one abuse report.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn get_abuse_report(
        &self,
        id: &str,
        params: Option<&BasicQueryParams>,
    ) -> Result<AbuseReport, ResourceError> {
        let client = self.client()?;
        require_identity("AbuseReport", "id", id)?;
        let path = build_path(
            ABUSE_REPORT_PATH,
            &[("list_id", self.id.as_str()), ("id", id)],
        );
        Ok(client.get(&path, as_query(params)).await?)
    }

    /// Fetches the daily activity of this list.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn get_activity(
        &self,
        params: Option<&BasicQueryParams>,
    ) -> Result<ListEnvelope<ListActivity>, ResourceError> {
        let client = self.client()?;
        fetch_records(client, &self.path(ACTIVITY_PATH), "activity", as_query(params)).await
    }

    /// Fetches the email clients used by members of this list.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn get_clients(
        &self,
        params: Option<&BasicQueryParams>,
    ) -> Result<ListEnvelope<EmailClient>, ResourceError> {
        let client = self.client()?;
        fetch_records(client, &self.path(CLIENTS_PATH), "clients", as_query(params)).await
    }

    /// Fetches the monthly growth history of this list.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn get_growth_history(
        &self,
        params: Option<&ExtendedQueryParams>,
    ) -> Result<ListEnvelope<GrowthHistory>, ResourceError> {
        let client = self.client()?;
        let path = self.path(GROWTH_HISTORY_PATH);
        fetch_records(client, &path, "history", as_query(params)).await
    }

    /// Fetches the growth of one month (`YYYY-MM`).
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn get_growth_history_for_month(
        &self,
        month: &str,
        params: Option<&BasicQueryParams>,
    ) -> Result<GrowthHistory, ResourceError> {
        let client = self.client()?;
        require_identity("GrowthHistory", "month", month)?;
        let path = build_path(
            GROWTH_HISTORY_MONTH_PATH,
            &[("list_id", self.id.as_str()), ("month", month)],
        );
        Ok(client.get(&path, as_query(params)).await?)
    }

    /// Adds or updates many members in one request (`POST /lists/{list_id}`).
    ///
    /// This is a synchronous call; for large imports use a batch.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn batch_subscribe_members(
        &self,
        body: &BatchSubscribeRequest,
    ) -> Result<BatchSubscribeResponse, ResourceError> {
        let client = self.client()?;
        let mut response: BatchSubscribeResponse =
            client.send(HttpMethod::Post, &self.path(LIST_PATH), body).await?;
        for member in response
            .new_members
            .iter_mut()
            .chain(response.updated_members.iter_mut())
        {
            member.attach_client(client);
        }
        Ok(response)
    }
}

impl MailchimpClient {
    /// Returns a handle to the list `id` without a request.
    ///
    /// Only `id` is set; use it for follow-up operations.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let list = client.list_handle("abc123");
    /// let members = list.get_members(None).await?;
    /// ```
    #[must_use]
    pub fn list_handle(&self, id: impl Into<String>) -> List {
        List {
            id: id.into(),
            client: Some(self.clone()),
            ..Default::default()
        }
    }

    /// Fetches the lists of the account (`GET /lists`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn get_lists(
        &self,
        params: Option<&ListQueryParams>,
    ) -> Result<ListEnvelope<List>, ResourceError> {
        fetch_list(self, LISTS_PATH, "lists", as_query(params)).await
    }

    /// Fetches one list (`GET /lists/{list_id}`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] for an empty `id` and
    /// [`ResourceError::Http`] if the request fails.
    pub async fn get_list(
        &self,
        id: &str,
        params: Option<&BasicQueryParams>,
    ) -> Result<List, ResourceError> {
        require_identity(List::NAME, "id", id)?;
        let path = build_path(LIST_PATH, &[("list_id", id)]);
        fetch_one(self, &path, as_query(params)).await
    }

    /// Creates a list (`POST /lists`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn create_list(&self, body: &ListRequest) -> Result<List, ResourceError> {
        send_one(self, HttpMethod::Post, LISTS_PATH, body).await
    }

    /// Updates a list (`PATCH /lists/{list_id}`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] for an empty `id` and
    /// [`ResourceError::Http`] if the request fails.
    pub async fn update_list(&self, id: &str, body: &ListRequest) -> Result<List, ResourceError> {
        require_identity(List::NAME, "id", id)?;
        let path = build_path(LIST_PATH, &[("list_id", id)]);
        send_one(self, HttpMethod::Patch, &path, body).await
    }

    /// Deletes a list (`DELETE /lists/{list_id}`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] for an empty `id` and
    /// [`ResourceError::Http`] if the request fails.
    pub async fn delete_list(&self, id: &str) -> Result<bool, ResourceError> {
        require_identity(List::NAME, "id", id)?;
        Ok(self.delete(&build_path(LIST_PATH, &[("list_id", id)])).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MailchimpConfig;
    use chrono::TimeZone;
    use serde_json::json;

    fn client() -> MailchimpClient {
        MailchimpClient::new(&MailchimpConfig::builder().build().unwrap()).unwrap()
    }

    #[test]
    fn test_list_handle_is_addressable_without_request() {
        let root = client();
        let list = root.list_handle("abc123");

        assert_eq!(list.id, "abc123");
        assert!(list.client().unwrap().shares_engine_with(&root));
    }

    #[test]
    fn test_list_without_id_is_precondition_error() {
        let list = List::default();
        assert!(matches!(
            list.client(),
            Err(ResourceError::MissingIdentity { resource: "List", field: "id" })
        ));
    }

    #[test]
    fn test_list_query_params_render_timestamps() {
        let params = ListQueryParams {
            since_date_created: Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()),
            email: Some("ada@example.com".to_string()),
            ..Default::default()
        };

        let query = crate::clients::render_query(&params);
        assert_eq!(
            query.get("since_date_created").map(String::as_str),
            Some("2024-01-02T03:04:05+00:00")
        );
        assert_eq!(query.get("email").map(String::as_str), Some("ada@example.com"));
        assert!(!query.contains_key("before_date_created"));
    }

    #[test]
    fn test_list_decodes_response_and_skips_client() {
        let list: List = serde_json::from_value(json!({
            "id": "abc123",
            "web_id": 42,
            "name": "Newsletter",
            "contact": {"company": "Acme", "country": "US"},
            "date_created": "2023-06-01T10:00:00+00:00",
            "stats": {"member_count": 12, "campaign_last_sent": ""}
        }))
        .unwrap();

        assert_eq!(list.stats.member_count, 12);
        assert!(list.stats.campaign_last_sent.is_none());
        assert!(!list.has_client());

        let wire = serde_json::to_value(&list).unwrap();
        assert!(wire.get("client").is_none());
    }

    #[test]
    fn test_list_request_omits_empty_notifications() {
        let body = ListRequest {
            name: "Newsletter".to_string(),
            ..Default::default()
        };
        let wire = serde_json::to_value(&body).unwrap();

        assert!(wire.get("notify_on_subscribe").is_none());
        assert!(wire.get("visibility").is_none());
        assert_eq!(wire["use_archive_bar"], false);
    }
}
