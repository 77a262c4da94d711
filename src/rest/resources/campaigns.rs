//! Campaigns, their content, and send actions.
//!
//! # Example
//!
//! ```rust,ignore
//! use mailchimp_api::rest::resources::{
//!     CampaignContentRequest, CampaignRecipients, CampaignRequest, CampaignSettings,
//!     CampaignType, TestEmailRequest,
//! };
//!
//! let campaign = client
//!     .create_campaign(&CampaignRequest {
//!         kind: CampaignType::Regular,
//!         recipients: Some(CampaignRecipients::list("abc123")),
//!         settings: Some(CampaignSettings {
//!             subject_line: "Spring sale".into(),
//!             from_name: "Acme".into(),
//!             reply_to: "hello@acme.test".into(),
//!             ..Default::default()
//!         }),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! campaign
//!     .update_content(&CampaignContentRequest::html("<p>20% off</p>"))
//!     .await?;
//! campaign
//!     .send_test(&TestEmailRequest::html(vec!["qa@acme.test".into()]))
//!     .await?;
//! campaign.send().await?;
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::timestamp;
use super::segments::SegmentOptions;
use crate::clients::{
    render, BasicQueryParams, ExtendedQueryParams, HttpMethod, MailchimpClient, QueryParams,
};
use crate::rest::{
    as_query, build_path, fetch_list, fetch_one, require_identity, send_one, Link, ListEnvelope,
    Resource, ResourceError,
};

const CAMPAIGNS_PATH: &str = "/campaigns";
const CAMPAIGN_PATH: &str = "/campaigns/{campaign_id}";
const CAMPAIGN_CONTENT_PATH: &str = "/campaigns/{campaign_id}/content";
const CAMPAIGN_TEST_PATH: &str = "/campaigns/{campaign_id}/actions/test";
const CAMPAIGN_SEND_PATH: &str = "/campaigns/{campaign_id}/actions/send";

/// The kind of a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CampaignType {
    #[default]
    Regular,
    Plaintext,
    Absplit,
    Rss,
    Variate,
    /// A kind this SDK does not know.
    #[serde(other)]
    Unknown,
}

/// Filters for [`MailchimpClient::get_campaigns`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignQueryParams {
    pub extended: ExtendedQueryParams,
    pub kind: Option<CampaignType>,
    /// `save`, `paused`, `schedule`, `sending` or `sent`.
    pub status: Option<String>,
    pub before_send_time: Option<DateTime<Utc>>,
    pub since_send_time: Option<DateTime<Utc>>,
    pub before_create_time: Option<DateTime<Utc>>,
    pub since_create_time: Option<DateTime<Utc>>,
    pub list_id: Option<String>,
    pub folder_id: Option<String>,
}

impl QueryParams for CampaignQueryParams {
    fn params(&self) -> BTreeMap<String, String> {
        let kind = self
            .kind
            .and_then(|k| serde_json::to_value(k).ok())
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();

        let mut m = self.extended.params();
        m.insert("type".to_string(), kind);
        m.insert("status".to_string(), render::text(self.status.as_deref()));
        m.insert(
            "before_send_time".to_string(),
            render::timestamp(self.before_send_time),
        );
        m.insert(
            "since_send_time".to_string(),
            render::timestamp(self.since_send_time),
        );
        m.insert(
            "before_create_time".to_string(),
            render::timestamp(self.before_create_time),
        );
        m.insert(
            "since_create_time".to_string(),
            render::timestamp(self.since_create_time),
        );
        m.insert("list_id".to_string(), render::text(self.list_id.as_deref()));
        m.insert("folder_id".to_string(), render::text(self.folder_id.as_deref()));
        m
    }
}

/// Who receives a campaign.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignRecipients {
    pub list_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub list_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub segment_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_opts: Option<CampaignSegmentOptions>,
}

impl CampaignRecipients {
    /// Sends to every member of `list_id`.
    #[must_use]
    pub fn list(list_id: impl Into<String>) -> Self {
        Self {
            list_id: list_id.into(),
            ..Default::default()
        }
    }
}

/// Restricts the recipients to a segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignSegmentOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_segment_id: Option<u64>,
    #[serde(flatten)]
    pub conditions: SegmentOptions,
}

/// Campaign settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignSettings {
    pub subject_line: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub preview_text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    pub from_name: String,
    pub reply_to: String,
    pub use_conversation: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub to_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub folder_id: String,
    pub authenticate: bool,
    pub auto_footer: bool,
    pub inline_css: bool,
    pub auto_tweet: bool,
    pub fb_comments: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<u64>,
}

/// Tracking options of a campaign.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignTracking {
    pub opens: bool,
    pub html_clicks: bool,
    pub text_clicks: bool,
    pub goal_tracking: bool,
    pub ecomm360: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub google_analytics: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub clicktale: String,
}

/// Body for creating or updating a campaign.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignRequest {
    #[serde(rename = "type")]
    pub kind: CampaignType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipients: Option<CampaignRecipients>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<CampaignSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking: Option<CampaignTracking>,
}

/// E-commerce totals of a sent campaign.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcommerceSummary {
    pub total_orders: u64,
    pub total_spent: f64,
    pub total_revenue: f64,
}

/// Report summary of a sent campaign.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSummary {
    pub opens: u64,
    pub unique_opens: u64,
    pub open_rate: f64,
    pub clicks: u64,
    pub subscriber_clicks: u64,
    pub click_rate: f64,
    pub ecommerce: EcommerceSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryStatus {
    pub enabled: bool,
}

/// A campaign.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Campaign {
    pub id: String,
    pub web_id: u64,
    #[serde(rename = "type")]
    pub kind: CampaignType,
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
    pub archive_url: String,
    pub long_archive_url: String,
    pub status: String,
    pub emails_sent: u64,
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub send_time: Option<DateTime<Utc>>,
    pub content_type: String,
    pub needs_block_refresh: bool,
    pub recipients: CampaignRecipients,
    pub settings: CampaignSettings,
    pub tracking: CampaignTracking,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_summary: Option<ReportSummary>,
    pub delivery_status: DeliveryStatus,
    #[serde(rename = "_links", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip)]
    client: Option<MailchimpClient>,
}

impl Resource for Campaign {
    const NAME: &'static str = "Campaign";

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

/// A template reference inside campaign content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentTemplate {
    /// The template id.
    pub id: u64,
    /// Content for the editable sections, keyed by section name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub sections: BTreeMap<String, String>,
}

/// Body for setting campaign content.
///
/// Set exactly one of `html`, `url` or `template`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignContentRequest {
    /// Plain-text alternative; generated from the HTML when empty.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub plain_text: String,
    /// Raw HTML content.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub html: String,
    /// A URL to import the content from.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    /// A template and its section content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<ContentTemplate>,
}

impl CampaignContentRequest {
    /// Content from raw HTML.
    #[must_use]
    pub fn html(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            ..Default::default()
        }
    }
}

/// The content of a campaign.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignContent {
    pub plain_text: String,
    pub html: String,
    pub archive_html: String,
    #[serde(rename = "_links", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

/// Body for [`MailchimpClient::send_test_email`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestEmailRequest {
    /// Recipients of the test.
    pub test_emails: Vec<String>,
    /// `html` or `plaintext`.
    pub send_type: String,
}

impl TestEmailRequest {
    /// An HTML test send to `emails`.
    #[must_use]
    pub fn html(emails: Vec<String>) -> Self {
        Self {
            test_emails: emails,
            send_type: "html".to_string(),
        }
    }
}

fn campaign_path(template: &str, id: &str) -> Result<String, ResourceError> {
    require_identity(Campaign::NAME, "id", id)?;
    Ok(build_path(template, &[("campaign_id", id)]))
}

impl Campaign {
    /// Updates this campaign (`PATCH`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] or
    /// [`ResourceError::MissingClient`] before any request, and
    /// [`ResourceError::Http`] if the request fails.
    pub async fn update(&self, body: &CampaignRequest) -> Result<Self, ResourceError> {
        self.client()?.update_campaign(&self.id, body).await
    }

    /// Deletes this campaign.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn delete(&self) -> Result<bool, ResourceError> {
        self.client()?.delete_campaign(&self.id).await
    }

    /// Fetches the content of this campaign.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn content(
        &self,
        params: Option<&BasicQueryParams>,
    ) -> Result<CampaignContent, ResourceError> {
        self.client()?.get_campaign_content(&self.id, params).await
    }

    /// Sets the content of this campaign.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn update_content(
        &self,
        body: &CampaignContentRequest,
    ) -> Result<CampaignContent, ResourceError> {
        self.client()?.update_campaign_content(&self.id, body).await
    }

    /// Sends a test email.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn send_test(&self, body: &TestEmailRequest) -> Result<bool, ResourceError> {
        self.client()?.send_test_email(&self.id, body).await
    }

    /// Sends this campaign now.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn send(&self) -> Result<bool, ResourceError> {
        self.client()?.send_campaign(&self.id).await
    }
}

impl MailchimpClient {
    /// Fetches campaigns (`GET /campaigns`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn get_campaigns(
        &self,
        params: Option<&CampaignQueryParams>,
    ) -> Result<ListEnvelope<Campaign>, ResourceError> {
        fetch_list(self, CAMPAIGNS_PATH, "campaigns", as_query(params)).await
    }

    /// Fetches one campaign.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] for an empty `id` and
    /// [`ResourceError::Http`] if the request fails.
    pub async fn get_campaign(
        &self,
        id: &str,
        params: Option<&BasicQueryParams>,
    ) -> Result<Campaign, ResourceError> {
        let path = campaign_path(CAMPAIGN_PATH, id)?;
        fetch_one(self, &path, as_query(params)).await
    }

    /// Creates a campaign.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn create_campaign(&self, body: &CampaignRequest) -> Result<Campaign, ResourceError> {
        send_one(self, HttpMethod::Post, CAMPAIGNS_PATH, body).await
    }

    /// Updates a campaign (`PATCH`).
    ///
    /// # Errors
    ///
    /// See [`get_campaign`](Self::get_campaign).
    pub async fn update_campaign(
        &self,
        id: &str,
        body: &CampaignRequest,
    ) -> Result<Campaign, ResourceError> {
        let path = campaign_path(CAMPAIGN_PATH, id)?;
        send_one(self, HttpMethod::Patch, &path, body).await
    }

    /// Deletes a campaign.
    ///
    /// # Errors
    ///
    /// See [`get_campaign`](Self::get_campaign).
    pub async fn delete_campaign(&self, id: &str) -> Result<bool, ResourceError> {
        Ok(self.delete(&campaign_path(CAMPAIGN_PATH, id)?).await?)
    }

    /// Fetches the content of a campaign.
    ///
    /// # Errors
    ///
    /// See [`get_campaign`](Self::get_campaign).
    pub async fn get_campaign_content(
        &self,
        id: &str,
        params: Option<&BasicQueryParams>,
    ) -> Result<CampaignContent, ResourceError> {
        let path = campaign_path(CAMPAIGN_CONTENT_PATH, id)?;
        Ok(self.get(&path, as_query(params)).await?)
    }

    /// Sets the content of a campaign (`PUT`).
    ///
    /// # Errors
    ///
    /// See [`get_campaign`](Self::get_campaign).
    pub async fn update_campaign_content(
        &self,
        id: &str,
        body: &CampaignContentRequest,
    ) -> Result<CampaignContent, ResourceError> {
        let path = campaign_path(CAMPAIGN_CONTENT_PATH, id)?;
        Ok(self.send(HttpMethod::Put, &path, body).await?)
    }

    /// Sends a test email of a campaign.
    ///
    /// # Errors
    ///
    /// See [`get_campaign`](Self::get_campaign).
    pub async fn send_test_email(
        &self,
        id: &str,
        body: &TestEmailRequest,
    ) -> Result<bool, ResourceError> {
        let path = campaign_path(CAMPAIGN_TEST_PATH, id)?;
        Ok(self.send_ok(HttpMethod::Post, &path, body).await?)
    }

    /// Sends a campaign now.
    ///
    /// # Errors
    ///
    /// See [`get_campaign`](Self::get_campaign).
    pub async fn send_campaign(&self, id: &str) -> Result<bool, ResourceError> {
        Ok(self.trigger(&campaign_path(CAMPAIGN_SEND_PATH, id)?).await?)
    }
}
