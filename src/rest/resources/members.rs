//! List members and their notes, tags, goals and activity.
//!
//! Members are addressed by the *subscriber hash*: the lowercase hex MD5 of
//! the lowercased email address. [`subscriber_hash`] computes it locally,
//! so a member can be written without fetching it first:
//!
//! ```rust,ignore
//! let member = client.member_for_api_calls("abc123", "Ada@Example.com");
//! member.create_note("Called about the spring sale").await?;
//! ```
//!
//! Operations that take a member id accept either the hash or an email
//! address; an id containing `@` is hashed before use.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{timestamp, MemberLocation};
use super::lists::List;
use crate::clients::{
    render, BasicQueryParams, ExtendedQueryParams, HttpMethod, MailchimpClient, QueryParams,
};
use crate::rest::{
    as_query, build_path, fetch_list, fetch_one, fetch_records, require_identity, require_nonzero,
    send_one, Link, ListEnvelope, Resource, ResourceError,
};

const MEMBERS_PATH: &str = "/lists/{list_id}/members";
const MEMBER_PATH: &str = "/lists/{list_id}/members/{id}";
const MEMBER_DELETE_PERMANENT_PATH: &str = "/lists/{list_id}/members/{id}/actions/delete-permanent";
const MEMBER_ACTIVITY_PATH: &str = "/lists/{list_id}/members/{id}/activity";
const MEMBER_GOALS_PATH: &str = "/lists/{list_id}/members/{id}/goals";
const MEMBER_NOTES_PATH: &str = "/lists/{list_id}/members/{id}/notes";
const MEMBER_NOTE_PATH: &str = "/lists/{list_id}/members/{id}/notes/{note_id}";
const MEMBER_TAGS_PATH: &str = "/lists/{list_id}/members/{id}/tags";

/// Returns the subscriber hash of `email`.
///
/// # Example
///
/// ```rust
/// use mailchimp_api::rest::resources::subscriber_hash;
///
/// assert_eq!(
///     subscriber_hash("Urist.McVankab@freddiesjokes.com"),
///     "62eeb292278cc15f5817cb78f7790b08"
/// );
/// ```
#[must_use]
pub fn subscriber_hash(email: &str) -> String {
    format!("{:x}", Md5::digest(email.to_lowercase().as_bytes()))
}

fn member_key(id_or_email: &str) -> String {
    if id_or_email.contains('@') {
        subscriber_hash(id_or_email)
    } else {
        id_or_email.to_string()
    }
}

/// Subscription status of a member.
///
/// Statuses the SDK does not know are kept verbatim in [`MemberStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MemberStatus {
    /// Receives campaigns.
    Subscribed,
    /// Opted out.
    Unsubscribed,
    /// Removed after hard bounces.
    Cleaned,
    /// Awaiting double opt-in confirmation.
    Pending,
    /// Receives transactional email only.
    Transactional,
    /// Archived; can be restored by an upsert.
    Archived,
    /// A status this SDK does not know.
    Other(String),
}

impl MemberStatus {
    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Subscribed => "subscribed",
            Self::Unsubscribed => "unsubscribed",
            Self::Cleaned => "cleaned",
            Self::Pending => "pending",
            Self::Transactional => "transactional",
            Self::Archived => "archived",
            Self::Other(s) => s,
        }
    }

    /// Returns `true` if the member receives campaigns.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        matches!(self, Self::Subscribed)
    }
}

impl From<String> for MemberStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "subscribed" => Self::Subscribed,
            "unsubscribed" => Self::Unsubscribed,
            "cleaned" => Self::Cleaned,
            "pending" => Self::Pending,
            "transactional" => Self::Transactional,
            "archived" => Self::Archived,
            _ => Self::Other(s),
        }
    }
}

impl From<MemberStatus> for String {
    fn from(status: MemberStatus) -> Self {
        match status {
            MemberStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A marketing permission (GDPR) of a member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketingPermission {
    /// Id of the permission within the list.
    pub marketing_permission_id: String,
    /// The permission text shown to the subscriber.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Whether the subscriber granted the permission.
    pub enabled: bool,
}

/// Body for creating, updating or upserting a member.
///
/// Unset fields are omitted, so a request built from `Default` only sends
/// what the caller filled in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberRequest {
    /// Required when creating; omitted when empty.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email_address: String,
    /// `html` or `text`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_type: Option<String>,
    /// Required when creating; omitted when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MemberStatus>,
    /// Status used when an upsert creates the member.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_if_new: Option<MemberStatus>,
    /// Merge field values keyed by tag (e.g., `FNAME`).
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub merge_fields: Map<String, Value>,
    /// Interest memberships keyed by interest id.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub interests: BTreeMap<String, bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vip: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<MemberLocation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub marketing_permissions: Vec<MarketingPermission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_signup: Option<String>,
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp_signup: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_opt: Option<String>,
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp_opt: Option<DateTime<Utc>>,
    /// Tags applied on creation.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl MemberRequest {
    /// Creates a request for `email` with `status`.
    #[must_use]
    pub fn new(email: impl Into<String>, status: MemberStatus) -> Self {
        Self {
            email_address: email.into(),
            status: Some(status),
            ..Default::default()
        }
    }
}

/// Open and click rates of a member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberStats {
    pub avg_open_rate: f64,
    pub avg_click_rate: f64,
}

/// The most recent note on a member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LastNote {
    pub note_id: u64,
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub created_by: String,
    pub note: String,
}

/// A tag on a member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberTag {
    pub id: u64,
    pub name: String,
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub date_added: Option<DateTime<Utc>>,
}

/// A list member.
///
/// Follow-up operations need both `list_id` and `id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Member {
    /// The subscriber hash.
    pub id: String,
    pub email_address: String,
    pub unique_email_id: String,
    pub email_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MemberStatus>,
    pub merge_fields: Map<String, Value>,
    pub interests: BTreeMap<String, bool>,
    pub stats: MemberStats,
    pub ip_signup: String,
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp_signup: Option<DateTime<Utc>>,
    pub ip_opt: String,
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp_opt: Option<DateTime<Utc>>,
    /// Star rating, 1 to 5.
    pub member_rating: u8,
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub last_changed: Option<DateTime<Utc>>,
    pub language: String,
    pub vip: bool,
    pub email_client: String,
    pub location: MemberLocation,
    pub marketing_permissions: Vec<MarketingPermission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_note: Option<LastNote>,
    pub tags: Vec<MemberTag>,
    /// The list the member belongs to.
    pub list_id: String,
    #[serde(rename = "_links", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip)]
    client: Option<MailchimpClient>,
}

impl Resource for Member {
    const NAME: &'static str = "Member";

    fn client_handle(&self) -> Option<&MailchimpClient> {
        self.client.as_ref()
    }

    fn attach_client(&mut self, client: &MailchimpClient) {
        self.client = Some(client.clone());
    }

    fn ensure_identity(&self) -> Result<(), ResourceError> {
        require_identity(Self::NAME, "list_id", &self.list_id)?;
        require_identity(Self::NAME, "id", &self.id)
    }
}

/// Filters for [`List::get_members`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberQueryParams {
    /// Pagination, sorting and field filters.
    pub extended: ExtendedQueryParams,
    pub status: Option<MemberStatus>,
    /// `html` or `text`.
    pub email_type: Option<String>,
    pub since_timestamp_opt: Option<DateTime<Utc>>,
    pub before_timestamp_opt: Option<DateTime<Utc>>,
    pub since_last_changed: Option<DateTime<Utc>>,
    pub before_last_changed: Option<DateTime<Utc>>,
    pub unique_email_id: Option<String>,
    pub vip_only: Option<bool>,
    /// Required together with `interest_ids` and `interest_match`.
    pub interest_category_id: Option<String>,
    pub interest_ids: Vec<String>,
    /// `any`, `all` or `none`.
    pub interest_match: Option<String>,
}

impl QueryParams for MemberQueryParams {
    fn params(&self) -> BTreeMap<String, String> {
        let status = render::text(self.status.as_ref().map(MemberStatus::as_str));

        let mut m = self.extended.params();
        m.insert("status".to_string(), status);
        m.insert("email_type".to_string(), render::text(self.email_type.as_deref()));
        m.insert(
            "since_timestamp_opt".to_string(),
            render::timestamp(self.since_timestamp_opt),
        );
        m.insert(
            "before_timestamp_opt".to_string(),
            render::timestamp(self.before_timestamp_opt),
        );
        m.insert(
            "since_last_changed".to_string(),
            render::timestamp(self.since_last_changed),
        );
        m.insert(
            "before_last_changed".to_string(),
            render::timestamp(self.before_last_changed),
        );
        m.insert(
            "unique_email_id".to_string(),
            render::text(self.unique_email_id.as_deref()),
        );
        m.insert("vip_only".to_string(), render::flag(self.vip_only));
        m.insert(
            "interest_category_id".to_string(),
            render::text(self.interest_category_id.as_deref()),
        );
        m.insert("interest_ids".to_string(), render::list(&self.interest_ids));
        m.insert(
            "interest_match".to_string(),
            render::text(self.interest_match.as_deref()),
        );
        m
    }
}

/// A member event (e.g., a page visit) as returned by the activity feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberActivity {
    pub action: String,
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub campaign_id: String,
    pub title: String,
    pub parent_campaign: String,
}

/// A goal event of a member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberGoal {
    pub goal_id: u64,
    pub event: String,
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub last_visited_at: Option<DateTime<Utc>>,
    pub data: String,
}

/// A note on a member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberNote {
    pub id: u64,
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub created_by: String,
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub note: String,
    pub list_id: String,
    pub email_id: String,
    #[serde(rename = "_links", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

#[derive(Serialize)]
struct NoteBody<'a> {
    note: &'a str,
}

/// Whether a tag update adds or removes the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagStatus {
    Active,
    Inactive,
}

/// One entry of [`Member::update_tags`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagUpdate {
    pub name: String,
    pub status: TagStatus,
}

impl TagUpdate {
    /// Adds the tag `name`.
    #[must_use]
    pub fn add(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: TagStatus::Active,
        }
    }

    /// Removes the tag `name`.
    #[must_use]
    pub fn remove(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: TagStatus::Inactive,
        }
    }
}

#[derive(Serialize)]
struct TagsBody<'a> {
    tags: &'a [TagUpdate],
}

impl Member {
    pub(crate) fn path(&self, template: &str) -> String {
        build_path(
            template,
            &[("list_id", self.list_id.as_str()), ("id", self.id.as_str())],
        )
    }

    fn note_path(&self, note_id: u64) -> Result<String, ResourceError> {
        require_nonzero("MemberNote", "id", note_id)?;
        let note_id = note_id.to_string();
        Ok(build_path(
            MEMBER_NOTE_PATH,
            &[
                ("list_id", self.list_id.as_str()),
                ("id", self.id.as_str()),
                ("note_id", note_id.as_str()),
            ],
        ))
    }

    /// Sets `id` to the subscriber hash of `email`.
    pub fn set_id_by_email(&mut self, email: &str) -> &mut Self {
        self.id = subscriber_hash(email);
        self
    }

    /// Updates this member (`PATCH`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] or
    /// [`ResourceError::MissingClient`] before any request, and
    /// [`ResourceError::Http`] if the request fails.
    pub async fn update(&self, body: &MemberRequest) -> Result<Self, ResourceError> {
        let client = self.client()?;
        send_one(client, HttpMethod::Patch, &self.path(MEMBER_PATH), body).await
    }

    /// Archives this member.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn delete(&self) -> Result<bool, ResourceError> {
        let client = self.client()?;
        Ok(client.delete(&self.path(MEMBER_PATH)).await?)
    }

    /// Permanently deletes this member and their data.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn delete_permanent(&self) -> Result<bool, ResourceError> {
        let client = self.client()?;
        Ok(client.trigger(&self.path(MEMBER_DELETE_PERMANENT_PATH)).await?)
    }

    /// Fetches the recent activity of this member.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn get_activity(
        &self,
        params: Option<&ExtendedQueryParams>,
    ) -> Result<ListEnvelope<MemberActivity>, ResourceError> {
        let client = self.client()?;
        let path = self.path(MEMBER_ACTIVITY_PATH);
        fetch_records(client, &path, "activity", as_query(params)).await
    }

    /// Fetches the goal events of this member.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn get_goals(
        &self,
        params: Option<&ExtendedQueryParams>,
    ) -> Result<ListEnvelope<MemberGoal>, ResourceError> {
        let client = self.client()?;
        fetch_records(client, &self.path(MEMBER_GOALS_PATH), "goals", as_query(params)).await
    }

    /// Fetches the notes on this member.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn get_notes(
        &self,
        params: Option<&ExtendedQueryParams>,
    ) -> Result<ListEnvelope<MemberNote>, ResourceError> {
        let client = self.client()?;
        fetch_records(client, &self.path(MEMBER_NOTES_PATH), "notes", as_query(params)).await
    }

    /// Fetches one note.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] for a zero `note_id`, and
    /// see [`update`](Self::update).
    pub async fn get_note(
        &self,
        note_id: u64,
        params: Option<&BasicQueryParams>,
    ) -> Result<MemberNote, ResourceError> {
        let client = self.client()?;
        Ok(client.get(&self.note_path(note_id)?, as_query(params)).await?)
    }

    /// Adds a note.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn create_note(&self, note: &str) -> Result<MemberNote, ResourceError> {
        let client = self.client()?;
        let path = self.path(MEMBER_NOTES_PATH);
        Ok(client.send(HttpMethod::Post, &path, &NoteBody { note }).await?)
    }

    /// Replaces the text of a note.
    ///
    /// # Errors
    ///
    /// See [`get_note`](Self::get_note).
    pub async fn update_note(&self, note_id: u64, note: &str) -> Result<MemberNote, ResourceError> {
        let client = self.client()?;
        let path = self.note_path(note_id)?;
        Ok(client.send(HttpMethod::Patch, &path, &NoteBody { note }).await?)
    }

    /// Deletes a note.
    ///
    /// # Errors
    ///
    /// See [`get_note`](Self::get_note).
    pub async fn delete_note(&self, note_id: u64) -> Result<bool, ResourceError> {
        let client = self.client()?;
        Ok(client.delete(&self.note_path(note_id)?).await?)
    }

    /// Fetches the tags of this member.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn get_tags(
        &self,
        params: Option<&BasicQueryParams>,
    ) -> Result<ListEnvelope<MemberTag>, ResourceError> {
        let client = self.client()?;
        fetch_records(client, &self.path(MEMBER_TAGS_PATH), "tags", as_query(params)).await
    }

    /// Adds and removes tags.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use mailchimp_api::rest::resources::TagUpdate;
    ///
    /// member
    ///     .update_tags(&[TagUpdate::add("vip"), TagUpdate::remove("trial")])
    ///     .await?;
    /// ```
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn update_tags(&self, tags: &[TagUpdate]) -> Result<bool, ResourceError> {
        let client = self.client()?;
        let path = self.path(MEMBER_TAGS_PATH);
        Ok(client.send_ok(HttpMethod::Post, &path, &TagsBody { tags }).await?)
    }
}

impl List {
    fn member_path(&self, template: &str, id_or_email: &str) -> Result<String, ResourceError> {
        require_identity(Member::NAME, "id", id_or_email)?;
        let id = member_key(id_or_email);
        Ok(build_path(
            template,
            &[("list_id", self.id.as_str()), ("id", id.as_str())],
        ))
    }

    /// Fetches the members of this list.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] or
    /// [`ResourceError::MissingClient`] before any request, and
    /// [`ResourceError::Http`] if the request fails.
    pub async fn get_members(
        &self,
        params: Option<&MemberQueryParams>,
    ) -> Result<ListEnvelope<Member>, ResourceError> {
        let client = self.client()?;
        let path = build_path(MEMBERS_PATH, &[("list_id", self.id.as_str())]);
        fetch_list(client, &path, "members", as_query(params)).await
    }

    /// Fetches one member by subscriber hash or email address.
    ///
    /// # Errors
    ///
    /// See [`get_members`](Self::get_members).
    pub async fn get_member(
        &self,
        id_or_email: &str,
        params: Option<&BasicQueryParams>,
    ) -> Result<Member, ResourceError> {
        let client = self.client()?;
        let path = self.member_path(MEMBER_PATH, id_or_email)?;
        fetch_one(client, &path, as_query(params)).await
    }

    /// Adds a member (`POST`).
    ///
    /// # Errors
    ///
    /// See [`get_members`](Self::get_members).
    pub async fn create_member(&self, body: &MemberRequest) -> Result<Member, ResourceError> {
        let client = self.client()?;
        let path = build_path(MEMBERS_PATH, &[("list_id", self.id.as_str())]);
        send_one(client, HttpMethod::Post, &path, body).await
    }

    /// Updates a member (`PATCH`).
    ///
    /// # Errors
    ///
    /// See [`get_members`](Self::get_members).
    pub async fn update_member(
        &self,
        id_or_email: &str,
        body: &MemberRequest,
    ) -> Result<Member, ResourceError> {
        let client = self.client()?;
        let path = self.member_path(MEMBER_PATH, id_or_email)?;
        send_one(client, HttpMethod::Patch, &path, body).await
    }

    /// Adds or updates a member (`PUT`).
    ///
    /// Set [`MemberRequest::status_if_new`] to choose the status of a new
    /// member.
    ///
    /// # Errors
    ///
    /// See [`get_members`](Self::get_members).
    pub async fn add_or_update_member(
        &self,
        id_or_email: &str,
        body: &MemberRequest,
    ) -> Result<Member, ResourceError> {
        let client = self.client()?;
        let path = self.member_path(MEMBER_PATH, id_or_email)?;
        send_one(client, HttpMethod::Put, &path, body).await
    }

    /// Archives a member.
    ///
    /// # Errors
    ///
    /// See [`get_members`](Self::get_members).
    pub async fn delete_member(&self, id_or_email: &str) -> Result<bool, ResourceError> {
        let client = self.client()?;
        Ok(client.delete(&self.member_path(MEMBER_PATH, id_or_email)?).await?)
    }

    /// Permanently deletes a member.
    ///
    /// # Errors
    ///
    /// See [`get_members`](Self::get_members).
    pub async fn delete_member_permanent(&self, id_or_email: &str) -> Result<bool, ResourceError> {
        let client = self.client()?;
        let path = self.member_path(MEMBER_DELETE_PERMANENT_PATH, id_or_email)?;
        Ok(client.trigger(&path).await?)
    }
}

impl MailchimpClient {
    /// Returns a member of `list_id` addressed by `email`, without a request.
    ///
    /// Only `list_id`, `email_address` and `id` are set.
    #[must_use]
    pub fn member_for_api_calls(&self, list_id: impl Into<String>, email: &str) -> Member {
        Member {
            id: subscriber_hash(email),
            email_address: email.to_string(),
            list_id: list_id.into(),
            client: Some(self.clone()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MailchimpConfig;
    use serde_json::json;

    fn client() -> MailchimpClient {
        MailchimpClient::new(&MailchimpConfig::builder().build().unwrap()).unwrap()
    }

    #[test]
    fn test_subscriber_hash_lowercases_email() {
        assert_eq!(
            subscriber_hash("urist.mcvankab@freddiesjokes.com"),
            "62eeb292278cc15f5817cb78f7790b08"
        );
        assert_eq!(
            subscriber_hash("URIST.McVankab@FreddiesJokes.com"),
            subscriber_hash("urist.mcvankab@freddiesjokes.com")
        );
    }

    #[test]
    fn test_member_key_hashes_only_emails() {
        assert_eq!(member_key("62eeb292278cc15f5817cb78f7790b08"), "62eeb292278cc15f5817cb78f7790b08");
        assert_eq!(
            member_key("urist.mcvankab@freddiesjokes.com"),
            "62eeb292278cc15f5817cb78f7790b08"
        );
    }

    #[test]
    fn test_member_for_api_calls_is_addressable() {
        let root = client();
        let member = root.member_for_api_calls("abc123", "Ada@Example.com");

        assert_eq!(member.id, subscriber_hash("ada@example.com"));
        assert_eq!(member.list_id, "abc123");
        assert!(member.client().unwrap().shares_engine_with(&root));
        assert_eq!(
            member.path(MEMBER_NOTES_PATH),
            format!("/lists/abc123/members/{}/notes", member.id)
        );
    }

    #[test]
    fn test_member_identity_checks_list_first() {
        let mut member = Member::default();
        member.set_id_by_email("ada@example.com");

        assert!(matches!(
            member.client(),
            Err(ResourceError::MissingIdentity { resource: "Member", field: "list_id" })
        ));

        member.list_id = "abc123".to_string();
        assert!(matches!(
            member.client(),
            Err(ResourceError::MissingClient { resource: "Member" })
        ));
    }

    #[test]
    fn test_zero_note_id_is_rejected() {
        let member = client().member_for_api_calls("abc123", "ada@example.com");
        assert!(matches!(
            member.note_path(0),
            Err(ResourceError::MissingIdentity { resource: "MemberNote", .. })
        ));
    }

    #[test]
    fn test_member_request_omits_unset_fields() {
        let mut request = MemberRequest::new("ada@example.com", MemberStatus::Subscribed);
        request.status_if_new = Some(MemberStatus::Pending);

        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(
            wire,
            json!({
                "email_address": "ada@example.com",
                "status": "subscribed",
                "status_if_new": "pending"
            })
        );
    }

    #[test]
    fn test_unknown_member_status_round_trips() {
        let member: Member = serde_json::from_value(json!({
            "id": "h",
            "list_id": "l",
            "status": "frozen",
            "last_note": {"note_id": 3, "note": "hi", "created_at": ""}
        }))
        .unwrap();

        assert_eq!(member.status, Some(MemberStatus::Other("frozen".to_string())));
        assert_eq!(member.last_note.as_ref().unwrap().note_id, 3);

        let wire = serde_json::to_value(&member).unwrap();
        assert_eq!(wire["status"], "frozen");
    }

    #[test]
    fn test_partial_member_request_sends_only_set_fields() {
        let mut request = MemberRequest::default();
        request.merge_fields.insert("FNAME".to_string(), json!("Ada"));

        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(wire, json!({"merge_fields": {"FNAME": "Ada"}}));
    }

    #[test]
    fn test_member_status_wire_values() {
        let status: MemberStatus = serde_json::from_value(json!("cleaned")).unwrap();
        assert_eq!(status, MemberStatus::Cleaned);
        assert_eq!(serde_json::to_value(&MemberStatus::Archived).unwrap(), json!("archived"));
        assert_eq!(MemberStatus::Other("frozen".to_string()).to_string(), "frozen");
        assert!(MemberStatus::Subscribed.is_subscribed());
    }

    #[test]
    fn test_member_query_params_render_status_and_interests() {
        let params = MemberQueryParams {
            status: Some(MemberStatus::Unsubscribed),
            interest_ids: vec!["a".to_string(), "b".to_string()],
            vip_only: Some(true),
            ..Default::default()
        };

        let query = crate::clients::render_query(&params);
        assert_eq!(query.get("status").map(String::as_str), Some("unsubscribed"));
        assert_eq!(query.get("interest_ids").map(String::as_str), Some("a,b"));
        assert_eq!(query.get("vip_only").map(String::as_str), Some("true"));
        assert!(!query.contains_key("email_type"));
    }

    #[test]
    fn test_note_and_tag_bodies() {
        assert_eq!(
            serde_json::to_value(NoteBody { note: "hello" }).unwrap(),
            json!({"note": "hello"})
        );
        let tags = [TagUpdate::add("vip"), TagUpdate::remove("trial")];
        assert_eq!(
            serde_json::to_value(TagsBody { tags: &tags }).unwrap(),
            json!({"tags": [
                {"name": "vip", "status": "active"},
                {"name": "trial", "status": "inactive"}
            ]})
        );
    }
}
