//! Email templates.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::timestamp;
use crate::clients::{
    render, BasicQueryParams, ExtendedQueryParams, HttpMethod, MailchimpClient, QueryParams,
};
use crate::rest::{
    as_query, build_path, fetch_list, fetch_one, require_nonzero, send_one, Link, ListEnvelope,
    Resource, ResourceError,
};

const TEMPLATES_PATH: &str = "/templates";
const TEMPLATE_PATH: &str = "/templates/{template_id}";
const TEMPLATE_DEFAULT_CONTENT_PATH: &str = "/templates/{template_id}/default-content";

/// Filters for [`MailchimpClient::get_templates`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateQueryParams {
    pub extended: ExtendedQueryParams,
    /// Login name of the creator.
    pub created_by: Option<String>,
    pub since_created_at: Option<DateTime<Utc>>,
    pub before_created_at: Option<DateTime<Utc>>,
    /// `user`, `base` or `gallery`.
    pub kind: Option<String>,
    pub folder_id: Option<String>,
}

impl QueryParams for TemplateQueryParams {
    fn params(&self) -> BTreeMap<String, String> {
        let mut m = self.extended.params();
        m.insert("created_by".to_string(), render::text(self.created_by.as_deref()));
        m.insert(
            "since_created_at".to_string(),
            render::timestamp(self.since_created_at),
        );
        m.insert(
            "before_created_at".to_string(),
            render::timestamp(self.before_created_at),
        );
        m.insert("type".to_string(), render::text(self.kind.as_deref()));
        m.insert("folder_id".to_string(), render::text(self.folder_id.as_deref()));
        m
    }
}

/// Body for creating or updating a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateRequest {
    pub name: String,
    /// Raw HTML with Mailchimp template language.
    pub html: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub folder_id: String,
}

/// An email template.
///
/// Follow-up operations need a non-zero `id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Template {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub drag_and_drop: bool,
    pub responsive: bool,
    pub category: String,
    #[serde(with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    pub created_by: String,
    pub active: bool,
    pub folder_id: String,
    pub thumbnail: String,
    pub share_url: String,
    #[serde(rename = "_links", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip)]
    client: Option<MailchimpClient>,
}

impl Resource for Template {
    const NAME: &'static str = "Template";

    fn client_handle(&self) -> Option<&MailchimpClient> {
        self.client.as_ref()
    }

    fn attach_client(&mut self, client: &MailchimpClient) {
        self.client = Some(client.clone());
    }

    fn ensure_identity(&self) -> Result<(), ResourceError> {
        require_nonzero(Self::NAME, "id", self.id)
    }
}

/// The editable sections of a template and their default content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateDefaultContent {
    pub sections: BTreeMap<String, String>,
    #[serde(rename = "_links", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

fn template_path(template: &str, id: u64) -> Result<String, ResourceError> {
    require_nonzero(Template::NAME, "id", id)?;
    Ok(build_path(template, &[("template_id", id.to_string().as_str())]))
}

impl Template {
    /// Updates this template (`PATCH`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] or
    /// [`ResourceError::MissingClient`] before any request, and
    /// [`ResourceError::Http`] if the request fails.
    pub async fn update(&self, body: &TemplateRequest) -> Result<Self, ResourceError> {
        self.client()?.update_template(self.id, body).await
    }

    /// Deletes this template.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn delete(&self) -> Result<bool, ResourceError> {
        self.client()?.delete_template(self.id).await
    }

    /// Fetches the sections of this template.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn default_content(
        &self,
        params: Option<&BasicQueryParams>,
    ) -> Result<TemplateDefaultContent, ResourceError> {
        self.client()?
            .get_template_default_content(self.id, params)
            .await
    }
}

impl MailchimpClient {
    /// Fetches templates (`GET /templates`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn get_templates(
        &self,
        params: Option<&TemplateQueryParams>,
    ) -> Result<ListEnvelope<Template>, ResourceError> {
        fetch_list(self, TEMPLATES_PATH, "templates", as_query(params)).await
    }

    /// Fetches one template.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] for a zero `id` and
    /// [`ResourceError::Http`] if the request fails.
    pub async fn get_template(
        &self,
        id: u64,
        params: Option<&BasicQueryParams>,
    ) -> Result<Template, ResourceError> {
        let path = template_path(TEMPLATE_PATH, id)?;
        fetch_one(self, &path, as_query(params)).await
    }

    /// Creates a template.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn create_template(&self, body: &TemplateRequest) -> Result<Template, ResourceError> {
        send_one(self, HttpMethod::Post, TEMPLATES_PATH, body).await
    }

    /// Updates a template (`PATCH`).
    ///
    /// # Errors
    ///
    /// See [`get_template`](Self::get_template).
    pub async fn update_template(
        &self,
        id: u64,
        body: &TemplateRequest,
    ) -> Result<Template, ResourceError> {
        let path = template_path(TEMPLATE_PATH, id)?;
        send_one(self, HttpMethod::Patch, &path, body).await
    }

    /// Deletes a template.
    ///
    /// # Errors
    ///
    /// See [`get_template`](Self::get_template).
    pub async fn delete_template(&self, id: u64) -> Result<bool, ResourceError> {
        Ok(self.delete(&template_path(TEMPLATE_PATH, id)?).await?)
    }

    /// Fetches the sections of a template.
    ///
    /// # Errors
    ///
    /// See [`get_template`](Self::get_template).
    pub async fn get_template_default_content(
        &self,
        id: u64,
        params: Option<&BasicQueryParams>,
    ) -> Result<TemplateDefaultContent, ResourceError> {
        let path = template_path(TEMPLATE_DEFAULT_CONTENT_PATH, id)?;
        Ok(self.get(&path, as_query(params)).await?)
    }
}
