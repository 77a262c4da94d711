//! Interest categories (groups) and interests.
//!
//! An [`InterestCategory`] carries the client handle; interests inside it are
//! managed through the category.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::lists::List;
use crate::clients::{
    render, BasicQueryParams, ExtendedQueryParams, HttpMethod, MailchimpClient, QueryParams,
};
use crate::rest::{
    as_query, build_path, fetch_list, fetch_one, fetch_records, require_identity, send_one, Link,
    ListEnvelope, Resource, ResourceError,
};

const CATEGORIES_PATH: &str = "/lists/{list_id}/interest-categories";
const CATEGORY_PATH: &str = "/lists/{list_id}/interest-categories/{id}";
const INTERESTS_PATH: &str = "/lists/{list_id}/interest-categories/{id}/interests";
const INTEREST_PATH: &str = "/lists/{list_id}/interest-categories/{id}/interests/{interest_id}";

/// Filters for [`List::get_interest_categories`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterestCategoryQueryParams {
    pub extended: ExtendedQueryParams,
    /// How the category is shown on signup forms.
    pub kind: Option<String>,
}

impl QueryParams for InterestCategoryQueryParams {
    fn params(&self) -> BTreeMap<String, String> {
        let mut m = self.extended.params();
        m.insert("type".to_string(), render::text(self.kind.as_deref()));
        m
    }
}

/// Body for creating or updating an interest category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterestCategoryRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_order: Option<u32>,
    /// `checkboxes`, `dropdown`, `radio` or `hidden`.
    #[serde(rename = "type")]
    pub kind: String,
}

/// An interest category of a list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InterestCategory {
    pub list_id: String,
    pub id: String,
    pub title: String,
    pub display_order: u32,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "_links", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip)]
    client: Option<MailchimpClient>,
}

impl Resource for InterestCategory {
    const NAME: &'static str = "InterestCategory";

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

/// Body for creating or updating an interest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterestRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_order: Option<u32>,
}

/// An interest inside a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Interest {
    pub category_id: String,
    pub list_id: String,
    pub id: String,
    pub name: String,
    /// Members with this interest. Reported as a string by the service.
    pub subscriber_count: String,
    pub display_order: u32,
    #[serde(rename = "_links", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl InterestCategory {
    fn path(&self, template: &str) -> String {
        build_path(
            template,
            &[("list_id", self.list_id.as_str()), ("id", self.id.as_str())],
        )
    }

    fn interest_path(&self, interest_id: &str) -> Result<String, ResourceError> {
        require_identity("Interest", "id", interest_id)?;
        Ok(build_path(
            INTEREST_PATH,
            &[
                ("list_id", self.list_id.as_str()),
                ("id", self.id.as_str()),
                ("interest_id", interest_id),
            ],
        ))
    }

    /// Updates this category (`PATCH`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] or
    /// [`ResourceError::MissingClient`] before any request, and
    /// [`ResourceError::Http`] if the request fails.
    pub async fn update(&self, body: &InterestCategoryRequest) -> Result<Self, ResourceError> {
        let client = self.client()?;
        send_one(client, HttpMethod::Patch, &self.path(CATEGORY_PATH), body).await
    }

    /// Deletes this category and its interests.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn delete(&self) -> Result<bool, ResourceError> {
        let client = self.client()?;
        Ok(client.delete(&self.path(CATEGORY_PATH)).await?)
    }

    /// Fetches the interests of this category.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn get_interests(
        &self,
        params: Option<&ExtendedQueryParams>,
    ) -> Result<ListEnvelope<Interest>, ResourceError> {
        let client = self.client()?;
        fetch_records(client, &self.path(INTERESTS_PATH), "interests", as_query(params)).await
    }

    /// Fetches one interest.
    ///
    /// # Errors
    ///
    /// Also returns [`ResourceError::MissingIdentity`] for an empty `interest_id`.
    pub async fn get_interest(
        &self,
        interest_id: &str,
        params: Option<&BasicQueryParams>,
    ) -> Result<Interest, ResourceError> {
        let client = self.client()?;
        Ok(client.get(&self.interest_path(interest_id)?, as_query(params)).await?)
    }

    /// Adds an interest.
    ///
    /// # Errors
    ///
    /// See [`update`](Self::update).
    pub async fn create_interest(&self, body: &InterestRequest) -> Result<Interest, ResourceError> {
        let client = self.client()?;
        let path = self.path(INTERESTS_PATH);
        Ok(client.send(HttpMethod::Post, &path, body).await?)
    }

    /// Updates an interest (`PATCH`).
    ///
    /// # Errors
    ///
    /// See [`get_interest`](Self::get_interest).
    pub async fn update_interest(
        &self,
        interest_id: &str,
        body: &InterestRequest,
    ) -> Result<Interest, ResourceError> {
        let client = self.client()?;
        let path = self.interest_path(interest_id)?;
        Ok(client.send(HttpMethod::Patch, &path, body).await?)
    }

    /// Deletes an interest.
    ///
    /// # Errors
    ///
    /// See [`get_interest`](Self::get_interest).
    pub async fn delete_interest(&self, interest_id: &str) -> Result<bool, ResourceError> {
        let client = self.client()?;
        Ok(client.delete(&self.interest_path(interest_id)?).await?)
    }
}

impl List {
    fn category_path(&self, category_id: &str) -> Result<String, ResourceError> {
        require_identity(InterestCategory::NAME, "id", category_id)?;
        Ok(build_path(
            CATEGORY_PATH,
            &[("list_id", self.id.as_str()), ("id", category_id)],
        ))
    }

    /// Fetches the interest categories of this list.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] or
    /// [`ResourceError::MissingClient`] before any request, and
    /// [`ResourceError::Http`] if the request fails.
    pub async fn get_interest_categories(
        &self,
        params: Option<&InterestCategoryQueryParams>,
    ) -> Result<ListEnvelope<InterestCategory>, ResourceError> {
        let client = self.client()?;
        let path = build_path(CATEGORIES_PATH, &[("list_id", self.id.as_str())]);
        fetch_list(client, &path, "categories", as_query(params)).await
    }

    /// Fetches one interest category.
    ///
    /// # Errors
    ///
    /// Also returns [`ResourceError::MissingIdentity`] for an empty `category_id`.
    pub async fn get_interest_category(
        &self,
        category_id: &str,
        params: Option<&BasicQueryParams>,
    ) -> Result<InterestCategory, ResourceError> {
        let client = self.client()?;
        fetch_one(client, &self.category_path(category_id)?, as_query(params)).await
    }

    /// Adds an interest category.
    ///
    /// # Errors
    ///
    /// See [`get_interest_categories`](Self::get_interest_categories).
    pub async fn create_interest_category(
        &self,
        body: &InterestCategoryRequest,
    ) -> Result<InterestCategory, ResourceError> {
        let client = self.client()?;
        let path = build_path(CATEGORIES_PATH, &[("list_id", self.id.as_str())]);
        send_one(client, HttpMethod::Post, &path, body).await
    }

    /// Updates an interest category (`PATCH`).
    ///
    /// # Errors
    ///
    /// See [`get_interest_category`](Self::get_interest_category).
    pub async fn update_interest_category(
        &self,
        category_id: &str,
        body: &InterestCategoryRequest,
    ) -> Result<InterestCategory, ResourceError> {
        let client = self.client()?;
        let path = self.category_path(category_id)?;
        send_one(client, HttpMethod::Patch, &path, body).await
    }

    /// Deletes an interest category.
    ///
    /// # Errors
    ///
    /// See [`get_interest_category`](Self::get_interest_category).
    pub async fn delete_interest_category(&self, category_id: &str) -> Result<bool, ResourceError> {
        let client = self.client()?;
        Ok(client.delete(&self.category_path(category_id)?).await?)
    }
}
