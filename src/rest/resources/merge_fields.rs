//! Merge fields (audience fields) of a list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::lists::List;
use crate::clients::{render, BasicQueryParams, ExtendedQueryParams, HttpMethod, QueryParams};
use crate::rest::{
    as_query, build_path, fetch_records, require_nonzero, Link, ListEnvelope, Resource,
    ResourceError,
};

const MERGE_FIELDS_PATH: &str = "/lists/{list_id}/merge-fields";
const MERGE_FIELD_PATH: &str = "/lists/{list_id}/merge-fields/{merge_id}";

/// Filters for [`List::get_merge_fields`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeFieldQueryParams {
    pub extended: ExtendedQueryParams,
    /// Field type (e.g., `text`, `date`).
    pub kind: Option<String>,
    pub required: Option<bool>,
}

impl QueryParams for MergeFieldQueryParams {
    fn params(&self) -> BTreeMap<String, String> {
        let mut m = self.extended.params();
        m.insert("type".to_string(), render::text(self.kind.as_deref()));
        m.insert("required".to_string(), render::flag(self.required));
        m
    }
}

/// Type-specific settings of a merge field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeFieldOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_country: Option<u32>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone_format: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub date_format: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

/// Body for creating or updating a merge field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeFieldRequest {
    /// The merge tag (e.g., `FNAME`).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tag: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub required: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub default_value: String,
    pub public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_order: Option<u32>,
    pub options: MergeFieldOptions,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub help_text: String,
}

/// A merge field of a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeField {
    pub merge_id: u64,
    pub tag: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub required: bool,
    pub default_value: String,
    pub public: bool,
    pub display_order: u32,
    pub options: MergeFieldOptions,
    pub help_text: String,
    pub list_id: String,
    #[serde(rename = "_links", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl List {
    fn merge_field_path(&self, merge_id: u64) -> Result<String, ResourceError> {
        require_nonzero("MergeField", "merge_id", merge_id)?;
        let merge_id = merge_id.to_string();
        Ok(build_path(
            MERGE_FIELD_PATH,
            &[("list_id", self.id.as_str()), ("merge_id", merge_id.as_str())],
        ))
    }

    /// Fetches the merge fields of this list.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] or
    /// [`ResourceError::MissingClient`] before any request, and
    /// [`ResourceError::Http`] if the request fails.
    pub async fn get_merge_fields(
        &self,
        params: Option<&MergeFieldQueryParams>,
    ) -> Result<ListEnvelope<MergeField>, ResourceError> {
        let client = self.client()?;
        let path = build_path(MERGE_FIELDS_PATH, &[("list_id", self.id.as_str())]);
        fetch_records(client, &path, "merge_fields", as_query(params)).await
    }

    /// Fetches one merge field.
    ///
    /// # Errors
    ///
    /// Also returns [`ResourceError::MissingIdentity`] for a zero `merge_id`.
    pub async fn get_merge_field(
        &self,
        merge_id: u64,
        params: Option<&BasicQueryParams>,
    ) -> Result<MergeField, ResourceError> {
        let client = self.client()?;
        Ok(client.get(&self.merge_field_path(merge_id)?, as_query(params)).await?)
    }

    /// Adds a merge field.
    ///
    /// # Errors
    ///
    /// See [`get_merge_fields`](Self::get_merge_fields).
    pub async fn create_merge_field(
        &self,
        body: &MergeFieldRequest,
    ) -> Result<MergeField, ResourceError> {
        let client = self.client()?;
        let path = build_path(MERGE_FIELDS_PATH, &[("list_id", self.id.as_str())]);
        Ok(client.send(HttpMethod::Post, &path, body).await?)
    }

    /// Updates a merge field (`PATCH`).
    ///
    /// # Errors
    ///
    /// See [`get_merge_field`](Self::get_merge_field).
    pub async fn update_merge_field(
        &self,
        merge_id: u64,
        body: &MergeFieldRequest,
    ) -> Result<MergeField, ResourceError> {
        let client = self.client()?;
        let path = self.merge_field_path(merge_id)?;
        Ok(client.send(HttpMethod::Patch, &path, body).await?)
    }

    /// Deletes a merge field.
    ///
    /// # Errors
    ///
    /// See [`get_merge_field`](Self::get_merge_field).
    pub async fn delete_merge_field(&self, merge_id: u64) -> Result<bool, ResourceError> {
        let client = self.client()?;
        Ok(client.delete(&self.merge_field_path(merge_id)?).await?)
    }
}
