//! Member search across lists.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::lists::List;
use super::members::Member;
use crate::clients::{render, BasicQueryParams, MailchimpClient, QueryParams};
use crate::rest::{as_query, require_identity, Link, Resource, ResourceError};

const SEARCH_MEMBERS_PATH: &str = "/search-members";

/// Parameters of a member search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchMembersQueryParams {
    pub basic: BasicQueryParams,
    /// Search text: a full or partial name or email address.
    pub query: String,
    /// Restricts the search to one list.
    pub list_id: Option<String>,
}

impl SearchMembersQueryParams {
    /// Searches for `query` in every list.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }
}

impl QueryParams for SearchMembersQueryParams {
    fn params(&self) -> BTreeMap<String, String> {
        let mut m = self.basic.params();
        m.insert("query".to_string(), self.query.clone());
        m.insert("list_id".to_string(), render::text(self.list_id.as_deref()));
        m
    }
}

/// One group of search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchMatches {
    pub members: Vec<Member>,
    pub total_items: u64,
}

/// Result of a member search. Members carry the client handle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchMembersResponse {
    pub exact_matches: SearchMatches,
    pub full_search: SearchMatches,
    #[serde(rename = "_links", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl SearchMembersResponse {
    fn attach_client(&mut self, client: &MailchimpClient) {
        for member in self
            .exact_matches
            .members
            .iter_mut()
            .chain(self.full_search.members.iter_mut())
        {
            member.attach_client(client);
        }
    }
}

impl MailchimpClient {
    /// Searches members by name or email (`GET /search-members`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] for an empty query and
    /// [`ResourceError::Http`] if the request fails.
    pub async fn search_members(
        &self,
        params: &SearchMembersQueryParams,
    ) -> Result<SearchMembersResponse, ResourceError> {
        require_identity("SearchMembers", "query", &params.query)?;
        let mut response: SearchMembersResponse =
            self.get(SEARCH_MEMBERS_PATH, as_query(Some(params))).await?;
        response.attach_client(self);
        Ok(response)
    }
}

impl List {
    /// Searches members of this list.
    ///
    /// # Errors
    ///
    /// See [`MailchimpClient::search_members`]; also fails before any
    /// request if this list is not addressable.
    pub async fn search_members(
        &self,
        query: &str,
        params: Option<&BasicQueryParams>,
    ) -> Result<SearchMembersResponse, ResourceError> {
        let client = self.client()?;
        let params = SearchMembersQueryParams {
            basic: params.cloned().unwrap_or_default(),
            query: query.to_string(),
            list_id: Some(self.id.clone()),
        };
        client.search_members(&params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MailchimpConfig;
    use serde_json::json;

    #[test]
    fn test_params_include_query_and_list() {
        let params = SearchMembersQueryParams {
            list_id: Some("abc123".to_string()),
            ..SearchMembersQueryParams::new("ada lovelace")
        };
        let query = crate::clients::render_query(&params);
        assert_eq!(query.get("query").map(String::as_str), Some("ada lovelace"));
        assert_eq!(query.get("list_id").map(String::as_str), Some("abc123"));
    }

    #[test]
    fn test_response_members_are_stamped() {
        let root = MailchimpClient::new(&MailchimpConfig::builder().build().unwrap()).unwrap();
        let mut response: SearchMembersResponse = serde_json::from_value(json!({
            "exact_matches": {"members": [{"id": "h1", "list_id": "l1"}], "total_items": 1},
            "full_search": {"members": [{"id": "h2", "list_id": "l1"}], "total_items": 1}
        }))
        .unwrap();

        response.attach_client(&root);
        assert!(response.exact_matches.members[0].has_client());
        assert!(response.full_search.members[0].has_client());
    }
}
