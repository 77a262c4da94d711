//! Campaign folders.

use serde::{Deserialize, Serialize};

use super::campaigns::{Campaign, CampaignQueryParams};
use crate::clients::{ExtendedQueryParams, HttpMethod, MailchimpClient};
use crate::rest::{
    as_query, fetch_list, require_identity, send_one, Link, ListEnvelope, Resource, ResourceError,
};

const CAMPAIGN_FOLDERS_PATH: &str = "/campaign-folders";

/// A folder of campaigns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignFolder {
    pub id: String,
    pub name: String,
    /// Number of campaigns in the folder.
    pub count: u64,
    #[serde(rename = "_links", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip)]
    client: Option<MailchimpClient>,
}

impl Resource for CampaignFolder {
    const NAME: &'static str = "CampaignFolder";

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

#[derive(Serialize)]
struct FolderBody<'a> {
    name: &'a str,
}

impl CampaignFolder {
    /// Fetches the campaigns in this folder.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] or
    /// [`ResourceError::MissingClient`] before any request, and
    /// [`ResourceError::Http`] if the request fails.
    pub async fn get_campaigns(
        &self,
        params: Option<&ExtendedQueryParams>,
    ) -> Result<ListEnvelope<Campaign>, ResourceError> {
        let client = self.client()?;
        let params = CampaignQueryParams {
            extended: params.cloned().unwrap_or_default(),
            folder_id: Some(self.id.clone()),
            ..Default::default()
        };
        client.get_campaigns(Some(&params)).await
    }
}

impl MailchimpClient {
    /// Fetches campaign folders (`GET /campaign-folders`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn get_campaign_folders(
        &self,
        params: Option<&ExtendedQueryParams>,
    ) -> Result<ListEnvelope<CampaignFolder>, ResourceError> {
        fetch_list(self, CAMPAIGN_FOLDERS_PATH, "folders", as_query(params)).await
    }

    /// Creates a campaign folder.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn create_campaign_folder(&self, name: &str) -> Result<CampaignFolder, ResourceError> {
        send_one(self, HttpMethod::Post, CAMPAIGN_FOLDERS_PATH, &FolderBody { name }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_folder_decodes_and_requires_id() {
        let folder: CampaignFolder =
            serde_json::from_value(json!({"id": "", "name": "Drafts", "count": 3})).unwrap();
        assert_eq!(folder.count, 3);
        assert!(folder.client().unwrap_err().is_precondition());
    }

    #[test]
    fn test_folder_body() {
        assert_eq!(
            serde_json::to_value(FolderBody { name: "Drafts" }).unwrap(),
            json!({"name": "Drafts"})
        );
    }
}
