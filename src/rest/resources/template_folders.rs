//! Template folders.

use serde::{Deserialize, Serialize};

use super::templates::{Template, TemplateQueryParams};
use crate::clients::{ExtendedQueryParams, HttpMethod, MailchimpClient};
use crate::rest::{
    as_query, fetch_list, require_identity, send_one, Link, ListEnvelope, Resource, ResourceError,
};

const TEMPLATE_FOLDERS_PATH: &str = "/template-folders";

/// A folder of templates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateFolder {
    pub id: String,
    pub name: String,
    pub count: u64,
    #[serde(rename = "_links", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip)]
    client: Option<MailchimpClient>,
}

impl Resource for TemplateFolder {
    const NAME: &'static str = "TemplateFolder";

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

impl TemplateFolder {
    /// Fetches the templates in this folder.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] or
    /// [`ResourceError::MissingClient`] before any request, and
    /// [`ResourceError::Http`] if the request fails.
    pub async fn get_templates(
        &self,
        params: Option<&ExtendedQueryParams>,
    ) -> Result<ListEnvelope<Template>, ResourceError> {
        let client = self.client()?;
        let params = TemplateQueryParams {
            extended: params.cloned().unwrap_or_default(),
            folder_id: Some(self.id.clone()),
            ..Default::default()
        };
        client.get_templates(Some(&params)).await
    }
}

impl MailchimpClient {
    /// Fetches template folders (`GET /template-folders`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn get_template_folders(
        &self,
        params: Option<&ExtendedQueryParams>,
    ) -> Result<ListEnvelope<TemplateFolder>, ResourceError> {
        fetch_list(self, TEMPLATE_FOLDERS_PATH, "folders", as_query(params)).await
    }

    /// Creates a template folder.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub async fn create_template_folder(&self, name: &str) -> Result<TemplateFolder, ResourceError> {
        send_one(self, HttpMethod::Post, TEMPLATE_FOLDERS_PATH, &FolderBody { name }).await
    }
}
