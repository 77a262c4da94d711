//! The root client handed to every resource.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clients::errors::HttpError;
use crate::clients::http_client::HttpClient;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::query::QueryParams;
use crate::config::{Endpoint, MailchimpConfig};

/// Client for the Mailchimp Marketing API.
///
/// `MailchimpClient` is a cheap handle around a shared [`HttpClient`].
/// Cloning it clones an `Arc`, so every resource returned by an operation
/// carries its own clone and can make follow-up calls without the caller
/// passing credentials again.
///
/// Resource operations (`get_lists`, `create_batch`, ...) are defined next to
/// their resource types in [`crate::rest::resources`].
///
/// # Thread Safety
///
/// `MailchimpClient` is `Clone`, `Send`, and `Sync`.
///
/// # Example
///
/// ```rust,ignore
/// use mailchimp_api::{ApiKey, MailchimpClient, MailchimpConfig};
///
/// let config = MailchimpConfig::builder()
///     .api_key(ApiKey::new("0123456789abcdef-us6")?)
///     .build()?;
/// let client = MailchimpClient::new(&config)?;
///
/// let lists = client.get_lists(None).await?;
/// for list in lists.iter() {
///     let members = list.get_members(None).await?;
///     println!("{}: {} members", list.name, members.total_items);
/// }
/// ```
#[derive(Clone, Debug)]
pub struct MailchimpClient {
    http: Arc<HttpClient>,
}

// Verify MailchimpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MailchimpClient>();
};

impl MailchimpClient {
    /// Creates a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the default transport cannot be
    /// initialized.
    pub fn new(config: &MailchimpConfig) -> Result<Self, HttpError> {
        Ok(Self {
            http: Arc::new(HttpClient::new(config)?),
        })
    }

    /// Returns the underlying HTTP engine.
    ///
    /// Use it to reach endpoints that have no typed operation.
    #[must_use]
    pub fn http_client(&self) -> &HttpClient {
        &self.http
    }

    /// Returns the endpoint requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        self.http.endpoint()
    }

    /// Enables or disables request/response dumps for this client and every
    /// resource that shares it.
    pub fn set_debug(&self, debug: bool) {
        self.http.set_debug(debug);
    }

    /// Returns `true` if both handles share the same engine.
    #[must_use]
    pub fn shares_engine_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.http, &other.http)
    }

    /// GET `path` and decode the required body.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&dyn QueryParams>,
    ) -> Result<T, HttpError> {
        let mut builder = HttpRequest::builder(HttpMethod::Get, path);
        if let Some(query) = query {
            builder = builder.query(query);
        }
        self.expect_body(builder.build()?).await
    }

    /// Send `body` with `method` and decode the required response body.
    pub(crate) async fn send<T, B>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        let request = HttpRequest::builder(method, path).json(body).build()?;
        self.expect_body(request).await
    }

    /// Send `body` with `method`, ignoring any response body.
    pub(crate) async fn send_ok<B: Serialize + Sync + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> Result<bool, HttpError> {
        let request = HttpRequest::builder(method, path).json(body).build()?;
        self.http.execute_ok(request).await
    }

    /// POST to an action endpoint that takes no body.
    pub(crate) async fn trigger(&self, path: &str) -> Result<bool, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Post, path).build()?;
        self.http.execute_ok(request).await
    }

    /// DELETE `path`.
    pub(crate) async fn delete(&self, path: &str) -> Result<bool, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Delete, path).build()?;
        self.http.execute_ok(request).await
    }

    async fn expect_body<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, HttpError> {
        let response = self.http.request(request).await?;
        let code = response.code;
        response.decode()?.ok_or(HttpError::EmptyBody { code })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_engine() {
        let config = MailchimpConfig::builder().build().unwrap();
        let client = MailchimpClient::new(&config).unwrap();
        let clone = client.clone();

        assert!(client.shares_engine_with(&clone));

        let other = MailchimpClient::new(&config).unwrap();
        assert!(!client.shares_engine_with(&other));
    }

    #[test]
    fn test_debug_flag_is_shared_between_clones() {
        let config = MailchimpConfig::builder().build().unwrap();
        let client = MailchimpClient::new(&config).unwrap();
        let clone = client.clone();

        client.set_debug(true);
        assert!(clone.http_client().is_debug());
    }
}
