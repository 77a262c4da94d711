//! HTTP response type for the Mailchimp API SDK.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::clients::errors::HttpError;

/// An HTTP response from the Marketing API.
///
/// The body is kept as received. Decoding happens on demand with
/// [`HttpResponse::decode`], which treats an empty body as "no value".
///
/// # Example
///
/// ```rust
/// use mailchimp_api::clients::HttpResponse;
/// use std::collections::HashMap;
///
/// let response = HttpResponse::new(204, HashMap::new(), String::new());
/// assert!(response.is_ok());
/// assert!(response.decode::<serde_json::Value>().unwrap().is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lower-case name (a header may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(code: u16, headers: HashMap<String, Vec<String>>, body: String) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns `true` if the body is empty or only whitespace.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }

    /// Returns the first value of the named header, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Decodes the body into `T`.
    ///
    /// Returns `Ok(None)` when the body is empty.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Decode`] if the body does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<Option<T>, HttpError> {
        if self.is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&self.body)
            .map(Some)
            .map_err(HttpError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Named {
        id: String,
    }

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        for code in 200..=299 {
            let response = HttpResponse::new(code, HashMap::new(), String::new());
            assert!(response.is_ok(), "Expected is_ok() to be true for code {code}");
        }
    }

    #[test]
    fn test_is_ok_returns_false_for_non_2xx() {
        for code in [199, 300, 400, 404, 422, 500, 503] {
            let response = HttpResponse::new(code, HashMap::new(), String::new());
            assert!(!response.is_ok(), "Expected is_ok() to be false for code {code}");
        }
    }

    #[test]
    fn test_decode_returns_value() {
        let response = HttpResponse::new(201, HashMap::new(), r#"{"id":"abc"}"#.to_string());
        let named: Option<Named> = response.decode().unwrap();
        assert_eq!(named, Some(Named { id: "abc".to_string() }));
    }

    #[test]
    fn test_decode_whitespace_body_is_none() {
        let response = HttpResponse::new(200, HashMap::new(), " \n".to_string());
        assert!(response.decode::<Named>().unwrap().is_none());
    }

    #[test]
    fn test_decode_mismatch_is_decode_error() {
        let response = HttpResponse::new(200, HashMap::new(), r#"{"id":42}"#.to_string());
        assert!(matches!(
            response.decode::<Named>(),
            Err(HttpError::Decode(_))
        ));
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["abc-123".to_string()]);

        let response = HttpResponse::new(200, headers, String::new());
        assert_eq!(response.header("X-Request-Id"), Some("abc-123"));
        assert_eq!(response.header("link"), None);
    }
}
