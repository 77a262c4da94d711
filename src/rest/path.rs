//! Path building for resource endpoints.
//!
//! Templates use `{name}` placeholders. Every value is percent-encoded as a
//! single path segment, so identifiers containing `/` or spaces cannot change
//! the shape of the path.
//!
//! # Example
//!
//! ```rust
//! use mailchimp_api::rest::build_path;
//!
//! let path = build_path(
//!     "/lists/{list_id}/members/{subscriber_hash}/notes",
//!     &[("list_id", "abc123"), ("subscriber_hash", "62eeb292278cc15f5817cb78f7790b08")],
//! );
//! assert_eq!(path, "/lists/abc123/members/62eeb292278cc15f5817cb78f7790b08/notes");
//! ```

/// Interpolates `ids` into `template`, encoding each value.
#[must_use]
pub fn build_path(template: &str, ids: &[(&str, &str)]) -> String {
    let mut result = template.to_string();

    for (key, value) in ids {
        let placeholder = format!("{{{key}}}");
        result = result.replace(&placeholder, &urlencoding::encode(value));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_path_replaces_all_placeholders() {
        let path = build_path(
            "/lists/{list_id}/interest-categories/{id}/interests",
            &[("list_id", "l1"), ("id", "c9")],
        );
        assert_eq!(path, "/lists/l1/interest-categories/c9/interests");
    }

    #[test]
    fn test_build_path_encodes_segments() {
        let path = build_path("/batches/{id}", &[("id", "a/b c")]);
        assert_eq!(path, "/batches/a%2Fb%20c");
    }

    #[test]
    fn test_build_path_leaves_unknown_placeholders() {
        let path = build_path("/lists/{list_id}", &[]);
        assert_eq!(path, "/lists/{list_id}");
    }
}
