//! Query parameter model.
//!
//! Any type implementing [`QueryParams`] can be passed to the engine. A
//! provider renders all of its fields, set or not; the engine drops every
//! empty value before building the URL, so "unset" never reaches the wire.
//!
//! Two reusable tiers exist:
//!
//! - [`BasicQueryParams`]: `fields`, `count`, `offset`
//! - [`ExtendedQueryParams`]: basic plus `exclude_fields`, `sort_field`, `sort_dir`
//!
//! Resource-specific parameter types embed [`ExtendedQueryParams`] and add
//! their own filters.
//!
//! # Example
//!
//! ```rust
//! use mailchimp_api::clients::{render_query, BasicQueryParams, ExtendedQueryParams, SortDirection};
//!
//! let params = ExtendedQueryParams {
//!     basic: BasicQueryParams { count: Some(50), ..Default::default() },
//!     sort_dir: Some(SortDirection::Desc),
//!     ..Default::default()
//! };
//!
//! let query = render_query(&params);
//! assert_eq!(query.get("count").map(String::as_str), Some("50"));
//! assert_eq!(query.get("sort_dir").map(String::as_str), Some("DESC"));
//! assert!(!query.contains_key("offset"));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A provider of query string parameters.
pub trait QueryParams: Send + Sync {
    /// Renders every parameter as a name/value pair. Empty values are allowed
    /// and mean "not set".
    fn params(&self) -> BTreeMap<String, String>;
}

/// Renders a provider, dropping empty values.
#[must_use]
pub fn render_query(params: &(impl QueryParams + ?Sized)) -> BTreeMap<String, String> {
    let mut query = params.params();
    query.retain(|_, v| !v.is_empty());
    query
}

/// Renderers for optional parameter values. `None` renders as `""`.
pub(crate) mod render {
    use chrono::{DateTime, SecondsFormat, Utc};

    pub(crate) fn list(values: &[String]) -> String {
        values.join(",")
    }

    pub(crate) fn number<N: ToString>(value: Option<N>) -> String {
        value.map(|v| v.to_string()).unwrap_or_default()
    }

    pub(crate) fn text(value: Option<&str>) -> String {
        value.unwrap_or_default().to_string()
    }

    pub(crate) fn flag(value: Option<bool>) -> String {
        number(value)
    }

    pub(crate) fn timestamp(value: Option<DateTime<Utc>>) -> String {
        value
            .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Secs, false))
            .unwrap_or_default()
    }
}

use render::{list, number};

/// Sort direction for collection endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Returns the wire representation (`ASC` / `DESC`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pagination and response field filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicQueryParams {
    /// Fields to return, using dot notation for sub-objects.
    pub fields: Vec<String>,
    /// Number of records to return.
    pub count: Option<u32>,
    /// Number of records to skip.
    pub offset: Option<u32>,
}

impl QueryParams for BasicQueryParams {
    fn params(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("fields".to_string(), list(&self.fields)),
            ("count".to_string(), number(self.count)),
            ("offset".to_string(), number(self.offset)),
        ])
    }
}

/// Basic parameters plus sorting and field exclusion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtendedQueryParams {
    /// Pagination and field filters.
    pub basic: BasicQueryParams,
    /// Fields to exclude from the response.
    pub exclude_fields: Vec<String>,
    /// Field to sort by.
    pub sort_field: Option<String>,
    /// Sort direction.
    pub sort_dir: Option<SortDirection>,
}

impl QueryParams for ExtendedQueryParams {
    fn params(&self) -> BTreeMap<String, String> {
        let mut m = self.basic.params();
        m.insert("exclude_fields".to_string(), list(&self.exclude_fields));
        m.insert(
            "sort_field".to_string(),
            render::text(self.sort_field.as_deref()),
        );
        m.insert("sort_dir".to_string(), number(self.sort_dir));
        m
    }
}

impl QueryParams for BTreeMap<String, String> {
    fn params(&self) -> BTreeMap<String, String> {
        self.clone()
    }
}

impl QueryParams for HashMap<String, String> {
    fn params(&self) -> BTreeMap<String, String> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_params_render_all_keys() {
        let params = BasicQueryParams::default().params();
        assert_eq!(params.len(), 3);
        assert!(params.values().all(String::is_empty));
    }

    #[test]
    fn test_render_query_drops_empty_values() {
        let params = BasicQueryParams {
            fields: vec!["id".to_string(), "name".to_string()],
            count: None,
            offset: Some(0),
        };

        let query = render_query(&params);
        assert_eq!(query.get("fields"), Some(&"id,name".to_string()));
        assert_eq!(query.get("offset"), Some(&"0".to_string()));
        assert!(!query.contains_key("count"));
    }

    #[test]
    fn test_extended_params_include_basic_tier() {
        let params = ExtendedQueryParams {
            basic: BasicQueryParams {
                count: Some(10),
                ..Default::default()
            },
            exclude_fields: vec!["_links".to_string()],
            sort_field: Some("date_created".to_string()),
            sort_dir: Some(SortDirection::Asc),
        };

        let query = render_query(&params);
        assert_eq!(query.get("count"), Some(&"10".to_string()));
        assert_eq!(query.get("exclude_fields"), Some(&"_links".to_string()));
        assert_eq!(query.get("sort_field"), Some(&"date_created".to_string()));
        assert_eq!(query.get("sort_dir"), Some(&"ASC".to_string()));
    }

    #[test]
    fn test_render_timestamp_and_flag() {
        use chrono::TimeZone;

        let ts = chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(render::timestamp(Some(ts)), "2024-05-01T12:00:00+00:00");
        assert_eq!(render::timestamp(None), "");
        assert_eq!(render::flag(Some(false)), "false");
        assert_eq!(render::flag(None), "");
    }

    #[test]
    fn test_map_providers() {
        let mut map = HashMap::new();
        map.insert("status".to_string(), "subscribed".to_string());
        map.insert("since".to_string(), String::new());

        let query = render_query(&map);
        assert_eq!(query.len(), 1);
        assert_eq!(query.get("status"), Some(&"subscribed".to_string()));
    }
}
