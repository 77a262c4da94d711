//! Types shared by several resources.
//!
//! - [`Address`], [`Contact`] and [`MemberLocation`] upper-case their
//!   `country_code` when serialized
//! - [`timestamp`] decodes the service's optional RFC 3339 strings, where an
//!   empty string means "not set"

use serde::{Deserialize, Serialize, Serializer};

/// Serializes a country code in upper case.
#[allow(clippy::ptr_arg)]
pub(crate) fn upper_case<S: Serializer>(code: &String, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&code.to_uppercase())
}

/// A postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    /// First address line.
    pub address1: String,
    /// Second address line.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address2: String,
    /// City.
    pub city: String,
    /// State, province or region.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub province: String,
    /// State or province code.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub province_code: String,
    /// Postal code.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub postal_code: String,
    /// Country name.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub country: String,
    /// Two-letter ISO 3166 country code.
    #[serde(serialize_with = "upper_case")]
    pub country_code: String,
}

/// Contact information shown in the footer of list emails (CAN-SPAM).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    /// The company name for the list.
    pub company: String,
    /// First address line.
    pub address1: String,
    /// Second address line.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address2: String,
    /// City.
    pub city: String,
    /// State or province.
    pub state: String,
    /// Postal code.
    pub zip: String,
    /// Two-letter ISO 3166 country code.
    #[serde(serialize_with = "upper_case")]
    pub country: String,
    /// Phone number.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,
}

/// Geographic location of a list member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberLocation {
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
    /// Offset from GMT, in hours.
    #[serde(rename = "gmtoff")]
    pub gmt_offset: i32,
    /// Offset for daylight saving time, in hours.
    #[serde(rename = "dstoff")]
    pub dst_offset: i32,
    /// Two-letter ISO 3166 country code.
    #[serde(serialize_with = "upper_case")]
    pub country_code: String,
    /// Time zone name.
    pub timezone: String,
}

/// Optional RFC 3339 timestamps.
///
/// Use with `#[serde(default, with = "timestamp")]` on an
/// `Option<DateTime<Utc>>` field. `null`, a missing field and `""` all decode
/// as `None`.
pub mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes `Some` as RFC 3339 and `None` as `null`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional timestamp, mapping `""` to `None`.
    ///
    /// # Errors
    ///
    /// Returns a deserializer error for a non-empty string that is not RFC 3339.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => DateTime::parse_from_rfc3339(s)
                .map(|ts| Some(ts.with_timezone(&Utc)))
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::json;

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Stamped {
        #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_address_upper_cases_country_code() {
        let address = Address {
            address1: "675 Ponce de Leon Ave NE".to_string(),
            city: "Atlanta".to_string(),
            country_code: "us".to_string(),
            ..Default::default()
        };

        let value = serde_json::to_value(&address).unwrap();
        assert_eq!(value["country_code"], "US");
        assert!(value.get("address2").is_none());
    }

    #[test]
    fn test_member_location_upper_cases_country_code() {
        let location = MemberLocation {
            country_code: "de".to_string(),
            ..Default::default()
        };

        let value = serde_json::to_value(&location).unwrap();
        assert_eq!(value["country_code"], "DE");
        assert_eq!(value["gmtoff"], 0);
    }

    #[test]
    fn test_contact_upper_cases_country() {
        let contact = Contact {
            company: "Acme".to_string(),
            country: "gb".to_string(),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&contact).unwrap()["country"], "GB");
    }

    #[test]
    fn test_decoding_keeps_country_code_as_received() {
        let location: MemberLocation = serde_json::from_value(json!({"country_code": "fr"})).unwrap();
        assert_eq!(location.country_code, "fr");
    }

    #[test]
    fn test_timestamp_empty_string_is_none() {
        let stamped: Stamped = serde_json::from_value(json!({"at": ""})).unwrap();
        assert!(stamped.at.is_none());

        let stamped: Stamped = serde_json::from_value(json!({"at": null})).unwrap();
        assert!(stamped.at.is_none());

        let stamped: Stamped = serde_json::from_value(json!({})).unwrap();
        assert!(stamped.at.is_none());
    }

    #[test]
    fn test_timestamp_parses_offset_and_normalizes_to_utc() {
        let stamped: Stamped =
            serde_json::from_value(json!({"at": "2024-03-01T10:00:00+02:00"})).unwrap();
        assert_eq!(
            stamped.at,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_timestamp_rejects_garbage() {
        let result: Result<Stamped, _> = serde_json::from_value(json!({"at": "yesterday"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_timestamp_serializes_rfc3339() {
        let stamped = Stamped {
            at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()),
        };
        assert_eq!(
            serde_json::to_value(&stamped).unwrap(),
            json!({"at": "2024-03-01T08:00:00+00:00"})
        );
    }
}
