//! Field-name normalization for loosely typed records.
//!
//! Upstream sources disagree on casing: the storefront API and persisted
//! snapshots use `snake_case` (`image_url`), while records serialized
//! straight from backend models use `UpperCamelCase` (`ImageURL`). Each
//! canonical field is paired with its alternate spelling in a [`FieldAlias`]
//! and read through [`RawRecord`], which prefers the canonical name and falls
//! back to the alternate one.
//!
//! Optional fields fail closed: a field that is absent, `null`, or of the
//! wrong type yields its default instead of an error.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde_json::{Map, Value};

use crate::error::CommerceError;

/// A canonical field name and its alternate spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAlias {
    /// `snake_case` name used by canonical records.
    pub canonical: &'static str,
    /// `UpperCamelCase` name used by some upstream sources.
    pub alternate: &'static str,
}

impl FieldAlias {
    pub const fn new(canonical: &'static str, alternate: &'static str) -> Self {
        Self {
            canonical,
            alternate,
        }
    }
}

/// Read-only view over a JSON object with alias-aware typed accessors.
#[derive(Debug, Clone, Copy)]
pub struct RawRecord<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> RawRecord<'a> {
    /// Wrap a JSON value, which must be an object.
    pub fn from_value(value: &'a Value, record: &'static str) -> Result<Self, CommerceError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(CommerceError::InvalidField {
                field: record,
                reason: format!("expected an object, got {}", json_kind(other)),
            }),
        }
    }

    /// Look up a field, preferring the canonical name.
    ///
    /// A canonical field holding `null` counts as absent.
    pub fn lookup(&self, alias: FieldAlias) -> Option<&'a Value> {
        [alias.canonical, alias.alternate]
            .into_iter()
            .filter_map(|name| self.fields.get(name))
            .find(|value| !value.is_null())
    }

    /// String field, `""` when unusable.
    pub fn string(&self, alias: FieldAlias) -> String {
        self.opt_string(alias).unwrap_or_default()
    }

    /// Optional string field.
    pub fn opt_string(&self, alias: FieldAlias) -> Option<String> {
        self.lookup(alias)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// Boolean field, `false` when unusable.
    pub fn bool(&self, alias: FieldAlias) -> bool {
        self.lookup(alias).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Signed integer field, `0` when unusable.
    pub fn i64(&self, alias: FieldAlias) -> i64 {
        self.lookup(alias).and_then(as_whole_i64).unwrap_or(0)
    }

    /// Optional unsigned integer field.
    pub fn opt_u64(&self, alias: FieldAlias) -> Option<u64> {
        self.lookup(alias).and_then(as_whole_u64)
    }

    /// Optional RFC 3339 timestamp field.
    pub fn opt_timestamp(&self, alias: FieldAlias) -> Option<DateTime<FixedOffset>> {
        self.lookup(alias)
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
    }

    /// Optional calendar date field.
    ///
    /// Accepts a plain `YYYY-MM-DD` date, which is what the backend sends,
    /// or an RFC 3339 timestamp, which keeps the date in its own offset.
    pub fn opt_date(&self, alias: FieldAlias) -> Option<NaiveDate> {
        let s = self.lookup(alias).and_then(Value::as_str)?.trim();
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|ts| ts.date_naive()))
    }

    /// Required unsigned integer field.
    pub fn require_u64(&self, alias: FieldAlias) -> Result<u64, CommerceError> {
        let value = self
            .lookup(alias)
            .ok_or(CommerceError::MissingField(alias.canonical))?;
        as_whole_u64(value).ok_or_else(|| CommerceError::InvalidField {
            field: alias.canonical,
            reason: format!("expected a non-negative integer, got {}", value),
        })
    }

    /// Required finite number field.
    pub fn require_f64(&self, alias: FieldAlias) -> Result<f64, CommerceError> {
        let value = self
            .lookup(alias)
            .ok_or(CommerceError::MissingField(alias.canonical))?;
        value
            .as_f64()
            .filter(|n| n.is_finite())
            .ok_or_else(|| CommerceError::InvalidField {
                field: alias.canonical,
                reason: format!("expected a number, got {}", value),
            })
    }
}

// JS has one number type, so `3.0` is a legitimate integer on the wire.
fn as_whole_u64(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n < u64::MAX as f64)
            .map(|n| n as u64)
    })
}

fn as_whole_i64(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|n| n.fract() == 0.0 && *n >= i64::MIN as f64 && *n < i64::MAX as f64)
            .map(|n| n as i64)
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NAME: FieldAlias = FieldAlias::new("name", "Name");
    const ID: FieldAlias = FieldAlias::new("id", "ID");

    #[test]
    fn test_prefers_canonical() {
        let value = json!({"name": "Kale", "Name": "KALE"});
        let record = RawRecord::from_value(&value, "product").unwrap();
        assert_eq!(record.string(NAME), "Kale");
    }

    #[test]
    fn test_falls_back_to_alternate() {
        let value = json!({"Name": "Kale"});
        let record = RawRecord::from_value(&value, "product").unwrap();
        assert_eq!(record.string(NAME), "Kale");
    }

    #[test]
    fn test_null_canonical_falls_back() {
        let value = json!({"name": null, "Name": "Kale"});
        let record = RawRecord::from_value(&value, "product").unwrap();
        assert_eq!(record.string(NAME), "Kale");
    }

    #[test]
    fn test_optional_fields_fail_closed() {
        let value = json!({"name": 12});
        let record = RawRecord::from_value(&value, "product").unwrap();
        assert_eq!(record.string(NAME), "");
        assert_eq!(record.opt_u64(ID), None);
        assert!(!record.bool(NAME));
    }

    #[test]
    fn test_require_missing_and_invalid() {
        let value = json!({"ID": "seven"});
        let record = RawRecord::from_value(&value, "product").unwrap();
        assert!(matches!(
            record.require_u64(ID),
            Err(CommerceError::InvalidField { field: "id", .. })
        ));
        assert!(matches!(
            record.require_f64(FieldAlias::new("price", "Price")),
            Err(CommerceError::MissingField("price"))
        ));
    }

    #[test]
    fn test_whole_float_accepted_as_integer() {
        let value = json!({"id": 3.0});
        let record = RawRecord::from_value(&value, "product").unwrap();
        assert_eq!(record.require_u64(ID).unwrap(), 3);

        let value = json!({"id": 3.5});
        let record = RawRecord::from_value(&value, "product").unwrap();
        assert!(record.require_u64(ID).is_err());
    }

    #[test]
    fn test_non_object_rejected() {
        let value = json!([1, 2]);
        assert!(RawRecord::from_value(&value, "product").is_err());
    }

    #[test]
    fn test_timestamp_parsing() {
        let alias = FieldAlias::new("harvest_date", "HarvestDate");
        let value = json!({"HarvestDate": "2025-03-01T06:00:00+07:00"});
        let record = RawRecord::from_value(&value, "product").unwrap();
        let ts = record.opt_timestamp(alias).unwrap();
        assert_eq!(ts.to_rfc3339(), "2025-03-01T06:00:00+07:00");

        let value = json!({"harvest_date": "next tuesday"});
        let record = RawRecord::from_value(&value, "product").unwrap();
        assert!(record.opt_timestamp(alias).is_none());
    }

    #[test]
    fn test_date_parsing() {
        let alias = FieldAlias::new("harvest_date", "HarvestDate");
        let expected = NaiveDate::from_ymd_opt(2025, 3, 1);

        let value = json!({"harvest_date": "2025-03-01"});
        let record = RawRecord::from_value(&value, "product").unwrap();
        assert_eq!(record.opt_date(alias), expected);

        let value = json!({"HarvestDate": "2025-03-01T23:30:00+07:00"});
        let record = RawRecord::from_value(&value, "product").unwrap();
        assert_eq!(record.opt_date(alias), expected);

        let value = json!({"harvest_date": "01/03/2025"});
        let record = RawRecord::from_value(&value, "product").unwrap();
        assert_eq!(record.opt_date(alias), None);
    }
}
