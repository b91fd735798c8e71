//! Explicit field extraction for entity normalization
//!
//! Every helper takes the entity type name so errors point at the payload
//! that broke the contract.

use crate::core::error::NormalizeError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};

/// View a payload as a JSON object
pub fn as_object<'a>(
    entity_type: &str,
    value: &'a Value,
) -> Result<&'a Map<String, Value>, NormalizeError> {
    value.as_object().ok_or_else(|| NormalizeError::UnexpectedShape {
        entity_type: entity_type.to_string(),
        expected: "object",
    })
}

/// View a payload as a JSON array
pub fn as_array<'a>(entity_type: &str, value: &'a Value) -> Result<&'a Vec<Value>, NormalizeError> {
    value.as_array().ok_or_else(|| NormalizeError::UnexpectedShape {
        entity_type: entity_type.to_string(),
        expected: "array",
    })
}

fn present<'a>(obj: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    obj.get(field).filter(|v| !v.is_null())
}

fn required<'a>(
    entity_type: &str,
    obj: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a Value, NormalizeError> {
    present(obj, field).ok_or_else(|| NormalizeError::MissingField {
        entity_type: entity_type.to_string(),
        field: field.to_string(),
    })
}

fn invalid(entity_type: &str, field: &str, expected: &'static str) -> NormalizeError {
    NormalizeError::InvalidType {
        entity_type: entity_type.to_string(),
        field: field.to_string(),
        expected,
    }
}

/// Required integer identifier
pub fn id_field(
    entity_type: &str,
    obj: &Map<String, Value>,
    field: &str,
) -> Result<i64, NormalizeError> {
    required(entity_type, obj, field)?
        .as_i64()
        .ok_or_else(|| invalid(entity_type, field, "an integer"))
}

/// Required string
pub fn string_field(
    entity_type: &str,
    obj: &Map<String, Value>,
    field: &str,
) -> Result<String, NormalizeError> {
    required(entity_type, obj, field)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(entity_type, field, "a string"))
}

/// Optional string; missing and `null` both map to `None`
pub fn opt_string_field(
    entity_type: &str,
    obj: &Map<String, Value>,
    field: &str,
) -> Result<Option<String>, NormalizeError> {
    present(obj, field)
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid(entity_type, field, "a string"))
        })
        .transpose()
}

/// Required number; numeric strings are accepted
pub fn number_field(
    entity_type: &str,
    obj: &Map<String, Value>,
    field: &str,
) -> Result<f64, NormalizeError> {
    let value = required(entity_type, obj, field)?;
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        .ok_or_else(|| invalid(entity_type, field, "a number"))
}

/// Required nested object
pub fn object_field<'a>(
    entity_type: &str,
    obj: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a Value, NormalizeError> {
    let value = required(entity_type, obj, field)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(invalid(entity_type, field, "an object"))
    }
}

/// Optional date-time; missing and `null` both map to `None`
pub fn opt_datetime_field(
    entity_type: &str,
    obj: &Map<String, Value>,
    field: &str,
) -> Result<Option<DateTime<Utc>>, NormalizeError> {
    let Some(value) = present(obj, field) else {
        return Ok(None);
    };
    let raw = value
        .as_str()
        .ok_or_else(|| invalid(entity_type, field, "a date-time string"))?;
    if raw.is_empty() {
        return Ok(None);
    }
    parse_datetime(raw)
        .map(Some)
        .ok_or_else(|| NormalizeError::InvalidDateTime {
            entity_type: entity_type.to_string(),
            field: field.to_string(),
            value: raw.to_string(),
        })
}

/// Parse RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.f]` (UTC) or `YYYY-MM-DD` (midnight UTC)
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
