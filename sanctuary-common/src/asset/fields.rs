//! Per-field validation rules
//!
//! Single source of truth for what each sound asset field accepts. The same
//! functions run at construction, on every setter, on raw assignment and
//! when loading stored rows.

use crate::error::ValidationError;
use crate::source_type::SourceType;
use crate::tags::normalize_tag_values;
use crate::uuid_utils;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

/// Default playback volume factor
pub const DEFAULT_VOLUME: f64 = 1.0;

/// Field names in validation order
pub const FIELD_NAMES: &[&str] = &[
    "id",
    "name",
    "source_type",
    "file_path",
    "duration_ms",
    "description",
    "tags",
    "loopable",
    "default_volume",
];

/// Name must not be empty or whitespace-only; stored trimmed
pub fn validate_name(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("name", "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Source type text must name one of the variants (any casing)
pub fn validate_source_type(value: &str) -> Result<SourceType, ValidationError> {
    value.parse()
}

/// File path must not be blank; stored trimmed, never resolved here
pub fn validate_file_path(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("file_path", "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Duration must be strictly positive
pub fn validate_duration_ms(value: i64) -> Result<i64, ValidationError> {
    if value <= 0 {
        return Err(ValidationError::new(
            "duration_ms",
            format!("must be greater than 0, got {}", value),
        ));
    }
    Ok(value)
}

/// Volume must fall within `[0.0, 1.0]`; NaN is out of range
pub fn validate_default_volume(value: f64) -> Result<f64, ValidationError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ValidationError::new(
            "default_volume",
            format!("must be between 0.0 and 1.0, got {}", value),
        ));
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// Raw (JSON) values
// ---------------------------------------------------------------------------

/// Fetch a required entry from a raw field mapping
///
/// A missing key and an explicit `null` are both treated as absent.
pub(crate) fn required<'a>(
    fields: &'a serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value, ValidationError> {
    match fields.get(field) {
        None | Some(Value::Null) => Err(ValidationError::new(field, "is required")),
        Some(value) => Ok(value),
    }
}

/// Fetch an optional entry; `null` counts as absent
pub(crate) fn optional<'a>(
    fields: &'a serde_json::Map<String, Value>,
    field: &str,
) -> Option<&'a Value> {
    fields.get(field).filter(|v| !v.is_null())
}

fn expect_str<'a>(field: &'static str, value: &'a Value) -> Result<&'a str, ValidationError> {
    value
        .as_str()
        .ok_or_else(|| ValidationError::new(field, format!("must be text, got {}", type_name(value))))
}

pub(crate) fn id_from_value(value: &Value) -> Result<Uuid, ValidationError> {
    let s = expect_str("id", value)?;
    uuid_utils::parse(s).map_err(|_| ValidationError::new("id", format!("{:?} is not a valid UUID", s)))
}

pub(crate) fn name_from_value(value: &Value) -> Result<String, ValidationError> {
    validate_name(expect_str("name", value)?)
}

pub(crate) fn source_type_from_value(value: &Value) -> Result<SourceType, ValidationError> {
    validate_source_type(expect_str("source_type", value)?)
}

pub(crate) fn file_path_from_value(value: &Value) -> Result<String, ValidationError> {
    validate_file_path(expect_str("file_path", value)?)
}

pub(crate) fn duration_ms_from_value(value: &Value) -> Result<i64, ValidationError> {
    let not_integer = || {
        ValidationError::new("duration_ms", format!("must be an integer, got {}", value))
    };
    let out_of_range = || {
        ValidationError::new(
            "duration_ms",
            format!("{} is out of range for a millisecond count", value),
        )
    };

    let Value::Number(n) = value else {
        return Err(not_integer());
    };
    if let Some(ms) = n.as_i64() {
        return validate_duration_ms(ms);
    }
    if n.is_u64() {
        return Err(out_of_range());
    }
    match n.as_f64() {
        // Integral floats (45000.0) are accepted; fractional ones are not
        Some(f) if f.fract() == 0.0 => {
            if f >= i64::MIN as f64 && f < i64::MAX as f64 {
                validate_duration_ms(f as i64)
            } else {
                Err(out_of_range())
            }
        }
        _ => Err(not_integer()),
    }
}

pub(crate) fn description_from_value(value: &Value) -> Result<Option<String>, ValidationError> {
    match value {
        Value::Null => Ok(None),
        other => Ok(Some(expect_str("description", other)?.to_string())),
    }
}

/// Tags never fail: a lone string counts as a single tag, anything else that
/// is not a list contributes nothing
pub(crate) fn tags_from_value(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => normalize_tag_values(items),
        Value::String(_) => normalize_tag_values(std::slice::from_ref(value)),
        Value::Null => Vec::new(),
        other => {
            debug!("Ignoring tags value of type {}", type_name(other));
            Vec::new()
        }
    }
}

pub(crate) fn loopable_from_value(value: &Value) -> Result<bool, ValidationError> {
    value.as_bool().ok_or_else(|| {
        ValidationError::new("loopable", format!("must be a boolean, got {}", type_name(value)))
    })
}

pub(crate) fn default_volume_from_value(value: &Value) -> Result<f64, ValidationError> {
    let v = value.as_f64().ok_or_else(|| {
        ValidationError::new("default_volume", format!("must be a number, got {}", type_name(value)))
    })?;
    validate_default_volume(v)
}

/// JSON type name for error messages
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "text",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_name_rules() {
        assert_eq!(validate_name("  Heavy Rain ").unwrap(), "Heavy Rain");
        assert!(validate_name("").is_err());
        assert!(validate_name(" \t\n").is_err());
    }

    #[test]
    fn test_duration_boundaries() {
        assert!(validate_duration_ms(0).is_err());
        assert!(validate_duration_ms(-1).is_err());
        assert_eq!(validate_duration_ms(1).unwrap(), 1);
    }

    #[test]
    fn test_volume_boundaries() {
        assert_eq!(validate_default_volume(0.0).unwrap(), 0.0);
        assert_eq!(validate_default_volume(1.0).unwrap(), 1.0);
        assert!(validate_default_volume(1.01).is_err());
        assert!(validate_default_volume(-0.01).is_err());
        assert!(validate_default_volume(f64::NAN).is_err());
        assert!(validate_default_volume(f64::INFINITY).is_err());
    }

    #[test]
    fn test_file_path_rules() {
        assert_eq!(
            validate_file_path(" natural/rain.wav ").unwrap(),
            "natural/rain.wav"
        );
        assert!(validate_file_path("   ").is_err());
    }

    #[test]
    fn test_duration_from_value_types() {
        assert_eq!(duration_ms_from_value(&json!(45000)).unwrap(), 45000);
        assert_eq!(duration_ms_from_value(&json!(45000.0)).unwrap(), 45000);
        assert!(duration_ms_from_value(&json!(1.5)).is_err());
        assert!(duration_ms_from_value(&json!("45000")).is_err());
        assert!(duration_ms_from_value(&json!(-5)).is_err());
    }

    #[test]
    fn test_duration_beyond_i64_is_out_of_range() {
        let err = duration_ms_from_value(&json!(u64::MAX)).unwrap_err();
        assert_eq!(err.field, "duration_ms");
        assert!(err.message.contains("out of range"), "{}", err.message);

        let err = duration_ms_from_value(&json!(1.0e20)).unwrap_err();
        assert!(err.message.contains("out of range"), "{}", err.message);

        let err = duration_ms_from_value(&json!(1.5)).unwrap_err();
        assert!(err.message.contains("must be an integer"), "{}", err.message);
    }

    #[test]
    fn test_tags_from_value_never_fails() {
        assert_eq!(tags_from_value(&json!(["A", 1, "a"])), vec!["a"]);
        assert_eq!(tags_from_value(&json!("Rain")), vec!["rain"]);
        assert!(tags_from_value(&json!(7)).is_empty());
        assert!(tags_from_value(&json!({"k": "v"})).is_empty());
        assert!(tags_from_value(&Value::Null).is_empty());
    }

    #[test]
    fn test_type_errors_name_field() {
        let err = name_from_value(&json!(12)).unwrap_err();
        assert_eq!(err.field, "name");
        assert!(err.message.contains("number"));

        let err = loopable_from_value(&json!("yes")).unwrap_err();
        assert_eq!(err.field, "loopable");

        let err = id_from_value(&json!("zzz")).unwrap_err();
        assert_eq!(err.field, "id");
    }
}
