//! Optional scalar implementations, never registered automatically.

use crate::scalars::ScalarImpl;
use crate::Value;
use base64::Engine;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveTime;
use uuid::Uuid;

/// `UUID`: RFC 4122 UUIDs in their canonical hyphenated form.
pub fn uuid_scalar() -> ScalarImpl {
    ScalarImpl::from_parse_value(
        |value| match value {
            Value::String(s) => Uuid::parse_str(s)
                .map(|uuid| Value::String(uuid.hyphenated().to_string()))
                .map_err(|err| format!("invalid UUID: {err}")),
            other => Err(format!("UUID cannot represent {}", other.kind_name())),
        },
        |value| match value {
            Value::String(s) => Uuid::parse_str(s)
                .map(|uuid| Value::String(uuid.hyphenated().to_string()))
                .map_err(|err| format!("invalid UUID: {err}")),
            other => Err(format!("expected a UUID string, found {}", other.kind_name())),
        },
    )
}

/// `DateTime`: an ISO 8601 / RFC 3339 datetime with offset.
pub fn datetime_scalar() -> ScalarImpl {
    ScalarImpl::from_parse_value(
        |value| parse_datetime(value),
        |value| parse_datetime(value),
    )
}

fn parse_datetime(value: &Value) -> Result<Value, String> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| Value::String(dt.to_rfc3339()))
            .map_err(|err| format!("invalid DateTime: {err}")),
        other => Err(format!(
            "expected an ISO 8601 datetime string, found {}",
            other.kind_name(),
        )),
    }
}

/// `Date`: an ISO 8601 calendar date (`YYYY-MM-DD`).
pub fn date_scalar() -> ScalarImpl {
    ScalarImpl::from_parse_value(|value| parse_date(value), |value| parse_date(value))
}

fn parse_date(value: &Value) -> Result<Value, String> {
    match value {
        Value::String(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(|date| Value::String(date.format("%Y-%m-%d").to_string()))
            .map_err(|err| format!("invalid Date: {err}")),
        other => Err(format!(
            "expected an ISO 8601 date string, found {}",
            other.kind_name(),
        )),
    }
}

/// `Time`: an ISO 8601 time of day (`HH:MM:SS[.ffffff]`).
pub fn time_scalar() -> ScalarImpl {
    ScalarImpl::from_parse_value(|value| parse_time(value), |value| parse_time(value))
}

fn parse_time(value: &Value) -> Result<Value, String> {
    match value {
        Value::String(s) => s
            .parse::<NaiveTime>()
            .map(|time| Value::String(time.to_string()))
            .map_err(|err| format!("invalid Time: {err}")),
        other => Err(format!(
            "expected an ISO 8601 time string, found {}",
            other.kind_name(),
        )),
    }
}

/// `JSONString`: arbitrary JSON carried as a string. Parsing decodes the
/// string into a structured value; serializing encodes the value back.
pub fn json_string_scalar() -> ScalarImpl {
    ScalarImpl::from_parse_value(
        |value| {
            serde_json::to_string(value)
                .map(Value::String)
                .map_err(|err| format!("value is not JSON-serializable: {err}"))
        },
        |value| match value {
            Value::String(s) => serde_json::from_str::<serde_json::Value>(s)
                .map(Value::from)
                .map_err(|err| format!("invalid JSON string: {err}")),
            other => Err(format!(
                "expected a JSON-encoded string, found {}",
                other.kind_name(),
            )),
        },
    )
}

/// `Base64String`: standard-alphabet base64. Parsing decodes to the
/// underlying UTF-8 text; serializing encodes it back.
pub fn base64_scalar() -> ScalarImpl {
    ScalarImpl::from_parse_value(
        |value| match value {
            Value::String(s) => Ok(Value::String(
                base64::engine::general_purpose::STANDARD.encode(s.as_bytes()),
            )),
            other => Err(format!(
                "Base64String cannot represent {}",
                other.kind_name(),
            )),
        },
        |value| match value {
            Value::String(s) => {
                let bytes = base64::engine::general_purpose::STANDARD
                    .decode(s.as_bytes())
                    .map_err(|err| format!("invalid base64: {err}"))?;
                String::from_utf8(bytes)
                    .map(Value::String)
                    .map_err(|err| format!("base64 payload is not UTF-8: {err}"))
            }
            other => Err(format!(
                "expected a base64 string, found {}",
                other.kind_name(),
            )),
        },
    )
}

/// A string scalar constrained to match `pattern`.
///
/// Returns an error (rather than a scalar) when the pattern itself does
/// not compile.
pub fn regex_scalar(pattern: &str) -> Result<ScalarImpl, regex::Error> {
    let compiled = regex::Regex::new(pattern)?;
    let serialize_re = compiled.clone();
    Ok(ScalarImpl::from_parse_value(
        move |value| check_regex(&serialize_re, value),
        move |value| check_regex(&compiled, value),
    ))
}

fn check_regex(re: &regex::Regex, value: &Value) -> Result<Value, String> {
    match value {
        Value::String(s) if re.is_match(s) => Ok(Value::String(s.clone())),
        Value::String(s) => Err(format!("`{s}` does not match pattern `{re}`")),
        other => Err(format!("expected a string, found {}", other.kind_name())),
    }
}
