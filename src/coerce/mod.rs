use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde_json::{Number, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::schema::AttributeKind;

#[derive(Debug, Error)]
pub enum CoercionError {
    #[error("Expected {expected}, got: {value}")]
    InvalidType { expected: &'static str, value: String },
}

impl CoercionError {
    fn new(expected: &'static str, value: &Value) -> Self {
        Self::InvalidType { expected, value: value.to_string() }
    }
}

pub fn parse_boolean(value: &Value) -> Result<bool, CoercionError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(CoercionError::new("a boolean", value)),
        },
        _ => Err(CoercionError::new("a boolean", value)),
    }
}

pub fn parse_integer(value: &Value) -> Result<i64, CoercionError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| {
                // Accept floats with no fractional part
                n.as_f64()
                    .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
                    .map(|f| f as i64)
            })
            .ok_or_else(|| CoercionError::new("an integer", value)),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| CoercionError::new("an integer", value)),
        _ => Err(CoercionError::new("an integer", value)),
    }
}

pub fn parse_float(value: &Value) -> Result<f64, CoercionError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|f| f.is_finite())
        .ok_or_else(|| CoercionError::new("a number", value))
}

pub fn parse_decimal(value: &Value) -> Result<Decimal, CoercionError> {
    let parsed = match value {
        Value::Number(n) => n.to_string().parse::<Decimal>().ok(),
        Value::String(s) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| CoercionError::new("a decimal", value))
}

pub fn parse_date(value: &Value) -> Result<NaiveDate, CoercionError> {
    value
        .as_str()
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .ok_or_else(|| CoercionError::new("an ISO 8601 date", value))
}

pub fn parse_datetime(value: &Value) -> Result<DateTime<Utc>, CoercionError> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| CoercionError::new("an RFC 3339 datetime", value)),
        // Epoch milliseconds
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .ok_or_else(|| CoercionError::new("an RFC 3339 datetime", value)),
        _ => Err(CoercionError::new("an RFC 3339 datetime", value)),
    }
}

pub fn parse_time(value: &Value) -> Result<NaiveTime, CoercionError> {
    value
        .as_str()
        .and_then(|s| NaiveTime::parse_from_str(s, "%H:%M:%S%.f").ok())
        .ok_or_else(|| CoercionError::new("a time of day", value))
}

pub fn parse_timestamp(value: &Value) -> Result<i64, CoercionError> {
    parse_integer(value).map_err(|_| CoercionError::new("a unix timestamp", value))
}

pub fn parse_uuid(value: &Value) -> Result<Uuid, CoercionError> {
    value
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| CoercionError::new("a uuid", value))
}

/// Normalize a raw value into the canonical JSON form for the attribute
/// kind. Null passes through for every kind; nullability is a validation
/// concern, not a typing one.
pub fn coerce(kind: &AttributeKind, value: &Value) -> Result<Value, CoercionError> {
    if value.is_null() {
        return Ok(Value::Null);
    }
    match kind {
        AttributeKind::Boolean => parse_boolean(value).map(Value::Bool),
        AttributeKind::Integer | AttributeKind::BigInteger => {
            parse_integer(value).map(|n| Value::Number(n.into()))
        }
        AttributeKind::Float => parse_float(value).map(|f| {
            // Finite by construction
            Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
        }),
        AttributeKind::Decimal => parse_decimal(value).map(|d| Value::String(d.to_string())),
        AttributeKind::Date => {
            parse_date(value).map(|d| Value::String(d.format("%Y-%m-%d").to_string()))
        }
        AttributeKind::Datetime => parse_datetime(value).map(|dt| Value::String(dt.to_rfc3339())),
        AttributeKind::Time => {
            parse_time(value).map(|t| Value::String(t.format("%H:%M:%S%.3f").to_string()))
        }
        AttributeKind::Timestamp => parse_timestamp(value).map(|n| Value::Number(n.into())),
        AttributeKind::Uuid => parse_uuid(value).map(|u| Value::String(u.to_string())),
        AttributeKind::String
        | AttributeKind::Text
        | AttributeKind::RichText
        | AttributeKind::Email
        | AttributeKind::Password => value
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| CoercionError::new("a string", value)),
        AttributeKind::Enumeration { values } => {
            let s = value
                .as_str()
                .ok_or_else(|| CoercionError::new("an enumeration value", value))?;
            if !values.is_empty() && !values.iter().any(|v| v == s) {
                return Err(CoercionError::new("one of the enumeration values", value));
            }
            Ok(Value::String(s.to_string()))
        }
        // Structured kinds are not coerced here; traversal owns their shape.
        AttributeKind::Json
        | AttributeKind::Relation { .. }
        | AttributeKind::Component { .. }
        | AttributeKind::DynamicZone { .. } => Ok(value.clone()),
    }
}
