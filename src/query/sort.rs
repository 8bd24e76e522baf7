use serde_json::Value;

use super::error::QueryError;
use super::types::{SortEntry, SortOrder, SortSpec};

pub struct SortConverter;

impl SortConverter {
    /// Accepts the string form (`"name:asc,age:desc"`), an array of string
    /// or object elements, or a plain object. Nested objects express deep
    /// sort on a relation path and flatten to dotted fields.
    pub fn convert(sort: &Value) -> Result<SortSpec, QueryError> {
        match sort {
            Value::String(s) => Self::parse_sort_string(s),
            Value::Array(arr) => {
                let mut out = Vec::new();
                for element in arr {
                    match element {
                        Value::String(s) => out.extend(Self::parse_sort_string(s)?),
                        Value::Object(_) => out.extend(Self::convert(element)?),
                        other => return Err(QueryError::InvalidSort(other.to_string())),
                    }
                }
                Ok(out)
            }
            Value::Object(obj) => {
                let mut out = Vec::new();
                for (key, value) in obj {
                    if value.is_object() {
                        for entry in Self::convert(value)? {
                            out.push(SortEntry {
                                field: format!("{}.{}", key, entry.field),
                                order: entry.order,
                            });
                        }
                    } else {
                        out.push(SortEntry {
                            field: key.clone(),
                            order: Self::parse_order_value(value)?,
                        });
                    }
                }
                Ok(out)
            }
            other => Err(QueryError::InvalidSort(other.to_string())),
        }
    }

    fn parse_sort_string(s: &str) -> Result<SortSpec, QueryError> {
        let mut out = Vec::new();
        for token in s.split(',') {
            let token = token.trim();
            let (field, order) = match token.split_once(':') {
                Some((field, order)) => (field, Self::parse_order_token(order)?),
                None => (token, SortOrder::Asc),
            };
            if field.is_empty() {
                return Err(QueryError::InvalidSort(format!("empty field in '{}'", s)));
            }
            out.push(SortEntry { field: field.to_string(), order });
        }
        Ok(out)
    }

    fn parse_order_value(value: &Value) -> Result<SortOrder, QueryError> {
        match value.as_str() {
            Some(s) => Self::parse_order_token(s),
            None => Err(QueryError::InvalidOrder(value.to_string())),
        }
    }

    fn parse_order_token(order: &str) -> Result<SortOrder, QueryError> {
        if order.eq_ignore_ascii_case("asc") {
            Ok(SortOrder::Asc)
        } else if order.eq_ignore_ascii_case("desc") {
            Ok(SortOrder::Desc)
        } else {
            Err(QueryError::InvalidOrder(order.to_string()))
        }
    }
}
