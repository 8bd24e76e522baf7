use std::collections::HashSet;

use serde_json::Value;

use super::error::QueryError;

/// Field selection. `None` means no restriction (all fields).
///
/// The primary key is always part of a restricted selection: storage and
/// serialization layers need it to address records, so a client cannot
/// deselect it.
pub fn convert_fields(fields: &Value, primary_key: &str) -> Result<Option<Vec<String>>, QueryError> {
    // The wildcard is only honored as the bare top-level string.
    if fields.as_str() == Some("*") {
        return Ok(None);
    }

    let mut selected = vec![primary_key.to_string()];
    collect(fields, &mut selected)?;

    let mut seen = HashSet::new();
    let deduped = selected.into_iter().filter(|f| seen.insert(f.clone())).collect();
    Ok(Some(deduped))
}

fn collect(fields: &Value, out: &mut Vec<String>) -> Result<(), QueryError> {
    match fields {
        Value::String(s) => {
            for token in s.split(',') {
                let token = token.trim();
                if token.is_empty() {
                    return Err(QueryError::InvalidFields(format!("empty field in '{}'", s)));
                }
                out.push(token.to_string());
            }
            Ok(())
        }
        Value::Array(arr) => {
            for element in arr {
                collect(element, out)?;
            }
            Ok(())
        }
        other => Err(QueryError::InvalidFields(other.to_string())),
    }
}
