use serde_json::{Map, Value};

use crate::schema::{AttributeKind, ContentTypeModel, SchemaRegistry};

use super::error::QueryError;

/// Sanitizes a raw filter tree against the schema graph.
///
/// The contract is fail-closed: a filter key that names neither an attribute
/// nor a logical-operator list is rejected, never dropped. Password-typed
/// attributes are never filterable and are removed silently. Relation
/// filters are re-validated against the relation's target model, recursively,
/// bounded only by the depth of the filter itself.
pub struct FilterSanitizer<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> FilterSanitizer<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    pub fn sanitize(&self, filters: &Value, model: &ContentTypeModel) -> Result<Value, QueryError> {
        match filters {
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(self.sanitize(item, model)?);
                }
                Ok(Value::Array(out))
            }
            Value::Object(obj) => self.sanitize_object(obj, model).map(Value::Object),
            other => Err(QueryError::InvalidFilters(other.to_string())),
        }
    }

    fn sanitize_object(
        &self,
        obj: &Map<String, Value>,
        model: &ContentTypeModel,
    ) -> Result<Map<String, Value>, QueryError> {
        let mut out = Map::new();
        for (key, value) in obj {
            match model.attribute(key) {
                Some(attr) => match &attr.kind {
                    AttributeKind::Password => {
                        tracing::debug!("Dropped password filter on '{}.{}'", model.uid, key);
                    }
                    AttributeKind::Relation { target } => {
                        let target_model = self.registry.get(target)?;
                        let nested = self.sanitize(value, target_model)?;
                        if !is_empty_clause(&nested) {
                            out.insert(key.clone(), nested);
                        }
                    }
                    _ => {
                        out.insert(key.clone(), value.clone());
                    }
                },
                // Keys that name no attribute must be logical operators
                // holding a list of sub-clauses.
                None => {
                    let entries = value
                        .as_array()
                        .ok_or_else(|| QueryError::UnknownAttribute(key.clone()))?;
                    let kept = self.sanitize_operator_entries(entries, model)?;
                    if !kept.is_empty() {
                        out.insert(key.clone(), Value::Array(kept));
                    }
                }
            }
        }
        Ok(out)
    }

    fn sanitize_operator_entries(
        &self,
        entries: &[Value],
        model: &ContentTypeModel,
    ) -> Result<Vec<Value>, QueryError> {
        let mut kept = Vec::with_capacity(entries.len());
        for entry in entries {
            if is_empty_clause(entry) {
                continue;
            }
            let entry_obj = entry
                .as_object()
                .ok_or_else(|| QueryError::InvalidFilters(entry.to_string()))?;
            let cleaned = self.sanitize_object(entry_obj, model)?;
            if !cleaned.is_empty() {
                kept.push(Value::Object(cleaned));
            }
        }
        Ok(kept)
    }
}

/// `null`, `{}` and `[]` all count as empty; a clause that sanitized down to
/// one of these is dropped rather than passed along as a degenerate
/// always-true/always-false predicate.
fn is_empty_clause(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(obj) => obj.is_empty(),
        Value::Array(arr) => arr.is_empty(),
        _ => false,
    }
}

/// Sanitize `filters` against `model`, resolving relation targets through
/// `registry`.
pub fn convert_filters(
    filters: &Value,
    model: &ContentTypeModel,
    registry: &SchemaRegistry,
) -> Result<Value, QueryError> {
    FilterSanitizer::new(registry).sanitize(filters, model)
}
