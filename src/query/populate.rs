use std::collections::HashSet;

use serde_json::Value;

use crate::schema::{AttributeKind, ContentTypeModel, SchemaRegistry};

use super::error::QueryError;
use super::fields::convert_fields;
use super::filters::FilterSanitizer;
use super::sort::SortConverter;
use super::types::{NestedPopulate, PopulateSpec, PopulateValue};

pub struct PopulateConverter<'a> {
    model: &'a ContentTypeModel,
    registry: &'a SchemaRegistry,
}

impl<'a> PopulateConverter<'a> {
    pub fn new(model: &'a ContentTypeModel, registry: &'a SchemaRegistry) -> Self {
        Self { model, registry }
    }

    /// The bare string `"*"` is only a wildcard at the top level; inside a
    /// comma list or a deeper populate it stays a literal token.
    pub fn convert(&self, populate: &Value) -> Result<PopulateSpec, QueryError> {
        self.convert_at(populate, self.model, 0)
    }

    fn convert_at(
        &self,
        populate: &Value,
        model: &ContentTypeModel,
        depth: usize,
    ) -> Result<PopulateSpec, QueryError> {
        match populate {
            Value::String(s) if depth == 0 && s == "*" => Ok(PopulateSpec::All),
            Value::String(s) => Ok(PopulateSpec::Relations(split_relations([s.as_str()]))),
            Value::Array(arr) => {
                let mut tokens = Vec::with_capacity(arr.len());
                for element in arr {
                    let s = element
                        .as_str()
                        .ok_or_else(|| QueryError::InvalidPopulate(element.to_string()))?;
                    tokens.push(s);
                }
                Ok(PopulateSpec::Relations(split_relations(tokens)))
            }
            Value::Object(obj) => {
                let mut tree = Vec::with_capacity(obj.len());
                for (key, value) in obj {
                    let attr = model
                        .attribute(key)
                        .ok_or_else(|| QueryError::UnknownAttribute(key.clone()))?;
                    let target = match &attr.kind {
                        AttributeKind::Relation { target } => Some(self.registry.get(target)?),
                        AttributeKind::Component { component, .. } => {
                            Some(self.registry.get(component)?)
                        }
                        // Each entry carries its own model; there is no
                        // single target to scope a nested query against.
                        AttributeKind::DynamicZone { .. } => None,
                        other => {
                            return Err(QueryError::InvalidPopulate(format!(
                                "'{}' is a {} attribute and cannot be populated",
                                key,
                                other.type_name()
                            )))
                        }
                    };
                    tree.push((key.clone(), self.convert_nested(value, target, depth)?));
                }
                Ok(PopulateSpec::Tree(tree))
            }
            other => Err(QueryError::InvalidPopulate(other.to_string())),
        }
    }

    fn convert_nested(
        &self,
        value: &Value,
        target: Option<&ContentTypeModel>,
        depth: usize,
    ) -> Result<PopulateValue, QueryError> {
        match value {
            Value::String(s) if s == "*" => Ok(PopulateValue::Enabled(true)),
            Value::Bool(b) => Ok(PopulateValue::Enabled(*b)),
            Value::Object(obj) => {
                let Some(target) = target else {
                    return Err(QueryError::InvalidPopulate(
                        "dynamic zones only accept boolean or '*' populate values".to_string(),
                    ));
                };
                let mut nested = NestedPopulate::default();
                if let Some(sort) = obj.get("sort") {
                    nested.sort = Some(SortConverter::convert(sort)?);
                }
                if let Some(filters) = obj.get("filters") {
                    nested.filters =
                        Some(FilterSanitizer::new(self.registry).sanitize(filters, target)?);
                }
                if let Some(fields) = obj.get("fields") {
                    nested.fields = convert_fields(fields, &target.primary_key)?;
                }
                if let Some(populate) = obj.get("populate") {
                    nested.populate = Some(self.convert_at(populate, target, depth + 1)?);
                }
                if let Some(count) = obj.get("count") {
                    nested.count = Some(
                        count
                            .as_bool()
                            .ok_or_else(|| QueryError::InvalidPopulate(count.to_string()))?,
                    );
                }
                Ok(PopulateValue::Nested(Box::new(nested)))
            }
            other => Err(QueryError::InvalidPopulate(other.to_string())),
        }
    }
}

fn split_relations<'s>(parts: impl IntoIterator<Item = &'s str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for part in parts {
        for token in part.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            if seen.insert(token.to_string()) {
                out.push(token.to_string());
            }
        }
    }
    out
}
