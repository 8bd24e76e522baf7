use futures::future::{try_join_all, BoxFuture};
use futures::FutureExt;
use serde_json::{Map, Value};

use crate::schema::{AttributeKind, ContentTypeModel, SchemaRegistry, COMPONENT_REF};

use super::error::TraverseError;
use super::visitor::{AttributeNode, Visitor, VisitorOutput};

/// Apply `visitor` to every attribute of `value` under `schema`.
///
/// Component and dynamic-zone values are descended into with their own
/// models; relation values are left to visitors that know about relations.
/// An array input is a bulk of independent entities: elements are processed
/// in parallel and collected in input order.
pub async fn traverse(
    visitor: &dyn Visitor,
    value: Value,
    schema: &ContentTypeModel,
    registry: &SchemaRegistry,
) -> Result<Value, TraverseError> {
    match value {
        Value::Array(items) => {
            let futures = items
                .into_iter()
                .map(|item| traverse_entity(visitor, item, schema, registry));
            Ok(Value::Array(try_join_all(futures).await?))
        }
        other => traverse_entity(visitor, other, schema, registry).await,
    }
}

/// Run several visitors as a left-to-right pipeline: the output entity of
/// one is the input of the next. Bulk inputs fan out like `traverse`.
pub async fn traverse_pipeline(
    visitors: &[&dyn Visitor],
    value: Value,
    schema: &ContentTypeModel,
    registry: &SchemaRegistry,
) -> Result<Value, TraverseError> {
    match value {
        Value::Array(items) => {
            let futures = items
                .into_iter()
                .map(|item| apply_pipeline(visitors, item, schema, registry));
            Ok(Value::Array(try_join_all(futures).await?))
        }
        other => apply_pipeline(visitors, other, schema, registry).await,
    }
}

async fn apply_pipeline(
    visitors: &[&dyn Visitor],
    mut value: Value,
    schema: &ContentTypeModel,
    registry: &SchemaRegistry,
) -> Result<Value, TraverseError> {
    for visitor in visitors {
        tracing::debug!("Running visitor '{}' on model '{}'", visitor.name(), schema.uid);
        value = traverse_entity(*visitor, value, schema, registry).await?;
    }
    Ok(value)
}

fn traverse_entity<'a>(
    visitor: &'a dyn Visitor,
    value: Value,
    schema: &'a ContentTypeModel,
    registry: &'a SchemaRegistry,
) -> BoxFuture<'a, Result<Value, TraverseError>> {
    async move {
        let entity = match value {
            Value::Object(entity) => entity,
            // Scalar entity positions (null components, relation ids) pass
            // through untouched.
            other => return Ok(other),
        };

        let mut out = Map::with_capacity(entity.len());
        for (key, value) in entity {
            let attribute = schema.attribute(&key);
            let node = AttributeNode { key: &key, attribute, schema };
            let mut decision = VisitorOutput::new();
            visitor.visit(&node, &value, &mut decision).await?;
            let Some(value) = decision.apply(value) else {
                tracing::debug!("Visitor '{}' removed '{}.{}'", visitor.name(), schema.uid, key);
                continue;
            };

            let value = match attribute.map(|a| &a.kind) {
                Some(AttributeKind::Component { component, .. }) => {
                    let component_model = registry.get(component)?;
                    traverse_component(visitor, value, component_model, registry).await?
                }
                Some(AttributeKind::DynamicZone { .. }) => {
                    traverse_dynamic_zone(visitor, value, registry).await?
                }
                // Relations are not descended into; everything else is a
                // scalar with no nesting.
                _ => value,
            };
            out.insert(key, value);
        }
        Ok(Value::Object(out))
    }
    .boxed()
}

/// Repeatable components hold an array of entries, single components one
/// object; both are governed by the component's own model.
async fn traverse_component<'a>(
    visitor: &'a dyn Visitor,
    value: Value,
    model: &'a ContentTypeModel,
    registry: &'a SchemaRegistry,
) -> Result<Value, TraverseError> {
    match value {
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(traverse_entity(visitor, item, model, registry).await?);
            }
            Ok(Value::Array(out))
        }
        Value::Object(_) => traverse_entity(visitor, value, model, registry).await,
        other => Ok(other),
    }
}

/// Every dynamic zone entry names its own component model, so the model is
/// re-resolved per element.
async fn traverse_dynamic_zone<'a>(
    visitor: &'a dyn Visitor,
    value: Value,
    registry: &'a SchemaRegistry,
) -> Result<Value, TraverseError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Null => return Ok(Value::Null),
        other => {
            return Err(TraverseError::InvalidEntity(format!(
                "dynamic zone value must be an array, got: {}",
                other
            )))
        }
    };

    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if !item.is_object() {
            return Err(TraverseError::InvalidEntity(format!(
                "dynamic zone entry must be an object, got: {}",
                item
            )));
        }
        let uid = item
            .get(COMPONENT_REF)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(TraverseError::MissingComponentRef)?;
        let model = registry.get(&uid)?;
        out.push(traverse_entity(visitor, item, model, registry).await?);
    }
    Ok(Value::Array(out))
}
