use serde_json::Value;

use crate::auth::{AuthPolicy, RelationAction};
use crate::schema::{ContentTypeModel, SchemaRegistry};
use crate::traverse::{traverse_pipeline, TraverseError, Visitor};

use super::visitors::{RestrictedRelations, StripNonWritable, StripPassword, StripPrivate};

/// Sanitize client-supplied data before persistence.
///
/// Non-writable attributes (primary key, timestamps, `writable: false`,
/// unknown keys) are dropped; with an auth context, write-restricted
/// relations are dropped too. Accepts a single entity or a bulk array.
pub async fn sanitize_input(
    data: Value,
    schema: &ContentTypeModel,
    registry: &SchemaRegistry,
    auth: Option<&dyn AuthPolicy>,
) -> Result<Value, TraverseError> {
    let strip_non_writable = StripNonWritable;
    let restricted =
        auth.map(|policy| RestrictedRelations::new(policy, registry, RelationAction::Write));

    let mut visitors: Vec<&dyn Visitor> = vec![&strip_non_writable];
    if let Some(restricted) = &restricted {
        visitors.push(restricted);
    }
    traverse_pipeline(&visitors, data, schema, registry).await
}

/// Sanitize data before exposure to a client.
///
/// Password-typed and private attributes are dropped; with an auth context,
/// read-restricted relations are dropped too. Accepts a single entity or a
/// bulk array.
pub async fn sanitize_output(
    data: Value,
    schema: &ContentTypeModel,
    registry: &SchemaRegistry,
    auth: Option<&dyn AuthPolicy>,
) -> Result<Value, TraverseError> {
    let strip_password = StripPassword;
    let strip_private = StripPrivate::new();
    let restricted =
        auth.map(|policy| RestrictedRelations::new(policy, registry, RelationAction::Read));

    let mut visitors: Vec<&dyn Visitor> = vec![&strip_password, &strip_private];
    if let Some(restricted) = &restricted {
        visitors.push(restricted);
    }
    traverse_pipeline(&visitors, data, schema, registry).await
}

/// Reduced sanitization applied before entities are broadcast to
/// process-wide event subscribers: passwords and private attributes only.
/// Subscribers never observe secrets even without a read-auth context.
pub async fn event_hub(
    data: Value,
    schema: &ContentTypeModel,
    registry: &SchemaRegistry,
) -> Result<Value, TraverseError> {
    let strip_password = StripPassword;
    let strip_private = StripPrivate::new();
    traverse_pipeline(&[&strip_password, &strip_private], data, schema, registry).await
}
