use async_trait::async_trait;
use serde_json::Value;

use crate::auth::{AuthPolicy, RelationAction};
use crate::config::CONFIG;
use crate::schema::{AttributeKind, SchemaRegistry};
use crate::traverse::{AttributeNode, TraverseError, Visitor, VisitorOutput};

/// Removes password-typed attribute values.
#[derive(Debug, Default)]
pub struct StripPassword;

#[async_trait]
impl Visitor for StripPassword {
    fn name(&self) -> &'static str {
        "StripPassword"
    }

    async fn visit(
        &self,
        node: &AttributeNode<'_>,
        _value: &Value,
        out: &mut VisitorOutput,
    ) -> Result<(), TraverseError> {
        if matches!(node.attribute.map(|a| &a.kind), Some(AttributeKind::Password)) {
            out.remove();
        }
        Ok(())
    }
}

/// Removes attributes flagged private on their schema, named in the model's
/// private list, or named in the process-wide private list.
#[derive(Debug)]
pub struct StripPrivate {
    global: Vec<String>,
}

impl StripPrivate {
    /// Process-wide private attributes come from `CONFIG`.
    pub fn new() -> Self {
        Self { global: CONFIG.sanitize.private_attributes.clone() }
    }

    /// Explicit global list, for callers that do not want the process-wide
    /// configuration.
    pub fn with_global(global: Vec<String>) -> Self {
        Self { global }
    }
}

impl Default for StripPrivate {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Visitor for StripPrivate {
    fn name(&self) -> &'static str {
        "StripPrivate"
    }

    async fn visit(
        &self,
        node: &AttributeNode<'_>,
        _value: &Value,
        out: &mut VisitorOutput,
    ) -> Result<(), TraverseError> {
        if node.schema.is_private(node.key) || self.global.iter().any(|a| a == node.key) {
            out.remove();
        }
        Ok(())
    }
}

/// Removes everything a client may not write: the primary key, timestamp
/// columns, `writable: false` attributes, and keys the schema does not know.
#[derive(Debug, Default)]
pub struct StripNonWritable;

#[async_trait]
impl Visitor for StripNonWritable {
    fn name(&self) -> &'static str {
        "StripNonWritable"
    }

    async fn visit(
        &self,
        node: &AttributeNode<'_>,
        _value: &Value,
        out: &mut VisitorOutput,
    ) -> Result<(), TraverseError> {
        if !node.schema.is_writable(node.key) {
            out.remove();
        }
        Ok(())
    }
}

/// Removes relation values whose target model the auth policy denies for
/// the given action. The related entity tree itself is never walked; the
/// decision is per relation, by target model.
pub struct RestrictedRelations<'a> {
    policy: &'a dyn AuthPolicy,
    registry: &'a SchemaRegistry,
    action: RelationAction,
}

impl<'a> RestrictedRelations<'a> {
    pub fn new(
        policy: &'a dyn AuthPolicy,
        registry: &'a SchemaRegistry,
        action: RelationAction,
    ) -> Self {
        Self { policy, registry, action }
    }
}

#[async_trait]
impl Visitor for RestrictedRelations<'_> {
    fn name(&self) -> &'static str {
        "RestrictedRelations"
    }

    async fn visit(
        &self,
        node: &AttributeNode<'_>,
        _value: &Value,
        out: &mut VisitorOutput,
    ) -> Result<(), TraverseError> {
        if let Some(AttributeKind::Relation { target }) = node.attribute.map(|a| &a.kind) {
            let target_model = self.registry.get(target)?;
            if !self.policy.allows(target_model, self.action).await {
                tracing::debug!(
                    "Auth policy denied relation '{}.{}' -> '{}'",
                    node.schema.uid,
                    node.key,
                    target
                );
                out.remove();
            }
        }
        Ok(())
    }
}
