use async_trait::async_trait;
use serde_json::Value;

use crate::schema::{AttributeDescriptor, ContentTypeModel};

use super::error::TraverseError;

/// One attribute position in an entity tree.
///
/// `attribute` is `None` for keys the owning schema does not know about;
/// each visitor decides what that means for it.
pub struct AttributeNode<'a> {
    pub key: &'a str,
    pub attribute: Option<&'a AttributeDescriptor>,
    pub schema: &'a ContentTypeModel,
}

#[derive(Debug, Default)]
enum Action {
    #[default]
    Keep,
    Set(Value),
    Remove,
}

/// What a visitor decided for the current attribute. Untouched means keep.
#[derive(Debug, Default)]
pub struct VisitorOutput {
    action: Action,
}

impl VisitorOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the value stored under the current key.
    pub fn set(&mut self, value: Value) {
        self.action = Action::Set(value);
    }

    /// Delete the current key from the output entity.
    pub fn remove(&mut self) {
        self.action = Action::Remove;
    }

    pub(crate) fn apply(self, original: Value) -> Option<Value> {
        match self.action {
            Action::Keep => Some(original),
            Action::Set(value) => Some(value),
            Action::Remove => None,
        }
    }
}

/// One pass over every attribute of an entity tree.
///
/// Visitors are asynchronous because deciding about a node can require
/// resolving nested model metadata.
#[async_trait]
pub trait Visitor: Send + Sync {
    /// Visitor name for logging.
    fn name(&self) -> &'static str;

    async fn visit(
        &self,
        node: &AttributeNode<'_>,
        value: &Value,
        out: &mut VisitorOutput,
    ) -> Result<(), TraverseError>;
}
