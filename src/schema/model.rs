use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::attribute::AttributeDescriptor;

/// Attribute conventionally holding the publish timestamp on models with
/// draft-and-publish enabled.
pub const PUBLISHED_AT: &str = "published_at";

/// Key a dynamic zone entry uses to name the component model it is shaped by.
pub const COMPONENT_REF: &str = "__component";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModelKind {
    /// Many records.
    CollectionType,
    /// Exactly one record.
    SingleType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModelOptions {
    /// Names of the automatic created/updated timestamp columns, if any.
    pub timestamps: Option<(String, String)>,
    pub draft_and_publish: bool,
    /// Attribute names treated as private for this model regardless of
    /// per-attribute flags.
    pub private_attributes: Vec<String>,
}

/// Read-only descriptor of one content type or component schema.
///
/// Built once from a declarative definition at startup and never mutated;
/// every conversion and traversal call borrows it through the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeModel {
    pub uid: String,
    #[serde(default = "default_primary_key")]
    pub primary_key: String,
    pub kind: ModelKind,
    pub attributes: HashMap<String, AttributeDescriptor>,
    #[serde(default)]
    pub options: ModelOptions,
}

fn default_primary_key() -> String {
    "id".to_string()
}

impl ContentTypeModel {
    pub fn attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.get(name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// The primary key and timestamp columns are never writable through the
    /// API, nor is anything flagged `writable: false`. Names the schema does
    /// not know about are not writable either.
    pub fn is_writable(&self, name: &str) -> bool {
        if name == self.primary_key {
            return false;
        }
        if let Some((created, updated)) = &self.options.timestamps {
            if name == created || name == updated {
                return false;
            }
        }
        match self.attributes.get(name) {
            Some(attr) => attr.writable,
            None => false,
        }
    }

    pub fn is_private(&self, name: &str) -> bool {
        self.options.private_attributes.iter().any(|a| a == name)
            || self.attributes.get(name).map(|a| a.private).unwrap_or(false)
    }

    /// True when the model participates in draft/publish and actually
    /// carries the publish timestamp attribute.
    pub fn has_publication_state(&self) -> bool {
        self.options.draft_and_publish && self.attributes.contains_key(PUBLISHED_AT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model() -> ContentTypeModel {
        serde_json::from_value(json!({
            "uid": "api::article.article",
            "kind": "collectionType",
            "attributes": {
                "title": { "type": "string" },
                "slug": { "type": "uuid", "writable": false },
                "secret_note": { "type": "text" },
                "published_at": { "type": "datetime" },
            },
            "options": {
                "timestamps": ["created_at", "updated_at"],
                "draftAndPublish": true,
                "privateAttributes": ["secret_note"],
            },
        }))
        .unwrap()
    }

    #[test]
    fn test_writable_excludes_system_columns() {
        let model = model();
        assert!(model.is_writable("title"));
        assert!(!model.is_writable("id"));
        assert!(!model.is_writable("created_at"));
        assert!(!model.is_writable("updated_at"));
        assert!(!model.is_writable("slug"));
        assert!(!model.is_writable("no_such_field"));
    }

    #[test]
    fn test_private_merges_flag_and_options() {
        let model = model();
        assert!(model.is_private("secret_note"));
        assert!(!model.is_private("title"));
    }

    #[test]
    fn test_publication_state_requires_attribute() {
        let model = model();
        assert!(model.has_publication_state());

        let mut stripped = model.clone();
        stripped.attributes.remove(PUBLISHED_AT);
        assert!(!stripped.has_publication_state());
    }
}
