use std::collections::HashMap;
use thiserror::Error;

use super::model::ContentTypeModel;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Duplicate model uid: {0}")]
    DuplicateModel(String),

    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Frozen lookup table for every content type and component model known to
/// the application.
///
/// Built once at startup from declarative definitions, then shared read-only
/// with every conversion and traversal call. There is no ambient global; the
/// registry travels by reference.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    models: HashMap<String, ContentTypeModel>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, model: ContentTypeModel) -> Result<(), SchemaError> {
        if self.models.contains_key(&model.uid) {
            return Err(SchemaError::DuplicateModel(model.uid));
        }
        tracing::debug!("Registered model '{}'", model.uid);
        self.models.insert(model.uid.clone(), model);
        Ok(())
    }

    /// Load one model definition from a JSON document.
    pub fn register_json(&mut self, json: &str) -> Result<(), SchemaError> {
        let model: ContentTypeModel = serde_json::from_str(json)?;
        self.register(model)
    }

    /// Load one model definition from a YAML document.
    pub fn register_yaml(&mut self, yaml: &str) -> Result<(), SchemaError> {
        let model: ContentTypeModel = serde_yaml::from_str(yaml)?;
        self.register(model)
    }

    pub fn get(&self, uid: &str) -> Result<&ContentTypeModel, SchemaError> {
        self.models
            .get(uid)
            .ok_or_else(|| SchemaError::UnknownModel(uid.to_string()))
    }

    pub fn contains(&self, uid: &str) -> bool {
        self.models.contains_key(uid)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user_model() -> ContentTypeModel {
        serde_json::from_value(json!({
            "uid": "api::user.user",
            "kind": "collectionType",
            "attributes": { "name": { "type": "string" } },
        }))
        .unwrap()
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = SchemaRegistry::new();
        registry.register(user_model()).unwrap();
        assert!(registry.contains("api::user.user"));
        assert_eq!(registry.get("api::user.user").unwrap().uid, "api::user.user");
    }

    #[test]
    fn test_duplicate_uid_rejected() {
        let mut registry = SchemaRegistry::new();
        registry.register(user_model()).unwrap();
        assert!(matches!(
            registry.register(user_model()),
            Err(SchemaError::DuplicateModel(_))
        ));
    }

    #[test]
    fn test_unknown_model() {
        let registry = SchemaRegistry::new();
        assert!(matches!(
            registry.get("api::missing.missing"),
            Err(SchemaError::UnknownModel(_))
        ));
    }

    #[test]
    fn test_register_json_definition() {
        let mut registry = SchemaRegistry::new();
        registry
            .register_json(
                r#"{
                    "uid": "api::category.category",
                    "kind": "collectionType",
                    "attributes": { "name": { "type": "string", "unique": true } }
                }"#,
            )
            .unwrap();
        assert!(registry.get("api::category.category").unwrap().attribute("name").unwrap().unique);
    }

    #[test]
    fn test_register_yaml_definition() {
        let mut registry = SchemaRegistry::new();
        registry
            .register_yaml(
                r#"
uid: api::tag.tag
kind: collectionType
attributes:
  label:
    type: string
    required: true
options:
  privateAttributes: [internal_code]
"#,
            )
            .unwrap();
        let model = registry.get("api::tag.tag").unwrap();
        assert!(model.attribute("label").unwrap().required);
        assert!(model.is_private("internal_code"));
    }
}
