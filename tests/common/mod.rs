#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::json;

use content_engine::auth::{AuthPolicy, RelationAction};
use content_engine::schema::{ContentTypeModel, SchemaRegistry};

/// Registry with a small blog-shaped schema graph: articles carry an author
/// relation, an seo component and a dynamic zone of content blocks; users
/// carry a password and a private email.
pub fn fixture_registry() -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();

    register(
        &mut registry,
        json!({
            "uid": "api::article.article",
            "kind": "collectionType",
            "attributes": {
                "title": { "type": "string", "required": true },
                "views": { "type": "integer" },
                "api_token": { "type": "password" },
                "secret_note": { "type": "text" },
                "author": { "type": "relation", "target": "plugin::users.user" },
                "seo": { "type": "component", "component": "shared.seo" },
                "blocks": {
                    "type": "dynamiczone",
                    "components": ["blocks.hero", "blocks.quote"],
                },
                "published_at": { "type": "datetime" },
            },
            "options": {
                "timestamps": ["created_at", "updated_at"],
                "draftAndPublish": true,
                "privateAttributes": ["secret_note"],
            },
        }),
    );

    register(
        &mut registry,
        json!({
            "uid": "plugin::users.user",
            "kind": "collectionType",
            "attributes": {
                "username": { "type": "string" },
                "password": { "type": "password" },
                "email": { "type": "email", "private": true },
            },
        }),
    );

    register(
        &mut registry,
        json!({
            "uid": "shared.seo",
            "kind": "collectionType",
            "attributes": {
                "meta_title": { "type": "string" },
                "tracking_id": { "type": "string", "private": true },
            },
        }),
    );

    register(
        &mut registry,
        json!({
            "uid": "blocks.hero",
            "kind": "collectionType",
            "attributes": {
                "heading": { "type": "string" },
                "internal_label": { "type": "string", "private": true },
            },
        }),
    );

    register(
        &mut registry,
        json!({
            "uid": "blocks.quote",
            "kind": "collectionType",
            "attributes": {
                "body": { "type": "text" },
                "attribution": { "type": "string" },
            },
        }),
    );

    registry
}

fn register(registry: &mut SchemaRegistry, definition: serde_json::Value) {
    let model: ContentTypeModel =
        serde_json::from_value(definition).expect("fixture definition must deserialize");
    registry.register(model).expect("fixture uid must be unique");
}

/// Policy that permits every relation.
pub struct AllowAll;

#[async_trait]
impl AuthPolicy for AllowAll {
    async fn allows(&self, _target: &ContentTypeModel, _action: RelationAction) -> bool {
        true
    }
}

/// Policy that denies every relation.
pub struct DenyAll;

#[async_trait]
impl AuthPolicy for DenyAll {
    async fn allows(&self, _target: &ContentTypeModel, _action: RelationAction) -> bool {
        false
    }
}
