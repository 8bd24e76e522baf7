mod common;

use anyhow::Result;
use serde_json::json;

use content_engine::auth::AuthPolicy;
use content_engine::sanitize::{event_hub, sanitize_input, sanitize_output};
use content_engine::traverse::TraverseError;

#[tokio::test]
async fn output_strips_password_and_private_preserves_rest() -> Result<()> {
    let registry = common::fixture_registry();
    let model = registry.get("api::article.article")?;

    let entity = json!({
        "id": 1,
        "title": "welcome",
        "api_token": "hashed",
        "secret_note": "internal only",
    });
    let out = sanitize_output(entity, model, &registry, None).await?;
    assert_eq!(out, json!({ "id": 1, "title": "welcome" }));

    Ok(())
}

#[tokio::test]
async fn output_recurses_into_components() -> Result<()> {
    let registry = common::fixture_registry();
    let model = registry.get("api::article.article")?;

    let entity = json!({
        "title": "welcome",
        "seo": { "meta_title": "Welcome", "tracking_id": "UA-1" },
    });
    let out = sanitize_output(entity, model, &registry, None).await?;
    assert_eq!(out["seo"], json!({ "meta_title": "Welcome" }));

    Ok(())
}

#[tokio::test]
async fn dynamic_zone_resolves_model_per_element() -> Result<()> {
    let registry = common::fixture_registry();
    let model = registry.get("api::article.article")?;

    let entity = json!({
        "blocks": [
            { "__component": "blocks.hero", "heading": "Hi", "internal_label": "a/b test" },
            { "__component": "blocks.quote", "body": "...", "attribution": "anon" },
        ],
    });
    let out = sanitize_output(entity, model, &registry, None).await?;
    assert_eq!(
        out["blocks"],
        json!([
            { "__component": "blocks.hero", "heading": "Hi" },
            { "__component": "blocks.quote", "body": "...", "attribution": "anon" },
        ])
    );

    Ok(())
}

#[tokio::test]
async fn dynamic_zone_entry_without_component_ref_fails() {
    let registry = common::fixture_registry();
    let model = registry.get("api::article.article").unwrap();

    let entity = json!({ "blocks": [ { "heading": "Hi" } ] });
    let err = sanitize_output(entity, model, &registry, None).await.unwrap_err();
    assert!(matches!(err, TraverseError::MissingComponentRef));
}

#[tokio::test]
async fn input_strips_non_writable_attributes() -> Result<()> {
    let registry = common::fixture_registry();
    let model = registry.get("api::article.article")?;

    let payload = json!({
        "id": 5,
        "created_at": "2024-01-01T00:00:00Z",
        "title": "new title",
        "unknown_field": "ignored",
    });
    let out = sanitize_input(payload, model, &registry, None).await?;
    assert_eq!(out, json!({ "title": "new title" }));

    Ok(())
}

#[tokio::test]
async fn input_keeps_passwords_writable() -> Result<()> {
    // Passwords are secrets on the way out, not on the way in.
    let registry = common::fixture_registry();
    let model = registry.get("plugin::users.user")?;

    let payload = json!({ "username": "alice", "password": "s3cret" });
    let out = sanitize_input(payload, model, &registry, None).await?;
    assert_eq!(out, json!({ "username": "alice", "password": "s3cret" }));

    Ok(())
}

#[tokio::test]
async fn restricted_relations_removed_under_deny_policy() -> Result<()> {
    let registry = common::fixture_registry();
    let model = registry.get("api::article.article")?;

    let entity = json!({ "title": "welcome", "author": 7 });

    let deny: &dyn AuthPolicy = &common::DenyAll;
    let out = sanitize_output(entity.clone(), model, &registry, Some(deny)).await?;
    assert_eq!(out, json!({ "title": "welcome" }));

    let allow: &dyn AuthPolicy = &common::AllowAll;
    let out = sanitize_output(entity, model, &registry, Some(allow)).await?;
    assert_eq!(out, json!({ "title": "welcome", "author": 7 }));

    Ok(())
}

#[tokio::test]
async fn bulk_sanitization_preserves_order() -> Result<()> {
    let registry = common::fixture_registry();
    let model = registry.get("api::article.article")?;

    let entities = json!([
        { "id": 1, "title": "first", "api_token": "x" },
        { "id": 2, "title": "second", "api_token": "y" },
        { "id": 3, "title": "third", "api_token": "z" },
    ]);
    let out = sanitize_output(entities, model, &registry, None).await?;
    assert_eq!(
        out,
        json!([
            { "id": 1, "title": "first" },
            { "id": 2, "title": "second" },
            { "id": 3, "title": "third" },
        ])
    );

    Ok(())
}

#[tokio::test]
async fn event_hub_strips_secrets_but_not_system_fields() -> Result<()> {
    let registry = common::fixture_registry();
    let model = registry.get("api::article.article")?;

    let entity = json!({
        "id": 9,
        "created_at": "2024-01-01T00:00:00Z",
        "title": "welcome",
        "api_token": "hashed",
        "secret_note": "internal only",
    });
    let out = event_hub(entity, model, &registry).await?;
    assert_eq!(
        out,
        json!({
            "id": 9,
            "created_at": "2024-01-01T00:00:00Z",
            "title": "welcome",
        })
    );

    Ok(())
}

#[tokio::test]
async fn pipeline_composes_password_and_private_visitors() -> Result<()> {
    // password falls to the first visitor, the private email to the second;
    // the permissive policy leaves the rest alone.
    let registry = common::fixture_registry();
    let model = registry.get("plugin::users.user")?;

    let allow: &dyn AuthPolicy = &common::AllowAll;
    let entity = json!({ "username": "alice", "email": "a@example.com", "password": "x" });
    let out = sanitize_output(entity, model, &registry, Some(allow)).await?;
    assert_eq!(out, json!({ "username": "alice" }));

    Ok(())
}
