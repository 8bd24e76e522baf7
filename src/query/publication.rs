use std::collections::HashMap;
use std::str::FromStr;

use serde_json::{json, Map, Value};

use crate::schema::{AttributeDescriptor, ContentTypeModel, PUBLISHED_AT};

use super::error::QueryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicationState {
    /// Drafts and published entries.
    Preview,
    /// Published entries only.
    Live,
}

impl FromStr for PublicationState {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preview" => Ok(PublicationState::Preview),
            "live" => Ok(PublicationState::Live),
            other => Err(QueryError::InvalidPublicationState(other.to_string())),
        }
    }
}

pub fn convert_publication_state(state: &str) -> Result<PublicationState, QueryError> {
    state.parse()
}

/// Deferred publication clause.
///
/// The attribute map a storage adapter works with may only be final at
/// query-build time, so the clause is resolved there rather than at
/// parameter-conversion time.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedAtFilter {
    field: String,
}

impl PublishedAtFilter {
    pub fn new(field: impl Into<String>) -> Self {
        Self { field: field.into() }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// The non-null clause over the publish timestamp, or nothing when the
    /// attribute map does not carry the field.
    pub fn resolve(&self, attributes: &HashMap<String, AttributeDescriptor>) -> Option<Value> {
        if !attributes.contains_key(&self.field) {
            return None;
        }
        let mut clause = Map::new();
        clause.insert(self.field.clone(), json!({ "$notNull": true }));
        Some(Value::Object(clause))
    }
}

/// The deferred filter a `live` request installs on draft/publish models.
/// `preview` installs nothing, as does `live` on a model without the
/// publish timestamp.
pub fn publication_filter(
    model: &ContentTypeModel,
    state: PublicationState,
) -> Option<PublishedAtFilter> {
    match state {
        PublicationState::Live if model.has_publication_state() => {
            Some(PublishedAtFilter::new(PUBLISHED_AT))
        }
        _ => None,
    }
}
