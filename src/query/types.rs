use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::publication::PublishedAtFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// One field ordering. `field` is a dotted path when the sort descends
/// through a relation (`category.name`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortEntry {
    pub field: String,
    pub order: SortOrder,
}

/// Ordered sort specification; input order is significant and preserved.
pub type SortSpec = Vec<SortEntry>;

/// Record cap for a query. The wire sentinel `-1` maps to `Unbounded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Unbounded,
    Count(u64),
}

impl Limit {
    pub fn as_option(&self) -> Option<u64> {
        match self {
            Limit::Unbounded => None,
            Limit::Count(n) => Some(*n),
        }
    }
}

/// Populate instruction handed to the storage layer.
#[derive(Debug, Clone, PartialEq)]
pub enum PopulateSpec {
    /// Populate every relation (the top-level `"*"` wildcard).
    All,
    /// Flat, deduplicated list of relation names.
    Relations(Vec<String>),
    /// Per-relation nested instructions, input order preserved.
    Tree(Vec<(String, PopulateValue)>),
}

impl PopulateSpec {
    /// Nested instruction for one relation of a `Tree` populate.
    pub fn get(&self, name: &str) -> Option<&PopulateValue> {
        match self {
            PopulateSpec::Tree(entries) => {
                entries.iter().find(|(key, _)| key == name).map(|(_, value)| value)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PopulateValue {
    Enabled(bool),
    Nested(Box<NestedPopulate>),
}

/// Query-like object scoping one populated relation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NestedPopulate {
    pub sort: Option<SortSpec>,
    /// Already sanitized against the relation's target model.
    pub filters: Option<Value>,
    pub fields: Option<Vec<String>>,
    pub populate: Option<PopulateSpec>,
    pub count: Option<bool>,
}

/// Raw query parameters as deserialized from a request. Everything is an
/// untyped `Value` until the converters have validated it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    pub sort: Option<Value>,
    pub filters: Option<Value>,
    pub fields: Option<Value>,
    pub populate: Option<Value>,
    pub start: Option<Value>,
    pub limit: Option<Value>,
    #[serde(rename = "publicationState")]
    pub publication_state: Option<String>,
}

/// Normalized query consumed by the storage layer.
#[derive(Debug, Clone, Default)]
pub struct NormalizedQuery {
    pub sort: Option<SortSpec>,
    /// Records to skip.
    pub start: Option<u64>,
    pub limit: Option<Limit>,
    /// `None` means no restriction (all fields).
    pub fields: Option<Vec<String>>,
    pub populate: Option<PopulateSpec>,
    /// Sanitized filter clause tree.
    pub filters: Option<Value>,
    /// Deferred publication clause, resolved at query-build time.
    pub publication_filter: Option<PublishedAtFilter>,
}
