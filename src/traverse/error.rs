use thiserror::Error;

use crate::schema::SchemaError;

/// Traversal failures are structural: a nested model could not be resolved
/// or the entity tree does not have the shape its schema promises. They
/// propagate; a broken entity is never partially sanitized.
#[derive(Debug, Error)]
pub enum TraverseError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Dynamic zone entry is missing its '__component' reference")]
    MissingComponentRef,

    #[error("Invalid entity shape: {0}")]
    InvalidEntity(String),
}
