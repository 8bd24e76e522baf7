use thiserror::Error;

use crate::coerce::CoercionError;
use crate::schema::SchemaError;

/// Conversion failures are client errors: the request carried a malformed or
/// illegal parameter. None of these are ever silently corrected.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Invalid sort parameter: {0}")]
    InvalidSort(String),

    #[error("Invalid sort order: {0}. Expected 'asc' or 'desc'")]
    InvalidOrder(String),

    #[error("Invalid populate parameter: {0}")]
    InvalidPopulate(String),

    #[error("Invalid fields parameter: {0}")]
    InvalidFields(String),

    #[error("Invalid filters parameter: {0}")]
    InvalidFilters(String),

    #[error("Attribute '{0}' does not exist")]
    UnknownAttribute(String),

    #[error("Invalid {param} parameter: {value} is out of range")]
    OutOfRange { param: &'static str, value: i64 },

    #[error("Invalid publicationState: {0}. Expected 'live' or 'preview'")]
    InvalidPublicationState(String),

    #[error(transparent)]
    Coercion(#[from] CoercionError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}
