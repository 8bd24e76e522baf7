pub mod error;
pub mod fields;
pub mod filters;
pub mod pagination;
pub mod populate;
pub mod publication;
pub mod sort;
pub mod types;

pub use error::QueryError;
pub use fields::convert_fields;
pub use filters::{convert_filters, FilterSanitizer};
pub use pagination::{convert_limit, convert_start};
pub use populate::PopulateConverter;
pub use publication::{convert_publication_state, PublicationState, PublishedAtFilter};
pub use sort::SortConverter;
pub use types::*;

use crate::schema::{ContentTypeModel, SchemaRegistry};

/// Convert raw REST query parameters into a `NormalizedQuery` for the
/// storage layer.
///
/// Each present parameter is converted by its own converter; the first
/// invalid one aborts the whole conversion. Absent parameters stay absent;
/// defaults are the storage layer's business.
pub fn convert_query_params(
    params: &QueryParams,
    model: &ContentTypeModel,
    registry: &SchemaRegistry,
) -> Result<NormalizedQuery, QueryError> {
    let mut query = NormalizedQuery::default();

    if let Some(sort) = &params.sort {
        query.sort = Some(SortConverter::convert(sort)?);
    }
    if let Some(start) = &params.start {
        query.start = Some(pagination::convert_start(start)?);
    }
    if let Some(limit) = &params.limit {
        query.limit = Some(pagination::apply_max_limit(pagination::convert_limit(limit)?));
    }
    if let Some(fields) = &params.fields {
        query.fields = convert_fields(fields, &model.primary_key)?;
    }
    if let Some(populate) = &params.populate {
        query.populate = Some(PopulateConverter::new(model, registry).convert(populate)?);
    }
    if let Some(filters) = &params.filters {
        query.filters = Some(convert_filters(filters, model, registry)?);
    }
    if let Some(state) = &params.publication_state {
        let state = convert_publication_state(state)?;
        query.publication_filter = publication::publication_filter(model, state);
    }

    Ok(query)
}
