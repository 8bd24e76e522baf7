pub mod attribute;
pub mod model;
pub mod registry;

pub use attribute::{AttributeDescriptor, AttributeKind};
pub use model::{ContentTypeModel, ModelKind, ModelOptions, COMPONENT_REF, PUBLISHED_AT};
pub use registry::{SchemaError, SchemaRegistry};
