pub mod error;
pub mod visitor;
pub mod walk;

pub use error::TraverseError;
pub use visitor::{AttributeNode, Visitor, VisitorOutput};
pub use walk::{traverse, traverse_pipeline};
