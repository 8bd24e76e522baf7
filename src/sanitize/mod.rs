pub mod pipeline;
pub mod visitors;

pub use pipeline::{event_hub, sanitize_input, sanitize_output};
pub use visitors::{RestrictedRelations, StripNonWritable, StripPassword, StripPrivate};
