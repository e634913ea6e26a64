pub mod builtin;
pub mod registry;
pub mod types;

pub use registry::FieldRegistry;
pub use types::{CatalogError, FieldBuilder, FieldDefinition, FieldOption, FieldType};
