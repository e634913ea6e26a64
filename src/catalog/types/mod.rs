pub mod errors;
pub mod field;

pub use errors::CatalogError;
pub use field::{FieldBuilder, FieldDefinition, FieldOption, FieldType};
