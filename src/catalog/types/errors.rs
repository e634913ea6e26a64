use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    NotFound(String),
    DuplicateField(String),
    InvalidDefinition(String),
    InvalidData(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CatalogError::NotFound(msg) => write!(f, "Field not found: {}", msg),
            CatalogError::DuplicateField(msg) => write!(f, "Duplicate field: {}", msg),
            CatalogError::InvalidDefinition(msg) => write!(f, "Invalid definition: {}", msg),
            CatalogError::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}
