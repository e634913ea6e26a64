use crate::catalog::types::CatalogError;
use crate::listing::status::StatusError;
use std::fmt;
use std::io;

/// Unified error type for the entire application.
///
/// Expected user-input problems never surface through this type: the
/// validator reports those as ordered `FieldError` lists. `VitrineError`
/// covers everything that aborts a request instead — broken catalog
/// configuration, storage failures, policy rejections from the
/// publication state machine.
#[derive(Debug)]
pub enum VitrineError {
    /// Errors from the field catalog / registry
    Catalog(CatalogError),

    /// Publication state machine rejections (policy violations, not input errors)
    Status(StatusError),

    /// Errors related to database operations
    Database(String),

    /// Errors related to IO operations
    Io(io::Error),

    /// Errors related to serialization/deserialization
    Serialization(String),

    /// Catalog/schema configuration integrity errors
    Config(String),

    /// Optimistic concurrency check failed (stale specifics version)
    Conflict(String),

    /// A listing or other record does not exist
    NotFound(String),
}

impl fmt::Display for VitrineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog(err) => write!(f, "Catalog error: {}", err),
            Self::Status(err) => write!(f, "Status error: {}", err),
            Self::Database(msg) => write!(f, "Database error: {}", msg),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::Conflict(msg) => write!(f, "Conflict: {}", msg),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl std::error::Error for VitrineError {}

impl From<CatalogError> for VitrineError {
    fn from(error: CatalogError) -> Self {
        VitrineError::Catalog(error)
    }
}

impl From<StatusError> for VitrineError {
    fn from(error: StatusError) -> Self {
        VitrineError::Status(error)
    }
}

impl From<io::Error> for VitrineError {
    fn from(error: io::Error) -> Self {
        VitrineError::Io(error)
    }
}

impl From<serde_json::Error> for VitrineError {
    fn from(error: serde_json::Error) -> Self {
        VitrineError::Serialization(error.to_string())
    }
}

impl From<sled::Error> for VitrineError {
    fn from(error: sled::Error) -> Self {
        VitrineError::Database(error.to_string())
    }
}

/// Result type alias for operations that can result in a VitrineError
pub type VitrineResult<T> = Result<T, VitrineError>;
