use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::classifier::CategoryType;

/// Flat key→value attribute map, the shape submitted specifics arrive in
/// and the shape normalized specifics are emitted in.
pub type AttrMap = Map<String, Value>;

/// Stable error codes attached to field errors.
pub mod codes {
    pub const REQUIRED: &str = "required";
    pub const FORBIDDEN: &str = "forbidden";
    pub const WRONG_TYPE: &str = "wrong_type";
    pub const OUT_OF_RANGE: &str = "out_of_range";
    pub const PATTERN: &str = "pattern";
    pub const UNKNOWN_OPTION: &str = "unknown_option";
    /// Reference-lookup failure: the value names a catalog entry that
    /// does not exist. Never silently coerced.
    pub const UNKNOWN: &str = "unknown";
    pub const INVALID: &str = "invalid";
    pub const REJECTED: &str = "rejected";
}

/// One field-scoped validation failure, suitable for direct display next
/// to the offending rendered field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field_path: String,
    pub error_code: String,
    pub detail: String,
}

impl FieldError {
    pub fn new(
        field_path: impl Into<String>,
        error_code: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            field_path: field_path.into(),
            error_code: error_code.into(),
            detail: detail.into(),
        }
    }
}

/// Validated, persistence-ready specifics payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSpecifics {
    pub category_type: CategoryType,
    pub values: AttrMap,
}

/// Outcome of a validation run. User-input problems are values, not
/// errors: the caller gets the complete ordered list so every issue can
/// be displayed at once.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    Valid(NormalizedSpecifics),
    Invalid(Vec<FieldError>),
}

impl ValidationResult {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Converts into a `Result` for callers that want `?`-style flow.
    pub fn into_result(self) -> Result<NormalizedSpecifics, Vec<FieldError>> {
        match self {
            Self::Valid(specifics) => Ok(specifics),
            Self::Invalid(errors) => Err(errors),
        }
    }

    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::Valid(_) => &[],
            Self::Invalid(errors) => errors,
        }
    }
}

/// Typed accessors over a (normalized) attribute map, used by the
/// cross-field invariants.
pub fn str_of<'a>(values: &'a AttrMap, key: &str) -> Option<&'a str> {
    values.get(key).and_then(Value::as_str)
}

pub fn num_of(values: &AttrMap, key: &str) -> Option<f64> {
    values.get(key).and_then(Value::as_f64)
}

pub fn bool_of(values: &AttrMap, key: &str) -> Option<bool> {
    values.get(key).and_then(Value::as_bool)
}

pub fn is_true(values: &AttrMap, key: &str) -> bool {
    bool_of(values, key) == Some(true)
}

pub fn has(values: &AttrMap, key: &str) -> bool {
    values.contains_key(key)
}

/// Whether a multiselect value is present and non-empty.
pub fn has_any(values: &AttrMap, key: &str) -> bool {
    values
        .get(key)
        .and_then(Value::as_array)
        .is_some_and(|items| !items.is_empty())
}
