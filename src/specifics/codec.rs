//! Specifics codec
//!
//! `encode` turns validated output into the canonical storage form:
//! anything without a registry definition for the category is stripped,
//! strings are trimmed and integral fields rounded as a final
//! normalization step. `decode` is the inverse mapping for edit flows:
//! the stored payload becomes a values map for form pre-population, with
//! server-derived fields dropped so they are recomputed on resubmission.

use serde_json::{Number, Value};

use crate::catalog::registry::FieldRegistry;
use crate::schema::classifier::CategoryType;
use crate::validation::types::{AttrMap, NormalizedSpecifics};

fn finalize(def_is_integer: bool, value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.trim().to_string()),
        Value::Number(n) if def_is_integer => match n.as_f64() {
            Some(number) => Value::Number(Number::from(number.round() as i64)),
            None => value.clone(),
        },
        other => other.clone(),
    }
}

/// Canonical storage form of a validated specifics payload.
#[must_use]
pub fn encode(
    registry: &FieldRegistry,
    category: CategoryType,
    specifics: &NormalizedSpecifics,
) -> AttrMap {
    let domain = Some(category.domain());
    let mut canonical = AttrMap::new();
    for (key, value) in &specifics.values {
        match registry.lookup_scoped(domain, key) {
            // the generic bag has no registry shape; keep everything
            None if category == CategoryType::Generic => {
                canonical.insert(key.clone(), finalize(false, value));
            }
            None => {}
            Some(def) => {
                canonical.insert(key.clone(), finalize(def.is_integer(), value));
            }
        }
    }
    canonical
}

/// Edit-mode values map for form pre-population.
#[must_use]
pub fn decode(registry: &FieldRegistry, category: CategoryType, stored: &AttrMap) -> AttrMap {
    let domain = Some(category.domain());
    let mut values = AttrMap::new();
    for (key, value) in stored {
        if let Some(def) = registry.lookup_scoped(domain, key) {
            if def.is_derived() {
                continue;
            }
        }
        values.insert(key.clone(), value.clone());
    }
    values
}
