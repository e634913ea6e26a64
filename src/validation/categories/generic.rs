//! Generic attribute bag
//!
//! Categories without a specialized shape keep an opaque key→value bag:
//! keys and values are trimmed, non-string scalars are stringified, and
//! empty entries are dropped. Nothing is ever rejected.

use serde_json::Value;

use crate::validation::types::AttrMap;

pub(crate) fn normalize(input: &AttrMap) -> AttrMap {
    let mut values = AttrMap::new();
    for (key, value) in input {
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let text = match value {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => continue,
        };
        if text.is_empty() {
            continue;
        }
        values.insert(key.to_string(), Value::String(text));
    }
    values
}
