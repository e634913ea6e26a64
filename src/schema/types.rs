//! Category schema types
//!
//! A `CategorySchema` is the declarative composition of registry fields
//! into the multi-step form for one category. Schemas are data-only:
//! conditional visibility is a small predicate over another field's
//! current value, never code, so schemas stay safely authorable by
//! catalog administrators.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Layout hint for a group of fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupLayout {
    #[default]
    Single,
    Double,
    Grid,
}

/// Expected value(s) of a conditional predicate: a scalar compared by
/// equality, or an array checked by membership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Any(Vec<Value>),
    One(Value),
}

/// Data-only visibility predicate: show the field only while
/// `values[field_key]` matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditional {
    pub field_key: String,
    pub value: ConditionValue,
}

impl Conditional {
    #[must_use]
    pub fn is_met(&self, values: &Map<String, Value>) -> bool {
        let current = match values.get(&self.field_key) {
            Some(value) => value,
            None => return false,
        };
        match &self.value {
            ConditionValue::One(expected) => current == expected,
            ConditionValue::Any(expected) => expected.iter().any(|v| v == current),
        }
    }
}

/// A schema's reference to a registry field, with per-use overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaFieldRef {
    pub field_key: String,
    /// Overrides the field definition's required default when set.
    #[serde(default)]
    pub optional: Option<bool>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub step: Option<f64>,
    #[serde(default)]
    pub label_key: Option<String>,
    #[serde(default)]
    pub description_key: Option<String>,
    #[serde(default)]
    pub placeholder_key: Option<String>,
    #[serde(default)]
    pub conditional: Option<Conditional>,
}

impl SchemaFieldRef {
    pub fn new(field_key: impl Into<String>) -> Self {
        Self {
            field_key: field_key.into(),
            optional: None,
            min: None,
            max: None,
            step: None,
            label_key: None,
            description_key: None,
            placeholder_key: None,
            conditional: None,
        }
    }

    pub fn when(mut self, field_key: &str, value: Value) -> Self {
        self.conditional = Some(Conditional {
            field_key: field_key.to_string(),
            value: ConditionValue::One(value),
        });
        self
    }

    pub fn when_any(mut self, field_key: &str, values: Vec<Value>) -> Self {
        self.conditional = Some(Conditional {
            field_key: field_key.to_string(),
            value: ConditionValue::Any(values),
        });
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = Some(true);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaGroup {
    pub key: String,
    #[serde(default)]
    pub label_key: Option<String>,
    #[serde(default)]
    pub layout: GroupLayout,
    pub fields: Vec<SchemaFieldRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaStep {
    pub key: String,
    #[serde(default)]
    pub label_key: Option<String>,
    #[serde(default)]
    pub description_key: Option<String>,
    pub groups: Vec<SchemaGroup>,
}

/// Ordered multi-step form schema for one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySchema {
    pub version: u32,
    pub steps: Vec<SchemaStep>,
}

impl CategorySchema {
    /// All field refs in document order.
    pub fn field_refs(&self) -> impl Iterator<Item = &SchemaFieldRef> {
        self.steps
            .iter()
            .flat_map(|step| step.groups.iter())
            .flat_map(|group| group.fields.iter())
    }

    /// Unique field keys referenced by this schema, in first-use order.
    #[must_use]
    pub fn field_keys(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for field_ref in self.field_refs() {
            if !seen.contains(&field_ref.field_key.as_str()) {
                seen.push(field_ref.field_key.as_str());
            }
        }
        seen
    }

    /// Finds the first ref for a field key, if the schema references it.
    #[must_use]
    pub fn field_ref(&self, field_key: &str) -> Option<&SchemaFieldRef> {
        self.field_refs().find(|r| r.field_key == field_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn scalar_conditional_compares_by_equality() {
        let cond = Conditional {
            field_key: "listing_type".to_string(),
            value: ConditionValue::One(json!("rent")),
        };
        assert!(cond.is_met(&values(&[("listing_type", json!("rent"))])));
        assert!(!cond.is_met(&values(&[("listing_type", json!("sale"))])));
        assert!(!cond.is_met(&values(&[])));
    }

    #[test]
    fn array_conditional_checks_membership() {
        let cond = Conditional {
            field_key: "device_type".to_string(),
            value: ConditionValue::Any(vec![json!("phone"), json!("tablet")]),
        };
        assert!(cond.is_met(&values(&[("device_type", json!("tablet"))])));
        assert!(!cond.is_met(&values(&[("device_type", json!("tv"))])));
    }

    #[test]
    fn condition_value_deserializes_scalar_or_array() {
        let scalar: Conditional =
            serde_json::from_str(r#"{"field_key": "vintage", "value": true}"#).unwrap();
        assert_eq!(scalar.value, ConditionValue::One(json!(true)));

        let array: Conditional =
            serde_json::from_str(r#"{"field_key": "t", "value": ["a", "b"]}"#).unwrap();
        assert_eq!(array.value, ConditionValue::Any(vec![json!("a"), json!("b")]));
    }

    #[test]
    fn field_keys_deduplicate_in_order() {
        let schema = CategorySchema {
            version: 1,
            steps: vec![SchemaStep {
                key: "s1".to_string(),
                label_key: None,
                description_key: None,
                groups: vec![SchemaGroup {
                    key: "g1".to_string(),
                    label_key: None,
                    layout: GroupLayout::Double,
                    fields: vec![
                        SchemaFieldRef::new("a"),
                        SchemaFieldRef::new("b"),
                        SchemaFieldRef::new("a"),
                    ],
                }],
            }],
        };
        assert_eq!(schema.field_keys(), vec!["a", "b"]);
    }
}
