use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Primitive type of a catalog field.
///
/// The field type determines the required runtime shape of a submitted
/// value: string for text/textarea, number for number/range, boolean,
/// ISO date string, option code for select, array of option codes for
/// multiselect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    Select,
    Multiselect,
    Boolean,
    Date,
    Range,
}

impl FieldType {
    /// Whether values of this type are drawn from an enumerable option domain.
    #[must_use]
    pub fn has_options(self) -> bool {
        matches!(self, Self::Select | Self::Multiselect)
    }
}

/// One entry of a select/multiselect option domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldOption {
    pub code: String,
    pub name_key: String,
    #[serde(default)]
    pub sort: i32,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl FieldOption {
    pub fn new(code: impl Into<String>, name_key: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name_key: name_key.into(),
            sort: 0,
            metadata: Map::new(),
        }
    }
}

/// A reusable, named attribute field descriptor.
///
/// Definitions are configuration data: loaded read-only per request,
/// mutated out-of-band by catalog administrators. `min_value`/`max_value`
/// are numeric bounds for number/range fields and length bounds for
/// text/textarea fields. Recognised `metadata` keys: `integer` (numeric
/// value must be integral), `derived` (server-computed, never
/// user-supplied), `hidden` (never rendered publicly).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub field_key: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub label_key: Option<String>,
    #[serde(default)]
    pub description_key: Option<String>,
    /// Nullable category scope; scoped definitions shadow global ones.
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub min_value: Option<f64>,
    #[serde(default)]
    pub max_value: Option<f64>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub group_key: Option<String>,
    #[serde(default)]
    pub sort: i32,
    #[serde(default)]
    pub options: Vec<FieldOption>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl FieldDefinition {
    /// Registry storage key: `domain:field_key` for scoped definitions,
    /// the bare key otherwise. Uniqueness is enforced on this key.
    #[must_use]
    pub fn storage_key(&self) -> String {
        match &self.domain {
            Some(domain) => format!("{}:{}", domain, self.field_key),
            None => self.field_key.clone(),
        }
    }

    fn metadata_flag(&self, key: &str) -> bool {
        self.metadata.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.metadata_flag("integer")
    }

    #[must_use]
    pub fn is_derived(&self) -> bool {
        self.metadata_flag("derived")
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.metadata_flag("hidden")
    }

    /// Resolves a raw submitted code to its canonical option code,
    /// matching case-insensitively. Returns `None` when the code is not
    /// part of this field's option domain.
    #[must_use]
    pub fn option_code(&self, raw: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|opt| opt.code.eq_ignore_ascii_case(raw))
            .map(|opt| opt.code.as_str())
    }
}

/// Builder for field definitions.
///
/// Consolidates the construction patterns used by the built-in catalog so
/// each definition reads as a single chained expression.
#[derive(Debug, Clone)]
pub struct FieldBuilder {
    def: FieldDefinition,
}

impl FieldBuilder {
    pub fn new(field_key: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            def: FieldDefinition {
                field_key: field_key.into(),
                field_type,
                label_key: None,
                description_key: None,
                domain: None,
                is_required: false,
                unit: None,
                min_value: None,
                max_value: None,
                pattern: None,
                group_key: None,
                sort: 0,
                options: Vec::new(),
                metadata: Map::new(),
            },
        }
    }

    pub fn domain(mut self, domain: &str) -> Self {
        self.def.domain = Some(domain.to_string());
        self
    }

    pub fn required(mut self) -> Self {
        self.def.is_required = true;
        self
    }

    pub fn unit(mut self, unit: &str) -> Self {
        self.def.unit = Some(unit.to_string());
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.def.min_value = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.def.max_value = Some(max);
        self
    }

    pub fn range(self, min: f64, max: f64) -> Self {
        self.min(min).max(max)
    }

    pub fn pattern(mut self, pattern: &str) -> Self {
        self.def.pattern = Some(pattern.to_string());
        self
    }

    pub fn group(mut self, group_key: &str) -> Self {
        self.def.group_key = Some(group_key.to_string());
        self
    }

    pub fn sort(mut self, sort: i32) -> Self {
        self.def.sort = sort;
        self
    }

    pub fn integer(mut self) -> Self {
        self.def.metadata.insert("integer".to_string(), Value::Bool(true));
        self
    }

    pub fn derived(mut self) -> Self {
        self.def.metadata.insert("derived".to_string(), Value::Bool(true));
        self
    }

    pub fn hidden(mut self) -> Self {
        self.def.metadata.insert("hidden".to_string(), Value::Bool(true));
        self
    }

    /// Attaches an option domain; option name keys are synthesised as
    /// `catalog.options.<field_key>.<code>`.
    pub fn options(mut self, codes: &[&str]) -> Self {
        let field_key = self.def.field_key.clone();
        self.def.options = codes
            .iter()
            .enumerate()
            .map(|(index, code)| {
                let mut option = FieldOption::new(
                    *code,
                    format!("catalog.options.{}.{}", field_key, code.to_lowercase()),
                );
                option.sort = index as i32;
                option
            })
            .collect();
        self
    }

    #[must_use]
    pub fn build(self) -> FieldDefinition {
        self.def
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_key_includes_domain_when_scoped() {
        let scoped = FieldBuilder::new("listing_type", FieldType::Select)
            .domain("pets")
            .options(&["sale", "adoption"])
            .build();
        assert_eq!(scoped.storage_key(), "pets:listing_type");

        let global = FieldBuilder::new("condition", FieldType::Select)
            .options(&["new", "good"])
            .build();
        assert_eq!(global.storage_key(), "condition");
    }

    #[test]
    fn option_code_matches_case_insensitively() {
        let def = FieldBuilder::new("epc_rating", FieldType::Select)
            .options(&["A++", "A", "B"])
            .build();
        assert_eq!(def.option_code("a++"), Some("A++"));
        assert_eq!(def.option_code("b"), Some("B"));
        assert_eq!(def.option_code("z"), None);
    }

    #[test]
    fn metadata_flags_round_trip() {
        let def = FieldBuilder::new("imei", FieldType::Text)
            .pattern("^[0-9]{15}$")
            .hidden()
            .build();
        assert!(def.is_hidden());
        assert!(!def.is_derived());
        assert!(!def.is_integer());
    }
}
