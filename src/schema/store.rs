use std::collections::HashMap;
use std::path::Path;

use crate::catalog::types::CatalogError;
use crate::schema::classifier::CategoryType;
use crate::schema::types::CategorySchema;

/// Per-category schema store.
///
/// Read-only per request; mutated out-of-band by catalog administrators.
/// A missing schema is not an error — the category simply renders no
/// specialized step.
#[derive(Debug, Clone, Default)]
pub struct SchemaStore {
    schemas: HashMap<CategoryType, CategorySchema>,
}

impl SchemaStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            schemas: HashMap::new(),
        }
    }

    /// The store pre-populated with the built-in per-vertical schemas.
    #[must_use]
    pub fn builtin() -> Self {
        crate::schema::builtin::store()
    }

    pub fn insert(&mut self, category: CategoryType, schema: CategorySchema) {
        self.schemas.insert(category, schema);
    }

    #[must_use]
    pub fn get(&self, category: CategoryType) -> Option<&CategorySchema> {
        self.schemas.get(&category)
    }

    pub fn categories(&self) -> impl Iterator<Item = (CategoryType, &CategorySchema)> {
        self.schemas.iter().map(|(category, schema)| (*category, schema))
    }

    /// Merges schemas from a JSON object keyed by category type, replacing
    /// any built-in schema for the same category.
    ///
    /// # Errors
    /// Returns a `CatalogError` on malformed JSON.
    pub fn merge_json(&mut self, json: &str) -> Result<usize, CatalogError> {
        let parsed: HashMap<CategoryType, CategorySchema> = serde_json::from_str(json)
            .map_err(|e| CatalogError::InvalidData(format!("schema JSON: {}", e)))?;
        let count = parsed.len();
        for (category, schema) in parsed {
            self.schemas.insert(category, schema);
        }
        Ok(count)
    }

    /// Loads a store from a JSON schema file.
    ///
    /// # Errors
    /// Returns a `CatalogError` if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::InvalidData(format!("read {}: {}", path.display(), e)))?;
        let mut store = Self::new();
        store.merge_json(&raw)?;
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_json_replaces_schema() {
        let mut store = SchemaStore::new();
        let json = r#"{
            "home": {
                "version": 2,
                "steps": [{"key": "details", "groups": [{"key": "main", "fields": [{"field_key": "furniture_type"}]}]}]
            }
        }"#;
        assert_eq!(store.merge_json(json).unwrap(), 1);
        let schema = store.get(CategoryType::Home).unwrap();
        assert_eq!(schema.version, 2);
        assert_eq!(schema.field_keys(), vec!["furniture_type"]);
    }
}
