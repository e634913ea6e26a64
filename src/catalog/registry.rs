//! Field definition registry
//!
//! The registry is the catalog of reusable attribute field descriptors
//! and the sole source of truth for enumerable option domains. Validator
//! and renderer both resolve primitive shapes here so neither duplicates
//! option lists.

use std::collections::HashMap;
use std::path::Path;

use crate::catalog::types::{CatalogError, FieldDefinition, FieldType};

/// Read-only catalog of field definitions, keyed by storage key
/// (`domain:field_key` for scoped definitions, bare `field_key` otherwise).
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: HashMap<String, FieldDefinition>,
}

impl FieldRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// The registry pre-populated with the built-in ten-vertical catalog.
    #[must_use]
    pub fn builtin() -> Self {
        crate::catalog::builtin::registry()
    }

    /// Registers a field definition.
    ///
    /// # Errors
    /// Returns a `CatalogError` if:
    /// - The field key is empty
    /// - A definition with the same storage key already exists
    /// - The definition has options but is not select/multiselect, or
    ///   is select/multiselect without options
    pub fn register(&mut self, def: FieldDefinition) -> Result<(), CatalogError> {
        if def.field_key.is_empty() {
            return Err(CatalogError::InvalidDefinition(
                "field_key cannot be empty".to_string(),
            ));
        }

        let has_options = !def.options.is_empty();
        if def.field_type.has_options() && !has_options {
            return Err(CatalogError::InvalidDefinition(format!(
                "field '{}' is {:?} but declares no options",
                def.field_key, def.field_type
            )));
        }
        if !def.field_type.has_options() && has_options {
            return Err(CatalogError::InvalidDefinition(format!(
                "field '{}' declares options but is not select/multiselect",
                def.field_key
            )));
        }

        let key = def.storage_key();
        if self.fields.contains_key(&key) {
            return Err(CatalogError::DuplicateField(key));
        }
        self.fields.insert(key, def);
        Ok(())
    }

    /// Global lookup by bare field key.
    #[must_use]
    pub fn lookup(&self, field_key: &str) -> Option<&FieldDefinition> {
        self.fields.get(field_key)
    }

    /// Domain-scoped lookup: a definition scoped to `domain` shadows the
    /// global one with the same field key.
    #[must_use]
    pub fn lookup_scoped(&self, domain: Option<&str>, field_key: &str) -> Option<&FieldDefinition> {
        if let Some(domain) = domain {
            let scoped = format!("{}:{}", domain, field_key);
            if let Some(def) = self.fields.get(&scoped) {
                return Some(def);
            }
        }
        self.fields.get(field_key)
    }

    /// Whether a submitted key resolves to any definition for this domain.
    #[must_use]
    pub fn contains_scoped(&self, domain: Option<&str>, field_key: &str) -> bool {
        self.lookup_scoped(domain, field_key).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.values()
    }

    /// Merges definitions from a JSON array, rejecting duplicates.
    ///
    /// # Errors
    /// Returns a `CatalogError` on malformed JSON or on any definition
    /// that fails registration.
    pub fn merge_json(&mut self, json: &str) -> Result<usize, CatalogError> {
        let defs: Vec<FieldDefinition> = serde_json::from_str(json)
            .map_err(|e| CatalogError::InvalidData(format!("field catalog JSON: {}", e)))?;
        let count = defs.len();
        for def in defs {
            self.register(def)?;
        }
        Ok(count)
    }

    /// Loads a registry from a JSON catalog file (out-of-band catalog
    /// administration).
    ///
    /// # Errors
    /// Returns a `CatalogError` if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::InvalidData(format!("read {}: {}", path.display(), e)))?;
        let mut registry = Self::new();
        registry.merge_json(&raw)?;
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::FieldBuilder;

    fn select(key: &str, domain: Option<&str>, codes: &[&str]) -> FieldDefinition {
        let mut builder = FieldBuilder::new(key, FieldType::Select).options(codes);
        if let Some(domain) = domain {
            builder = builder.domain(domain);
        }
        builder.build()
    }

    #[test]
    fn register_rejects_duplicates() {
        let mut registry = FieldRegistry::new();
        registry.register(select("condition", None, &["new", "good"])).unwrap();
        let err = registry
            .register(select("condition", None, &["new"]))
            .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateField("condition".to_string()));
    }

    #[test]
    fn register_rejects_select_without_options() {
        let mut registry = FieldRegistry::new();
        let def = FieldBuilder::new("bad", FieldType::Select).build();
        assert!(registry.register(def).is_err());
    }

    #[test]
    fn scoped_lookup_shadows_global() {
        let mut registry = FieldRegistry::new();
        registry
            .register(select("listing_type", Some("property"), &["sale", "rent"]))
            .unwrap();
        registry
            .register(select("listing_type", Some("pets"), &["sale", "adoption", "lost", "found"]))
            .unwrap();

        let pets = registry.lookup_scoped(Some("pets"), "listing_type").unwrap();
        assert!(pets.option_code("adoption").is_some());
        let property = registry.lookup_scoped(Some("property"), "listing_type").unwrap();
        assert!(property.option_code("adoption").is_none());
        assert!(registry.lookup("listing_type").is_none());
    }

    #[test]
    fn merge_json_round_trip() {
        let json = r#"[
            {"field_key": "postcode", "field_type": "text", "pattern": "^[1-9][0-9]{3}$", "is_required": true},
            {"field_key": "furnished", "field_type": "select", "domain": "property",
             "options": [{"code": "unfurnished", "name_key": "k.unfurnished"}]}
        ]"#;
        let mut registry = FieldRegistry::new();
        assert_eq!(registry.merge_json(json).unwrap(), 2);
        assert!(registry.lookup("postcode").is_some());
        assert!(registry.lookup_scoped(Some("property"), "furnished").is_some());
    }
}
