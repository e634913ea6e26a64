//! Form renderer
//!
//! A pure function from schema + registry + current values + locale to a
//! renderable widget tree. Resolution rules:
//! - a schema ref whose field definition is missing renders a
//!   placeholder and the walk continues, it never fails;
//! - an unmet conditional excludes the field from the tree and from this
//!   pass's required computation (the validator stays the persistence
//!   authority regardless);
//! - label/description/placeholder keys resolve schema override first,
//!   then the field definition, then a synthetic key derived from the
//!   field key; numeric bounds resolve override-then-default the same
//!   way.

pub mod types;

pub use types::{FieldWidget, RenderedField, RenderedForm, RenderedGroup, RenderedStep, WidgetOption};

use crate::catalog::registry::FieldRegistry;
use crate::catalog::types::FieldDefinition;
use crate::schema::classifier::CategoryType;
use crate::schema::types::{CategorySchema, SchemaFieldRef};
use crate::validation::types::AttrMap;

fn synthetic_key(field_key: &str, kind: &str) -> String {
    format!("catalog.fields.{}.{}", field_key, kind)
}

fn resolve_label(field_ref: &SchemaFieldRef, def: &FieldDefinition) -> String {
    field_ref
        .label_key
        .clone()
        .or_else(|| def.label_key.clone())
        .unwrap_or_else(|| synthetic_key(&field_ref.field_key, "label"))
}

fn resolve_description(field_ref: &SchemaFieldRef, def: &FieldDefinition) -> Option<String> {
    field_ref
        .description_key
        .clone()
        .or_else(|| def.description_key.clone())
}

fn build_widget(
    field_ref: &SchemaFieldRef,
    def: &FieldDefinition,
    values: &AttrMap,
) -> FieldWidget {
    let required = match field_ref.optional {
        Some(optional) => !optional,
        None => def.is_required,
    };
    let mut options: Vec<WidgetOption> = def
        .options
        .iter()
        .map(|option| WidgetOption {
            code: option.code.clone(),
            name_key: option.name_key.clone(),
            sort: option.sort,
        })
        .collect();
    options.sort_by_key(|option| option.sort);

    FieldWidget {
        field_key: field_ref.field_key.clone(),
        field_type: def.field_type,
        label_key: resolve_label(field_ref, def),
        description_key: resolve_description(field_ref, def),
        placeholder_key: field_ref
            .placeholder_key
            .clone()
            .or_else(|| Some(synthetic_key(&field_ref.field_key, "placeholder"))),
        required,
        unit: def.unit.clone(),
        min: field_ref.min.or(def.min_value),
        max: field_ref.max.or(def.max_value),
        step: field_ref.step,
        pattern: def.pattern.clone(),
        options,
        value: values.get(&field_ref.field_key).cloned(),
    }
}

/// Renders a category schema into a widget tree.
#[must_use]
pub fn render(
    registry: &FieldRegistry,
    schema: &CategorySchema,
    category: CategoryType,
    values: &AttrMap,
    locale: &str,
) -> RenderedForm {
    let domain = Some(category.domain());
    let mut steps = Vec::with_capacity(schema.steps.len());

    for step in &schema.steps {
        let mut groups = Vec::with_capacity(step.groups.len());
        for group in &step.groups {
            let mut fields = Vec::new();
            for field_ref in &group.fields {
                if let Some(conditional) = &field_ref.conditional {
                    if !conditional.is_met(values) {
                        continue;
                    }
                }
                match registry.lookup_scoped(domain, &field_ref.field_key) {
                    None => fields.push(RenderedField::Placeholder {
                        field_key: field_ref.field_key.clone(),
                    }),
                    Some(def) if def.is_hidden() => continue,
                    Some(def) => {
                        fields.push(RenderedField::Widget(build_widget(field_ref, def, values)));
                    }
                }
            }
            if fields.is_empty() {
                continue;
            }
            groups.push(RenderedGroup {
                key: group.key.clone(),
                label_key: group
                    .label_key
                    .clone()
                    .unwrap_or_else(|| format!("catalog.groups.{}.label", group.key)),
                layout: group.layout,
                fields,
            });
        }
        if groups.is_empty() {
            continue;
        }
        steps.push(RenderedStep {
            key: step.key.clone(),
            label_key: step
                .label_key
                .clone()
                .unwrap_or_else(|| format!("catalog.steps.{}.label", step.key)),
            description_key: step.description_key.clone(),
            groups,
        });
    }

    RenderedForm {
        locale: locale.to_string(),
        schema_version: schema.version,
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::store::SchemaStore;
    use crate::schema::types::{GroupLayout, SchemaGroup, SchemaStep};
    use serde_json::json;

    fn values(pairs: &[(&str, serde_json::Value)]) -> AttrMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn conditional_fields_follow_current_values() {
        let registry = FieldRegistry::builtin();
        let store = SchemaStore::builtin();
        let schema = store.get(CategoryType::Property).unwrap();

        let sale = render(&registry, schema, CategoryType::Property, &values(&[
            ("listing_type", json!("sale")),
        ]), "nl");
        assert!(sale.widget("rent_monthly").is_none());

        let rent = render(&registry, schema, CategoryType::Property, &values(&[
            ("listing_type", json!("rent")),
        ]), "nl");
        assert!(rent.widget("rent_monthly").is_some());
    }

    #[test]
    fn missing_definition_renders_placeholder() {
        let registry = FieldRegistry::builtin();
        let schema = CategorySchema {
            version: 1,
            steps: vec![SchemaStep {
                key: "s".to_string(),
                label_key: None,
                description_key: None,
                groups: vec![SchemaGroup {
                    key: "g".to_string(),
                    label_key: None,
                    layout: GroupLayout::Single,
                    fields: vec![
                        SchemaFieldRef::new("furniture_type"),
                        SchemaFieldRef::new("ghost_field"),
                    ],
                }],
            }],
        };
        let form = render(&registry, &schema, CategoryType::Home, &AttrMap::new(), "fr");
        assert!(form.widget("furniture_type").is_some());
        assert!(form.has_placeholder("ghost_field"));
    }

    #[test]
    fn label_precedence_is_override_then_definition_then_synthetic() {
        let registry = FieldRegistry::builtin();
        let mut field_ref = SchemaFieldRef::new("postcode");
        field_ref.label_key = Some("custom.postcode.label".to_string());
        let schema = CategorySchema {
            version: 1,
            steps: vec![SchemaStep {
                key: "s".to_string(),
                label_key: None,
                description_key: None,
                groups: vec![SchemaGroup {
                    key: "g".to_string(),
                    label_key: None,
                    layout: GroupLayout::Single,
                    fields: vec![field_ref, SchemaFieldRef::new("municipality")],
                }],
            }],
        };
        let form = render(&registry, &schema, CategoryType::Property, &AttrMap::new(), "en");
        assert_eq!(form.widget("postcode").unwrap().label_key, "custom.postcode.label");
        // built-in definitions carry no label key, so the synthetic one wins
        assert_eq!(
            form.widget("municipality").unwrap().label_key,
            "catalog.fields.municipality.label"
        );
    }

    #[test]
    fn bounds_resolve_override_then_default() {
        let registry = FieldRegistry::builtin();
        let mut field_ref = SchemaFieldRef::new("rooms");
        field_ref.max = Some(10.0);
        field_ref.step = Some(1.0);
        let schema = CategorySchema {
            version: 1,
            steps: vec![SchemaStep {
                key: "s".to_string(),
                label_key: None,
                description_key: None,
                groups: vec![SchemaGroup {
                    key: "g".to_string(),
                    label_key: None,
                    layout: GroupLayout::Single,
                    fields: vec![field_ref],
                }],
            }],
        };
        let form = render(&registry, &schema, CategoryType::Property, &AttrMap::new(), "en");
        let widget = form.widget("rooms").unwrap();
        assert_eq!(widget.min, Some(0.0)); // registry default
        assert_eq!(widget.max, Some(10.0)); // schema override
        assert_eq!(widget.step, Some(1.0));
    }

    #[test]
    fn hidden_fields_are_never_rendered() {
        let registry = FieldRegistry::builtin();
        let store = SchemaStore::builtin();
        let schema = store.get(CategoryType::Electronics).unwrap();
        let form = render(&registry, schema, CategoryType::Electronics, &values(&[
            ("device_type", json!("phone")),
        ]), "en");
        assert!(form.widget("imei").is_none());
        assert!(!form.has_placeholder("imei"));
    }

    #[test]
    fn required_flag_honours_schema_override() {
        let registry = FieldRegistry::builtin();
        let mut optional_postcode = SchemaFieldRef::new("postcode");
        optional_postcode.optional = Some(true);
        let schema = CategorySchema {
            version: 1,
            steps: vec![SchemaStep {
                key: "s".to_string(),
                label_key: None,
                description_key: None,
                groups: vec![SchemaGroup {
                    key: "g".to_string(),
                    label_key: None,
                    layout: GroupLayout::Single,
                    fields: vec![optional_postcode, SchemaFieldRef::new("municipality")],
                }],
            }],
        };
        let form = render(&registry, &schema, CategoryType::Property, &AttrMap::new(), "en");
        assert!(!form.widget("postcode").unwrap().required);
        assert!(form.widget("municipality").unwrap().required);
    }
}
