//! Schema/validator consistency lint
//!
//! Renderer visibility and validator required-ness are declared
//! independently, so a catalog owner can require a field at persistence
//! time while the schema never shows it. That is legal (a server-only
//! invariant) but usually drift, so it is surfaced as a startup warning
//! rather than enforced. The lint also flags schema references to field
//! keys the registry does not know — those degrade to placeholders at
//! render time.

use log::warn;
use std::fmt;

use crate::catalog::registry::FieldRegistry;
use crate::schema::classifier::CategoryType;
use crate::schema::store::SchemaStore;
use crate::validation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningReason {
    /// A validator-required field is not referenced by the category schema.
    MissingFromSchema,
    /// A validator-required field is only reachable behind a conditional,
    /// so some submissions never see it rendered.
    ConditionallyHidden,
    /// A schema field ref does not resolve in the registry.
    UnknownField,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencyWarning {
    pub category: CategoryType,
    pub field_key: String,
    pub reason: WarningReason,
}

impl fmt::Display for ConsistencyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            WarningReason::MissingFromSchema => write!(
                f,
                "{}: field '{}' is required by the validator but never rendered by the schema",
                self.category, self.field_key
            ),
            WarningReason::ConditionallyHidden => write!(
                f,
                "{}: field '{}' is required by the validator but only conditionally visible",
                self.category, self.field_key
            ),
            WarningReason::UnknownField => write!(
                f,
                "{}: schema references '{}' which has no registry definition",
                self.category, self.field_key
            ),
        }
    }
}

/// Runs the lint across every category, logging each finding.
#[must_use]
pub fn check(registry: &FieldRegistry, store: &SchemaStore) -> Vec<ConsistencyWarning> {
    let mut warnings = Vec::new();

    for category in CategoryType::ALL {
        if category == CategoryType::Generic {
            continue;
        }
        let schema = store.get(category);

        for field_key in validation::required_fields(category) {
            match schema.and_then(|s| s.field_ref(field_key)) {
                None => warnings.push(ConsistencyWarning {
                    category,
                    field_key: field_key.to_string(),
                    reason: WarningReason::MissingFromSchema,
                }),
                Some(field_ref) if field_ref.conditional.is_some() => {
                    warnings.push(ConsistencyWarning {
                        category,
                        field_key: field_key.to_string(),
                        reason: WarningReason::ConditionallyHidden,
                    });
                }
                Some(_) => {}
            }
        }

        if let Some(schema) = schema {
            let domain = Some(category.domain());
            for field_key in schema.field_keys() {
                if !registry.contains_scoped(domain, field_key) {
                    warnings.push(ConsistencyWarning {
                        category,
                        field_key: field_key.to_string(),
                        reason: WarningReason::UnknownField,
                    });
                }
            }
        }
    }

    for warning in &warnings {
        warn!("schema consistency: {}", warning);
    }
    warnings
}
