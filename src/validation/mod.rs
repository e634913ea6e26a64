//! Category validator
//!
//! Two-phase evaluation per submission: a structural pass over the
//! category's field shape (primitive types, bounds, patterns, option
//! membership — resolved from the registry), then a cross-field pass
//! over the declared invariants. Both passes collect every violation;
//! the result is either a normalized specifics payload or the complete
//! ordered error list, deduplicated by field path with
//! first-detected-wins ordering.

pub(crate) mod categories;
pub mod rules;
pub(crate) mod structural;
pub mod types;

use std::collections::HashSet;

use crate::catalog::registry::FieldRegistry;
use crate::error::VitrineResult;
use crate::reference::vehicles::VehicleCatalog;
use crate::schema::classifier::CategoryType;
use crate::validation::rules::CategoryRuleset;
use crate::validation::types::{
    AttrMap, FieldError, NormalizedSpecifics, ValidationResult,
};

/// Category-dispatching validator over injected read-only snapshots.
pub struct Validator<'a> {
    registry: &'a FieldRegistry,
    vehicles: &'a VehicleCatalog,
}

impl<'a> Validator<'a> {
    #[must_use]
    pub fn new(registry: &'a FieldRegistry, vehicles: &'a VehicleCatalog) -> Self {
        Self { registry, vehicles }
    }

    /// Validates a submitted attribute map against a category's ruleset.
    ///
    /// User-input problems come back as `ValidationResult::Invalid`;
    /// only configuration integrity faults (a ruleset field missing from
    /// the registry, an unparseable pattern) abort with `Err`.
    pub fn validate(
        &self,
        category: CategoryType,
        input: &AttrMap,
    ) -> VitrineResult<ValidationResult> {
        let (values, errors) = match category {
            CategoryType::Generic => (categories::generic::normalize(input), Vec::new()),
            CategoryType::Vehicle => {
                categories::vehicle::validate(self.registry, self.vehicles, input)?
            }
            other => {
                let ruleset = ruleset_for(other)
                    .expect("every non-generic, non-vehicle category has a ruleset");
                self.run_ruleset(other, ruleset, input)?
            }
        };

        let errors = dedup_by_path(errors);
        if errors.is_empty() {
            Ok(ValidationResult::Valid(NormalizedSpecifics {
                category_type: category,
                values,
            }))
        } else {
            Ok(ValidationResult::Invalid(errors))
        }
    }

    fn run_ruleset(
        &self,
        category: CategoryType,
        ruleset: &CategoryRuleset,
        input: &AttrMap,
    ) -> VitrineResult<(AttrMap, Vec<FieldError>)> {
        let (values, mut errors) =
            structural::run(self.registry, category, ruleset.fields, input)?;
        for invariant in ruleset.invariants {
            if let Some(detail) = (invariant.check)(&values) {
                errors.push(FieldError::new(
                    invariant.field_path,
                    invariant.error_code,
                    detail,
                ));
            }
        }
        Ok((values, errors))
    }
}

/// The declarative ruleset for a category, `None` for the two categories
/// with bespoke handling (vehicle, generic).
#[must_use]
pub fn ruleset_for(category: CategoryType) -> Option<&'static CategoryRuleset> {
    match category {
        CategoryType::Property => Some(&categories::property::RULESET),
        CategoryType::Job => Some(&categories::job::RULESET),
        CategoryType::Electronics => Some(&categories::electronics::RULESET),
        CategoryType::Fashion => Some(&categories::fashion::RULESET),
        CategoryType::Home => Some(&categories::home::RULESET),
        CategoryType::Pets => Some(&categories::pets::RULESET),
        CategoryType::Sports => Some(&categories::sports::RULESET),
        CategoryType::Services => Some(&categories::services::RULESET),
        CategoryType::BabyKids => Some(&categories::baby_kids::RULESET),
        CategoryType::Vehicle | CategoryType::Generic => None,
    }
}

/// Field keys a category requires at persistence time; consumed by the
/// schema consistency lint.
#[must_use]
pub fn required_fields(category: CategoryType) -> Vec<&'static str> {
    match category {
        CategoryType::Vehicle => categories::vehicle::FIELDS
            .iter()
            .filter(|field| field.required)
            .map(|field| field.field_key)
            .collect(),
        other => ruleset_for(other)
            .map(|ruleset| ruleset.required_keys().collect())
            .unwrap_or_default(),
    }
}

fn dedup_by_path(errors: Vec<FieldError>) -> Vec<FieldError> {
    let mut seen = HashSet::new();
    errors
        .into_iter()
        .filter(|error| seen.insert(error.field_path.clone()))
        .collect()
}
