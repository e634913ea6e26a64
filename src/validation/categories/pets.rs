//! Pets ruleset
//!
//! Dogs and cats offered for sale or adoption must be microchipped
//! (Belgian law). Lost/found listings need last-seen details; adoption
//! listings need temperament information.

use crate::validation::rules::{CategoryRuleset, Invariant, RuleField};
use crate::validation::types::{codes, is_true, str_of, AttrMap};

pub(crate) const RULESET: CategoryRuleset = CategoryRuleset {
    fields: FIELDS,
    invariants: INVARIANTS,
};

const FIELDS: &[RuleField] = &[
    RuleField::required("category"),
    RuleField::required("listing_type"),
    RuleField::optional("species"),
    RuleField::optional("breed"),
    RuleField::optional("age_years"),
    RuleField::optional("age_months"),
    RuleField::optional("gender"),
    RuleField::optional("microchipped"),
    RuleField::optional("microchip_number"),
    RuleField::optional("vaccinated"),
    RuleField::optional("pet_passport"),
    RuleField::optional("neutered_spayed"),
    RuleField::optional("health_issues"),
    RuleField::optional("temperament"),
    RuleField::optional("adoption_fee"),
    RuleField::optional("good_with_kids"),
    RuleField::optional("last_seen_date"),
    RuleField::optional("last_seen_location"),
    RuleField::optional("distinctive_marks"),
];

const INVARIANTS: &[Invariant] = &[
    Invariant {
        field_path: "microchipped",
        error_code: codes::REQUIRED,
        check: microchip_required,
    },
    Invariant {
        field_path: "last_seen_date",
        error_code: codes::REQUIRED,
        check: lost_found_details,
    },
    Invariant {
        field_path: "temperament",
        error_code: codes::REQUIRED,
        check: adoption_temperament,
    },
];

fn microchip_required(values: &AttrMap) -> Option<String> {
    let category = str_of(values, "category")?;
    let listing_type = str_of(values, "listing_type")?;
    let chip_mandatory = matches!(category, "dog" | "cat")
        && matches!(listing_type, "sale" | "adoption");
    if chip_mandatory && !is_true(values, "microchipped") {
        return Some("dogs and cats must be microchipped in Belgium".to_string());
    }
    None
}

fn lost_found_details(values: &AttrMap) -> Option<String> {
    let listing_type = str_of(values, "listing_type")?;
    if matches!(listing_type, "lost" | "found")
        && (str_of(values, "last_seen_date").is_none()
            || str_of(values, "last_seen_location").is_none())
    {
        return Some("last seen date and location are required for lost/found pets".to_string());
    }
    None
}

fn adoption_temperament(values: &AttrMap) -> Option<String> {
    if str_of(values, "listing_type") == Some("adoption")
        && str_of(values, "temperament").is_none()
    {
        return Some("temperament information is required for adoption listings".to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(pairs: &[(&str, serde_json::Value)]) -> AttrMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn dogs_for_sale_must_be_microchipped() {
        let unchipped = values(&[
            ("category", json!("dog")),
            ("listing_type", json!("sale")),
            ("microchipped", json!(false)),
        ]);
        assert!(microchip_required(&unchipped).is_some());

        let chipped = values(&[
            ("category", json!("dog")),
            ("listing_type", json!("sale")),
            ("microchipped", json!(true)),
        ]);
        assert!(microchip_required(&chipped).is_none());
    }

    #[test]
    fn microchip_rule_only_binds_dogs_and_cats_for_sale_or_adoption() {
        let bird = values(&[("category", json!("bird")), ("listing_type", json!("sale"))]);
        assert!(microchip_required(&bird).is_none());
        let lost_dog = values(&[("category", json!("dog")), ("listing_type", json!("lost"))]);
        assert!(microchip_required(&lost_dog).is_none());
    }

    #[test]
    fn lost_pets_need_last_seen_details() {
        let lost = values(&[("category", json!("cat")), ("listing_type", json!("lost"))]);
        assert!(lost_found_details(&lost).is_some());

        let complete = values(&[
            ("category", json!("cat")),
            ("listing_type", json!("lost")),
            ("last_seen_date", json!("2026-07-01")),
            ("last_seen_location", json!("Parc de Bruxelles")),
        ]);
        assert!(lost_found_details(&complete).is_none());
    }

    #[test]
    fn adoption_needs_temperament() {
        let adoption = values(&[("category", json!("dog")), ("listing_type", json!("adoption"))]);
        assert!(adoption_temperament(&adoption).is_some());
        let described = values(&[
            ("category", json!("dog")),
            ("listing_type", json!("adoption")),
            ("temperament", json!("calm, good with children")),
        ]);
        assert!(adoption_temperament(&described).is_none());
    }
}
