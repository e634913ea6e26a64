//! Real-estate ruleset
//!
//! Carries the Belgian rental-law constraints: the 3-month deposit cap is
//! a registry bound, the postcode pattern is structural, and the rental
//! fields are tied to `listing_type` by invariant.

use crate::validation::rules::{CategoryRuleset, Invariant, RuleField};
use crate::validation::types::{codes, num_of, str_of, AttrMap};

pub(crate) const RULESET: CategoryRuleset = CategoryRuleset {
    fields: FIELDS,
    invariants: INVARIANTS,
};

const FIELDS: &[RuleField] = &[
    RuleField::required("property_type"),
    RuleField::required("listing_type"),
    RuleField::required("area_sqm"),
    RuleField::optional("land_area_sqm"),
    RuleField::optional("rooms"),
    RuleField::optional("bedrooms"),
    RuleField::optional("bathrooms"),
    RuleField::optional("year_built"),
    RuleField::optional("renovation_year"),
    RuleField::optional("floor"),
    RuleField::optional("total_floors"),
    RuleField::optional("epc_rating"),
    RuleField::optional("epc_cert_number"),
    RuleField::optional("epc_kwh_per_sqm_year"),
    RuleField::optional("heating_type"),
    RuleField::optional("double_glazing"),
    RuleField::optional("rent_monthly"),
    RuleField::optional("rent_charges_monthly"),
    RuleField::optional("deposit_months"),
    RuleField::optional("lease_duration_months"),
    RuleField::optional("available_from"),
    RuleField::optional("furnished"),
    RuleField::required("postcode"),
    RuleField::required("municipality"),
    RuleField::optional("neighborhood"),
    RuleField::optional("parking_spaces"),
    RuleField::optional("parking_type"),
    RuleField::optional("terrace_sqm"),
    RuleField::optional("garden_sqm"),
    RuleField::optional("garden_orientation"),
    RuleField::optional("elevator"),
    RuleField::optional("cellar"),
    RuleField::optional("pet_friendly"),
    RuleField::optional("smoking_allowed"),
];

const INVARIANTS: &[Invariant] = &[
    Invariant {
        field_path: "rent_monthly",
        error_code: codes::REQUIRED,
        check: rent_required_for_rent,
    },
    Invariant {
        field_path: "rent_monthly",
        error_code: codes::FORBIDDEN,
        check: rent_forbidden_for_sale,
    },
    Invariant {
        field_path: "bedrooms",
        error_code: codes::INVALID,
        check: bedrooms_within_rooms,
    },
    Invariant {
        field_path: "renovation_year",
        error_code: codes::INVALID,
        check: renovation_after_build,
    },
];

fn rent_required_for_rent(values: &AttrMap) -> Option<String> {
    if str_of(values, "listing_type") == Some("rent") && num_of(values, "rent_monthly").is_none() {
        return Some("monthly rent is required for rental listings".to_string());
    }
    None
}

fn rent_forbidden_for_sale(values: &AttrMap) -> Option<String> {
    if str_of(values, "listing_type") == Some("sale") && num_of(values, "rent_monthly").is_some() {
        return Some("monthly rent must not be set for sale listings".to_string());
    }
    None
}

fn bedrooms_within_rooms(values: &AttrMap) -> Option<String> {
    match (num_of(values, "bedrooms"), num_of(values, "rooms")) {
        (Some(bedrooms), Some(rooms)) if bedrooms > rooms => {
            Some("bedrooms cannot exceed total rooms".to_string())
        }
        _ => None,
    }
}

fn renovation_after_build(values: &AttrMap) -> Option<String> {
    match (num_of(values, "renovation_year"), num_of(values, "year_built")) {
        (Some(renovation), Some(built)) if renovation < built => {
            Some("renovation year must be after build year".to_string())
        }
        _ => None,
    }
}
