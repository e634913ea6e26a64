//! Services ruleset
//!
//! Belgian VAT registration implies a VAT number; professional services
//! must carry insurance.

use crate::validation::rules::{CategoryRuleset, Invariant, RuleField};
use crate::validation::types::{codes, is_true, num_of, str_of, AttrMap};

pub(crate) const RULESET: CategoryRuleset = CategoryRuleset {
    fields: FIELDS,
    invariants: INVARIANTS,
};

const FIELDS: &[RuleField] = &[
    RuleField::required("service_category"),
    RuleField::required("service_type"),
    RuleField::optional("price_per_hour"),
    RuleField::optional("price_per_session"),
    RuleField::optional("price_negotiable"),
    RuleField::optional("provider_certified"),
    RuleField::optional("experience_years"),
    RuleField::optional("vat_registered"),
    RuleField::optional("vat_number"),
    RuleField::optional("insurance"),
    RuleField::optional("available_days"),
    RuleField::optional("available_hours"),
    RuleField::optional("location_service"),
];

const INVARIANTS: &[Invariant] = &[
    Invariant {
        field_path: "price_per_hour",
        error_code: codes::REQUIRED,
        check: pricing_mode_present,
    },
    Invariant {
        field_path: "vat_number",
        error_code: codes::REQUIRED,
        check: vat_number_required,
    },
    Invariant {
        field_path: "insurance",
        error_code: codes::REQUIRED,
        check: professional_insurance,
    },
];

fn pricing_mode_present(values: &AttrMap) -> Option<String> {
    let priced = num_of(values, "price_per_hour").is_some()
        || num_of(values, "price_per_session").is_some()
        || is_true(values, "price_negotiable");
    if priced {
        None
    } else {
        Some("at least one pricing option is required".to_string())
    }
}

fn vat_number_required(values: &AttrMap) -> Option<String> {
    if is_true(values, "vat_registered") && str_of(values, "vat_number").is_none() {
        return Some("VAT number is required for VAT-registered businesses".to_string());
    }
    None
}

fn professional_insurance(values: &AttrMap) -> Option<String> {
    if str_of(values, "service_category") == Some("professional") && !is_true(values, "insurance") {
        return Some("professional services must carry insurance".to_string());
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
    fn some_pricing_mode_is_required() {
        assert!(pricing_mode_present(&values(&[])).is_some());
        assert!(pricing_mode_present(&values(&[("price_per_hour", json!(45))])).is_none());
        assert!(pricing_mode_present(&values(&[("price_negotiable", json!(true))])).is_none());
        // negotiable=false is not a pricing mode
        assert!(pricing_mode_present(&values(&[("price_negotiable", json!(false))])).is_some());
    }

    #[test]
    fn vat_registration_implies_number() {
        let registered = values(&[("vat_registered", json!(true))]);
        assert!(vat_number_required(&registered).is_some());
        let complete = values(&[
            ("vat_registered", json!(true)),
            ("vat_number", json!("BE0123456789")),
        ]);
        assert!(vat_number_required(&complete).is_none());
    }

    #[test]
    fn professional_services_need_insurance() {
        let uninsured = values(&[("service_category", json!("professional"))]);
        assert!(professional_insurance(&uninsured).is_some());
        let insured = values(&[
            ("service_category", json!("professional")),
            ("insurance", json!(true)),
        ]);
        assert!(professional_insurance(&insured).is_none());
        let tutor = values(&[("service_category", json!("education_tutoring"))]);
        assert!(professional_insurance(&tutor).is_none());
    }
}
