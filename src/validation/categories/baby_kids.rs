//! Baby & kids ruleset
//!
//! Safety-critical item types require named safety standards, and a
//! recalled item is rejected outright rather than warned about.

use crate::validation::rules::{CategoryRuleset, Invariant, RuleField};
use crate::validation::types::{codes, has_any, str_of, AttrMap};

const SAFETY_CRITICAL: &[&str] = &["car_seat", "crib", "high_chair", "baby_carrier", "playpen"];

pub(crate) const RULESET: CategoryRuleset = CategoryRuleset {
    fields: FIELDS,
    invariants: INVARIANTS,
};

const FIELDS: &[RuleField] = &[
    RuleField::required("item_type"),
    RuleField::optional("age_range"),
    RuleField::optional("brand"),
    RuleField::optional("safety_standards"),
    RuleField::optional("safety_cert_url"),
    RuleField::optional("recall_status"),
    RuleField::required("condition"),
    RuleField::optional("cleanable"),
    RuleField::optional("washable"),
    RuleField::optional("sterilized"),
    RuleField::optional("delivery_options"),
];

const INVARIANTS: &[Invariant] = &[
    Invariant {
        field_path: "safety_standards",
        error_code: codes::REQUIRED,
        check: safety_standards_required,
    },
    Invariant {
        field_path: "recall_status",
        error_code: codes::REJECTED,
        check: recalled_items_rejected,
    },
];

fn safety_standards_required(values: &AttrMap) -> Option<String> {
    let item_type = str_of(values, "item_type")?;
    if SAFETY_CRITICAL.contains(&item_type) && !has_any(values, "safety_standards") {
        return Some("safety standards are required for this item type".to_string());
    }
    None
}

fn recalled_items_rejected(values: &AttrMap) -> Option<String> {
    if str_of(values, "recall_status") == Some("recalled") {
        return Some("recalled items cannot be listed".to_string());
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
    fn car_seats_need_safety_standards() {
        let bare = values(&[("item_type", json!("car_seat"))]);
        assert!(safety_standards_required(&bare).is_some());

        let certified = values(&[
            ("item_type", json!("car_seat")),
            ("safety_standards", json!(["ECE_R129"])),
        ]);
        assert!(safety_standards_required(&certified).is_none());

        let toy = values(&[("item_type", json!("toy"))]);
        assert!(safety_standards_required(&toy).is_none());
    }

    #[test]
    fn empty_standards_list_does_not_count() {
        let empty = values(&[
            ("item_type", json!("crib")),
            ("safety_standards", json!([])),
        ]);
        assert!(safety_standards_required(&empty).is_some());
    }

    #[test]
    fn recalled_items_are_rejected_outright() {
        let recalled = values(&[("item_type", json!("toy")), ("recall_status", json!("recalled"))]);
        assert!(recalled_items_rejected(&recalled).is_some());
        let safe = values(&[("item_type", json!("toy")), ("recall_status", json!("safe"))]);
        assert!(recalled_items_rejected(&safe).is_none());
    }
}
