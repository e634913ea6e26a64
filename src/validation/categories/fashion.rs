//! Fashion ruleset

use crate::validation::rules::{CategoryRuleset, Invariant, RuleField};
use crate::validation::types::{codes, is_true, str_of, AttrMap};

const SIZE_FIELDS: &[&str] = &["size_eu", "size_be", "size_uk", "size_us", "size_label"];

pub(crate) const RULESET: CategoryRuleset = CategoryRuleset {
    fields: FIELDS,
    invariants: INVARIANTS,
};

const FIELDS: &[RuleField] = &[
    RuleField::optional("gender"),
    RuleField::optional("age_category"),
    RuleField::required("clothing_type"),
    RuleField::optional("size_eu"),
    RuleField::optional("size_be"),
    RuleField::optional("size_uk"),
    RuleField::optional("size_us"),
    RuleField::optional("size_label"),
    RuleField::optional("chest_bust_cm"),
    RuleField::optional("waist_cm"),
    RuleField::optional("hips_cm"),
    RuleField::optional("brand"),
    RuleField::required("color"),
    RuleField::optional("material"),
    RuleField::optional("pattern"),
    RuleField::optional("season"),
    RuleField::required("condition"),
    RuleField::optional("defects"),
    RuleField::optional("original_tags"),
    RuleField::optional("designer"),
    RuleField::optional("vintage"),
    RuleField::optional("vintage_decade"),
    RuleField::optional("delivery_options"),
];

const INVARIANTS: &[Invariant] = &[
    Invariant {
        field_path: "size_label",
        error_code: codes::REQUIRED,
        check: some_size_present,
    },
    Invariant {
        field_path: "vintage_decade",
        error_code: codes::REQUIRED,
        check: vintage_needs_decade,
    },
];

fn some_size_present(values: &AttrMap) -> Option<String> {
    if SIZE_FIELDS.iter().any(|key| str_of(values, key).is_some()) {
        None
    } else {
        Some("at least one size specification is required".to_string())
    }
}

fn vintage_needs_decade(values: &AttrMap) -> Option<String> {
    if is_true(values, "vintage") && str_of(values, "vintage_decade").is_none() {
        return Some("vintage decade is required for vintage items".to_string());
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
    fn any_size_field_satisfies_the_rule() {
        assert!(some_size_present(&values(&[])).is_some());
        assert!(some_size_present(&values(&[("size_eu", json!("38"))])).is_none());
        assert!(some_size_present(&values(&[("size_label", json!("M"))])).is_none());
    }

    #[test]
    fn vintage_requires_decade() {
        let vintage = values(&[("vintage", json!(true))]);
        assert!(vintage_needs_decade(&vintage).is_some());
        let complete = values(&[("vintage", json!(true)), ("vintage_decade", json!("1970s"))]);
        assert!(vintage_needs_decade(&complete).is_none());
        let not_vintage = values(&[("vintage", json!(false))]);
        assert!(vintage_needs_decade(&not_vintage).is_none());
    }
}
