//! Home & living ruleset

use crate::validation::rules::{CategoryRuleset, Invariant, RuleField};
use crate::validation::types::{codes, num_of, str_of, AttrMap};

const MEASURED_FURNITURE: &[&str] = &[
    "sofa", "chair", "table", "bed", "wardrobe", "shelf", "desk", "cabinet",
];

pub(crate) const RULESET: CategoryRuleset = CategoryRuleset {
    fields: FIELDS,
    invariants: INVARIANTS,
};

const FIELDS: &[RuleField] = &[
    RuleField::required("furniture_type"),
    RuleField::optional("brand"),
    RuleField::optional("material"),
    RuleField::optional("color"),
    RuleField::optional("width_cm"),
    RuleField::optional("height_cm"),
    RuleField::optional("depth_cm"),
    RuleField::required("condition"),
    RuleField::optional("assembly_required"),
    RuleField::optional("delivery_options"),
];

const INVARIANTS: &[Invariant] = &[Invariant {
    field_path: "width_cm",
    error_code: codes::REQUIRED,
    check: furniture_needs_dimensions,
}];

fn furniture_needs_dimensions(values: &AttrMap) -> Option<String> {
    let furniture_type = str_of(values, "furniture_type")?;
    if !MEASURED_FURNITURE.contains(&furniture_type) {
        return None;
    }
    let measured = num_of(values, "width_cm").is_some()
        || num_of(values, "height_cm").is_some()
        || num_of(values, "depth_cm").is_some();
    if measured {
        None
    } else {
        Some("at least one dimension is required for furniture items".to_string())
    }
}
