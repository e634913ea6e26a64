//! Sports & hobbies ruleset

use crate::validation::rules::{CategoryRuleset, Invariant, RuleField};
use crate::validation::types::{codes, num_of, str_of, AttrMap};

pub(crate) const RULESET: CategoryRuleset = CategoryRuleset {
    fields: FIELDS,
    invariants: INVARIANTS,
};

const FIELDS: &[RuleField] = &[
    RuleField::required("sport_type"),
    RuleField::required("item_type"),
    RuleField::optional("brand"),
    RuleField::optional("size"),
    RuleField::required("condition"),
    RuleField::optional("frame_size_cm"),
    RuleField::optional("wheel_size_inch"),
    RuleField::optional("gears"),
    RuleField::optional("delivery_options"),
];

const INVARIANTS: &[Invariant] = &[Invariant {
    field_path: "frame_size_cm",
    error_code: codes::REQUIRED,
    check: bicycles_need_frame_size,
}];

fn bicycles_need_frame_size(values: &AttrMap) -> Option<String> {
    let item_type = str_of(values, "item_type")?;
    if str_of(values, "sport_type") == Some("cycling")
        && item_type.to_lowercase().contains("bicy")
        && num_of(values, "frame_size_cm").is_none()
    {
        return Some("frame size is required for bicycles".to_string());
    }
    None
}
