//! Electronics ruleset

use crate::validation::rules::{CategoryRuleset, Invariant, RuleField};
use crate::validation::types::{codes, str_of, AttrMap};

const BATTERY_DEVICES: &[&str] = &["phone", "tablet", "laptop", "watch"];

pub(crate) const RULESET: CategoryRuleset = CategoryRuleset {
    fields: FIELDS,
    invariants: INVARIANTS,
};

const FIELDS: &[RuleField] = &[
    RuleField::required("device_type"),
    RuleField::required("brand"),
    RuleField::required("model"),
    RuleField::optional("release_year"),
    RuleField::optional("memory_gb"),
    RuleField::optional("storage_gb"),
    RuleField::optional("processor"),
    RuleField::optional("screen_size_inch"),
    RuleField::optional("resolution"),
    RuleField::required("condition"),
    RuleField::optional("battery_condition"),
    RuleField::optional("hours_of_use"),
    RuleField::optional("factory_locked"),
    RuleField::optional("original_box"),
    RuleField::optional("original_charger"),
    RuleField::optional("warranty_until"),
    RuleField::optional("imei"),
    RuleField::optional("serial_number"),
    RuleField::optional("delivery_options"),
];

const INVARIANTS: &[Invariant] = &[Invariant {
    field_path: "battery_condition",
    error_code: codes::REQUIRED,
    check: battery_condition_required,
}];

fn battery_condition_required(values: &AttrMap) -> Option<String> {
    let device_type = str_of(values, "device_type")?;
    if BATTERY_DEVICES.contains(&device_type)
        && str_of(values, "condition") != Some("for_parts")
        && str_of(values, "battery_condition").is_none()
    {
        return Some("battery condition is required for this device type".to_string());
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
    fn battery_devices_need_battery_condition() {
        let phone = values(&[("device_type", json!("phone")), ("condition", json!("good"))]);
        assert!(battery_condition_required(&phone).is_some());

        let with_battery = values(&[
            ("device_type", json!("phone")),
            ("condition", json!("good")),
            ("battery_condition", json!("average")),
        ]);
        assert!(battery_condition_required(&with_battery).is_none());
    }

    #[test]
    fn for_parts_devices_are_exempt() {
        let parts = values(&[("device_type", json!("laptop")), ("condition", json!("for_parts"))]);
        assert!(battery_condition_required(&parts).is_none());
    }

    #[test]
    fn non_battery_devices_are_exempt() {
        let tv = values(&[("device_type", json!("tv")), ("condition", json!("good"))]);
        assert!(battery_condition_required(&tv).is_none());
    }
}
