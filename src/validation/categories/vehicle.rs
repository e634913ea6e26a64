//! Vehicle ruleset
//!
//! The one category whose validation consults an external reference
//! catalog: make and model must resolve against the injected snapshot,
//! the year must fall inside the matched model's production range, and
//! the body type / country display fields are denormalized from the
//! matched entry on every validation — the client is never trusted to
//! have looked them up correctly.

use chrono::{Datelike, Utc};
use serde_json::{Number, Value};

use crate::catalog::registry::FieldRegistry;
use crate::error::VitrineResult;
use crate::reference::vehicles::VehicleCatalog;
use crate::schema::classifier::CategoryType;
use crate::validation::rules::RuleField;
use crate::validation::structural;
use crate::validation::types::{codes, num_of, str_of, AttrMap, FieldError};

pub(crate) const FIELDS: &[RuleField] = &[
    RuleField::required("make"),
    RuleField::required("model"),
    RuleField::required("year"),
    RuleField::required("mileage"),
    RuleField::required("condition"),
];

/// Runs the vehicle validation: the structural pass over the five input
/// fields, then the reference-catalog checks, then denormalization.
pub(crate) fn validate(
    registry: &FieldRegistry,
    catalog: &VehicleCatalog,
    input: &AttrMap,
) -> VitrineResult<(AttrMap, Vec<FieldError>)> {
    let (mut values, mut errors) =
        structural::run(registry, CategoryType::Vehicle, FIELDS, input)?;

    let make = str_of(&values, "make").map(str::to_string);
    let model = str_of(&values, "model").map(str::to_string);
    let year = num_of(&values, "year");

    if let Some(make) = make {
        match catalog.make(&make) {
            None => {
                errors.push(FieldError::new(
                    "make",
                    codes::UNKNOWN,
                    format!("unknown make '{}'", make),
                ));
            }
            Some(_) => {
                if let Some(model_name) = model {
                    match catalog.find_model(&make, &model_name) {
                        None => {
                            errors.push(FieldError::new(
                                "model",
                                codes::UNKNOWN,
                                format!("unknown model '{}'", model_name),
                            ));
                        }
                        Some(entry) => {
                            let current_year = Utc::now().year();
                            let (start, end) = entry.year_range(current_year);
                            if let Some(year) = year {
                                let year = year as i32;
                                if year < start || year > end {
                                    errors.push(FieldError::new(
                                        "year",
                                        codes::OUT_OF_RANGE,
                                        format!("allowed range {}-{}", start, end),
                                    ));
                                }
                            }
                            if errors.is_empty() {
                                denormalize(&mut values, entry.body_type.clone(), entry.country.clone());
                            }
                        }
                    }
                }
            }
        }
    }

    Ok((values, errors))
}

/// Rounds the mileage and copies the derived display fields from the
/// matched model, overwriting anything the client may have supplied.
fn denormalize(values: &mut AttrMap, body_type: String, country: String) {
    if let Some(mileage) = num_of(values, "mileage") {
        let rounded = mileage.round() as i64;
        values.insert("mileage".to_string(), Value::Number(Number::from(rounded)));
        values.insert(
            "vehicle_mileage_km".to_string(),
            Value::Number(Number::from(rounded)),
        );
    }
    values.insert("vehicle_body_type".to_string(), Value::String(body_type));
    values.insert("vehicle_country".to_string(), Value::String(country));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::vehicles::VehicleModel;
    use serde_json::json;

    fn snapshot() -> VehicleCatalog {
        let mut catalog = VehicleCatalog::new(1);
        catalog.insert(
            "Toyota",
            VehicleModel {
                name: "Corolla".to_string(),
                year_start: 2000,
                year_end: Some(2013),
                body_type: "sedan".to_string(),
                country: "Japan".to_string(),
            },
        );
        catalog
    }

    fn input(pairs: &[(&str, serde_json::Value)]) -> AttrMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    fn corolla(year: i32, mileage: f64) -> AttrMap {
        input(&[
            ("make", json!("Toyota")),
            ("model", json!("Corolla")),
            ("year", json!(year)),
            ("mileage", json!(mileage)),
            ("condition", json!("good")),
        ])
    }

    #[test]
    fn accepted_input_is_denormalized() {
        let registry = FieldRegistry::builtin();
        let (values, errors) = validate(&registry, &snapshot(), &corolla(2005, 120_000.0)).unwrap();
        assert!(errors.is_empty());
        assert_eq!(values.get("vehicle_mileage_km"), Some(&json!(120_000)));
        assert_eq!(values.get("vehicle_body_type"), Some(&json!("sedan")));
        assert_eq!(values.get("vehicle_country"), Some(&json!("Japan")));
    }

    #[test]
    fn year_outside_model_range_is_rejected_with_range_detail() {
        let registry = FieldRegistry::builtin();
        let (_, errors) = validate(&registry, &snapshot(), &corolla(1998, 120_000.0)).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field_path, "year");
        assert_eq!(errors[0].detail, "allowed range 2000-2013");
    }

    #[test]
    fn unknown_make_and_model_are_reference_errors() {
        let registry = FieldRegistry::builtin();
        let mut bad_make = corolla(2005, 1000.0);
        bad_make.insert("make".to_string(), json!("Trabant"));
        let (_, errors) = validate(&registry, &snapshot(), &bad_make).unwrap();
        assert_eq!(errors[0].field_path, "make");
        assert_eq!(errors[0].error_code, codes::UNKNOWN);

        let mut bad_model = corolla(2005, 1000.0);
        bad_model.insert("model".to_string(), json!("Camry"));
        let (_, errors) = validate(&registry, &snapshot(), &bad_model).unwrap();
        assert_eq!(errors[0].field_path, "model");
        assert_eq!(errors[0].error_code, codes::UNKNOWN);
    }

    #[test]
    fn mileage_is_rounded_to_whole_units() {
        let registry = FieldRegistry::builtin();
        let (values, errors) = validate(&registry, &snapshot(), &corolla(2005, 120_000.4)).unwrap();
        assert!(errors.is_empty());
        assert_eq!(values.get("mileage"), Some(&json!(120_000)));
    }

    #[test]
    fn condition_outside_vehicle_enum_is_structural() {
        let registry = FieldRegistry::builtin();
        let mut bad = corolla(2005, 1000.0);
        bad.insert("condition".to_string(), json!("like_new"));
        let (_, errors) = validate(&registry, &snapshot(), &bad).unwrap();
        assert_eq!(errors[0].field_path, "condition");
        assert_eq!(errors[0].error_code, codes::UNKNOWN_OPTION);
    }

    #[test]
    fn derived_fields_are_recomputed_not_trusted() {
        let registry = FieldRegistry::builtin();
        let mut tampered = corolla(2005, 1000.0);
        tampered.insert("vehicle_body_type".to_string(), json!("spaceship"));
        let (values, errors) = validate(&registry, &snapshot(), &tampered).unwrap();
        assert!(errors.is_empty());
        assert_eq!(values.get("vehicle_body_type"), Some(&json!("sedan")));
    }
}
