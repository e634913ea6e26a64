//! Job listing ruleset

use crate::validation::rules::{CategoryRuleset, Invariant, RuleField};
use crate::validation::types::{codes, num_of, str_of, AttrMap};

pub(crate) const RULESET: CategoryRuleset = CategoryRuleset {
    fields: FIELDS,
    invariants: INVARIANTS,
};

const FIELDS: &[RuleField] = &[
    RuleField::required("job_category"),
    RuleField::optional("cp_code"),
    RuleField::required("contract_type"),
    RuleField::required("employment_type"),
    RuleField::optional("hours_per_week"),
    RuleField::optional("remote_option"),
    RuleField::optional("salary_min"),
    RuleField::optional("salary_max"),
    RuleField::optional("salary_currency"),
    RuleField::optional("salary_period"),
    RuleField::optional("salary_negotiable"),
    RuleField::optional("experience_years_min"),
    RuleField::optional("education_level"),
    RuleField::optional("languages_required"),
    RuleField::optional("driving_license_required"),
    RuleField::optional("license_types"),
    RuleField::optional("company_name"),
    RuleField::optional("company_size"),
    RuleField::optional("application_deadline"),
    RuleField::optional("contact_email"),
    RuleField::optional("contact_phone"),
    RuleField::optional("application_url"),
];

const INVARIANTS: &[Invariant] = &[
    Invariant {
        field_path: "salary_max",
        error_code: codes::INVALID,
        check: salary_range_ordered,
    },
    Invariant {
        field_path: "hours_per_week",
        error_code: codes::OUT_OF_RANGE,
        check: full_time_hours,
    },
    Invariant {
        field_path: "hours_per_week",
        error_code: codes::OUT_OF_RANGE,
        check: part_time_hours,
    },
    Invariant {
        field_path: "contact_email",
        error_code: codes::REQUIRED,
        check: contact_method_present,
    },
];

fn salary_range_ordered(values: &AttrMap) -> Option<String> {
    match (num_of(values, "salary_min"), num_of(values, "salary_max")) {
        (Some(min), Some(max)) if max < min => {
            Some("maximum salary must be greater than or equal to minimum salary".to_string())
        }
        _ => None,
    }
}

fn full_time_hours(values: &AttrMap) -> Option<String> {
    if str_of(values, "employment_type") == Some("full_time") {
        if let Some(hours) = num_of(values, "hours_per_week") {
            if !(35.0..=45.0).contains(&hours) {
                return Some("full-time requires 35-45 hours per week".to_string());
            }
        }
    }
    None
}

fn part_time_hours(values: &AttrMap) -> Option<String> {
    if str_of(values, "employment_type") == Some("part_time") {
        if let Some(hours) = num_of(values, "hours_per_week") {
            if hours >= 35.0 {
                return Some("part-time must be less than 35 hours per week".to_string());
            }
        }
    }
    None
}

fn contact_method_present(values: &AttrMap) -> Option<String> {
    let any_contact = str_of(values, "contact_email").is_some()
        || str_of(values, "contact_phone").is_some()
        || str_of(values, "application_url").is_some();
    if any_contact {
        None
    } else {
        Some("at least one contact method is required".to_string())
    }
}
