//! Structural pass
//!
//! Checks every ruleset field against its registry definition: primitive
//! type, numeric bounds, regex pattern, enum membership. Strings are
//! trimmed and the empty string is treated as absent. All violations are
//! collected — never fail-fast — keyed by field path, while valid values
//! are normalized into the candidate record the cross-field pass runs
//! against.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Number, Value};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::catalog::registry::FieldRegistry;
use crate::catalog::types::{FieldDefinition, FieldType};
use crate::error::{VitrineError, VitrineResult};
use crate::schema::classifier::CategoryType;
use crate::validation::rules::RuleField;
use crate::validation::types::{codes, AttrMap, FieldError};

static PATTERN_CACHE: Lazy<Mutex<HashMap<String, Regex>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn pattern_matches(pattern: &str, value: &str) -> VitrineResult<bool> {
    let mut cache = PATTERN_CACHE
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    if let Some(regex) = cache.get(pattern) {
        return Ok(regex.is_match(value));
    }
    let regex = Regex::new(pattern)
        .map_err(|e| VitrineError::Config(format!("invalid pattern '{}': {}", pattern, e)))?;
    let matched = regex.is_match(value);
    cache.insert(pattern.to_string(), regex);
    Ok(matched)
}

fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn range_detail(def: &FieldDefinition) -> String {
    match (def.min_value, def.max_value) {
        (Some(min), Some(max)) => format!("allowed range {}-{}", fmt_num(min), fmt_num(max)),
        (Some(min), None) => format!("must be at least {}", fmt_num(min)),
        (None, Some(max)) => format!("must be at most {}", fmt_num(max)),
        (None, None) => String::new(),
    }
}

/// The submitted value, trimmed; `None` when absent (missing, null, or
/// an empty/whitespace-only string).
fn presence(raw: Option<&Value>) -> Option<Value> {
    match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(Value::String(trimmed.to_string()))
            }
        }
        Some(Value::Array(items)) if items.is_empty() => None,
        Some(other) => Some(other.clone()),
    }
}

fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        // Form layers post numbers as strings; accept and normalize.
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn numeric_value(value: f64, integer: bool) -> Value {
    if integer {
        Value::Number(Number::from(value as i64))
    } else {
        Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
    }
}

fn check_string(
    def: &FieldDefinition,
    value: &Value,
) -> VitrineResult<Result<Value, FieldError>> {
    let path = &def.field_key;
    let text = match value.as_str() {
        Some(text) => text,
        None => {
            return Ok(Err(FieldError::new(path, codes::WRONG_TYPE, "expected text")));
        }
    };
    let length = text.chars().count() as f64;
    if def.min_value.is_some_and(|min| length < min)
        || def.max_value.is_some_and(|max| length > max)
    {
        let detail = match (def.min_value, def.max_value) {
            (_, Some(max)) if length > max => {
                format!("must be at most {} characters", fmt_num(max))
            }
            (Some(min), _) => format!("must be at least {} characters", fmt_num(min)),
            _ => "invalid length".to_string(),
        };
        return Ok(Err(FieldError::new(path, codes::OUT_OF_RANGE, detail)));
    }
    if let Some(pattern) = &def.pattern {
        if !pattern_matches(pattern, text)? {
            return Ok(Err(FieldError::new(
                path,
                codes::PATTERN,
                "does not match the expected format",
            )));
        }
    }
    Ok(Ok(Value::String(text.to_string())))
}

fn check_number(def: &FieldDefinition, value: &Value) -> Result<Value, FieldError> {
    let path = &def.field_key;
    let number = match number_of(value) {
        Some(number) if number.is_finite() => number,
        _ => return Err(FieldError::new(path, codes::WRONG_TYPE, "expected a number")),
    };
    if def.is_integer() && number.fract() != 0.0 {
        return Err(FieldError::new(path, codes::WRONG_TYPE, "expected a whole number"));
    }
    if def.min_value.is_some_and(|min| number < min)
        || def.max_value.is_some_and(|max| number > max)
    {
        return Err(FieldError::new(path, codes::OUT_OF_RANGE, range_detail(def)));
    }
    Ok(numeric_value(number, def.is_integer()))
}

fn check_boolean(def: &FieldDefinition, value: &Value) -> Result<Value, FieldError> {
    match value {
        Value::Bool(b) => Ok(Value::Bool(*b)),
        Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
        Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Ok(Value::Bool(false)),
        _ => Err(FieldError::new(&def.field_key, codes::WRONG_TYPE, "expected true or false")),
    }
}

fn check_date(def: &FieldDefinition, value: &Value) -> Result<Value, FieldError> {
    let path = &def.field_key;
    let text = value
        .as_str()
        .ok_or_else(|| FieldError::new(path, codes::WRONG_TYPE, "expected a date"))?;
    match chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        Ok(_) => Ok(Value::String(text.to_string())),
        Err(_) => Err(FieldError::new(path, codes::PATTERN, "expected an ISO date (YYYY-MM-DD)")),
    }
}

fn check_select(def: &FieldDefinition, value: &Value) -> Result<Value, FieldError> {
    let path = &def.field_key;
    let raw = value
        .as_str()
        .ok_or_else(|| FieldError::new(path, codes::WRONG_TYPE, "expected an option code"))?;
    match def.option_code(raw) {
        Some(canonical) => Ok(Value::String(canonical.to_string())),
        None => Err(FieldError::new(
            path,
            codes::UNKNOWN_OPTION,
            format!("unknown option '{}'", raw),
        )),
    }
}

fn check_multiselect(def: &FieldDefinition, value: &Value) -> Result<Value, FieldError> {
    let path = &def.field_key;
    let items = value
        .as_array()
        .ok_or_else(|| FieldError::new(path, codes::WRONG_TYPE, "expected a list of option codes"))?;
    let mut canonical = Vec::with_capacity(items.len());
    for item in items {
        let raw = item
            .as_str()
            .ok_or_else(|| FieldError::new(path, codes::WRONG_TYPE, "expected a list of option codes"))?;
        let code = def.option_code(raw.trim()).ok_or_else(|| {
            FieldError::new(path, codes::UNKNOWN_OPTION, format!("unknown option '{}'", raw))
        })?;
        if !canonical.iter().any(|existing: &Value| existing == code) {
            canonical.push(Value::String(code.to_string()));
        }
    }
    Ok(Value::Array(canonical))
}

fn check_value(def: &FieldDefinition, value: &Value) -> VitrineResult<Result<Value, FieldError>> {
    match def.field_type {
        FieldType::Text | FieldType::Textarea => check_string(def, value),
        FieldType::Number | FieldType::Range => Ok(check_number(def, value)),
        FieldType::Boolean => Ok(check_boolean(def, value)),
        FieldType::Date => Ok(check_date(def, value)),
        FieldType::Select => Ok(check_select(def, value)),
        FieldType::Multiselect => Ok(check_multiselect(def, value)),
    }
}

/// Runs the structural pass for one category ruleset.
///
/// Returns the normalized candidate record (valid fields only) and every
/// structural violation. A ruleset field without a registry definition is
/// a configuration integrity fault and aborts with `VitrineError::Config`.
pub(crate) fn run(
    registry: &FieldRegistry,
    category: CategoryType,
    fields: &[RuleField],
    input: &AttrMap,
) -> VitrineResult<(AttrMap, Vec<FieldError>)> {
    let domain = Some(category.domain());
    let mut normalized = AttrMap::new();
    let mut errors = Vec::new();

    for rule in fields {
        let def = registry.lookup_scoped(domain, rule.field_key).ok_or_else(|| {
            VitrineError::Config(format!(
                "validator field '{}' for category '{}' has no registry definition",
                rule.field_key, category
            ))
        })?;

        match presence(input.get(rule.field_key)) {
            None => {
                if rule.required {
                    errors.push(FieldError::new(rule.field_key, codes::REQUIRED, "required"));
                }
            }
            Some(value) => match check_value(def, &value)? {
                Ok(normal) => {
                    normalized.insert(rule.field_key.to_string(), normal);
                }
                Err(error) => errors.push(error),
            },
        }
    }

    Ok((normalized, errors))
}
