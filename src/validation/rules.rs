//! Declarative ruleset types
//!
//! A category's validator is data: the list of fields it checks (with
//! the persistence-time required flag) plus a list of cross-field
//! invariants. Primitive shapes are not repeated here — the structural
//! pass resolves them from the field registry, which stays the sole
//! source of truth for option domains, bounds and patterns.

use crate::validation::types::AttrMap;

/// One field of a category's structural shape.
#[derive(Debug, Clone, Copy)]
pub struct RuleField {
    pub field_key: &'static str,
    pub required: bool,
}

impl RuleField {
    pub const fn required(field_key: &'static str) -> Self {
        Self {
            field_key,
            required: true,
        }
    }

    pub const fn optional(field_key: &'static str) -> Self {
        Self {
            field_key,
            required: false,
        }
    }
}

/// A cross-field business rule.
///
/// Invariants are pure and independent of each other: `check` receives
/// the full trimmed candidate record and returns the violation detail
/// when the rule does not hold. The violation is attributed to
/// `field_path` for display even though it is logically about a
/// relationship between fields.
pub struct Invariant {
    pub field_path: &'static str,
    pub error_code: &'static str,
    pub check: fn(&AttrMap) -> Option<String>,
}

/// Structural shape + invariant list for one category.
pub struct CategoryRuleset {
    pub fields: &'static [RuleField],
    pub invariants: &'static [Invariant],
}

impl CategoryRuleset {
    /// Field keys the ruleset requires at persistence time, used by the
    /// schema consistency lint.
    pub fn required_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .filter(|field| field.required)
            .map(|field| field.field_key)
    }
}
