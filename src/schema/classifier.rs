//! Category classifier
//!
//! Maps the human-editable category taxonomy (slugs) onto the closed set
//! of category types that drives validator and codec dispatch. This is
//! the single place that mapping lives; renderer, validator and codec
//! all consume it, so the taxonomy cannot drift between them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of category types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryType {
    Property,
    Job,
    Electronics,
    Fashion,
    Home,
    Pets,
    Sports,
    Services,
    BabyKids,
    Vehicle,
    Generic,
}

/// Slug prefix table. Slugs are matched exactly first, then by their
/// first hyphenated path segment, so `real-estate-apartments` classifies
/// without an exhaustive per-subcategory listing.
const SLUG_TYPES: &[(&str, CategoryType)] = &[
    ("real-estate", CategoryType::Property),
    ("jobs", CategoryType::Job),
    ("electronics", CategoryType::Electronics),
    ("fashion", CategoryType::Fashion),
    ("home", CategoryType::Home),
    ("baby-kids", CategoryType::BabyKids),
    ("pets", CategoryType::Pets),
    ("sports", CategoryType::Sports),
    ("services", CategoryType::Services),
    ("transport", CategoryType::Vehicle),
    ("generic", CategoryType::Generic),
];

impl CategoryType {
    pub const ALL: [CategoryType; 11] = [
        CategoryType::Property,
        CategoryType::Job,
        CategoryType::Electronics,
        CategoryType::Fashion,
        CategoryType::Home,
        CategoryType::Pets,
        CategoryType::Sports,
        CategoryType::Services,
        CategoryType::BabyKids,
        CategoryType::Vehicle,
        CategoryType::Generic,
    ];

    /// Maps a category slug to its type, `None` when the slug is not part
    /// of the known taxonomy.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<CategoryType> {
        let slug = slug.trim().to_ascii_lowercase();
        if slug.is_empty() {
            return None;
        }
        for (prefix, category) in SLUG_TYPES {
            if slug == *prefix || slug.starts_with(&format!("{}-", prefix)) {
                return Some(*category);
            }
        }
        None
    }

    /// Like `from_slug`, falling back to `Generic` for unmapped slugs —
    /// an unknown category still carries an opaque attribute bag.
    #[must_use]
    pub fn classify(slug: &str) -> CategoryType {
        Self::from_slug(slug).unwrap_or(CategoryType::Generic)
    }

    /// Whether validated specifics for this type are written to a
    /// dedicated normalized table rather than embedded as a JSON
    /// attribute on the generic listing.
    #[must_use]
    pub fn uses_specialized_table(self) -> bool {
        matches!(self, Self::Property | Self::Job | Self::Vehicle)
    }

    /// Registry scoping domain for this category type.
    #[must_use]
    pub fn domain(self) -> &'static str {
        match self {
            Self::Property => "property",
            Self::Job => "job",
            Self::Electronics => "electronics",
            Self::Fashion => "fashion",
            Self::Home => "home",
            Self::Pets => "pets",
            Self::Sports => "sports",
            Self::Services => "services",
            Self::BabyKids => "baby_kids",
            Self::Vehicle => "vehicle",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.domain())
    }
}
