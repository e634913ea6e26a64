use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::specifics::store::SpecificsRow;

/// Lifecycle status of a listing.
///
/// `Blocked` is a terminal administrative state: a normal update can
/// never transition into it, and a blocked listing rejects user updates
/// until moderation releases it (out of scope here).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    #[default]
    Draft,
    Active,
    Archived,
    Blocked,
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Archived => "archived",
            Self::Blocked => "blocked",
        };
        f.write_str(label)
    }
}

/// The generic listing record.
///
/// The non-specialized fields (title, price, location) are owned by the
/// collaborating listing subsystem; they are modeled here only as far as
/// the update flow needs them. Specifics for JSON-attribute categories
/// are embedded on this row; specialized categories keep one row per
/// listing in their own tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub category_slug: String,
    pub status: ListingStatus,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub specifics: Option<SpecificsRow>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    #[must_use]
    pub fn new(category_slug: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            category_slug: category_slug.into(),
            status: ListingStatus::Draft,
            title: title.into(),
            description: None,
            price: None,
            location: None,
            specifics: None,
            created_at: now,
            updated_at: now,
        }
    }
}
