//! Specifics persistence
//!
//! Specialized categories (property, job, vehicle) keep one normalized
//! row per listing id in their own tree with upsert semantics; every
//! other category embeds the canonical object as an opaque attribute on
//! the generic listing row. Rows carry a monotonically increasing
//! version; writers pass the version they read and a mismatch is a
//! conflict, so two concurrent edit tabs cannot silently overwrite each
//! other.

use chrono::{DateTime, Utc};
use log::info;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::Path;

use crate::error::{VitrineError, VitrineResult};
use crate::listing::types::Listing;
use crate::schema::classifier::CategoryType;
use crate::validation::types::AttrMap;

/// One stored specifics payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecificsRow {
    pub listing_id: String,
    pub category_type: CategoryType,
    pub values: AttrMap,
    pub version: u64,
    pub updated_at: DateTime<Utc>,
}

/// Unified access to the listings tree and the specialized specifics trees.
#[derive(Clone)]
pub struct SpecificsStore {
    db: sled::Db,
    listings_tree: sled::Tree,
    property_tree: sled::Tree,
    job_tree: sled::Tree,
    vehicle_tree: sled::Tree,
}

impl SpecificsStore {
    /// Creates a store over an open sled database, opening all trees.
    pub fn new(db: sled::Db) -> Result<Self, sled::Error> {
        let listings_tree = db.open_tree("listings")?;
        let property_tree = db.open_tree("property_specifics")?;
        let job_tree = db.open_tree("job_specifics")?;
        let vehicle_tree = db.open_tree("vehicle_specifics")?;

        Ok(Self {
            db,
            listings_tree,
            property_tree,
            job_tree,
            vehicle_tree,
        })
    }

    /// Opens (or creates) the store at a filesystem path.
    pub fn open(path: &Path) -> VitrineResult<Self> {
        let db = sled::open(path)?;
        Ok(Self::new(db)?)
    }

    /// Creates a store over a temporary database, for tests and tooling.
    pub fn temporary() -> VitrineResult<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self::new(db)?)
    }

    fn specialized_tree(&self, category: CategoryType) -> Option<&sled::Tree> {
        match category {
            CategoryType::Property => Some(&self.property_tree),
            CategoryType::Job => Some(&self.job_tree),
            CategoryType::Vehicle => Some(&self.vehicle_tree),
            _ => None,
        }
    }

    fn store_in_tree<T: Serialize>(&self, tree: &sled::Tree, key: &str, item: &T) -> VitrineResult<()> {
        let bytes = serde_json::to_vec(item)?;
        tree.insert(key.as_bytes(), bytes)?;
        self.db.flush()?;
        Ok(())
    }

    fn get_from_tree<T: DeserializeOwned>(&self, tree: &sled::Tree, key: &str) -> VitrineResult<Option<T>> {
        match tree.get(key.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn put_listing(&self, listing: &Listing) -> VitrineResult<()> {
        self.store_in_tree(&self.listings_tree, &listing.id, listing)
    }

    pub fn get_listing(&self, listing_id: &str) -> VitrineResult<Option<Listing>> {
        self.get_from_tree(&self.listings_tree, listing_id)
    }

    fn require_listing(&self, listing_id: &str) -> VitrineResult<Listing> {
        self.get_listing(listing_id)?
            .ok_or_else(|| VitrineError::NotFound(format!("listing '{}'", listing_id)))
    }

    /// Deletes a listing and every specifics row attached to it.
    pub fn delete_listing(&self, listing_id: &str) -> VitrineResult<()> {
        self.listings_tree.remove(listing_id.as_bytes())?;
        for tree in [&self.property_tree, &self.job_tree, &self.vehicle_tree] {
            tree.remove(listing_id.as_bytes())?;
        }
        self.db.flush()?;
        Ok(())
    }

    fn check_version(current: Option<u64>, expected: Option<u64>, listing_id: &str) -> VitrineResult<()> {
        if let Some(expected) = expected {
            if current != Some(expected) {
                return Err(VitrineError::Conflict(format!(
                    "specifics for listing '{}' changed (expected version {}, found {})",
                    listing_id,
                    expected,
                    current.map_or("none".to_string(), |v| v.to_string()),
                )));
            }
        }
        Ok(())
    }

    /// Upserts the canonical specifics for a listing, routing to the
    /// specialized tree or the embedded listing attribute.
    ///
    /// `expected_version` is the optimistic concurrency check: pass the
    /// version read when the edit form was opened; `None` writes
    /// unconditionally (first creation).
    pub fn upsert_specifics(
        &self,
        listing_id: &str,
        category: CategoryType,
        values: AttrMap,
        expected_version: Option<u64>,
    ) -> VitrineResult<SpecificsRow> {
        match self.specialized_tree(category) {
            Some(tree) => {
                let existing: Option<SpecificsRow> = self.get_from_tree(tree, listing_id)?;
                Self::check_version(existing.as_ref().map(|row| row.version), expected_version, listing_id)?;
                let row = SpecificsRow {
                    listing_id: listing_id.to_string(),
                    category_type: category,
                    values,
                    version: existing.map_or(1, |row| row.version + 1),
                    updated_at: Utc::now(),
                };
                self.store_in_tree(tree, listing_id, &row)?;
                info!("specifics upsert listing={} category={} version={}", listing_id, category, row.version);
                Ok(row)
            }
            None => {
                let mut listing = self.require_listing(listing_id)?;
                let current = listing.specifics.as_ref().map(|row| row.version);
                Self::check_version(current, expected_version, listing_id)?;
                let row = SpecificsRow {
                    listing_id: listing_id.to_string(),
                    category_type: category,
                    values,
                    version: current.map_or(1, |v| v + 1),
                    updated_at: Utc::now(),
                };
                listing.specifics = Some(row.clone());
                listing.updated_at = row.updated_at;
                self.put_listing(&listing)?;
                info!("specifics embed listing={} category={} version={}", listing_id, category, row.version);
                Ok(row)
            }
        }
    }

    pub fn get_specifics(
        &self,
        listing_id: &str,
        category: CategoryType,
    ) -> VitrineResult<Option<SpecificsRow>> {
        match self.specialized_tree(category) {
            Some(tree) => self.get_from_tree(tree, listing_id),
            None => Ok(self
                .get_listing(listing_id)?
                .and_then(|listing| listing.specifics)
                .filter(|row| row.category_type == category)),
        }
    }

    pub fn delete_specifics(&self, listing_id: &str, category: CategoryType) -> VitrineResult<()> {
        match self.specialized_tree(category) {
            Some(tree) => {
                tree.remove(listing_id.as_bytes())?;
                self.db.flush()?;
            }
            None => {
                if let Some(mut listing) = self.get_listing(listing_id)? {
                    if listing.specifics.is_some() {
                        listing.specifics = None;
                        listing.updated_at = Utc::now();
                        self.put_listing(&listing)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Removes specifics left behind when a listing's category resolves
    /// to a different type: specialized rows of every other category are
    /// deleted, and an embedded payload of a foreign type is cleared.
    pub fn reroute_category(&self, listing_id: &str, keep: CategoryType) -> VitrineResult<()> {
        for category in [CategoryType::Property, CategoryType::Job, CategoryType::Vehicle] {
            if category != keep {
                if let Some(tree) = self.specialized_tree(category) {
                    tree.remove(listing_id.as_bytes())?;
                }
            }
        }
        if let Some(mut listing) = self.get_listing(listing_id)? {
            let foreign = listing
                .specifics
                .as_ref()
                .is_some_and(|row| row.category_type != keep);
            if foreign {
                listing.specifics = None;
                listing.updated_at = Utc::now();
                self.put_listing(&listing)?;
            }
        }
        self.db.flush()?;
        Ok(())
    }
}
