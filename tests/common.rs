//! Common test utilities and fixtures for integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use tempfile::TempDir;

use vitrine::{
    FieldRegistry, MediaInventory, SchemaStore, SpecificsStore, VehicleCatalog, VitrineResult,
};

/// Shared fixture: a temporary sled-backed store plus the built-in
/// catalog, schemas and vehicle snapshot.
pub struct MarketFixture {
    pub store: SpecificsStore,
    pub registry: FieldRegistry,
    pub schemas: SchemaStore,
    pub vehicles: VehicleCatalog,
    pub _temp_dir: TempDir,
}

impl MarketFixture {
    pub fn new() -> VitrineResult<Self> {
        let temp_dir = tempfile::tempdir().expect("failed to create temp directory");
        let db = sled::Config::new()
            .path(temp_dir.path())
            .temporary(true)
            .open()
            .expect("failed to open temporary database");
        let store = SpecificsStore::new(db)?;

        Ok(Self {
            store,
            registry: FieldRegistry::builtin(),
            schemas: SchemaStore::builtin(),
            vehicles: VehicleCatalog::builtin().clone(),
            _temp_dir: temp_dir,
        })
    }

    /// A vehicle snapshot pinned to the ranges used by the scenario tests.
    pub fn corolla_snapshot() -> VehicleCatalog {
        let json = r#"{
            "version": 1,
            "makes": {
                "Toyota": [
                    {"name": "Corolla", "year_start": 2000, "year_end": 2013,
                     "body_type": "sedan", "country": "Japan"}
                ]
            }
        }"#;
        VehicleCatalog::from_json_str(json).expect("snapshot JSON is valid")
    }
}

/// Media probe double with fixed per-listing counts.
pub struct FixedMedia {
    counts: HashMap<String, u64>,
}

impl FixedMedia {
    pub fn empty() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }

    pub fn with(listing_id: &str, count: u64) -> Self {
        Self {
            counts: [(listing_id.to_string(), count)].into_iter().collect(),
        }
    }

    pub fn set(&mut self, listing_id: &str, count: u64) {
        self.counts.insert(listing_id.to_string(), count);
    }
}

impl MediaInventory for FixedMedia {
    fn media_count(&self, listing_id: &str) -> VitrineResult<u64> {
        Ok(*self.counts.get(listing_id).unwrap_or(&0))
    }
}
