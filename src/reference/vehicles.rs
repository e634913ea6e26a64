//! Vehicle reference catalog
//!
//! A versioned, read-only make→model snapshot injected into the
//! validator. Validation against a snapshot is deterministic and
//! testable without a live data source; the snapshot never lives in
//! process-global mutable state.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::catalog::types::CatalogError;

/// One model entry of the reference catalog. `year_end` of `None` means
/// the model is still in production.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleModel {
    pub name: String,
    pub year_start: i32,
    #[serde(default)]
    pub year_end: Option<i32>,
    pub body_type: String,
    pub country: String,
}

impl VehicleModel {
    /// Inclusive production year range, with open-ended models capped at
    /// the supplied current year.
    #[must_use]
    pub fn year_range(&self, current_year: i32) -> (i32, i32) {
        (self.year_start, self.year_end.unwrap_or(current_year))
    }
}

/// Versioned snapshot of the make→models reference data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehicleCatalog {
    pub version: u32,
    makes: BTreeMap<String, Vec<VehicleModel>>,
}

impl VehicleCatalog {
    #[must_use]
    pub fn new(version: u32) -> Self {
        Self {
            version,
            makes: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, make: impl Into<String>, model: VehicleModel) {
        self.makes.entry(make.into()).or_default().push(model);
    }

    /// Models for a make, exact-name match.
    #[must_use]
    pub fn make(&self, make: &str) -> Option<&[VehicleModel]> {
        self.makes.get(make).map(Vec::as_slice)
    }

    /// Model entry for a make/model pair, exact-name match on both.
    #[must_use]
    pub fn find_model(&self, make: &str, model: &str) -> Option<&VehicleModel> {
        self.make(make)?.iter().find(|entry| entry.name == model)
    }

    #[must_use]
    pub fn makes(&self) -> impl Iterator<Item = &str> {
        self.makes.keys().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.makes.is_empty()
    }

    /// Parses a snapshot from its JSON form.
    ///
    /// # Errors
    /// Returns a `CatalogError` on malformed JSON.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(json)
            .map_err(|e| CatalogError::InvalidData(format!("vehicle catalog JSON: {}", e)))
    }

    /// Loads a snapshot from a JSON file.
    ///
    /// # Errors
    /// Returns a `CatalogError` if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::InvalidData(format!("read {}: {}", path.display(), e)))?;
        Self::from_json_str(&raw)
    }

    /// The built-in snapshot shipped with the crate, a representative
    /// subset of the production reference data.
    #[must_use]
    pub fn builtin() -> &'static VehicleCatalog {
        &BUILTIN
    }
}

fn model(name: &str, year_start: i32, year_end: Option<i32>, body_type: &str, country: &str) -> VehicleModel {
    VehicleModel {
        name: name.to_string(),
        year_start,
        year_end,
        body_type: body_type.to_string(),
        country: country.to_string(),
    }
}

static BUILTIN: Lazy<VehicleCatalog> = Lazy::new(|| {
    let mut catalog = VehicleCatalog::new(1);
    catalog.insert("Audi", model("A3", 1996, None, "compact", "Germany"));
    catalog.insert("Audi", model("A4", 1994, None, "sedan", "Germany"));
    catalog.insert("Audi", model("Q7", 2005, None, "suv", "Germany"));
    catalog.insert("BMW", model("3 Series", 1975, None, "sedan", "Germany"));
    catalog.insert("BMW", model("X5", 1999, None, "suv", "Germany"));
    catalog.insert("Citroen", model("C3", 2002, None, "hatchback", "France"));
    catalog.insert("Citroen", model("Xsara", 1997, Some(2006), "hatchback", "France"));
    catalog.insert("Ford", model("Fiesta", 1976, Some(2023), "hatchback", "USA"));
    catalog.insert("Ford", model("Focus", 1998, None, "hatchback", "USA"));
    catalog.insert("Opel", model("Astra", 1991, None, "hatchback", "Germany"));
    catalog.insert("Opel", model("Corsa", 1982, None, "hatchback", "Germany"));
    catalog.insert("Peugeot", model("208", 2012, None, "hatchback", "France"));
    catalog.insert("Peugeot", model("306", 1993, Some(2002), "hatchback", "France"));
    catalog.insert("Renault", model("Clio", 1990, None, "hatchback", "France"));
    catalog.insert("Renault", model("Megane", 1995, None, "hatchback", "France"));
    catalog.insert("Toyota", model("Corolla", 1966, None, "sedan", "Japan"));
    catalog.insert("Toyota", model("Yaris", 1999, None, "hatchback", "Japan"));
    catalog.insert("Volkswagen", model("Golf", 1974, None, "hatchback", "Germany"));
    catalog.insert("Volkswagen", model("Passat", 1973, None, "sedan", "Germany"));
    catalog.insert("Volvo", model("V40", 1995, Some(2019), "hatchback", "Sweden"));
    catalog
});
