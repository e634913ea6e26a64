//! Application settings
//!
//! Loaded from a TOML file; every field has a default so a missing file
//! is not an error for tooling. The optional catalog/schema/vehicle
//! override files are how catalog administrators ship configuration
//! out-of-band.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors for settings loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Path where the listing store keeps its data
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,
    /// Locale used when the caller does not supply one
    #[serde(default = "default_locale")]
    pub default_locale: String,
    /// Optional JSON file overriding the built-in field catalog
    #[serde(default)]
    pub catalog_fields_file: Option<PathBuf>,
    /// Optional JSON file overriding the built-in category schemas
    #[serde(default)]
    pub schema_file: Option<PathBuf>,
    /// Optional JSON file replacing the built-in vehicle snapshot
    #[serde(default)]
    pub vehicle_data_file: Option<PathBuf>,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("data")
}

fn default_locale() -> String {
    "en".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            default_locale: default_locale(),
            catalog_fields_file: None,
            schema_file: None,
            vehicle_data_file: None,
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&raw)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from a TOML file, falling back to defaults when the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_locale.is_empty() {
            return Err(ConfigError::Validation(
                "default_locale cannot be empty".to_string(),
            ));
        }
        if self.storage_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "storage_path cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
