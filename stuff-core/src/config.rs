//! Kind catalog file support.
//!
//! Scalar and identity-set kinds can be declared in a TOML catalog and loaded into a
//! [`KindRegistry`] at startup:
//!
//! ```toml
//! [[kind]]
//! name = "Ammo"
//! domain = "integer"
//! min_amount = 6
//! unit_size = 3
//!
//! [[kind]]
//! name = "Water"
//! domain = "real"
//! ```
//!
//! Item-type restrictions name Rust types, so they are only available in code.

use crate::error::{Result, StuffError};
use crate::kind::{Kind, KindBuilder};
use crate::policy::{Domain, MinimumRule};
use crate::registry::KindRegistry;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Kind catalog from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KindCatalog {
    /// Catalog entries, one per `[[kind]]` table.
    #[serde(default, rename = "kind")]
    pub kinds: Vec<KindSettings>,
}

/// Settings of one catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindSettings {
    /// Kind name, unique within the catalog.
    pub name: String,
    /// Numeric domain.
    pub domain: Domain,
    /// Smallest nonempty amount; the builder default when absent.
    #[serde(default)]
    pub min_amount: Option<f64>,
    /// Unit size; `1` when absent.
    #[serde(default)]
    pub unit_size: Option<f64>,
    /// Identity-set items must report a size.
    #[serde(default)]
    pub sized_items: bool,
    /// Minimum rule applied on take.
    #[serde(default)]
    pub minimum_rule: MinimumRule,
}

impl KindSettings {
    /// Builder carrying these settings.
    pub fn builder(&self) -> KindBuilder {
        let mut builder = KindBuilder::new(self.name.clone(), self.domain)
            .minimum_rule(self.minimum_rule);
        if let Some(min_amount) = self.min_amount {
            builder = builder.min_amount(min_amount);
        }
        if let Some(unit_size) = self.unit_size {
            builder = builder.unit_size(unit_size);
        }
        if self.sized_items {
            builder = builder.sized_items(true);
        }
        builder
    }

    /// Validates the settings and defines the kind.
    ///
    /// # Errors
    ///
    /// `InvalidKind` for settings the unit policy rejects.
    pub fn build(&self) -> Result<Kind> {
        self.builder().build()
    }
}

impl KindCatalog {
    /// Parse a catalog from TOML text.
    ///
    /// # Returns
    /// * `Ok(KindCatalog)` if the text parses
    /// * `Err(StuffError::Config)` otherwise
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| StuffError::Config(format!("Failed to parse kind catalog: {}", e)))
    }

    /// Load a catalog from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the catalog file
    ///
    /// # Returns
    /// * `Ok(KindCatalog)` if successful
    /// * `Err(StuffError::Config)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            StuffError::Config(format!(
                "Failed to read kind catalog {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let catalog = Self::from_toml_str(&content)?;
        debug!(
            "Loaded {} kinds from {}",
            catalog.kinds.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }

    /// Define every catalog entry and register it.
    ///
    /// # Errors
    ///
    /// `InvalidKind` for a rejected entry, `DuplicateKind` for a repeated name.
    pub fn into_registry(self) -> Result<KindRegistry> {
        let mut registry = KindRegistry::new();
        self.register_into(&mut registry)?;
        Ok(registry)
    }

    /// Define every catalog entry and add it to an existing registry.
    ///
    /// # Errors
    ///
    /// As [`KindCatalog::into_registry`]. On failure `registry` is left unchanged.
    pub fn register_into(&self, registry: &mut KindRegistry) -> Result<()> {
        let mut staged = registry.clone();
        for settings in &self.kinds {
            staged.register(settings.build()?)?;
        }
        *registry = staged;
        Ok(())
    }
}
