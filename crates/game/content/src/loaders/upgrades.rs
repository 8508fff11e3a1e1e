//! Upgrade catalog loader.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use starfall_core::{ConfigError, StatRegistry, UpgradeCatalog, UpgradeDefinition};

use crate::loaders::{LoadResult, read_file};

/// Upgrade table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeTable {
    pub upgrades: Vec<UpgradeDefinition>,
}

impl UpgradeTable {
    /// Validate the table into a catalog, checking modifier fields against
    /// `registry` when one is given.
    pub fn into_catalog(self, registry: Option<&StatRegistry>) -> Result<UpgradeCatalog, ConfigError> {
        UpgradeCatalog::load(self.upgrades, registry)
    }
}

/// Loader for the upgrade catalog from RON files.
pub struct UpgradeLoader;

impl UpgradeLoader {
    /// Parse an upgrade table without validating it.
    pub fn parse(content: &str) -> LoadResult<UpgradeTable> {
        ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse upgrade table RON: {}", e))
    }

    /// Read an upgrade table from a RON file without validating it.
    pub fn read(path: &Path) -> LoadResult<UpgradeTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Load and validate an upgrade table.
    pub fn load(path: &Path, registry: Option<&StatRegistry>) -> LoadResult<UpgradeCatalog> {
        Self::read(path)?
            .into_catalog(registry)
            .with_context(|| format!("Invalid upgrade table {}", path.display()))
    }
}
