//! Stat table loader.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use starfall_core::{ConfigError, StatDefinition, StatRegistry};

use crate::loaders::{LoadResult, read_file};

/// Stat table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatTable {
    /// Accept a table that leaves some fields undefined.
    #[serde(default)]
    pub partial: bool,
    pub stats: Vec<StatDefinition>,
}

impl StatTable {
    /// Validate the table into a registry.
    pub fn into_registry(self) -> Result<StatRegistry, ConfigError> {
        if self.partial {
            StatRegistry::load_partial(self.stats)
        } else {
            StatRegistry::load(self.stats)
        }
    }
}

/// Loader for the stat table from RON files.
pub struct StatLoader;

impl StatLoader {
    /// Parse a stat table without validating it.
    pub fn parse(content: &str) -> LoadResult<StatTable> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse stat table RON: {}", e))
    }

    /// Read a stat table from a RON file without validating it.
    pub fn read(path: &Path) -> LoadResult<StatTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Load and validate a stat table.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a StatTable
    ///
    /// # Returns
    ///
    /// Returns the StatRegistry. Validation failures keep the
    /// [`ConfigError`] as the error source.
    pub fn load(path: &Path) -> LoadResult<StatRegistry> {
        let table = Self::read(path)?;
        table
            .into_registry()
            .with_context(|| format!("Invalid stat table {}", path.display()))
    }
}
