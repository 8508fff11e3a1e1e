//! Content loaders for reading game data from files.
//!
//! Each loader has a `parse` step (text to raw definitions) and a `load`
//! step that also validates through the matching starfall-core constructor.

pub mod config;
pub mod factory;
pub mod stats;
pub mod upgrades;

pub use config::ConfigLoader;
pub use factory::{Content, ContentFactory};
pub use stats::{StatLoader, StatTable};
pub use upgrades::{UpgradeLoader, UpgradeTable};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
