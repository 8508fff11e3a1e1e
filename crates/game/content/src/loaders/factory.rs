//! Content factory for loading every table from one data directory.

use std::path::{Path, PathBuf};

use starfall_core::{GameConfig, StatRegistry, UpgradeCatalog};

use crate::loaders::{ConfigLoader, LoadResult, StatLoader, UpgradeLoader};

/// Everything a run needs from content, validated.
#[derive(Debug, Clone)]
pub struct Content {
    pub config: GameConfig,
    pub registry: StatRegistry,
    pub catalog: UpgradeCatalog,
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── stats.ron
/// └── upgrades.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the content set shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load and validate the stat table from `stats.ron`.
    pub fn load_stats(&self) -> LoadResult<StatRegistry> {
        StatLoader::load(&self.data_dir.join("stats.ron"))
    }

    /// Load the upgrade catalog from `upgrades.ron`, checking modifier
    /// fields against `registry`.
    pub fn load_upgrades(&self, registry: &StatRegistry) -> LoadResult<UpgradeCatalog> {
        UpgradeLoader::load(&self.data_dir.join("upgrades.ron"), Some(registry))
    }

    /// Load config, stat table and catalog.
    pub fn load_all(&self) -> LoadResult<Content> {
        let config = self.load_config()?;
        let registry = self.load_stats()?;
        let catalog = self.load_upgrades(&registry)?;
        Ok(Content {
            config,
            registry,
            catalog,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use starfall_core::{ConfigError, GameConfig, StatField, UpgradeType};

    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn bundled_content_is_valid() {
        let content = ContentFactory::bundled().load_all().unwrap();

        assert_eq!(content.config, GameConfig::default());
        assert_eq!(content.registry.len(), StatField::COUNT);
        assert!(!content.catalog.is_empty());
        assert!(!content.catalog.unique_upgrades().is_empty());
        for upgrade_type in [
            UpgradeType::Ship,
            UpgradeType::Shooter,
            UpgradeType::Missile,
            UpgradeType::Pulse,
            UpgradeType::EmergencyProtocol,
        ] {
            assert!(
                !content.catalog.upgrades_by_type(upgrade_type).is_empty(),
                "no {upgrade_type} upgrades"
            );
        }
    }

    #[test]
    fn bundled_stats_match_display_rules() {
        let registry = ContentFactory::bundled().load_stats().unwrap();
        assert!(registry.get(StatField::MaxDurability).unwrap().is_integer);
        assert_eq!(registry.unit(StatField::ShieldRegenRate).unwrap(), "/s");
        for def in registry.iter() {
            assert_eq!(def.category, def.field.category(), "{} miscategorized", def.field);
        }
    }

    #[test]
    fn load_all_surfaces_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let bundled = ContentFactory::bundled();
        for name in ["config.toml", "stats.ron"] {
            std::fs::copy(bundled.data_dir().join(name), dir.path().join(name)).unwrap();
        }
        std::fs::write(
            dir.path().join("upgrades.ron"),
            r#"(upgrades: [(id: "x", display_name: "X", upgrade_type: Pulse, max_level: 1, modifiers: [])])"#,
        )
        .unwrap();

        let err = ContentFactory::new(dir.path()).load_all().unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }

    #[test]
    fn missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ContentFactory::new(dir.path().join("absent")).load_all().is_err());
    }
}
