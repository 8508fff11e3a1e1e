//! Game configuration loader.

use std::path::Path;

use starfall_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Parse config from TOML text. Missing keys take their defaults.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }

    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing GameConfig
    ///
    /// # Returns
    ///
    /// Returns a GameConfig.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }
}

#[cfg(test)]
mod tests {
    use starfall_core::{OfferMode, RegenTimerMode};

    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        assert_eq!(ConfigLoader::parse("").unwrap(), GameConfig::default());
    }

    #[test]
    fn parses_every_key() {
        let config = ConfigLoader::parse(
            r#"
            offer_size = 4
            regen_timer = "independent"
            offer_mode = "catalog"
            starting_points = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.offer_size, 4);
        assert_eq!(config.regen_timer, RegenTimerMode::Independent);
        assert_eq!(config.offer_mode, OfferMode::Catalog);
        assert_eq!(config.starting_points, 2);
    }

    #[test]
    fn rejects_unknown_modes() {
        let err = ConfigLoader::parse(r#"offer_mode = "random""#).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config TOML"));
    }
}
