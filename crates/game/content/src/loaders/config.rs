//! Game configuration loader.

use std::path::Path;

use anyhow::Context;
use charter_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
///
/// Every section and key is optional; omitted values keep their defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig =
            toml::from_str(content).context("Failed to parse config TOML")?;

        anyhow::ensure!(config.tile_size > 0, "tile_size must be positive");
        anyhow::ensure!(config.max_dt > 0.0, "max_dt must be positive");
        anyhow::ensure!(
            config.contracts.quantity_min <= config.contracts.quantity_max,
            "contracts.quantity_min ({}) exceeds quantity_max ({})",
            config.contracts.quantity_min,
            config.contracts.quantity_max
        );

        Ok(config)
    }
}
