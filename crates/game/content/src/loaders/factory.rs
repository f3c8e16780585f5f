//! Content factory for loading every data file from one directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use charter_core::{GameConfig, ItemCatalog, MapLayout};
use tracing::{debug, info};

use crate::loaders::{ConfigLoader, ItemLoader, LoadResult, MapLoader};

/// Everything needed to start a session.
#[derive(Clone, Debug)]
pub struct Content {
    pub config: GameConfig,
    pub layout: MapLayout,
    pub catalog: ItemCatalog,
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml   (optional, defaults when absent)
/// ├── items.ron
/// └── world.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "config.toml";
    pub const ITEMS_FILE: &'static str = "items.ron";
    pub const WORLD_FILE: &'static str = "world.ron";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`, falling back to the
    /// defaults when the file does not exist.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<ItemCatalog> {
        ItemLoader::load(&self.data_dir.join(Self::ITEMS_FILE))
    }

    /// Load the world layout from `world.ron`.
    pub fn load_layout(&self) -> LoadResult<MapLayout> {
        MapLoader::load(&self.data_dir.join(Self::WORLD_FILE))
    }

    /// Loads config, layout and catalog, checking that every contract
    /// candidate names a catalog item.
    pub fn load_all(&self) -> LoadResult<Content> {
        let config = self.load_config()?;
        let layout = self.load_layout()?;
        let catalog = self.load_items()?;

        for key in &config.contracts.candidates {
            catalog
                .find_by_key(key)
                .with_context(|| format!("contract candidate '{key}' is not in the item catalog"))?;
        }
        for (key, item) in [
            ("poi.provision_item", &config.poi.provision_item),
            ("poi.search_find_item", &config.poi.search_find_item),
        ] {
            catalog
                .find_by_key(item)
                .with_context(|| format!("{key} '{item}' is not in the item catalog"))?;
        }

        info!(
            data_dir = %self.data_dir.display(),
            items = catalog.len(),
            cities = layout.cities.len(),
            "content loaded"
        );

        Ok(Content {
            config,
            layout,
            catalog,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
