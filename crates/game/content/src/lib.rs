//! Data-driven content definitions and loaders.
//!
//! This crate ships the bundled game data and provides loaders for RON/TOML
//! data files:
//! - Game configuration (data-driven via TOML)
//! - Item catalog (data-driven via RON)
//! - World layout: cities, roads, river and biomes (data-driven via RON)
//!
//! All loaders use charter-core types directly with serde for RON/TOML
//! deserialization. Validation beyond parsing stays in the core (the map
//! generator rejects bad layouts).

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{Content, ContentFactory, ConfigLoader, ItemLoader, LoadResult, MapLoader};

/// Directory holding the data files bundled with this crate.
pub fn bundled_data_dir() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}
