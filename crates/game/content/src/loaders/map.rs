//! World layout loader.
//!
//! A layout only describes what to carve; the tiles themselves are generated
//! from the session seed by the core.

use std::path::Path;

use anyhow::Context;
use charter_core::MapLayout;

use crate::loaders::{LoadResult, read_file};

/// Loader for world layouts from RON files.
pub struct MapLoader;

impl MapLoader {
    /// Load a layout from a RON file.
    pub fn load(path: &Path) -> LoadResult<MapLayout> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<MapLayout> {
        let layout: MapLayout = ron::from_str(content).context("Failed to parse world RON")?;
        anyhow::ensure!(!layout.cities.is_empty(), "world layout has no cities");
        for city in &layout.cities {
            let rules = &city.rules;
            anyhow::ensure!(
                (0.0..1.0).contains(&rules.tax_rate),
                "city '{}' tax_rate must lie in [0, 1), got {}",
                city.key,
                rules.tax_rate
            );
            anyhow::ensure!(
                (0.0..1.0).contains(&rules.inspection_chance),
                "city '{}' inspection_chance must lie in [0, 1), got {}",
                city.key,
                rules.inspection_chance
            );
        }
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charter_core::{GameRng, TileRect, map};

    const SMALL_WORLD: &str = r#"(
        width: 48,
        height: 32,
        river: None,
        cities: [
            (
                key: "hollow",
                name: "Hollow",
                bounds: (x: 4, y: 4, w: 10, h: 8),
                gate_width: 1,
                market_offset: (2, 2),
                board_offset: (7, 2),
                rules: (tax_rate: 0.1, contraband: ["Demon Ink"]),
            ),
            (
                key: "ridge",
                name: "Ridge",
                bounds: (x: 30, y: 14, w: 12, h: 8),
                gate_width: 3,
                market_offset: (2, 2),
                board_offset: (9, 2),
                rules: (inspection_chance: 0.5),
            ),
        ],
        roads: [(from: 0, via: [(x: 24, y: 26)], to: 1)],
        biomes: [],
        rock_chance: 0.0,
    )"#;

    #[test]
    fn parses_and_generates_small_world() {
        let layout = MapLoader::parse(SMALL_WORLD).unwrap();
        assert_eq!(layout.cities.len(), 2);
        assert_eq!(layout.cities[0].bounds, TileRect::new(4, 4, 10, 8));
        assert_eq!(layout.cities[0].rules.contraband, vec!["Demon Ink".to_string()]);
        // Omitted rule fields keep their defaults.
        assert_eq!(layout.cities[1].rules.tax_rate, 0.1);
        assert_eq!(layout.cities[1].rules.inspection_chance, 0.5);

        let world = map::generate(&layout, &mut GameRng::new(9)).unwrap();
        assert_eq!(world.cities.len(), 2);
    }

    #[test]
    fn rejects_layout_without_cities() {
        let err = MapLoader::parse("(width: 32, height: 32, cities: [])").unwrap_err();
        assert!(err.to_string().contains("no cities"));
    }

    #[test]
    fn rejects_out_of_range_city_rules() {
        let taxed = SMALL_WORLD.replace("tax_rate: 0.1", "tax_rate: 1.0");
        let err = MapLoader::parse(&taxed).unwrap_err();
        assert!(err.to_string().contains("'hollow' tax_rate"), "{err}");

        let watched = SMALL_WORLD.replace("inspection_chance: 0.5", "inspection_chance: -0.2");
        let err = MapLoader::parse(&watched).unwrap_err();
        assert!(err.to_string().contains("'ridge' inspection_chance"), "{err}");
    }
}
