//! Item catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context;
use charter_core::{ItemCatalog, ItemDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ItemCatalogRon {
    items: Vec<ItemDefinition>,
}

/// Loader for the item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load the item catalog from a RON file.
    ///
    /// Item ids are assigned in file order.
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<ItemCatalog> {
        let catalog: ItemCatalogRon =
            ron::from_str(content).context("Failed to parse item catalog RON")?;

        anyhow::ensure!(!catalog.items.is_empty(), "item catalog is empty");
        anyhow::ensure!(
            catalog.items.len() <= usize::from(u16::MAX),
            "item catalog has {} entries",
            catalog.items.len()
        );

        let mut keys = BTreeSet::new();
        for item in &catalog.items {
            anyhow::ensure!(keys.insert(item.key.as_str()), "duplicate item key '{}'", item.key);
            anyhow::ensure!(item.base_price > 0, "item '{}' has no base price", item.key);
        }

        Ok(ItemCatalog::new(catalog.items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charter_core::ItemCategory;

    #[test]
    fn parses_contraband_tags() {
        let catalog = ItemLoader::parse(
            r#"(
                items: [
                    (key: "grain", name: "Grain", base_price: 8, weight: 2, category: Staple),
                    (key: "demon_ink", name: "Demon Ink", base_price: 34, weight: 1,
                     category: Occult, contraband: Some("Demon Ink")),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        let ink = catalog.find_by_key("demon_ink").unwrap();
        let def = catalog.get(ink).unwrap();
        assert_eq!(def.category, ItemCategory::Occult);
        assert_eq!(def.contraband.as_deref(), Some("Demon Ink"));
        let grain = catalog.find_by_key("grain").unwrap();
        assert!(catalog.get(grain).unwrap().contraband.is_none());
    }

    #[test]
    fn rejects_duplicate_keys() {
        let err = ItemLoader::parse(
            r#"(items: [
                (key: "salt", name: "Salt", base_price: 4, weight: 1, category: Staple),
                (key: "salt", name: "Rock Salt", base_price: 5, weight: 1, category: Staple),
            ])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate item key 'salt'"));
    }

    #[test]
    fn rejects_empty_catalog() {
        assert!(ItemLoader::parse("(items: [])").is_err());
    }
}
