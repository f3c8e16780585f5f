/// Index of an item in the [`ItemCatalog`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u16);

/// Broad trade category used by per-city price multipliers.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ItemCategory {
    Staple,
    Textile,
    Luxury,
    Tool,
    Sacred,
    Occult,
}

impl ItemCategory {
    /// Fragile goods can spoil when pushing through a storm.
    pub const fn is_fragile(self) -> bool {
        matches!(self, Self::Luxury | Self::Sacred | Self::Occult)
    }
}

/// Static item description.
///
/// `contraband` is a tag matched against each city's contraband list; it is
/// the tag, not the item name, that gate guards look for.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub key: String,
    pub name: String,
    pub base_price: u32,
    pub weight: u32,
    pub category: ItemCategory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub contraband: Option<String>,
}

impl ItemDefinition {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        base_price: u32,
        weight: u32,
        category: ItemCategory,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            base_price,
            weight,
            category,
            contraband: None,
        }
    }

    pub fn with_contraband(mut self, tag: impl Into<String>) -> Self {
        self.contraband = Some(tag.into());
        self
    }
}

/// Immutable item table shared by the economy and the contract board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemCatalog {
    items: Vec<ItemDefinition>,
}

impl ItemCatalog {
    pub fn new(items: Vec<ItemDefinition>) -> Self {
        Self { items }
    }

    pub fn get(&self, id: ItemId) -> Option<&ItemDefinition> {
        self.items.get(usize::from(id.0))
    }

    /// Display name, or `"goods"` for ids outside the catalog.
    pub fn name_of(&self, id: ItemId) -> &str {
        self.get(id).map_or("goods", |def| def.name.as_str())
    }

    pub fn find_by_key(&self, key: &str) -> Option<ItemId> {
        self.items
            .iter()
            .position(|item| item.key == key)
            .map(|idx| ItemId(idx as u16))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &ItemDefinition)> + '_ {
        self.items
            .iter()
            .enumerate()
            .map(|(idx, item)| (ItemId(idx as u16), item))
    }

    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        (0..self.items.len()).map(|idx| ItemId(idx as u16))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for ItemCatalog {
    fn default() -> Self {
        use ItemCategory::*;
        Self::new(vec![
            ItemDefinition::new("grain", "Grain", 8, 2, Staple),
            ItemDefinition::new("salt_fish", "Salt Fish", 10, 2, Staple),
            ItemDefinition::new("cloth", "Cloth", 14, 1, Textile),
            ItemDefinition::new("spice", "Spice", 22, 1, Luxury),
            ItemDefinition::new("iron_tools", "Iron Tools", 30, 4, Tool),
            ItemDefinition::new("lamp_oil", "Lamp Oil", 12, 2, Tool),
            ItemDefinition::new("glass_beads", "Glass Beads", 18, 1, Luxury),
            ItemDefinition::new("blessed_water", "Blessed Water", 16, 1, Sacred)
                .with_contraband("Blessed Water"),
            ItemDefinition::new("cursed_relic", "Cursed Relic", 40, 1, Occult)
                .with_contraband("Cursed Relics"),
            ItemDefinition::new("demon_ink", "Demon Ink", 34, 1, Occult)
                .with_contraband("Demon Ink"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn default_catalog_lookup() {
        let catalog = ItemCatalog::default();
        let relic = catalog.find_by_key("cursed_relic").unwrap();
        let def = catalog.get(relic).unwrap();
        assert_eq!(def.contraband.as_deref(), Some("Cursed Relics"));
        assert!(def.category.is_fragile());
        assert!(catalog.find_by_key("dragon_egg").is_none());
        assert_eq!(catalog.iter().count(), catalog.len());
    }

    #[test]
    fn categories_parse_from_snake_case() {
        assert_eq!(ItemCategory::from_str("occult").unwrap(), ItemCategory::Occult);
        assert_eq!(ItemCategory::Textile.to_string(), "textile");
        assert!(!ItemCategory::Staple.is_fragile());
    }
}
