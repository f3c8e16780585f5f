use std::collections::BTreeMap;

use crate::economy::ItemCategory;

use super::{TilePos, TileRect};

/// Index of a city in the world's city list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CityId(pub u16);

impl core::fmt::Display for CityId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "city#{}", self.0)
    }
}

/// Law and trade rules enforced inside a city's walls.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CityRules {
    /// Fraction withheld from every sale, in `[0, 1)`.
    pub tax_rate: f64,
    /// Base probability that the gate guard searches the player, in `[0, 1)`.
    pub inspection_chance: f64,
    /// Contraband tags confiscated on inspection.
    pub contraband: Vec<String>,
    pub fine_base: u32,
    pub fine_per_item: u32,
    pub vibe: String,
    /// Price of this city's trade permit.
    pub permit_price: u32,
    /// Per-category price multipliers; missing categories trade at 1.0.
    pub price_multipliers: BTreeMap<ItemCategory, f64>,
}

impl CityRules {
    pub fn is_contraband(&self, tag: &str) -> bool {
        self.contraband.iter().any(|banned| banned == tag)
    }

    pub fn multiplier(&self, category: ItemCategory) -> f64 {
        self.price_multipliers.get(&category).copied().unwrap_or(1.0)
    }
}

impl Default for CityRules {
    fn default() -> Self {
        Self {
            tax_rate: 0.1,
            inspection_chance: 0.3,
            contraband: Vec::new(),
            fine_base: 10,
            fine_per_item: 5,
            vibe: String::new(),
            permit_price: 40,
            price_multipliers: BTreeMap::new(),
        }
    }
}

/// A walled city placed on the map.
#[derive(Clone, Debug, PartialEq)]
pub struct City {
    pub id: CityId,
    /// Stable machine name (e.g. `sunspire`).
    pub key: String,
    pub name: String,
    /// Interior floor rectangle; the wall ring sits just outside it.
    pub bounds: TileRect,
    /// Road tile directly south of the gate.
    pub gate_exit: TilePos,
    pub market: [TilePos; 2],
    pub board: TilePos,
    pub rules: CityRules,
}

impl City {
    pub fn contains(&self, pos: TilePos) -> bool {
        self.bounds.contains(pos)
    }
}
