//! Declarative description of the world the generator carves.

use std::collections::BTreeMap;

use crate::economy::ItemCategory;

use super::{CityRules, TilePos, TileRect};

/// Complete input to [`generate`](super::generate).
///
/// `Default` reproduces the reference world: a 140×90 map with Sunspire in the
/// north-west and Gloomwharf in the south-east, joined by a road over the
/// river bridge.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapLayout {
    pub width: u32,
    pub height: u32,
    pub river: Option<RiverSpec>,
    pub cities: Vec<CitySpec>,
    pub roads: Vec<RoadSpec>,
    pub biomes: Vec<BiomePatch>,
    /// Per-cell chance that a grass cell becomes a rock.
    pub rock_chance: f64,
    pub poi: PoiSpec,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiverSpec {
    pub top: u32,
    pub thickness: u32,
    pub bridges: Vec<BridgeSpec>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BridgeSpec {
    pub x: u32,
    pub width: u32,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CitySpec {
    pub key: String,
    pub name: String,
    pub bounds: TileRect,
    pub gate_width: u32,
    /// Offset of the left market cell from the city origin.
    pub market_offset: (i32, i32),
    pub board_offset: (i32, i32),
    pub rules: CityRules,
}

/// Road from one city's gate through waypoints to another city's gate.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadSpec {
    pub from: usize,
    pub via: Vec<TilePos>,
    pub to: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BiomeKind {
    Forest,
    Swamp,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BiomePatch {
    pub kind: BiomeKind,
    pub center: TilePos,
    pub radius: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoiSpec {
    pub per_kind: u32,
    /// Margin kept clear around every city rectangle.
    pub city_padding: i32,
    pub attempts: u32,
}

impl Default for PoiSpec {
    fn default() -> Self {
        Self {
            per_kind: 3,
            city_padding: 3,
            attempts: 400,
        }
    }
}

impl MapLayout {
    pub fn sunspire() -> CitySpec {
        CitySpec {
            key: "sunspire".into(),
            name: "Sunspire".into(),
            bounds: TileRect::new(18, 26, 22, 16),
            gate_width: 3,
            market_offset: (3, 3),
            board_offset: (18, 3),
            rules: CityRules {
                tax_rate: 0.18,
                inspection_chance: 0.65,
                contraband: vec!["Cursed Relics".into(), "Demon Ink".into()],
                fine_base: 18,
                fine_per_item: 6,
                vibe: "Orderly. Safe. Expensive.".into(),
                permit_price: 60,
                price_multipliers: BTreeMap::from([
                    (ItemCategory::Staple, 1.1),
                    (ItemCategory::Textile, 0.9),
                    (ItemCategory::Luxury, 1.25),
                    (ItemCategory::Tool, 0.95),
                    (ItemCategory::Sacred, 0.85),
                    (ItemCategory::Occult, 1.6),
                ]),
            },
        }
    }

    pub fn gloomwharf() -> CitySpec {
        CitySpec {
            key: "gloomwharf".into(),
            name: "Gloomwharf".into(),
            bounds: TileRect::new(96, 54, 26, 18),
            gate_width: 3,
            market_offset: (3, 3),
            board_offset: (22, 3),
            rules: CityRules {
                tax_rate: 0.05,
                inspection_chance: 0.15,
                contraband: vec!["Blessed Water".into()],
                fine_base: 8,
                fine_per_item: 4,
                vibe: "Lawless. Profitable. Risky.".into(),
                permit_price: 25,
                price_multipliers: BTreeMap::from([
                    (ItemCategory::Staple, 0.9),
                    (ItemCategory::Textile, 1.15),
                    (ItemCategory::Luxury, 0.95),
                    (ItemCategory::Tool, 1.1),
                    (ItemCategory::Sacred, 1.4),
                    (ItemCategory::Occult, 0.8),
                ]),
            },
        }
    }
}

impl Default for MapLayout {
    fn default() -> Self {
        Self {
            width: 140,
            height: 90,
            river: Some(RiverSpec {
                top: 10,
                thickness: 4,
                bridges: vec![BridgeSpec { x: 68, width: 4 }],
            }),
            cities: vec![Self::sunspire(), Self::gloomwharf()],
            roads: vec![RoadSpec {
                from: 0,
                via: vec![TilePos::new(70, 12), TilePos::new(70, 78)],
                to: 1,
            }],
            biomes: vec![
                BiomePatch {
                    kind: BiomeKind::Forest,
                    center: TilePos::new(46, 62),
                    radius: 9.0,
                },
                BiomePatch {
                    kind: BiomeKind::Forest,
                    center: TilePos::new(28, 72),
                    radius: 7.0,
                },
                BiomePatch {
                    kind: BiomeKind::Forest,
                    center: TilePos::new(112, 30),
                    radius: 10.0,
                },
                BiomePatch {
                    kind: BiomeKind::Swamp,
                    center: TilePos::new(88, 42),
                    radius: 6.0,
                },
                BiomePatch {
                    kind: BiomeKind::Swamp,
                    center: TilePos::new(120, 82),
                    radius: 5.0,
                },
            ],
            rock_chance: 0.0025,
            poi: PoiSpec::default(),
        }
    }
}
