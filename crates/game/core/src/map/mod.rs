//! Tile grid, terrain kinds, and city descriptors.
//!
//! The [`TileMap`] is produced once by [`generate`] and never rewritten
//! afterwards: only the generator holds a mutable handle to the cells.

mod city;
mod generate;
mod layout;

pub use city::{City, CityId, CityRules};
pub use generate::{MapError, World, generate};
pub use layout::{
    BiomeKind, BiomePatch, BridgeSpec, CitySpec, MapLayout, PoiSpec, RiverSpec, RoadSpec,
};

use sha2::{Digest, Sha256};

/// Terrain or feature occupying a single cell.
///
/// Discriminants are stable tile ids shared with renderers.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum TileKind {
    #[default]
    Grass = 0,
    Road = 1,
    Water = 2,
    /// Natural rock and city walls share the same impassable id.
    Rock = 3,
    CityFloor = 4,
    Gate = 5,
    Market = 6,
    Shrine = 7,
    Camp = 8,
    Ruins = 9,
    Forest = 10,
    Swamp = 11,
    ContractsBoard = 12,
}

impl TileKind {
    pub const fn id(self) -> u8 {
        self as u8
    }

    pub const fn is_solid(self) -> bool {
        matches!(self, TileKind::Water | TileKind::Rock)
    }

    pub const fn is_passable(self) -> bool {
        !self.is_solid()
    }

    /// Returns the point-of-interest kind this tile represents, if any.
    pub const fn poi(self) -> Option<PoiKind> {
        match self {
            TileKind::Shrine => Some(PoiKind::Shrine),
            TileKind::Camp => Some(PoiKind::Camp),
            TileKind::Ruins => Some(PoiKind::Ruins),
            _ => None,
        }
    }
}

/// Interactive map features found outside the cities.
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
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PoiKind {
    Shrine,
    Camp,
    Ruins,
}

impl PoiKind {
    pub const fn tile(self) -> TileKind {
        match self {
            PoiKind::Shrine => TileKind::Shrine,
            PoiKind::Camp => TileKind::Camp,
            PoiKind::Ruins => TileKind::Ruins,
        }
    }
}

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl core::fmt::Display for TilePos {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned tile rectangle, half-open on both axes: `[x, x+w) × [y, y+h)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl TileRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, pos: TilePos) -> bool {
        pos.x >= self.x && pos.x < self.x + self.w && pos.y >= self.y && pos.y < self.y + self.h
    }

    /// Point test in continuous tile units (e.g. `px / tile_size`).
    pub fn contains_point(&self, tx: f64, ty: f64) -> bool {
        tx >= f64::from(self.x)
            && tx < f64::from(self.x + self.w)
            && ty >= f64::from(self.y)
            && ty < f64::from(self.y + self.h)
    }

    /// The rectangle grown by `pad` on every side.
    pub const fn grown(&self, pad: i32) -> Self {
        TileRect::new(self.x - pad, self.y - pad, self.w + 2 * pad, self.h + 2 * pad)
    }

    /// Containment test against the rectangle grown by `pad` on every side.
    pub fn contains_padded(&self, pos: TilePos, pad: i32) -> bool {
        self.grown(pad).contains(pos)
    }

    pub fn intersects(&self, other: &TileRect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    pub fn center(&self) -> TilePos {
        TilePos::new(self.x + self.w / 2, self.y + self.h / 2)
    }
}

/// Row-major grid of tile kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileMap {
    width: u32,
    height: u32,
    tiles: Vec<TileKind>,
}

impl TileMap {
    pub(crate) fn filled(width: u32, height: u32, kind: TileKind) -> Self {
        Self {
            width,
            height,
            tiles: vec![kind; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, pos: TilePos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    fn index(&self, pos: TilePos) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| (pos.y as usize) * (self.width as usize) + (pos.x as usize))
    }

    pub fn get(&self, pos: TilePos) -> Option<TileKind> {
        self.index(pos).and_then(|idx| self.tiles.get(idx).copied())
    }

    /// Tile lookup where anything off the grid reads as solid rock.
    pub fn tile_or_rock(&self, pos: TilePos) -> TileKind {
        self.get(pos).unwrap_or(TileKind::Rock)
    }

    pub fn is_solid(&self, pos: TilePos) -> bool {
        self.tile_or_rock(pos).is_solid()
    }

    pub(crate) fn set(&mut self, pos: TilePos, kind: TileKind) {
        if let Some(idx) = self.index(pos) {
            self.tiles[idx] = kind;
        }
    }

    /// Iterates rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[TileKind]> + '_ {
        self.tiles.chunks(self.width.max(1) as usize)
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|tile| **tile == kind).count()
    }

    /// Positions holding `kind`, in row-major order.
    pub fn positions_of(&self, kind: TileKind) -> impl Iterator<Item = TilePos> + '_ {
        let width = self.width.max(1) as usize;
        self.tiles
            .iter()
            .enumerate()
            .filter(move |(_, tile)| **tile == kind)
            .map(move |(idx, _)| TilePos::new((idx % width) as i32, (idx / width) as i32))
    }

    /// True when any of the eight neighbours of `pos` holds `kind`.
    pub fn touches(&self, pos: TilePos, kind: TileKind) -> bool {
        (-1..=1).any(|dy| {
            (-1..=1).any(|dx| (dx != 0 || dy != 0) && self.get(pos.offset(dx, dy)) == Some(kind))
        })
    }

    /// SHA-256 over dimensions and tile ids.
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.width.to_le_bytes());
        hasher.update(self.height.to_le_bytes());
        for tile in &self.tiles {
            hasher.update([tile.id()]);
        }
        hasher.finalize().into()
    }
}
