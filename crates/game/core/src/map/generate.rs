//! Procedural world carving.
//!
//! Later steps paint over earlier ones, so the order of the helpers called
//! from [`generate`] is part of the contract.

use tracing::{debug, warn};

use crate::error::{ErrorSeverity, GameError};
use crate::rng::GameRng;

use super::{
    BiomeKind, City, CityId, CitySpec, MapLayout, PoiKind, PoiSpec, RiverSpec, TileKind, TileMap,
    TilePos, TileRect,
};

/// Generated terrain together with the cities placed on it.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    pub map: TileMap,
    pub cities: Vec<City>,
}

/// Layout rejected before any cell was painted.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("map {width}x{height} is too small (minimum 8x8)")]
    TooSmall { width: u32, height: u32 },

    #[error("layout declares no cities")]
    NoCities,

    #[error("city '{key}' does not fit inside the map with its wall ring and gate road")]
    CityOutOfBounds { key: String },

    #[error("city '{key}' has a gate width of {width}; expected 1..={max}")]
    InvalidGate { key: String, width: u32, max: u32 },

    #[error("city '{key}' places its {feature} outside the city floor")]
    FeatureOutsideCity { key: String, feature: &'static str },

    #[error("road {road} references city index {index}, but only {count} cities exist")]
    UnknownRoadCity {
        road: usize,
        index: usize,
        count: usize,
    },

    #[error("road {road} waypoint {pos} lies outside the map interior")]
    WaypointOutOfBounds { road: usize, pos: TilePos },

    #[error("cities '{first}' and '{second}' overlap or share a wall")]
    CitiesOverlap { first: String, second: String },

    #[error("road {road} crosses the walls of city '{key}' at {pos}")]
    RoadThroughCity { road: usize, key: String, pos: TilePos },
}

impl GameError for MapError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TooSmall { .. } => "MAP_TOO_SMALL",
            Self::NoCities => "MAP_NO_CITIES",
            Self::CityOutOfBounds { .. } => "MAP_CITY_OUT_OF_BOUNDS",
            Self::InvalidGate { .. } => "MAP_INVALID_GATE",
            Self::FeatureOutsideCity { .. } => "MAP_FEATURE_OUTSIDE_CITY",
            Self::UnknownRoadCity { .. } => "MAP_UNKNOWN_ROAD_CITY",
            Self::WaypointOutOfBounds { .. } => "MAP_WAYPOINT_OUT_OF_BOUNDS",
            Self::CitiesOverlap { .. } => "MAP_CITIES_OVERLAP",
            Self::RoadThroughCity { .. } => "MAP_ROAD_THROUGH_CITY",
        }
    }
}

/// Carves a world from `layout`, drawing every random decision from `rng`.
pub fn generate(layout: &MapLayout, rng: &mut GameRng) -> Result<World, MapError> {
    validate(layout)?;

    let mut map = TileMap::filled(layout.width, layout.height, TileKind::Grass);

    if let Some(river) = &layout.river {
        paint_river(&mut map, river);
    }
    paint_border(&mut map);

    let cities: Vec<City> = layout
        .cities
        .iter()
        .enumerate()
        .map(|(idx, spec)| paint_city(&mut map, CityId(idx as u16), spec))
        .collect();

    for road in &layout.roads {
        let start = cities[road.from].gate_exit;
        let stops = road.via.iter().copied().chain([cities[road.to].gate_exit]);
        for pos in road_path(start, stops) {
            map.set(pos, TileKind::Road);
        }
    }

    for patch in &layout.biomes {
        let tile = match patch.kind {
            BiomeKind::Forest => TileKind::Forest,
            BiomeKind::Swamp => TileKind::Swamp,
        };
        paint_patch(&mut map, rng, patch.center, patch.radius, tile);
    }

    scatter_rocks(&mut map, rng, layout.rock_chance);
    place_pois(&mut map, rng, &cities, &layout.poi);

    debug!(
        width = map.width(),
        height = map.height(),
        cities = cities.len(),
        roads = map.count(TileKind::Road),
        rocks = map.count(TileKind::Rock),
        forest = map.count(TileKind::Forest),
        swamp = map.count(TileKind::Swamp),
        "world generated"
    );

    Ok(World { map, cities })
}

fn validate(layout: &MapLayout) -> Result<(), MapError> {
    if layout.width < 8 || layout.height < 8 {
        return Err(MapError::TooSmall {
            width: layout.width,
            height: layout.height,
        });
    }
    if layout.cities.is_empty() {
        return Err(MapError::NoCities);
    }

    let width = layout.width as i32;
    let height = layout.height as i32;

    for spec in &layout.cities {
        let b = spec.bounds;
        // Wall ring plus the gate road row must stay clear of the border.
        let fits = b.w >= 1
            && b.h >= 1
            && b.x >= 2
            && b.y >= 2
            && b.x + b.w <= width - 2
            && b.y + b.h + 1 <= height - 2;
        if !fits {
            return Err(MapError::CityOutOfBounds {
                key: spec.key.clone(),
            });
        }

        if spec.gate_width == 0 || spec.gate_width > b.w as u32 {
            return Err(MapError::InvalidGate {
                key: spec.key.clone(),
                width: spec.gate_width,
                max: b.w as u32,
            });
        }

        let [left, right] = market_cells(spec);
        if !b.contains(left) || !b.contains(right) {
            return Err(MapError::FeatureOutsideCity {
                key: spec.key.clone(),
                feature: "market",
            });
        }
        if !b.contains(board_cell(spec)) {
            return Err(MapError::FeatureOutsideCity {
                key: spec.key.clone(),
                feature: "contracts board",
            });
        }
    }

    for (idx, first) in layout.cities.iter().enumerate() {
        for second in &layout.cities[idx + 1..] {
            if first.bounds.grown(1).intersects(&second.bounds.grown(1)) {
                return Err(MapError::CitiesOverlap {
                    first: first.key.clone(),
                    second: second.key.clone(),
                });
            }
        }
    }

    let count = layout.cities.len();
    for (road, spec) in layout.roads.iter().enumerate() {
        for index in [spec.from, spec.to] {
            if index >= count {
                return Err(MapError::UnknownRoadCity { road, index, count });
            }
        }
        for &pos in &spec.via {
            let interior = pos.x >= 1 && pos.y >= 1 && pos.x < width - 1 && pos.y < height - 1;
            if !interior {
                return Err(MapError::WaypointOutOfBounds { road, pos });
            }
        }

        // Gate exits sit on the row below each ring, so a clean road never
        // touches a ring cell.
        let start = gate_exit(&layout.cities[spec.from]);
        let stops = spec.via.iter().copied().chain([gate_exit(&layout.cities[spec.to])]);
        for pos in road_path(start, stops) {
            if let Some(city) = layout
                .cities
                .iter()
                .find(|city| city.bounds.grown(1).contains(pos))
            {
                return Err(MapError::RoadThroughCity {
                    road,
                    key: city.key.clone(),
                    pos,
                });
            }
        }
    }

    Ok(())
}

fn gate_exit(spec: &CitySpec) -> TilePos {
    let b = spec.bounds;
    TilePos::new(b.x + b.w / 2, b.y + b.h + 1)
}

fn market_cells(spec: &CitySpec) -> [TilePos; 2] {
    let (dx, dy) = spec.market_offset;
    let left = TilePos::new(spec.bounds.x + dx, spec.bounds.y + dy);
    [left, left.offset(1, 0)]
}

fn board_cell(spec: &CitySpec) -> TilePos {
    let (dx, dy) = spec.board_offset;
    TilePos::new(spec.bounds.x + dx, spec.bounds.y + dy)
}

fn paint_river(map: &mut TileMap, river: &RiverSpec) {
    let width = map.width() as i32;
    let rows = river.top as i32..(river.top + river.thickness) as i32;

    for y in rows.clone() {
        for x in 0..width {
            map.set(TilePos::new(x, y), TileKind::Water);
        }
    }
    for bridge in &river.bridges {
        for y in rows.clone() {
            for x in bridge.x as i32..(bridge.x + bridge.width) as i32 {
                map.set(TilePos::new(x, y), TileKind::Road);
            }
        }
    }
}

fn paint_border(map: &mut TileMap) {
    let width = map.width() as i32;
    let height = map.height() as i32;

    for x in 0..width {
        map.set(TilePos::new(x, 0), TileKind::Rock);
        map.set(TilePos::new(x, height - 1), TileKind::Rock);
    }
    for y in 0..height {
        map.set(TilePos::new(0, y), TileKind::Rock);
        map.set(TilePos::new(width - 1, y), TileKind::Rock);
    }
}

fn paint_city(map: &mut TileMap, id: CityId, spec: &CitySpec) -> City {
    let b = spec.bounds;

    // Ring first, then the floor inside it.
    let ring = TileRect::new(b.x - 1, b.y - 1, b.w + 2, b.h + 2);
    for y in ring.y..ring.y + ring.h {
        for x in ring.x..ring.x + ring.w {
            let pos = TilePos::new(x, y);
            let kind = if b.contains(pos) {
                TileKind::CityFloor
            } else {
                TileKind::Rock
            };
            map.set(pos, kind);
        }
    }

    let wall_row = b.y + b.h;
    let exit = gate_exit(spec);
    let gate_start = exit.x - spec.gate_width as i32 / 2;
    for x in gate_start..gate_start + spec.gate_width as i32 {
        map.set(TilePos::new(x, wall_row), TileKind::Gate);
        map.set(TilePos::new(x, wall_row + 1), TileKind::Road);
    }

    let market = market_cells(spec);
    for cell in market {
        map.set(cell, TileKind::Market);
    }
    let board = board_cell(spec);
    map.set(board, TileKind::ContractsBoard);

    City {
        id,
        key: spec.key.clone(),
        name: spec.name.clone(),
        bounds: b,
        gate_exit: exit,
        market,
        board,
        rules: spec.rules.clone(),
    }
}

/// Cells of a road through `stops`, each leg L-shaped: along x to the
/// target column, then along y.
fn road_path(start: TilePos, stops: impl IntoIterator<Item = TilePos>) -> Vec<TilePos> {
    let mut cells = vec![start];
    let mut cursor = start;
    for to in stops {
        while cursor.x != to.x {
            cursor.x += (to.x - cursor.x).signum();
            cells.push(cursor);
        }
        while cursor.y != to.y {
            cursor.y += (to.y - cursor.y).signum();
            cells.push(cursor);
        }
    }
    cells
}

fn paint_patch(map: &mut TileMap, rng: &mut GameRng, center: TilePos, radius: f64, kind: TileKind) {
    if radius <= 0.0 {
        return;
    }
    let reach = radius.ceil() as i32;
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let distance = f64::from(dx * dx + dy * dy).sqrt();
            if distance > radius {
                continue;
            }
            let pos = center.offset(dx, dy);
            if map.get(pos) == Some(TileKind::Grass) && rng.chance(1.0 - distance / radius) {
                map.set(pos, kind);
            }
        }
    }
}

fn scatter_rocks(map: &mut TileMap, rng: &mut GameRng, chance: f64) {
    if chance <= 0.0 {
        return;
    }
    let grass: Vec<TilePos> = map.positions_of(TileKind::Grass).collect();
    for pos in grass {
        if rng.chance(chance) {
            map.set(pos, TileKind::Rock);
        }
    }
}

fn place_pois(map: &mut TileMap, rng: &mut GameRng, cities: &[City], spec: &PoiSpec) {
    let width = map.width();
    let height = map.height();

    for kind in [PoiKind::Shrine, PoiKind::Camp, PoiKind::Ruins] {
        let mut placed = 0;
        for _ in 0..spec.per_kind {
            let found = (0..spec.attempts).find_map(|_| {
                let pos = TilePos::new(
                    rng.range(1, width - 2) as i32,
                    rng.range(1, height - 2) as i32,
                );
                let eligible = map.get(pos) == Some(TileKind::Grass)
                    && map.touches(pos, TileKind::Road)
                    && !cities
                        .iter()
                        .any(|city| city.bounds.contains_padded(pos, spec.city_padding));
                eligible.then_some(pos)
            });

            match found {
                Some(pos) => {
                    map.set(pos, kind.tile());
                    placed += 1;
                }
                None => {
                    warn!(
                        poi = %kind,
                        attempts = spec.attempts,
                        "no eligible cell found; skipping point of interest"
                    );
                }
            }
        }
        debug!(poi = %kind, placed, "points of interest placed");
    }
}
