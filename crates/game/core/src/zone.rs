//! City membership, zone transitions and proximity queries.

use arrayvec::ArrayVec;

use crate::map::{City, CityId, PoiKind, TileKind, TileMap, TilePos};
use crate::state::{Player, Vec2};

/// Edge produced when the player's city membership changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoneTransition {
    CityExited(CityId),
    CityEntered(CityId),
}

/// First city whose half-open bounds contain `pos`.
pub fn current_city(cities: &[City], pos: Vec2, tile_size: f64) -> Option<&City> {
    let tx = pos.x / tile_size;
    let ty = pos.y / tile_size;
    cities.iter().find(|city| city.bounds.contains_point(tx, ty))
}

/// Compares the player's current city with `last_city`, records the new
/// value unconditionally and returns the edges crossed (exit before entry).
pub fn detect_transitions(
    player: &mut Player,
    cities: &[City],
    tile_size: f64,
) -> ArrayVec<ZoneTransition, 2> {
    let now = current_city(cities, player.pos, tile_size).map(|city| city.id);
    let before = player.last_city;
    player.last_city = now;

    let mut edges = ArrayVec::new();
    if now != before {
        if let Some(left) = before {
            edges.push(ZoneTransition::CityExited(left));
        }
        if let Some(entered) = now {
            edges.push(ZoneTransition::CityEntered(entered));
        }
    }
    edges
}

/// Interaction targets within reach of the player's tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Proximity {
    pub near_market: bool,
    pub near_board: bool,
    pub poi: Option<(PoiKind, TilePos)>,
}

impl Proximity {
    /// Scans a 5×3 window for market stalls and 3×3 windows for the board and
    /// points of interest.
    pub fn scan(map: &TileMap, tile: TilePos) -> Self {
        let near = |rx: i32, ry: i32, want: TileKind| {
            (-ry..=ry).any(|dy| (-rx..=rx).any(|dx| map.get(tile.offset(dx, dy)) == Some(want)))
        };

        let poi = (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| tile.offset(dx, dy)))
            .find_map(|pos| map.get(pos).and_then(TileKind::poi).map(|kind| (kind, pos)));

        Self {
            near_market: near(2, 1, TileKind::Market),
            near_board: near(1, 1, TileKind::ContractsBoard),
            poi,
        }
    }
}
