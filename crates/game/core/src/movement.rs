//! Continuous movement against tile solidity.

use crate::map::TileMap;
use crate::state::{Player, Vec2};

/// Normalized movement direction built from the four directional inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputIntent {
    pub x: f64,
    pub y: f64,
}

impl InputIntent {
    /// Diagonal intent is scaled to unit length so it is not faster than
    /// axis-aligned movement.
    pub fn from_axes(up: bool, down: bool, left: bool, right: bool) -> Self {
        let x = f64::from(i8::from(right) - i8::from(left));
        let y = f64::from(i8::from(down) - i8::from(up));
        let len = x.hypot(y);
        if len == 0.0 {
            Self::default()
        } else {
            Self { x: x / len, y: y / len }
        }
    }

    pub fn is_idle(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// True when any corner of the square of half-size `radius` around `pos`
/// lies on a solid or off-grid tile.
pub fn blocked(map: &TileMap, pos: Vec2, radius: f64, tile_size: f64) -> bool {
    [(-radius, -radius), (radius, -radius), (-radius, radius), (radius, radius)]
        .into_iter()
        .any(|(dx, dy)| map.is_solid(Vec2::new(pos.x + dx, pos.y + dy).tile(tile_size)))
}

/// Moves the player for `dt` seconds, one axis at a time so walls can be
/// slid along.
pub fn advance(player: &mut Player, map: &TileMap, tile_size: f64, intent: InputIntent, dt: f64) {
    player.velocity = Vec2::new(intent.x * player.speed, intent.y * player.speed);

    let candidate_x = Vec2::new(player.pos.x + player.velocity.x * dt, player.pos.y);
    if !blocked(map, candidate_x, player.radius, tile_size) {
        player.pos.x = candidate_x.x;
    }

    let candidate_y = Vec2::new(player.pos.x, player.pos.y + player.velocity.y * dt);
    if !blocked(map, candidate_y, player.radius, tile_size) {
        player.pos.y = candidate_y.y;
    }

    let max_x = f64::from(map.width()) * tile_size - tile_size;
    let max_y = f64::from(map.height()) * tile_size - tile_size;
    player.pos.x = player.pos.x.clamp(tile_size, max_x.max(tile_size));
    player.pos.y = player.pos.y.clamp(tile_size, max_y.max(tile_size));
}
