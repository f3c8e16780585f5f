use std::collections::{BTreeMap, BTreeSet};

use crate::config::PlayerConfig;
use crate::economy::ItemCatalog;
use crate::map::{CityId, TilePos};

use super::Inventory;

/// Continuous 2D vector in map-distance units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Tile containing this point.
    pub fn tile(self, tile_size: f64) -> TilePos {
        TilePos::new(
            (self.x / tile_size).floor() as i32,
            (self.y / tile_size).floor() as i32,
        )
    }
}

impl core::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl core::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// The caravan: the single entity every system reads and mutates.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f64,
    pub velocity: Vec2,
    pub speed: f64,
    gold: u32,
    pub capacity: u32,
    pub inventory: Inventory,
    /// City the player stood in at the end of the previous zone check.
    pub last_city: Option<CityId>,
    reputation: BTreeMap<CityId, i32>,
    permits: BTreeSet<CityId>,
}

impl Player {
    pub fn new(pos: Vec2, config: &PlayerConfig) -> Self {
        Self {
            pos,
            radius: config.radius,
            velocity: Vec2::ZERO,
            speed: config.speed,
            gold: config.gold,
            capacity: config.capacity,
            inventory: Inventory::new(),
            last_city: None,
            reputation: BTreeMap::new(),
            permits: BTreeSet::new(),
        }
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn earn(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Debits up to `amount`, never below zero. Returns the amount paid.
    pub fn pay(&mut self, amount: u32) -> u32 {
        let paid = self.gold.min(amount);
        self.gold -= paid;
        paid
    }

    pub fn can_afford(&self, amount: u32) -> bool {
        self.gold >= amount
    }

    pub fn reputation(&self, city: CityId) -> i32 {
        self.reputation.get(&city).copied().unwrap_or(0)
    }

    pub fn adjust_reputation(&mut self, city: CityId, delta: i32) {
        *self.reputation.entry(city).or_insert(0) += delta;
    }

    pub fn reputations(&self) -> impl Iterator<Item = (CityId, i32)> + '_ {
        self.reputation.iter().map(|(id, rep)| (*id, *rep))
    }

    pub fn has_permit(&self, city: CityId) -> bool {
        self.permits.contains(&city)
    }

    pub fn grant_permit(&mut self, city: CityId) {
        self.permits.insert(city);
    }

    pub fn permits(&self) -> impl Iterator<Item = CityId> + '_ {
        self.permits.iter().copied()
    }

    pub fn cargo_weight(&self, catalog: &ItemCatalog) -> u32 {
        self.inventory.weight(catalog)
    }

    pub fn tile(&self, tile_size: f64) -> TilePos {
        self.pos.tile(tile_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payments_clamp_at_zero() {
        let mut player = Player::new(Vec2::new(32.0, 32.0), &PlayerConfig::default());
        assert_eq!(player.pay(25), 25);
        assert_eq!(player.gold(), 95);
        assert_eq!(player.pay(500), 95);
        assert_eq!(player.gold(), 0);
        assert_eq!(player.pay(1), 0);
    }

    #[test]
    fn reputation_may_go_negative() {
        let mut player = Player::new(Vec2::ZERO, &PlayerConfig::default());
        player.adjust_reputation(CityId(0), -3);
        player.adjust_reputation(CityId(1), 2);
        assert_eq!(player.reputation(CityId(0)), -3);
        assert_eq!(player.reputation(CityId(1)), 2);
        assert_eq!(player.reputation(CityId(7)), 0);
    }

    #[test]
    fn tile_floors_coordinates() {
        assert_eq!(Vec2::new(31.9, 16.0).tile(16.0), TilePos::new(1, 1));
        assert_eq!(Vec2::new(-0.5, 0.0).tile(16.0), TilePos::new(-1, 0));
    }
}
