//! Tunable simulation parameters.
//!
//! Every `Default` reproduces the reference game balance. Content files only
//! need to name the values they override.

/// Root configuration handed to [`GameState::new`](crate::GameState::new) and
/// the [`GameEngine`](crate::GameEngine).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Side length of one tile in map-distance units (pixels).
    pub tile_size: u32,
    /// Upper bound for a single tick's `dt`, in seconds.
    pub max_dt: f64,
    /// Seconds a status message stays visible.
    pub toast_seconds: f64,
    /// Exponential camera follow rate (per second).
    pub camera_rate: f64,
    pub view: ViewConfig,
    pub player: PlayerConfig,
    pub market: MarketConfig,
    pub inspection: InspectionConfig,
    pub contracts: ContractConfig,
    pub road: RoadConfig,
    pub poi: PoiConfig,
}

impl GameConfig {
    pub const DEFAULT_TILE_SIZE: u32 = 16;
    pub const DEFAULT_MAX_DT: f64 = 0.05;

    /// Map-distance units per tile as a float.
    pub fn tile(&self) -> f64 {
        f64::from(self.tile_size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_size: Self::DEFAULT_TILE_SIZE,
            max_dt: Self::DEFAULT_MAX_DT,
            toast_seconds: 2.6,
            camera_rate: 10.0,
            view: ViewConfig::default(),
            player: PlayerConfig::default(),
            market: MarketConfig::default(),
            inspection: InspectionConfig::default(),
            contracts: ContractConfig::default(),
            road: RoadConfig::default(),
            poi: PoiConfig::default(),
        }
    }
}

/// Logical viewport size; only used to clamp the camera.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 540.0,
        }
    }
}

/// Starting stats of the caravan.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerConfig {
    pub gold: u32,
    pub capacity: u32,
    /// Movement speed in map units per second.
    pub speed: f64,
    pub radius: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            gold: 120,
            capacity: 18,
            speed: 120.0,
            radius: 6.0,
        }
    }
}

/// Market panel navigation timing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MarketConfig {
    /// Delay before a held navigation direction starts repeating.
    pub nav_initial_delay: f64,
    /// Interval between repeats once repeating.
    pub nav_repeat_delay: f64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            nav_initial_delay: 0.28,
            nav_repeat_delay: 0.09,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InspectionConfig {
    /// Factor applied to the base chance when the player holds a permit.
    pub permit_multiplier: f64,
    /// Lowest chance a permit can reduce inspections to.
    pub permit_floor: f64,
    /// Reputation gained when a search finds nothing.
    pub clean_bonus: i32,
    /// Flat reputation loss on confiscation, before the per-unit part.
    pub base_penalty: i32,
}

impl Default for InspectionConfig {
    fn default() -> Self {
        Self {
            permit_multiplier: 0.45,
            permit_floor: 0.05,
            clean_bonus: 1,
            base_penalty: 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContractConfig {
    /// Offers stocked on each board.
    pub per_city: usize,
    pub quantity_min: u32,
    pub quantity_max: u32,
    pub reward_per_base: f64,
    /// Items at or above this base price earn `bonus_per_unit` extra.
    pub bonus_threshold: u32,
    pub bonus_per_unit: u32,
    /// Catalog keys contracts may ask for; empty means the whole catalog.
    pub candidates: Vec<String>,
    /// Reputation gained at the destination on delivery.
    pub delivery_reputation: i32,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            per_city: 3,
            quantity_min: 2,
            quantity_max: 5,
            reward_per_base: 1.4,
            bonus_threshold: 20,
            bonus_per_unit: 6,
            candidates: ["grain", "salt_fish", "cloth", "spice", "iron_tools", "glass_beads"]
                .into_iter()
                .map(String::from)
                .collect(),
            delivery_reputation: 2,
        }
    }
}

/// Road encounter trigger and the reference outcome table.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RoadConfig {
    /// Road distance (map units) between encounters.
    pub threshold: f64,
    /// Seconds without accrual after an encounter fires.
    pub cooldown: f64,
    pub bandit_toll: u32,
    pub flee_drop: u32,
    pub fight_win_chance: f64,
    pub fight_loot: (u32, u32),
    pub fight_drop: u32,
    pub fight_fine: (u32, u32),
    pub toll: u32,
    pub detour_cooldown: f64,
    pub storm_cooldown: f64,
    pub spoil_chance: f64,
    pub shelter_cost: u32,
}

impl Default for RoadConfig {
    fn default() -> Self {
        Self {
            threshold: 520.0,
            cooldown: 10.0,
            bandit_toll: 25,
            flee_drop: 3,
            fight_win_chance: 0.58,
            fight_loot: (12, 40),
            fight_drop: 2,
            fight_fine: (8, 30),
            toll: 12,
            detour_cooldown: 24.0,
            storm_cooldown: 14.0,
            spoil_chance: 0.4,
            shelter_cost: 10,
        }
    }
}

/// Outcome table for shrine, camp and ruins interactions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PoiConfig {
    pub offering_cost: u32,
    /// Reputation granted in every city by a shrine offering.
    pub offering_reputation: i32,
    pub provision_cost: u32,
    pub provision_item: String,
    pub provision_quantity: u32,
    pub rest_cooldown: f64,
    pub search_find_chance: f64,
    pub search_find_item: String,
    pub trap_chance: f64,
    pub trap_fine: (u32, u32),
}

impl Default for PoiConfig {
    fn default() -> Self {
        Self {
            offering_cost: 10,
            offering_reputation: 1,
            provision_cost: 9,
            provision_item: "grain".into(),
            provision_quantity: 1,
            rest_cooldown: 30.0,
            search_find_chance: 0.35,
            search_find_item: "cursed_relic".into(),
            trap_chance: 0.3,
            trap_fine: (5, 15),
        }
    }
}
