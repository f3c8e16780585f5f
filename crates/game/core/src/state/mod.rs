//! Authoritative simulation state.
//!
//! Everything mutable lives in one [`GameState`], which the
//! [`GameEngine`](crate::GameEngine) borrows mutably for the duration of a
//! tick. Renderers read it through a [`Snapshot`](crate::Snapshot).

mod inventory;
mod player;

pub use inventory::Inventory;
pub use player::{Player, Vec2};

use std::collections::BTreeSet;

use tracing::info;

use crate::config::GameConfig;
use crate::contracts::ContractBoard;
use crate::economy::ItemCatalog;
use crate::error::{ErrorSeverity, GameError};
use crate::event::RoadEncounterEngine;
use crate::map::{self, City, MapError, MapLayout, TileMap, TilePos};
use crate::movement;
use crate::rng::{GameRng, Stream};
use crate::ui::{Camera, Panel, SelectionRepeat, Toast};

/// Failure to build a playable world.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error(transparent)]
    Map(#[from] MapError),

    #[error("item catalog is empty")]
    EmptyCatalog,

    #[error("spawn point {0} is blocked")]
    SpawnBlocked(TilePos),
}

impl GameError for InitError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Map(err) => err.error_code(),
            Self::EmptyCatalog => "INIT_EMPTY_CATALOG",
            Self::SpawnBlocked(_) => "INIT_SPAWN_BLOCKED",
        }
    }
}

#[derive(Clone, Debug)]
pub struct GameState {
    /// Session seed; the world and gameplay streams derive from it.
    pub seed: u64,
    /// Simulation seconds since start.
    pub elapsed: f64,
    pub(crate) map: TileMap,
    pub(crate) cities: Vec<City>,
    pub(crate) catalog: ItemCatalog,
    pub player: Player,
    pub contracts: ContractBoard,
    pub road: RoadEncounterEngine,
    pub panel: Option<Panel>,
    pub toast: Option<Toast>,
    pub camera: Camera,
    /// Points of interest whose interaction has been used up.
    pub spent_pois: BTreeSet<TilePos>,
    pub(crate) prev_pos: Vec2,
    pub(crate) nav: SelectionRepeat,
    pub(crate) rng: GameRng,
}

impl GameState {
    /// Generates the world for `seed` and places the player at the first
    /// city's gate.
    pub fn new(
        config: &GameConfig,
        layout: &MapLayout,
        catalog: ItemCatalog,
        seed: u64,
    ) -> Result<Self, InitError> {
        if catalog.is_empty() {
            return Err(InitError::EmptyCatalog);
        }

        let mut world_rng = GameRng::for_stream(seed, Stream::World);
        let world = map::generate(layout, &mut world_rng)?;

        let tile = config.tile();
        let gate = world.cities.first().ok_or(MapError::NoCities)?.gate_exit;
        let spawn = Vec2::new(
            (f64::from(gate.x) + 0.5) * tile,
            (f64::from(gate.y) + 0.5) * tile,
        );
        if movement::blocked(&world.map, spawn, config.player.radius, tile) {
            return Err(InitError::SpawnBlocked(gate));
        }
        let player = Player::new(spawn, &config.player);

        let mut rng = GameRng::for_stream(seed, Stream::Gameplay);
        let mut contracts = ContractBoard::new();
        contracts.stock(&world.cities, &catalog, &config.contracts, &mut rng);

        let map_px = map_pixels(&world.map, tile);
        let camera = Camera::centered(spawn, &config.view, map_px);

        info!(
            seed,
            width = world.map.width(),
            height = world.map.height(),
            cities = world.cities.len(),
            items = catalog.len(),
            "world ready"
        );

        Ok(Self {
            seed,
            elapsed: 0.0,
            map: world.map,
            cities: world.cities,
            catalog,
            player,
            contracts,
            road: RoadEncounterEngine::new(),
            panel: None,
            toast: None,
            camera,
            spent_pois: BTreeSet::new(),
            prev_pos: spawn,
            nav: SelectionRepeat::default(),
            rng,
        })
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn city(&self, id: map::CityId) -> Option<&City> {
        self.cities.get(usize::from(id.0))
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    pub fn modal_open(&self) -> bool {
        self.panel.is_some()
    }

    pub fn show_toast(&mut self, text: impl Into<String>, seconds: f64) {
        self.toast = Some(Toast {
            text: text.into(),
            remaining: seconds,
        });
    }

    /// Teleports the player, also resetting the travel reference point.
    ///
    /// Zone edges are still detected on the next tick.
    pub fn place_player(&mut self, pos: Vec2) {
        self.player.pos = pos;
        self.prev_pos = pos;
    }

    pub(crate) fn split_for_effects(&mut self) -> crate::event::EffectContext<'_> {
        crate::event::EffectContext {
            player: &mut self.player,
            catalog: &self.catalog,
            cities: &self.cities,
            road: &mut self.road,
            rng: &mut self.rng,
        }
    }
}

/// Map extent in map-distance units.
pub(crate) fn map_pixels(map: &TileMap, tile: f64) -> Vec2 {
    Vec2::new(f64::from(map.width()) * tile, f64::from(map.height()) * tile)
}
