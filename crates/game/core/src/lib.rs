//! Deterministic simulation for the Charter Road overworld.
//!
//! `charter-core` owns the canonical rules (map generation, movement,
//! economy, contracts, road encounters) and performs no I/O. All state
//! mutation flows through [`engine::GameEngine`]; renderers read through
//! [`Snapshot`]. Content loaders and clients depend on the types
//! re-exported here.
pub mod config;
pub mod contracts;
pub mod economy;
pub mod engine;
pub mod error;
pub mod event;
pub mod input;
pub mod map;
pub mod movement;
pub mod rng;
pub mod snapshot;
pub mod state;
pub mod ui;
pub mod zone;

pub use config::{
    ContractConfig, GameConfig, InspectionConfig, MarketConfig, PlayerConfig, PoiConfig,
    RoadConfig, ViewConfig,
};
pub use contracts::{Acceptance, Contract, ContractBoard, ContractError, DeliveryOutcome};
pub use economy::{
    InspectionOutcome, ItemCatalog, ItemCategory, ItemDefinition, ItemId, Purchase, Sale,
    TradeError,
};
pub use engine::{GameEngine, TickEvent, TickReport};
pub use error::{ErrorSeverity, GameError};
pub use event::{Choice, Effect, EncounterKind, EventModal, ModalSource, Resolution};
pub use input::{InputState, Pressed};
pub use map::{
    City, CityId, CityRules, MapError, MapLayout, PoiKind, TileKind, TileMap, TilePos, TileRect,
};
pub use rng::{GameRng, Stream};
pub use snapshot::{Hud, MarketLine, Snapshot};
pub use state::{GameState, InitError, Inventory, Player, Vec2};
pub use ui::{Camera, ContractPanel, MarketMode, MarketPanel, MarketRow, Panel, Toast};
pub use zone::Proximity;
