use tracing::info;

use crate::config::RoadConfig;
use crate::rng::GameRng;

use super::{Effect, EventModal, ModalSource};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum EncounterKind {
    Bandits,
    Toll,
    Storm,
}

impl EncounterKind {
    pub const ALL: [Self; 3] = [Self::Bandits, Self::Toll, Self::Storm];
}

/// Observable state of the encounter engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RoadPhase {
    /// Cooling down; no distance accrues.
    Idle { cooldown: f64 },
    Traveling { distance: f64 },
}

/// Accumulates road distance and fires encounters at a fixed threshold.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoadEncounterEngine {
    distance: f64,
    cooldown: f64,
}

impl RoadEncounterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn cooldown(&self) -> f64 {
        self.cooldown
    }

    pub fn phase(&self) -> RoadPhase {
        if self.cooldown > 0.0 {
            RoadPhase::Idle {
                cooldown: self.cooldown,
            }
        } else {
            RoadPhase::Traveling {
                distance: self.distance,
            }
        }
    }

    pub fn tick_cooldown(&mut self, dt: f64) {
        self.cooldown = (self.cooldown - dt).max(0.0);
    }

    /// Raises the cooldown to at least `seconds`.
    pub fn extend_cooldown(&mut self, seconds: f64) {
        self.cooldown = self.cooldown.max(seconds);
    }

    /// Adds `step` of travel. Distance only counts on a road tile outside
    /// every city while no modal is open and the cooldown has elapsed.
    pub fn accrue(
        &mut self,
        step: f64,
        on_road: bool,
        in_city: bool,
        modal_open: bool,
        config: &RoadConfig,
        rng: &mut GameRng,
    ) -> Option<EncounterKind> {
        if self.cooldown > 0.0 || in_city || !on_road || modal_open {
            return None;
        }

        self.distance += step;
        if self.distance < config.threshold {
            return None;
        }

        self.distance = 0.0;
        self.cooldown = config.cooldown;
        let kind = *rng.pick(&EncounterKind::ALL)?;
        info!(encounter = %kind, "road encounter");
        Some(kind)
    }
}

/// Builds the choice prompt for a road encounter.
pub fn encounter_modal(kind: EncounterKind, config: &RoadConfig) -> EventModal {
    let source = ModalSource::Road(kind);
    match kind {
        EncounterKind::Bandits => EventModal::new(
            source,
            "Bandits!",
            "Masked riders block the road and eye your cargo.",
        )
        .with_choice(
            format!("Pay them off ({}g)", config.bandit_toll),
            Effect::Pay {
                amount: config.bandit_toll,
            },
        )
        .with_choice(
            format!("Flee (drop up to {} goods)", config.flee_drop),
            Effect::Flee {
                max_units: config.flee_drop,
            },
        )
        .with_choice(
            format!("Fight ({:.0}% odds)", config.fight_win_chance * 100.0),
            Effect::Fight {
                win_chance: config.fight_win_chance,
                loot: config.fight_loot,
                drop_units: config.fight_drop,
                fine: config.fight_fine,
            },
        ),
        EncounterKind::Toll => EventModal::new(
            source,
            "Toll Bridge",
            "A bored guard leans on a barrier pole. \"Road tax.\"",
        )
        .with_choice(
            format!("Pay the toll ({}g)", config.toll),
            Effect::Pay { amount: config.toll },
        )
        .with_choice(
            "Take a detour",
            Effect::Detour {
                cooldown: config.detour_cooldown,
            },
        ),
        EncounterKind::Storm => EventModal::new(
            source,
            "Storm",
            "Black clouds roll in. Fragile goods may not survive the rain.",
        )
        .with_choice(
            "Push through",
            Effect::PushThrough {
                cooldown: config.storm_cooldown,
                spoil_chance: config.spoil_chance,
            },
        )
        .with_choice(
            format!("Shelter at a waystation ({}g)", config.shelter_cost),
            Effect::Shelter {
                cost: config.shelter_cost,
            },
        ),
    }
}
