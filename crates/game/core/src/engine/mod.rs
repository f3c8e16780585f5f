//! Per-tick simulation driver.
//!
//! The [`GameEngine`] is the only code path that advances a [`GameState`].
//! A tick runs in a fixed order: timers, zone edges (inspection and
//! delivery) against last tick's position, panel input or interaction,
//! movement, road-encounter accrual against the previous stored position,
//! and finally the camera.

mod events;
mod panel;

pub use events::{TickEvent, TickReport};

use tracing::{debug, info};

use crate::config::GameConfig;
use crate::contracts::DeliveryOutcome;
use crate::economy::{self, InspectionOutcome};
use crate::event::{self, ModalSource};
use crate::input::{InputState, Pressed};
use crate::map::{CityId, TileKind};
use crate::movement;
use crate::state::{GameState, Vec2, map_pixels};
use crate::ui::{ContractPanel, MarketPanel, Panel};
use crate::zone::{self, Proximity, ZoneTransition};

pub struct GameEngine<'a> {
    state: &'a mut GameState,
    config: &'a GameConfig,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState, config: &'a GameConfig) -> Self {
        Self { state, config }
    }

    /// Advances the simulation by `dt` seconds (clamped to `max_dt`).
    pub fn tick(&mut self, input: &InputState, dt: f64) -> TickReport {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.config.max_dt)
        } else {
            0.0
        };
        let mut report = TickReport::default();

        self.advance_timers(dt);
        self.resolve_zone_edges(&mut report);

        if self.state.panel.is_some() {
            self.handle_panel_input(input, dt, &mut report);
        } else if input.just(Pressed::INTERACT) {
            self.interact(&mut report);
        }

        let tile = self.config.tile();
        if self.state.panel.is_none() {
            movement::advance(&mut self.state.player, &self.state.map, tile, input.intent(), dt);
        } else {
            self.state.player.velocity = Vec2::ZERO;
        }

        self.accrue_road(&mut report);

        let map_px = map_pixels(self.state.map(), tile);
        let target = self.state.player.pos;
        self.state.camera.follow(
            target,
            &self.config.view,
            map_px,
            self.config.camera_rate,
            dt,
        );

        report
    }

    fn advance_timers(&mut self, dt: f64) {
        self.state.elapsed += dt;
        self.state.road.tick_cooldown(dt);
        if let Some(toast) = &mut self.state.toast {
            toast.remaining -= dt;
            if toast.remaining <= 0.0 {
                self.state.toast = None;
            }
        }
    }

    fn toast(&mut self, text: impl Into<String>) {
        self.state.show_toast(text, self.config.toast_seconds);
    }

    /// Runs entry side effects exactly once per crossing into a city.
    fn resolve_zone_edges(&mut self, report: &mut TickReport) {
        let tile = self.config.tile();
        let edges = zone::detect_transitions(&mut self.state.player, &self.state.cities, tile);

        for edge in edges {
            match edge {
                ZoneTransition::CityExited(city) => {
                    debug!(%city, "left city");
                    report.push(TickEvent::CityExited(city));
                }
                ZoneTransition::CityEntered(city) => {
                    report.push(TickEvent::CityEntered(city));
                    self.on_city_entered(city, report);
                }
            }
        }
    }

    fn on_city_entered(&mut self, id: CityId, report: &mut TickReport) {
        let state = &mut *self.state;
        let Some(city) = state.cities.get(usize::from(id.0)).cloned() else {
            return;
        };
        info!(city = %city.name, "entered city");

        let outcome = economy::inspect(
            &mut state.player,
            &state.catalog,
            &city,
            &self.config.inspection,
            &mut state.rng,
        );
        let mut lines = vec![format!("{}: {}", city.name, city.rules.vibe)];
        match &outcome {
            InspectionOutcome::Waved => {}
            InspectionOutcome::Clean { .. } => {
                lines.push("Guards search you and find nothing.".into())
            }
            InspectionOutcome::Confiscated { units, paid, .. } => lines.push(format!(
                "Guards seize {units} contraband and fine you {paid}g."
            )),
        }
        report.push(TickEvent::Inspection { city: id, outcome });

        let delivery = state
            .contracts
            .try_deliver(&mut state.player, id, &self.config.contracts);
        match &delivery {
            DeliveryOutcome::Delivered { contract, .. } => {
                lines.push(format!("Contract complete: +{}g.", contract.reward));
            }
            DeliveryOutcome::Insufficient { held, required } => {
                lines.push(format!("Contract needs {required}, you carry {held}."));
            }
            DeliveryOutcome::NoContract | DeliveryOutcome::NotDestination => {}
        }
        if !matches!(
            delivery,
            DeliveryOutcome::NoContract | DeliveryOutcome::NotDestination
        ) {
            report.push(TickEvent::Delivery {
                city: id,
                outcome: delivery,
            });
        }

        self.toast(lines.join(" "));
    }

    fn interact(&mut self, report: &mut TickReport) {
        let tile = self.config.tile();
        let player_tile = self.state.player.tile(tile);
        let proximity = Proximity::scan(self.state.map(), player_tile);
        let city = zone::current_city(self.state.cities(), self.state.player.pos, tile)
            .map(|city| (city.id, city.name.clone()));

        self.state.nav.reset();

        match (city, proximity) {
            (Some((id, name)), Proximity { near_market: true, .. }) => {
                self.state.panel = Some(Panel::Market(MarketPanel::new(id)));
                report.push(TickEvent::MarketOpened(id));
                debug!(city = %name, "market opened");
            }
            (Some((id, name)), Proximity { near_board: true, .. }) => {
                let state = &mut *self.state;
                if state.contracts.refill_if_empty(
                    id,
                    &state.cities,
                    &state.catalog,
                    &self.config.contracts,
                    &mut state.rng,
                ) {
                    debug!(city = %name, "contract board restocked");
                }
                self.state.panel = Some(Panel::Contracts(ContractPanel { city: id, selected: 0 }));
                report.push(TickEvent::BoardOpened(id));
            }
            (None, Proximity { poi: Some((kind, poi_tile)), .. }) => {
                if self.state.spent_pois.contains(&poi_tile) {
                    self.toast(format!("The {kind} has nothing more to offer."));
                    return;
                }
                let modal =
                    event::poi_modal(kind, poi_tile, &self.config.poi, self.state.catalog());
                self.state.panel = Some(Panel::Event(modal));
                report.push(TickEvent::PoiOpened {
                    kind,
                    tile: poi_tile,
                });
            }
            _ => self.toast("Nothing to interact with here."),
        }
    }

    fn accrue_road(&mut self, report: &mut TickReport) {
        let tile = self.config.tile();
        let state = &mut *self.state;
        let pos = state.player.pos;
        let step = pos.distance(state.prev_pos);
        state.prev_pos = pos;

        let on_road = state.map().get(pos.tile(tile)) == Some(TileKind::Road);
        let in_city = zone::current_city(state.cities(), pos, tile).is_some();
        let modal_open = state.panel.is_some();

        let Some(kind) = state.road.accrue(
            step,
            on_road,
            in_city,
            modal_open,
            &self.config.road,
            &mut state.rng,
        ) else {
            return;
        };

        state.panel = Some(Panel::Event(event::encounter_modal(kind, &self.config.road)));
        state.nav.reset();
        report.push(TickEvent::EncounterTriggered(kind));
    }

    /// Applies the selected modal choice and closes the modal.
    fn resolve_choice(&mut self, modal: event::EventModal, report: &mut TickReport) {
        let Some(choice) = modal.selected_choice().cloned() else {
            return;
        };

        let resolution = event::apply(&choice.effect, &mut self.state.split_for_effects());
        if let ModalSource::Poi { tile, .. } = modal.source {
            if resolution.settled {
                self.state.spent_pois.insert(tile);
            }
        }

        self.toast(resolution.message.clone());
        report.push(TickEvent::ChoiceResolved {
            source: modal.source,
            label: choice.label,
            resolution,
        });
    }
}
