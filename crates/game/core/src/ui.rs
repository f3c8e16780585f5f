//! Panel, toast and camera state.
//!
//! These are simulation state, not rendering: an open panel suspends
//! movement and owns input focus, and the camera is clamped in map units.

use crate::config::{MarketConfig, ViewConfig};
use crate::contracts::ContractBoard;
use crate::economy::{ItemCatalog, ItemId};
use crate::event::EventModal;
use crate::input::{InputState, Pressed};
use crate::map::CityId;
use crate::state::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
pub enum MarketMode {
    Buy,
    Sell,
}

impl MarketMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

/// One selectable line of the market panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarketRow {
    Item(ItemId),
    Permit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketPanel {
    pub city: CityId,
    pub mode: MarketMode,
    pub selected: usize,
}

impl MarketPanel {
    pub fn new(city: CityId) -> Self {
        Self {
            city,
            mode: MarketMode::Buy,
            selected: 0,
        }
    }

    /// Buy lists every catalog item followed by the permit; sell lists items.
    pub fn rows(&self, catalog: &ItemCatalog) -> Vec<MarketRow> {
        let mut rows: Vec<MarketRow> = catalog.ids().map(MarketRow::Item).collect();
        if self.mode == MarketMode::Buy {
            rows.push(MarketRow::Permit);
        }
        rows
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractPanel {
    pub city: CityId,
    pub selected: usize,
}

/// Whatever currently owns input focus.
#[derive(Clone, Debug, PartialEq)]
pub enum Panel {
    Market(MarketPanel),
    Contracts(ContractPanel),
    Event(EventModal),
}

impl Panel {
    pub fn row_count(&self, catalog: &ItemCatalog, board: &ContractBoard) -> usize {
        match self {
            Panel::Market(market) => market.rows(catalog).len(),
            Panel::Contracts(panel) => board.offers(panel.city).len(),
            Panel::Event(modal) => modal.choices.len(),
        }
    }

    pub fn selected(&self) -> usize {
        match self {
            Panel::Market(market) => market.selected,
            Panel::Contracts(panel) => panel.selected,
            Panel::Event(modal) => modal.selected,
        }
    }

    fn selected_mut(&mut self) -> &mut usize {
        match self {
            Panel::Market(market) => &mut market.selected,
            Panel::Contracts(panel) => &mut panel.selected,
            Panel::Event(modal) => &mut modal.selected,
        }
    }

    /// Moves the selection by `step` rows, wrapping at both ends.
    pub fn step_selection(&mut self, step: i32, rows: usize) {
        let selected = self.selected_mut();
        if rows == 0 {
            *selected = 0;
            return;
        }
        let rows = rows as i64;
        let next = (*selected as i64 + i64::from(step)).rem_euclid(rows);
        *selected = next as usize;
    }

    /// Keeps the selection inside `rows` after the row list changed.
    pub fn clamp_selection(&mut self, rows: usize) {
        let selected = self.selected_mut();
        *selected = (*selected).min(rows.saturating_sub(1));
    }
}

/// Held-direction auto repeat for panel navigation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SelectionRepeat {
    direction: i32,
    timer: f64,
}

impl SelectionRepeat {
    /// Returns the number of rows to move this tick: `-1`, `0` or `1`.
    pub fn update(&mut self, input: &InputState, dt: f64, config: &MarketConfig) -> i32 {
        let pressed = if input.just(Pressed::NAV_UP) {
            -1
        } else if input.just(Pressed::NAV_DOWN) {
            1
        } else {
            0
        };
        if pressed != 0 {
            self.direction = pressed;
            self.timer = config.nav_initial_delay;
            return pressed;
        }

        let held = match self.direction {
            -1 => input.up,
            1 => input.down,
            _ => false,
        };
        if !held {
            self.reset();
            return 0;
        }

        self.timer -= dt;
        if self.timer <= 0.0 {
            self.timer = config.nav_repeat_delay;
            return self.direction;
        }
        0
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Transient status line.
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub text: String,
    /// Seconds left on screen.
    pub remaining: f64,
}

/// Top-left corner of the viewport in map units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
}

impl Camera {
    /// Camera centred on `target`, clamped to the map.
    pub fn centered(target: Vec2, view: &ViewConfig, map_px: Vec2) -> Self {
        let mut camera = Self {
            x: target.x - view.width / 2.0,
            y: target.y - view.height / 2.0,
        };
        camera.clamp(view, map_px);
        camera
    }

    /// Eases toward centring `target` with rate `rate` per second.
    pub fn follow(&mut self, target: Vec2, view: &ViewConfig, map_px: Vec2, rate: f64, dt: f64) {
        let goal_x = target.x - view.width / 2.0;
        let goal_y = target.y - view.height / 2.0;
        let blend = 1.0 - (-rate * dt).exp();
        self.x += (goal_x - self.x) * blend;
        self.y += (goal_y - self.y) * blend;
        self.clamp(view, map_px);
    }

    fn clamp(&mut self, view: &ViewConfig, map_px: Vec2) {
        self.x = self.x.clamp(0.0, (map_px.x - view.width).max(0.0));
        self.y = self.y.clamp(0.0, (map_px.y - view.height).max(0.0));
    }
}
