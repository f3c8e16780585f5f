//! Logical input consumed by the engine each tick.

use bitflags::bitflags;

use crate::movement::InputIntent;

bitflags! {
    /// Discrete actions activated during this tick (edge-triggered).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Pressed: u8 {
        const INTERACT    = 1 << 0;
        const CONFIRM     = 1 << 1;
        const CANCEL      = 1 << 2;
        const TOGGLE_MODE = 1 << 3;
        const NAV_UP      = 1 << 4;
        const NAV_DOWN    = 1 << 5;
    }
}

/// Held directions plus this tick's just-pressed actions.
///
/// Clients are free to map keys, gamepads or touch controls onto this.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub pressed: Pressed,
}

impl InputState {
    pub fn intent(&self) -> InputIntent {
        InputIntent::from_axes(self.up, self.down, self.left, self.right)
    }

    pub fn just(&self, action: Pressed) -> bool {
        self.pressed.contains(action)
    }

    pub fn with_pressed(mut self, action: Pressed) -> Self {
        self.pressed |= action;
        self
    }
}
