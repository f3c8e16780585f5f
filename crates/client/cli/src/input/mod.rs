//! Input processing for the CLI client.
//!
//! This module owns the keyboard-to-input mapping so the rest of the
//! application can remain agnostic about concrete key bindings or the
//! specifics of `crossterm` events.
//!
//! Most terminals only report key presses (and auto-repeat), never releases,
//! so a direction counts as held for a short window after its last event.

use std::time::{Duration, Instant};

use charter_core::{InputState, Pressed};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// High-level outcome of processing a keyboard event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// The key was folded into the next [`InputState`].
    Captured,
    /// No meaningful command was produced.
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    Up,
    Down,
    Left,
    Right,
}

impl Axis {
    const fn slot(self) -> usize {
        self as usize
    }
}

/// Accumulates key events between ticks.
pub struct InputHandler {
    hold: Duration,
    last_seen: [Option<Instant>; 4],
    pressed: Pressed,
}

impl InputHandler {
    pub fn new(hold: Duration) -> Self {
        Self {
            hold,
            last_seen: [None; 4],
            pressed: Pressed::empty(),
        }
    }

    /// Records a raw key event observed at `now`.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> KeyAction {
        if key.kind == KeyEventKind::Release {
            if let Some(axis) = Self::axis(key.code) {
                self.last_seen[axis.slot()] = None;
            }
            return KeyAction::None;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return KeyAction::Quit;
        }

        if let Some(axis) = Self::axis(key.code) {
            self.last_seen[axis.slot()] = Some(now);
            match axis {
                Axis::Up => self.pressed |= Pressed::NAV_UP,
                Axis::Down => self.pressed |= Pressed::NAV_DOWN,
                Axis::Left | Axis::Right => {}
            }
            return KeyAction::Captured;
        }

        let action = match key.code {
            KeyCode::Char('e') | KeyCode::Char('E') => Pressed::INTERACT,
            KeyCode::Enter | KeyCode::Char(' ') => Pressed::CONFIRM,
            KeyCode::Esc => Pressed::CANCEL,
            KeyCode::Tab | KeyCode::Char('t') | KeyCode::Char('T') => Pressed::TOGGLE_MODE,
            KeyCode::Char('q') | KeyCode::Char('Q') => return KeyAction::Quit,
            _ => return KeyAction::None,
        };
        self.pressed |= action;
        KeyAction::Captured
    }

    /// Builds this tick's input and clears the edge-triggered flags.
    pub fn sample(&mut self, now: Instant) -> InputState {
        let held = |slot: Option<Instant>| {
            slot.is_some_and(|seen| now.saturating_duration_since(seen) <= self.hold)
        };
        let state = InputState {
            up: held(self.last_seen[Axis::Up.slot()]),
            down: held(self.last_seen[Axis::Down.slot()]),
            left: held(self.last_seen[Axis::Left.slot()]),
            right: held(self.last_seen[Axis::Right.slot()]),
            pressed: self.pressed,
        };
        self.pressed = Pressed::empty();
        state
    }

    fn axis(code: KeyCode) -> Option<Axis> {
        match code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char('k') => {
                Some(Axis::Up)
            }
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('j') => {
                Some(Axis::Down)
            }
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('h') => {
                Some(Axis::Left)
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') => {
                Some(Axis::Right)
            }
            _ => None,
        }
    }
}
