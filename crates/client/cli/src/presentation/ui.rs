//! Frame layout and panel composition.
use anyhow::Result;
use charter_core::{Snapshot, ViewConfig};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::presentation::{
    messages::MessageLog,
    terminal::Tui,
    widgets::{cargo, footer, header, map, messages, panel},
};

pub const HEADER_HEIGHT: u16 = 4;
pub const FOOTER_HEIGHT: u16 = 3;
pub const SIDE_PANEL_WIDTH: u16 = 34;

pub fn render(
    terminal: &mut Tui,
    view: &Snapshot<'_>,
    camera_view: &ViewConfig,
    log: &MessageLog,
) -> Result<()> {
    terminal.draw(|frame| render_frame(frame, view, camera_view, log))?;
    Ok(())
}

fn render_frame(
    frame: &mut Frame,
    view: &Snapshot<'_>,
    camera_view: &ViewConfig,
    log: &MessageLog,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(messages::MESSAGE_PANEL_HEIGHT),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(frame.area());

    let game = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(SIDE_PANEL_WIDTH)])
        .split(rows[1]);

    header::render(frame, rows[0], view);
    map::render(frame, game[0], view, camera_view);
    cargo::render(frame, game[1], view);
    messages::render(frame, rows[2], log);
    footer::render(frame, rows[3], view);

    // Overlay last so it sits above the map.
    panel::render(frame, rows[1], view);
}
