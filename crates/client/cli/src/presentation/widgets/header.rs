//! Header widget: location, purse and the local law.

use charter_core::Snapshot;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render(frame: &mut Frame, area: Rect, view: &Snapshot<'_>) {
    let hud = view.hud();
    let location_style = if view.current_city.is_some() {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let status = Line::from(vec![
        Span::styled(hud.location, location_style),
        Span::raw(" | Gold: "),
        Span::styled(hud.gold.to_string(), Style::default().fg(Color::LightYellow)),
        Span::raw(" | Cargo: "),
        Span::styled(
            format!("{}/{}", hud.cargo, hud.capacity),
            cargo_style(hud.cargo, hud.capacity),
        ),
        Span::raw(format!(" | Tile: {}", hud.tile)),
        Span::raw(format!(" | Day clock: {:.0}s", view.elapsed())),
    ]);

    let law = match hud.rules {
        Some(rules) => Line::from(Span::styled(rules, Style::default().fg(Color::Gray))),
        None if view.road_cooldown() > 0.0 => Line::from(Span::styled(
            "The road is quiet for now.",
            Style::default().fg(Color::DarkGray),
        )),
        None => Line::from(Span::styled(
            "Keep your wits about you on the road.",
            Style::default().fg(Color::DarkGray),
        )),
    };

    let paragraph = Paragraph::new(vec![status, law])
        .block(Block::default().borders(Borders::ALL).title("Charter Road"));
    frame.render_widget(paragraph, area);
}

fn cargo_style(cargo: u32, capacity: u32) -> Style {
    if cargo >= capacity {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else if cargo * 4 >= capacity * 3 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::LightGreen)
    }
}
