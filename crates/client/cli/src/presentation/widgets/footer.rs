//! Footer widget: the current toast and context-sensitive key bindings.

use charter_core::{Panel, Snapshot};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render(frame: &mut Frame, area: Rect, view: &Snapshot<'_>) {
    let toast = view.toast.map_or_else(Line::default, |toast| {
        Line::from(Span::styled(
            toast.text.clone(),
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ))
    });

    let keys = match view.panel {
        None => {
            let mut hint = "[WASD/hjkl/Arrows] Move | [e] Interact | [q] Quit".to_string();
            if view.proximity.near_market || view.proximity.near_board {
                hint.push_str(" | Something to browse nearby");
            } else if view.proximity.poi.is_some() && view.current_city.is_none() {
                hint.push_str(" | Something catches your eye");
            }
            hint
        }
        Some(Panel::Market(_)) => {
            "[Up/Down] Select | [Enter] Trade | [Tab] Buy/Sell | [Esc] Leave".to_string()
        }
        Some(Panel::Contracts(_)) => "[Up/Down] Select | [Enter] Accept | [Esc] Close".to_string(),
        Some(Panel::Event(_)) => "[Up/Down] Select | [Enter] Choose | [Esc] Walk away".to_string(),
    };

    let paragraph = Paragraph::new(vec![toast, Line::from(Span::raw(keys))])
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(paragraph, area);
}
