//! Messages widget displaying recent game events.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, List, ListDirection, ListItem},
};

use crate::presentation::messages::{MessageEntry, MessageLevel, MessageLog};

/// Height of message panel in lines (including borders).
pub const MESSAGE_PANEL_HEIGHT: u16 = 7;

/// Render the message log panel, newest at the bottom.
pub fn render(frame: &mut Frame, area: Rect, log: &MessageLog) {
    let visible = usize::from(area.height.saturating_sub(2));
    let mut items: Vec<ListItem> = log
        .recent(visible)
        .map(|entry| ListItem::new(format_message(entry)).style(style_for(entry.level)))
        .collect();

    // Pad with empty lines to maintain consistent height
    while items.len() < visible {
        items.push(ListItem::new(""));
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Messages"))
        .direction(ListDirection::BottomToTop);

    frame.render_widget(list, area);
}

fn format_message(entry: &MessageEntry) -> String {
    format!("[{:>5.0}s] {}", entry.time, entry.text)
}

fn style_for(level: MessageLevel) -> Style {
    match level {
        MessageLevel::Info => Style::default(),
        MessageLevel::Good => Style::default().fg(Color::LightGreen),
        MessageLevel::Warning => Style::default().fg(Color::LightRed),
    }
}
