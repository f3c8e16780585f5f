//! Centred overlay for the market, the contract board and event modals.

use charter_core::{EventModal, MarketMode, Panel, Snapshot};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render(frame: &mut Frame, area: Rect, view: &Snapshot<'_>) {
    let Some(panel) = view.panel else {
        return;
    };

    let (title, lines) = match panel {
        Panel::Market(market) => {
            let city = view.city_name(market.city);
            let mode = match market.mode {
                MarketMode::Buy => "Buying",
                MarketMode::Sell => "Selling (after tax)",
            };
            (format!("{city} Market: {mode}"), market_lines(view))
        }
        Panel::Contracts(board) => (
            format!("{} Contract Board", view.city_name(board.city)),
            contract_lines(view, board.selected),
        ),
        Panel::Event(modal) => (modal.title.clone(), event_lines(modal)),
    };

    let popup = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup);
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(title),
    );
    frame.render_widget(paragraph, popup);
}

fn row(selected: bool, text: String) -> Line<'static> {
    if selected {
        Line::from(Span::styled(
            format!("> {text}"),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(format!("  {text}"))
    }
}

fn market_lines(view: &Snapshot<'_>) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!("  {:<24}{:>6}{:>6}", "Goods", "Price", "Held"),
        Style::default().fg(Color::Gray),
    ))];
    lines.extend(view.market_lines().into_iter().map(|line| {
        row(
            line.selected,
            format!("{:<24}{:>5}g{:>6}", line.label, line.price, line.held),
        )
    }));
    lines
}

fn contract_lines(view: &Snapshot<'_>, selected: usize) -> Vec<Line<'static>> {
    let offers = view.board_offers();
    if offers.is_empty() {
        return vec![Line::from("  The board is bare.")];
    }
    offers
        .iter()
        .enumerate()
        .map(|(idx, offer)| {
            row(
                idx == selected,
                format!(
                    "Deliver {} {} to {} for {}g",
                    offer.quantity,
                    view.catalog.name_of(offer.item),
                    view.city_name(offer.to),
                    offer.reward
                ),
            )
        })
        .collect()
}

fn event_lines(modal: &EventModal) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(modal.body.clone()), Line::default()];
    lines.extend(
        modal
            .choices
            .iter()
            .enumerate()
            .map(|(idx, choice)| row(idx == modal.selected, choice.label.clone())),
    );
    lines
}

/// Rectangle of `percent_x`×`percent_y` centred in `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
