//! Side panel listing cargo, the active contract, permits and standing.

use charter_core::Snapshot;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn render(frame: &mut Frame, area: Rect, view: &Snapshot<'_>) {
    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
    };

    let mut lines = vec![heading("Cargo")];
    if view.player.inventory.is_empty() {
        lines.push(Line::from("  (empty)"));
    }
    for (item, count) in view.player.inventory.iter() {
        let contraband = view
            .catalog
            .get(item)
            .is_some_and(|def| def.contraband.is_some());
        let style = if contraband {
            Style::default().fg(Color::LightMagenta)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!("  {count:>2} {}", view.catalog.name_of(item)),
            style,
        )));
    }

    lines.push(Line::default());
    lines.push(heading("Contract"));
    match view.active_contract {
        Some(contract) => {
            let held = view.player.inventory.count(contract.item);
            lines.push(Line::from(format!(
                "  {} {} to {}",
                contract.quantity,
                view.catalog.name_of(contract.item),
                view.city_name(contract.to)
            )));
            lines.push(Line::from(format!(
                "  reward {}g, carrying {held}/{}",
                contract.reward, contract.quantity
            )));
        }
        None => lines.push(Line::from("  none")),
    }

    lines.push(Line::default());
    lines.push(heading("Standing"));
    for city in view.cities {
        let permit = if view.player.has_permit(city.id) {
            " [permit]"
        } else {
            ""
        };
        lines.push(Line::from(format!(
            "  {}: {:+}{permit}",
            city.name,
            view.player.reputation(city.id)
        )));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Trader"));
    frame.render_widget(paragraph, area);
}
