//! Map widget rendering the tile grid around the camera.

use charter_core::{Snapshot, TilePos, ViewConfig};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::presentation::theme;

/// Top-left tile of a `cols`×`rows` window centred on the camera, shifted so
/// the player stays visible and clamped to the map.
pub fn viewport_origin(view: &Snapshot<'_>, config: &ViewConfig, cols: i32, rows: i32) -> TilePos {
    let tile = view.tile_size;
    let center_x = ((view.camera.x + config.width / 2.0) / tile).floor() as i32;
    let center_y = ((view.camera.y + config.height / 2.0) / tile).floor() as i32;
    let player = view.player.tile(tile);

    let axis = |center: i32, player: i32, span: i32, extent: i32| {
        if span <= 0 {
            return 0;
        }
        let mut origin = center - span / 2;
        origin = origin.clamp(player - span + 1, player);
        origin.clamp(0, (extent - span).max(0))
    };

    TilePos::new(
        axis(center_x, player.x, cols, view.map.width() as i32),
        axis(center_y, player.y, rows, view.map.height() as i32),
    )
}

/// Render the map panel.
pub fn render(frame: &mut Frame, area: Rect, view: &Snapshot<'_>, config: &ViewConfig) {
    let block = Block::default().borders(Borders::ALL).title(format!(
        "Map ({}×{})",
        view.map.width(),
        view.map.height()
    ));
    let inner = block.inner(area);
    let cols = i32::from(inner.width);
    let rows = i32::from(inner.height);
    let origin = viewport_origin(view, config, cols, rows);
    let player = view.player.tile(view.tile_size);

    let lines: Vec<Line> = (origin.y..origin.y + rows)
        .map(|y| {
            let spans: Vec<Span> = (origin.x..origin.x + cols)
                .map(|x| {
                    let pos = TilePos::new(x, y);
                    if pos == player {
                        return Span::styled(theme::PLAYER_GLYPH, theme::player_style());
                    }
                    match view.map.get(pos) {
                        Some(kind) => {
                            let (glyph, style) = theme::tile(kind, view.is_spent(pos));
                            Span::styled(glyph, style)
                        }
                        None => Span::raw(" "),
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use charter_core::{GameConfig, GameState, ItemCatalog, MapLayout};

    #[test]
    fn player_always_inside_viewport() {
        let config = GameConfig::default();
        let mut state =
            GameState::new(&config, &MapLayout::default(), ItemCatalog::default(), 1).unwrap();
        // Far corner while the camera still looks at the spawn.
        state.place_player(charter_core::Vec2::new(20.0, 20.0));

        let view = Snapshot::capture(&state, &config);
        let origin = viewport_origin(&view, &config.view, 40, 20);
        let player = view.player.tile(view.tile_size);
        assert!(player.x >= origin.x && player.x < origin.x + 40);
        assert!(player.y >= origin.y && player.y < origin.y + 20);
        assert!(origin.x >= 0 && origin.y >= 0);
    }

    #[test]
    fn small_maps_pin_to_origin() {
        let config = GameConfig::default();
        let state =
            GameState::new(&config, &MapLayout::default(), ItemCatalog::default(), 1).unwrap();
        let view = Snapshot::capture(&state, &config);
        assert_eq!(viewport_origin(&view, &config.view, 500, 500), TilePos::new(0, 0));
    }
}
