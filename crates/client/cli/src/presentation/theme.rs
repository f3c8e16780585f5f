//! Glyphs and colours for map tiles.
use charter_core::TileKind;
use ratatui::style::{Color, Modifier, Style};

pub const PLAYER_GLYPH: &str = "@";

pub fn player_style() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}

/// Glyph and style for a tile; `spent` dims exhausted points of interest.
pub fn tile(kind: TileKind, spent: bool) -> (&'static str, Style) {
    let (glyph, style) = match kind {
        TileKind::Grass => (".", Style::default().fg(Color::Green)),
        TileKind::Road => ("=", Style::default().fg(Color::Rgb(194, 160, 96))),
        TileKind::Water => ("~", Style::default().fg(Color::Blue)),
        TileKind::Rock => ("#", Style::default().fg(Color::Gray)),
        TileKind::CityFloor => ("·", Style::default().fg(Color::DarkGray)),
        TileKind::Gate => ("+", Style::default().fg(Color::Yellow)),
        TileKind::Market => (
            "$",
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ),
        TileKind::ContractsBoard => (
            "?",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        TileKind::Shrine => ("^", Style::default().fg(Color::LightMagenta)),
        TileKind::Camp => ("&", Style::default().fg(Color::LightRed)),
        TileKind::Ruins => ("%", Style::default().fg(Color::LightCyan)),
        TileKind::Forest => ("♣", Style::default().fg(Color::Rgb(34, 110, 52))),
        TileKind::Swamp => ("\"", Style::default().fg(Color::Rgb(88, 110, 60))),
    };

    if spent && kind.poi().is_some() {
        (glyph, Style::default().fg(Color::DarkGray))
    } else {
        (glyph, style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [TileKind; 13] = [
        TileKind::Grass,
        TileKind::Road,
        TileKind::Water,
        TileKind::Rock,
        TileKind::CityFloor,
        TileKind::Gate,
        TileKind::Market,
        TileKind::Shrine,
        TileKind::Camp,
        TileKind::Ruins,
        TileKind::Forest,
        TileKind::Swamp,
        TileKind::ContractsBoard,
    ];

    #[test]
    fn glyphs_are_single_cells_and_distinct() {
        let mut glyphs: Vec<&str> = ALL.into_iter().map(|kind| tile(kind, false).0).collect();
        assert!(glyphs.iter().all(|glyph| glyph.chars().count() == 1));
        glyphs.sort_unstable();
        glyphs.dedup();
        assert_eq!(glyphs.len(), ALL.len());
    }

    #[test]
    fn spent_poi_is_dimmed() {
        let (_, fresh) = tile(TileKind::Shrine, false);
        let (_, spent) = tile(TileKind::Shrine, true);
        assert_ne!(fresh, spent);
        assert_eq!(tile(TileKind::Road, true), tile(TileKind::Road, false));
    }
}
