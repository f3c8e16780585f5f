//! Read-only view of the state for renderers.

use crate::config::GameConfig;
use crate::contracts::Contract;
use crate::economy::{ItemCatalog, pricing};
use crate::map::{City, TileMap, TilePos};
use crate::state::{GameState, Player};
use crate::ui::{Camera, MarketMode, MarketRow, Panel, Toast};
use crate::zone::{self, Proximity};

/// One rendered line of the market panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketLine {
    pub label: String,
    /// Buy price, or net proceeds after tax in sell mode.
    pub price: u32,
    pub held: u32,
    pub selected: bool,
}

/// Heads-up display summary.
#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    /// City name or `"On the road"`.
    pub location: String,
    /// Tax, inspection and contraband summary of the current city.
    pub rules: Option<String>,
    pub tile: TilePos,
    pub gold: u32,
    pub cargo: u32,
    pub capacity: u32,
}

pub struct Snapshot<'a> {
    pub map: &'a TileMap,
    pub cities: &'a [City],
    pub catalog: &'a ItemCatalog,
    pub player: &'a Player,
    pub current_city: Option<&'a City>,
    pub panel: Option<&'a Panel>,
    pub active_contract: Option<&'a Contract>,
    pub toast: Option<&'a Toast>,
    pub camera: Camera,
    pub proximity: Proximity,
    pub tile_size: f64,
    state: &'a GameState,
}

impl<'a> Snapshot<'a> {
    pub fn capture(state: &'a GameState, config: &GameConfig) -> Self {
        let tile_size = config.tile();
        let player_tile = state.player.tile(tile_size);
        Self {
            map: state.map(),
            cities: state.cities(),
            catalog: state.catalog(),
            player: &state.player,
            current_city: zone::current_city(state.cities(), state.player.pos, tile_size),
            panel: state.panel.as_ref(),
            active_contract: state.contracts.active(),
            toast: state.toast.as_ref(),
            camera: state.camera,
            proximity: Proximity::scan(state.map(), player_tile),
            tile_size,
            state,
        }
    }

    pub fn hud(&self) -> Hud {
        let rules = self.current_city.map(|city| {
            let contraband = if city.rules.contraband.is_empty() {
                "none".to_string()
            } else {
                city.rules.contraband.join(", ")
            };
            format!(
                "Tax {:.0}%  Inspection {:.0}%  Contraband: {contraband}",
                city.rules.tax_rate * 100.0,
                city.rules.inspection_chance * 100.0,
            )
        });

        Hud {
            location: self
                .current_city
                .map_or_else(|| "On the road".to_string(), |city| city.name.clone()),
            rules,
            tile: self.player.tile(self.tile_size),
            gold: self.player.gold(),
            cargo: self.player.cargo_weight(self.catalog),
            capacity: self.player.capacity,
        }
    }

    /// Market rows with current prices, empty unless the market is open.
    pub fn market_lines(&self) -> Vec<MarketLine> {
        let Some(Panel::Market(market)) = self.panel else {
            return Vec::new();
        };
        let Some(city) = self.state.city(market.city) else {
            return Vec::new();
        };

        market
            .rows(self.catalog)
            .into_iter()
            .enumerate()
            .filter_map(|(idx, row)| {
                let selected = idx == market.selected;
                match row {
                    MarketRow::Item(id) => {
                        let def = self.catalog.get(id)?;
                        let gross = pricing::price_for(def, &city.rules, self.state.elapsed);
                        let price = match market.mode {
                            MarketMode::Buy => gross,
                            MarketMode::Sell => pricing::sell_net(gross, city.rules.tax_rate),
                        };
                        Some(MarketLine {
                            label: def.name.clone(),
                            price,
                            held: self.player.inventory.count(id),
                            selected,
                        })
                    }
                    MarketRow::Permit => Some(MarketLine {
                        label: format!("{} trade permit", city.name),
                        price: city.rules.permit_price,
                        held: u32::from(self.player.has_permit(city.id)),
                        selected,
                    }),
                }
            })
            .collect()
    }

    /// Offers on the open contract board.
    pub fn board_offers(&self) -> &'a [Contract] {
        match self.panel {
            Some(Panel::Contracts(panel)) => self.state.contracts.offers(panel.city),
            _ => &[],
        }
    }

    pub fn city_name(&self, id: crate::map::CityId) -> &'a str {
        self.state.city(id).map_or("?", |city| city.name.as_str())
    }

    /// True once the point of interest at `tile` has been used up.
    pub fn is_spent(&self, tile: TilePos) -> bool {
        self.state.spent_pois.contains(&tile)
    }

    pub fn elapsed(&self) -> f64 {
        self.state.elapsed
    }

    pub fn road_cooldown(&self) -> f64 {
        self.state.road.cooldown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapLayout;

    #[test]
    fn hud_reports_road_outside_cities() {
        let config = GameConfig::default();
        let state =
            GameState::new(&config, &MapLayout::default(), ItemCatalog::default(), 3).unwrap();
        let snapshot = Snapshot::capture(&state, &config);
        let hud = snapshot.hud();
        assert_eq!(hud.location, "On the road");
        assert!(hud.rules.is_none());
        assert_eq!(hud.gold, 120);
        assert_eq!(hud.tile, state.cities()[0].gate_exit);
        assert!(snapshot.market_lines().is_empty());
        assert!(snapshot.board_offers().is_empty());
    }
}
