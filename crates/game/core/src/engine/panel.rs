//! Input handling while a panel or modal owns focus.

use tracing::debug;

use crate::economy;
use crate::error::GameError;
use crate::input::{InputState, Pressed};
use crate::ui::{ContractPanel, MarketMode, MarketPanel, MarketRow, Panel};

use super::{GameEngine, TickEvent, TickReport};

impl GameEngine<'_> {
    /// Navigation, mode toggle, confirm and cancel for the open panel.
    ///
    /// The panel is taken out of the state while it is processed and put
    /// back unless the action closed it.
    pub(super) fn handle_panel_input(
        &mut self,
        input: &InputState,
        dt: f64,
        report: &mut TickReport,
    ) {
        let Some(mut panel) = self.state.panel.take() else {
            return;
        };

        if input.just(Pressed::CANCEL) {
            self.state.nav.reset();
            let message = match &panel {
                Panel::Market(_) => "You leave the market.",
                Panel::Contracts(_) => "You step away from the board.",
                Panel::Event(_) => "You decide to move on.",
            };
            self.toast(message);
            report.push(TickEvent::PanelClosed);
            return;
        }

        if let Panel::Market(market) = &mut panel {
            if input.just(Pressed::TOGGLE_MODE) {
                market.mode = market.mode.toggled();
                self.toast(format!("{} mode", market.mode));
            }
        }

        let rows = panel.row_count(&self.state.catalog, &self.state.contracts);
        panel.clamp_selection(rows);
        let step = self.state.nav.update(input, dt, &self.config.market);
        if step != 0 {
            panel.step_selection(step, rows);
        }

        if !input.just(Pressed::CONFIRM) {
            self.state.panel = Some(panel);
            return;
        }

        match panel {
            Panel::Market(market) => {
                self.confirm_market(&market, report);
                self.state.panel = Some(Panel::Market(market));
            }
            Panel::Contracts(board) => self.confirm_contract(&board, report),
            Panel::Event(modal) => {
                self.state.nav.reset();
                self.resolve_choice(modal, report);
            }
        }
    }

    fn confirm_market(&mut self, market: &MarketPanel, report: &mut TickReport) {
        let state = &mut *self.state;
        let Some(city) = state.cities.get(usize::from(market.city.0)) else {
            return;
        };
        let Some(row) = market.rows(&state.catalog).get(market.selected).copied() else {
            return;
        };

        let result = match (row, market.mode) {
            (MarketRow::Item(item), MarketMode::Buy) => {
                economy::buy(&mut state.player, &state.catalog, city, item, state.elapsed).map(
                    |purchase| {
                        let name = state.catalog.name_of(item);
                        (
                            format!("Bought {name} for {}g.", purchase.price),
                            TickEvent::Bought(purchase),
                        )
                    },
                )
            }
            (MarketRow::Item(item), MarketMode::Sell) => {
                economy::sell(&mut state.player, &state.catalog, city, item, state.elapsed).map(
                    |sale| {
                        let name = state.catalog.name_of(item);
                        (
                            format!("Sold {name} for {}g (after tax).", sale.net),
                            TickEvent::Sold(sale),
                        )
                    },
                )
            }
            (MarketRow::Permit, _) => economy::buy_permit(&mut state.player, city).map(|price| {
                (
                    format!("Trade permit for {} acquired.", city.name),
                    TickEvent::PermitBought {
                        city: city.id,
                        price,
                    },
                )
            }),
        };

        match result {
            Ok((message, event)) => {
                report.push(event);
                self.toast(message);
            }
            Err(err) => self.reject(&err, report),
        }
    }

    fn confirm_contract(&mut self, board: &ContractPanel, report: &mut TickReport) {
        match self.state.contracts.accept(board.city, board.selected) {
            Ok(acceptance) => {
                let contract = &acceptance.contract;
                let item = self.state.catalog.name_of(contract.item).to_owned();
                let destination = self
                    .state
                    .city(contract.to)
                    .map_or_else(|| contract.to.to_string(), |city| city.name.clone());
                let message = format!(
                    "Contract: deliver {} {item} to {destination} for {}g.",
                    contract.quantity, contract.reward
                );
                self.toast(message);
                report.push(TickEvent::ContractAccepted(acceptance));
            }
            Err(err) => self.reject(&err, report),
        }
        self.state.nav.reset();
    }

    fn reject<E: GameError>(&mut self, err: &E, report: &mut TickReport) {
        debug!(code = err.error_code(), severity = err.severity().as_str(), "{err}");
        self.toast(err.to_string());
        report.push(TickEvent::Rejected {
            code: err.error_code(),
            message: err.to_string(),
        });
    }
}
