//! Rolling log of noteworthy tick events.
use std::collections::VecDeque;

use charter_core::{DeliveryOutcome, InspectionOutcome, Snapshot, TickEvent, TickReport};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Good,
    Warning,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MessageEntry {
    /// Simulation seconds when the event happened.
    pub time: f64,
    pub level: MessageLevel,
    pub text: String,
}

pub struct MessageLog {
    entries: VecDeque<MessageEntry>,
    capacity: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, time: f64, level: MessageLevel, text: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(MessageEntry {
            time,
            level,
            text: text.into(),
        });
    }

    /// Appends a line for every event worth showing.
    pub fn record(&mut self, report: &TickReport, view: &Snapshot<'_>) {
        for event in report.iter() {
            if let Some((level, text)) = describe(event, view) {
                self.push(view.elapsed(), level, text);
            }
        }
    }

    /// Newest entries first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &MessageEntry> + '_ {
        self.entries.iter().rev().take(count)
    }
}

fn describe(event: &TickEvent, view: &Snapshot<'_>) -> Option<(MessageLevel, String)> {
    use MessageLevel::*;

    let line = match event {
        TickEvent::CityEntered(city) => (Info, format!("Entered {}.", view.city_name(*city))),
        TickEvent::CityExited(city) => (Info, format!("Left {}.", view.city_name(*city))),
        TickEvent::Inspection { outcome, .. } => match outcome {
            InspectionOutcome::Waved => (Info, "The guards wave you through.".to_string()),
            InspectionOutcome::Clean { reputation } => (
                Good,
                format!("Searched and found clean (reputation {reputation:+})."),
            ),
            InspectionOutcome::Confiscated {
                units,
                paid,
                reputation,
                ..
            } => (
                Warning,
                format!(
                    "Guards seized {units} contraband and took {paid}g \
                     (reputation {reputation:+})."
                ),
            ),
        },
        TickEvent::Delivery { city, outcome } => match outcome {
            DeliveryOutcome::Delivered { contract, .. } => (
                Good,
                format!(
                    "Delivered {} {} to {}: +{}g.",
                    contract.quantity,
                    view.catalog.name_of(contract.item),
                    view.city_name(*city),
                    contract.reward
                ),
            ),
            DeliveryOutcome::Insufficient { held, required } => (
                Warning,
                format!("Contract needs {required} units; you carry {held}."),
            ),
            DeliveryOutcome::NoContract | DeliveryOutcome::NotDestination => return None,
        },
        TickEvent::EncounterTriggered(kind) => (Warning, format!("Road encounter: {kind}.")),
        TickEvent::ChoiceResolved {
            label, resolution, ..
        } => {
            let level = if resolution.settled { Good } else { Info };
            (level, format!("{label}: {}", resolution.message))
        }
        TickEvent::Bought(purchase) => (
            Info,
            format!(
                "Bought {} for {}g.",
                view.catalog.name_of(purchase.item),
                purchase.price
            ),
        ),
        TickEvent::Sold(sale) => (
            Info,
            format!(
                "Sold {} for {}g ({}g before tax).",
                view.catalog.name_of(sale.item),
                sale.net,
                sale.gross
            ),
        ),
        TickEvent::PermitBought { city, price } => (
            Good,
            format!("Bought a {} trade permit for {price}g.", view.city_name(*city)),
        ),
        TickEvent::ContractAccepted(acceptance) => {
            let contract = &acceptance.contract;
            let mut text = format!(
                "Accepted: {} {} to {} for {}g.",
                contract.quantity,
                view.catalog.name_of(contract.item),
                view.city_name(contract.to),
                contract.reward
            );
            if acceptance.replaced.is_some() {
                text.push_str(" Previous contract dropped.");
            }
            (Info, text)
        }
        TickEvent::Rejected { message, .. } => (Warning, message.clone()),
        TickEvent::MarketOpened(_)
        | TickEvent::BoardOpened(_)
        | TickEvent::PoiOpened { .. }
        | TickEvent::PanelClosed => return None,
    };
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use charter_core::{CityId, GameConfig, GameState, ItemCatalog, MapLayout, Purchase};

    fn state() -> (GameConfig, GameState) {
        let config = GameConfig::default();
        let state =
            GameState::new(&config, &MapLayout::default(), ItemCatalog::default(), 5).unwrap();
        (config, state)
    }

    #[test]
    fn records_visible_events_only() {
        let (config, state) = state();
        let view = Snapshot::capture(&state, &config);
        let grain = view.catalog.find_by_key("grain").unwrap();

        let mut report = TickReport::default();
        report.push(TickEvent::CityEntered(CityId(0)));
        report.push(TickEvent::MarketOpened(CityId(0)));
        report.push(TickEvent::Bought(Purchase { item: grain, price: 9 }));

        let mut log = MessageLog::new(8);
        log.record(&report, &view);

        let texts: Vec<&str> = log.recent(8).map(|entry| entry.text.as_str()).collect();
        assert_eq!(texts, ["Bought Grain for 9g.", "Entered Sunspire."]);
    }

    #[test]
    fn capacity_drops_oldest() {
        let mut log = MessageLog::new(2);
        log.push(0.0, MessageLevel::Info, "one");
        log.push(1.0, MessageLevel::Info, "two");
        log.push(2.0, MessageLevel::Warning, "three");

        assert_eq!(log.recent(10).count(), 2);
        let newest = log.recent(1).next().unwrap();
        assert_eq!(newest.text, "three");
        assert_eq!(newest.level, MessageLevel::Warning);
    }
}
