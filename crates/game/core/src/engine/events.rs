use crate::contracts::{Acceptance, DeliveryOutcome};
use crate::economy::{InspectionOutcome, Purchase, Sale};
use crate::event::{EncounterKind, ModalSource, Resolution};
use crate::map::{CityId, PoiKind, TilePos};

/// Something noteworthy that happened during a tick.
#[derive(Clone, Debug, PartialEq)]
pub enum TickEvent {
    CityEntered(CityId),
    CityExited(CityId),
    Inspection {
        city: CityId,
        outcome: InspectionOutcome,
    },
    /// Only reported when the active contract targets the arrived city.
    Delivery {
        city: CityId,
        outcome: DeliveryOutcome,
    },
    EncounterTriggered(EncounterKind),
    MarketOpened(CityId),
    BoardOpened(CityId),
    PoiOpened {
        kind: PoiKind,
        tile: TilePos,
    },
    PanelClosed,
    ChoiceResolved {
        source: ModalSource,
        label: String,
        resolution: Resolution,
    },
    Bought(Purchase),
    Sold(Sale),
    PermitBought {
        city: CityId,
        price: u32,
    },
    ContractAccepted(Acceptance),
    /// A player action was refused; `code` is the error's stable identifier.
    Rejected {
        code: &'static str,
        message: String,
    },
}

/// Events produced by one call to [`GameEngine::tick`](super::GameEngine::tick).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub events: Vec<TickEvent>,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn push(&mut self, event: TickEvent) {
        self.events.push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &TickEvent> + '_ {
        self.events.iter()
    }

    pub fn entered(&self, city: CityId) -> bool {
        self.events.contains(&TickEvent::CityEntered(city))
    }

    pub fn inspection(&self) -> Option<&InspectionOutcome> {
        self.events.iter().find_map(|event| match event {
            TickEvent::Inspection { outcome, .. } => Some(outcome),
            _ => None,
        })
    }

    pub fn encounter(&self) -> Option<EncounterKind> {
        self.events.iter().find_map(|event| match event {
            TickEvent::EncounterTriggered(kind) => Some(*kind),
            _ => None,
        })
    }
}
