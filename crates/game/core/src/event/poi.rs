use crate::config::PoiConfig;
use crate::economy::ItemCatalog;
use crate::map::{PoiKind, TilePos};

use super::{Effect, EventModal, ModalSource};

/// Builds the prompt shown when interacting with a point of interest.
///
/// Choices that name an item missing from `catalog` are left out.
pub fn poi_modal(
    kind: PoiKind,
    tile: TilePos,
    config: &PoiConfig,
    catalog: &ItemCatalog,
) -> EventModal {
    let source = ModalSource::Poi { kind, tile };
    match kind {
        PoiKind::Shrine => EventModal::new(
            source,
            "Roadside Shrine",
            "Candles gutter before a weathered idol. Pilgrims talk, and cities listen.",
        )
        .with_choice(
            format!("Leave an offering ({}g)", config.offering_cost),
            Effect::Offering {
                cost: config.offering_cost,
                reputation: config.offering_reputation,
            },
        )
        .with_choice("Leave", Effect::Leave),

        PoiKind::Camp => {
            let mut modal = EventModal::new(
                source,
                "Traveler's Camp",
                "A fire crackles. Someone is selling dried rations.",
            );
            if let Some(item) = catalog.find_by_key(&config.provision_item) {
                modal = modal.with_choice(
                    format!("Buy provisions ({}g)", config.provision_cost),
                    Effect::Provision {
                        cost: config.provision_cost,
                        item,
                        quantity: config.provision_quantity,
                    },
                );
            }
            modal
                .with_choice(
                    "Rest by the fire",
                    Effect::Rest {
                        cooldown: config.rest_cooldown,
                    },
                )
                .with_choice("Leave", Effect::Leave)
        }

        PoiKind::Ruins => {
            let mut modal = EventModal::new(
                source,
                "Crumbling Ruins",
                "Broken columns and a collapsed cellar. Something glints below.",
            );
            if let Some(find) = catalog.find_by_key(&config.search_find_item) {
                modal = modal.with_choice(
                    "Search the cellar",
                    Effect::Search {
                        find_chance: config.search_find_chance,
                        find,
                        trap_chance: config.trap_chance,
                        trap_fine: config.trap_fine,
                    },
                );
            }
            modal.with_choice("Leave", Effect::Leave)
        }
    }
}
