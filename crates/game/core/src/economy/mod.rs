//! Item catalog, market pricing, trade and gate inspection.
//!
//! Everything here is a function of the player, a city and the catalog; no
//! economy state lives outside [`Player`](crate::state::Player).

mod inspection;
mod items;
pub mod pricing;
mod trade;

pub use inspection::{InspectionOutcome, effective_chance, inspect, inspect_with_roll};
pub use items::{ItemCatalog, ItemCategory, ItemDefinition, ItemId};
pub use pricing::{price_for, sell_net};
pub use trade::{Purchase, Sale, TradeError, buy, buy_permit, sell};
