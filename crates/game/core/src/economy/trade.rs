//! Buying, selling and permits at a city market.
//!
//! Every operation validates before mutating: a rejected trade leaves gold
//! and inventory untouched.

use tracing::debug;

use crate::error::{ErrorSeverity, GameError};
use crate::map::City;
use crate::state::Player;

use super::{ItemCatalog, ItemId, pricing};

/// Reasons a market action is refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TradeError {
    #[error("not enough gold: need {cost}, have {available}")]
    InsufficientFunds { cost: u32, available: u32 },

    #[error("too heavy: cargo would weigh {required}, capacity is {capacity}")]
    CapacityExceeded { required: u32, capacity: u32 },

    #[error("you have no {item} to sell")]
    NothingToSell { item: String },

    #[error("unknown item {0:?}")]
    UnknownItem(ItemId),

    #[error("you already hold a permit for {city}")]
    PermitOwned { city: String },
}

impl GameError for TradeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientFunds { .. }
            | Self::CapacityExceeded { .. }
            | Self::NothingToSell { .. } => ErrorSeverity::Recoverable,
            Self::UnknownItem(_) | Self::PermitOwned { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientFunds { .. } => "TRADE_INSUFFICIENT_FUNDS",
            Self::CapacityExceeded { .. } => "TRADE_CAPACITY_EXCEEDED",
            Self::NothingToSell { .. } => "TRADE_NOTHING_TO_SELL",
            Self::UnknownItem(_) => "TRADE_UNKNOWN_ITEM",
            Self::PermitOwned { .. } => "TRADE_PERMIT_OWNED",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Purchase {
    pub item: ItemId,
    pub price: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sale {
    pub item: ItemId,
    pub gross: u32,
    /// Gold credited after tax.
    pub net: u32,
}

/// Buys one unit of `item` at the city's current price.
///
/// Capacity is checked before funds.
pub fn buy(
    player: &mut Player,
    catalog: &ItemCatalog,
    city: &City,
    item: ItemId,
    elapsed: f64,
) -> Result<Purchase, TradeError> {
    let def = catalog.get(item).ok_or(TradeError::UnknownItem(item))?;

    let required = player.cargo_weight(catalog) + def.weight;
    if required > player.capacity {
        return Err(TradeError::CapacityExceeded {
            required,
            capacity: player.capacity,
        });
    }

    let price = pricing::price_for(def, &city.rules, elapsed);
    if !player.can_afford(price) {
        return Err(TradeError::InsufficientFunds {
            cost: price,
            available: player.gold(),
        });
    }

    player.pay(price);
    player.inventory.add(item, 1);
    debug!(city = %city.name, item = %def.name, price, gold = player.gold(), "bought");

    Ok(Purchase { item, price })
}

/// Sells one unit of `item`; the city withholds its tax from the proceeds.
pub fn sell(
    player: &mut Player,
    catalog: &ItemCatalog,
    city: &City,
    item: ItemId,
    elapsed: f64,
) -> Result<Sale, TradeError> {
    let def = catalog.get(item).ok_or(TradeError::UnknownItem(item))?;

    if player.inventory.count(item) == 0 {
        return Err(TradeError::NothingToSell {
            item: def.name.clone(),
        });
    }

    let gross = pricing::price_for(def, &city.rules, elapsed);
    let net = pricing::sell_net(gross, city.rules.tax_rate);

    player.inventory.remove(item, 1);
    player.earn(net);
    debug!(city = %city.name, item = %def.name, gross, net, gold = player.gold(), "sold");

    Ok(Sale { item, gross, net })
}

/// Buys the city's trade permit. Returns the price paid.
pub fn buy_permit(player: &mut Player, city: &City) -> Result<u32, TradeError> {
    if player.has_permit(city.id) {
        return Err(TradeError::PermitOwned {
            city: city.name.clone(),
        });
    }

    let price = city.rules.permit_price;
    if !player.can_afford(price) {
        return Err(TradeError::InsufficientFunds {
            cost: price,
            available: player.gold(),
        });
    }

    player.pay(price);
    player.grant_permit(city.id);
    debug!(city = %city.name, price, "permit purchased");

    Ok(price)
}
