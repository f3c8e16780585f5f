//! Delivery contracts posted on city boards.
//!
//! Each city keeps a small pool of offers. The player holds at most one
//! active contract; accepting another silently replaces it. Contracts never
//! expire.

use std::collections::BTreeMap;

use tracing::info;

use crate::config::ContractConfig;
use crate::economy::{ItemCatalog, ItemId};
use crate::error::{ErrorSeverity, GameError};
use crate::map::{City, CityId};
use crate::rng::GameRng;
use crate::state::Player;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contract {
    pub id: u32,
    pub from: CityId,
    pub to: CityId,
    pub item: ItemId,
    pub quantity: u32,
    pub reward: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContractError {
    #[error("no contract offer #{index} on the board in {city}")]
    NoOffer { city: CityId, index: usize },
}

impl GameError for ContractError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoOffer { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoOffer { .. } => "CONTRACT_NO_OFFER",
        }
    }
}

/// Result of arriving at a city while a contract may be active.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeliveryOutcome {
    NoContract,
    NotDestination,
    /// Right city, not enough goods; the contract stays active.
    Insufficient { held: u32, required: u32 },
    Delivered { contract: Contract, reputation: i32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Acceptance {
    pub contract: Contract,
    pub replaced: Option<Contract>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContractBoard {
    offers: BTreeMap<CityId, Vec<Contract>>,
    active: Option<Contract>,
    next_id: u32,
}

impl ContractBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offers(&self, city: CityId) -> &[Contract] {
        self.offers.get(&city).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn active(&self) -> Option<&Contract> {
        self.active.as_ref()
    }

    /// Tops every city's pool up to `config.per_city` offers.
    pub fn stock(
        &mut self,
        cities: &[City],
        catalog: &ItemCatalog,
        config: &ContractConfig,
        rng: &mut GameRng,
    ) {
        for city in cities {
            while self.offers(city.id).len() < config.per_city {
                let Some(contract) = self.generate(city.id, cities, catalog, config, rng) else {
                    break;
                };
                self.offers.entry(city.id).or_default().push(contract);
            }
        }
    }

    /// Restocks `city` when its pool has been emptied. Returns true when new
    /// offers were posted.
    pub fn refill_if_empty(
        &mut self,
        city: CityId,
        cities: &[City],
        catalog: &ItemCatalog,
        config: &ContractConfig,
        rng: &mut GameRng,
    ) -> bool {
        if !self.offers(city).is_empty() {
            return false;
        }
        let fresh: Vec<Contract> = (0..config.per_city)
            .filter_map(|_| self.generate(city, cities, catalog, config, rng))
            .collect();
        let posted = !fresh.is_empty();
        self.offers.insert(city, fresh);
        posted
    }

    /// Draws a new offer originating in `from`. Returns `None` when there is
    /// no other city or no candidate item.
    pub fn generate(
        &mut self,
        from: CityId,
        cities: &[City],
        catalog: &ItemCatalog,
        config: &ContractConfig,
        rng: &mut GameRng,
    ) -> Option<Contract> {
        let destinations: Vec<CityId> = cities
            .iter()
            .map(|city| city.id)
            .filter(|id| *id != from)
            .collect();

        let mut candidates: Vec<ItemId> = config
            .candidates
            .iter()
            .filter_map(|key| catalog.find_by_key(key))
            .collect();
        if candidates.is_empty() {
            candidates = catalog.ids().collect();
        }

        let item = *rng.pick(&candidates)?;
        let to = *rng.pick(&destinations)?;
        let quantity = rng.range(config.quantity_min.max(1), config.quantity_max.max(1));
        let base = catalog.get(item)?.base_price;

        let mut reward =
            (f64::from(quantity) * f64::from(base) * config.reward_per_base).round() as u32;
        if base >= config.bonus_threshold {
            reward += quantity * config.bonus_per_unit;
        }

        self.next_id += 1;
        Some(Contract {
            id: self.next_id,
            from,
            to,
            item,
            quantity,
            reward,
        })
    }

    /// Takes offer `index` from `city`'s pool and makes it the active contract.
    pub fn accept(&mut self, city: CityId, index: usize) -> Result<Acceptance, ContractError> {
        let pool = self
            .offers
            .get_mut(&city)
            .filter(|pool| index < pool.len())
            .ok_or(ContractError::NoOffer { city, index })?;

        let contract = pool.remove(index);
        let replaced = self.active.replace(contract.clone());
        info!(
            id = contract.id,
            from = %contract.from,
            to = %contract.to,
            quantity = contract.quantity,
            reward = contract.reward,
            "contract accepted"
        );

        Ok(Acceptance { contract, replaced })
    }

    /// Completes the active contract if `arrived` is its destination and the
    /// player carries enough goods.
    pub fn try_deliver(
        &mut self,
        player: &mut Player,
        arrived: CityId,
        config: &ContractConfig,
    ) -> DeliveryOutcome {
        let Some(contract) = &self.active else {
            return DeliveryOutcome::NoContract;
        };
        if contract.to != arrived {
            return DeliveryOutcome::NotDestination;
        }

        let held = player.inventory.count(contract.item);
        if held < contract.quantity {
            return DeliveryOutcome::Insufficient {
                held,
                required: contract.quantity,
            };
        }

        let Some(contract) = self.active.take() else {
            return DeliveryOutcome::NoContract;
        };
        player.inventory.remove(contract.item, contract.quantity);
        player.earn(contract.reward);
        player.adjust_reputation(arrived, config.delivery_reputation);
        info!(id = contract.id, reward = contract.reward, city = %arrived, "contract delivered");

        DeliveryOutcome::Delivered {
            contract,
            reputation: config.delivery_reputation,
        }
    }
}
