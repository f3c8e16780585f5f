//! Cargo held by the caravan.

use std::collections::BTreeMap;

use crate::economy::{ItemCatalog, ItemId};
use crate::rng::GameRng;

/// Item counts keyed by catalog id. Zero counts are never stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    counts: BTreeMap<ItemId, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, item: ItemId) -> u32 {
        self.counts.get(&item).copied().unwrap_or(0)
    }

    pub fn add(&mut self, item: ItemId, quantity: u32) {
        if quantity > 0 {
            *self.counts.entry(item).or_insert(0) += quantity;
        }
    }

    /// Removes up to `quantity` units and returns how many were removed.
    pub fn remove(&mut self, item: ItemId, quantity: u32) -> u32 {
        let held = self.count(item);
        let removed = held.min(quantity);
        if removed == held {
            self.counts.remove(&item);
        } else if let Some(count) = self.counts.get_mut(&item) {
            *count -= removed;
        }
        removed
    }

    /// Removes every unit of `item`, returning the count removed.
    pub fn take_all(&mut self, item: ItemId) -> u32 {
        self.counts.remove(&item).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total_units(&self) -> u32 {
        self.counts.values().sum()
    }

    /// `Σ count × weight`; unknown ids weigh nothing.
    pub fn weight(&self, catalog: &ItemCatalog) -> u32 {
        self.counts
            .iter()
            .map(|(id, count)| count * catalog.get(*id).map_or(0, |def| def.weight))
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, u32)> + '_ {
        self.counts.iter().map(|(id, count)| (*id, *count))
    }

    /// Picks one held unit uniformly, so larger stacks are proportionally
    /// more likely.
    pub fn random_unit(&self, rng: &mut GameRng) -> Option<ItemId> {
        let total = self.total_units() as usize;
        if total == 0 {
            return None;
        }
        let mut roll = rng.index(total) as u32;
        for (id, count) in self.iter() {
            if roll < count {
                return Some(id);
            }
            roll -= count;
        }
        None
    }

    /// Drops up to `max_units` random units, returning what was lost.
    pub fn drop_random(&mut self, rng: &mut GameRng, max_units: u32) -> Vec<(ItemId, u32)> {
        let mut lost: BTreeMap<ItemId, u32> = BTreeMap::new();
        for _ in 0..max_units {
            let Some(item) = self.random_unit(rng) else {
                break;
            };
            self.remove(item, 1);
            *lost.entry(item).or_insert(0) += 1;
        }
        lost.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_clamps_and_prunes() {
        let mut inv = Inventory::new();
        inv.add(ItemId(1), 3);
        assert_eq!(inv.remove(ItemId(1), 2), 2);
        assert_eq!(inv.count(ItemId(1)), 1);
        assert_eq!(inv.remove(ItemId(1), 5), 1);
        assert!(inv.is_empty());
        assert_eq!(inv.remove(ItemId(4), 1), 0);
    }

    #[test]
    fn weight_uses_catalog() {
        let catalog = ItemCatalog::default();
        let mut inv = Inventory::new();
        inv.add(catalog.find_by_key("iron_tools").unwrap(), 2);
        inv.add(catalog.find_by_key("cloth").unwrap(), 3);
        assert_eq!(inv.weight(&catalog), 11);
        assert_eq!(inv.total_units(), 5);
    }

    #[test]
    fn drop_random_never_exceeds_holdings() {
        let mut rng = GameRng::new(8);
        let mut inv = Inventory::new();
        inv.add(ItemId(0), 1);
        inv.add(ItemId(2), 1);
        let lost = inv.drop_random(&mut rng, 3);
        assert_eq!(lost.iter().map(|(_, n)| n).sum::<u32>(), 2);
        assert!(inv.is_empty());
        assert!(inv.drop_random(&mut rng, 3).is_empty());
        assert_eq!(inv.random_unit(&mut rng), None);
    }
}
