//! Market price model.
//!
//! Prices are the item's base price scaled by the city's category multiplier
//! and a slow sinusoidal wobble of at most ±4%. Tax is only ever withheld on
//! sales.

use crate::map::CityRules;

use super::ItemDefinition;

/// Peak relative deviation of the wobble.
pub const WOBBLE_AMPLITUDE: f64 = 0.04;

/// Deterministic price oscillation; exactly `1.0` at `elapsed == 0`.
pub fn wobble(base_price: u32, elapsed: f64) -> f64 {
    let frequency = 0.15 + 0.01 * f64::from(base_price % 9);
    1.0 + WOBBLE_AMPLITUDE * (elapsed * frequency).sin()
}

/// Price of one unit of `item` in a city at simulation time `elapsed`.
pub fn price_for(item: &ItemDefinition, rules: &CityRules, elapsed: f64) -> u32 {
    let raw = f64::from(item.base_price)
        * rules.multiplier(item.category)
        * wobble(item.base_price, elapsed);
    raw.max(1.0).round() as u32
}

/// Gold actually received for a sale after the city withholds its tax.
pub fn sell_net(gross: u32, tax_rate: f64) -> u32 {
    let net = (f64::from(gross) * (1.0 - tax_rate)).round();
    net.max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economy::{ItemCatalog, ItemCategory};

    #[test]
    fn wobble_is_bounded_and_neutral_at_start() {
        assert_eq!(wobble(22, 0.0), 1.0);
        for step in 0..2000 {
            let t = f64::from(step) * 0.37;
            let w = wobble(17, t);
            assert!((0.96..=1.04).contains(&w));
        }
    }

    #[test]
    fn multiplier_applies_per_category() {
        let mut rules = CityRules::default();
        rules.price_multipliers.insert(ItemCategory::Occult, 1.5);
        let catalog = ItemCatalog::default();
        let relic = catalog.get(catalog.find_by_key("cursed_relic").unwrap()).unwrap();
        let grain = catalog.get(catalog.find_by_key("grain").unwrap()).unwrap();
        assert_eq!(price_for(relic, &rules, 0.0), 60);
        assert_eq!(price_for(grain, &rules, 0.0), 8);
    }

    #[test]
    fn prices_never_drop_below_one() {
        let mut rules = CityRules::default();
        rules.price_multipliers.insert(ItemCategory::Staple, 0.01);
        let grain = ItemDefinition::new("grain", "Grain", 8, 2, ItemCategory::Staple);
        assert_eq!(price_for(&grain, &rules, 3.0), 1);
        assert_eq!(sell_net(1, 0.9), 1);
    }

    #[test]
    fn sell_net_withholds_tax() {
        assert_eq!(sell_net(100, 0.18), 82);
        assert_eq!(sell_net(12, 0.05), 11);
        assert!(sell_net(37, 0.18) <= 37);
    }
}
