//! Gate searches for contraband.

use tracing::info;

use crate::config::InspectionConfig;
use crate::map::City;
use crate::rng::GameRng;
use crate::state::Player;

use super::{ItemCatalog, ItemId};

/// Result of passing a city gate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InspectionOutcome {
    /// The guards did not search.
    Waved,
    /// Searched and found nothing banned.
    Clean { reputation: i32 },
    /// Searched and seized every banned unit.
    Confiscated {
        seized: Vec<(ItemId, u32)>,
        units: u32,
        fine: u32,
        /// Gold actually collected (may be less than `fine`).
        paid: u32,
        reputation: i32,
    },
}

impl InspectionOutcome {
    pub fn was_searched(&self) -> bool {
        !matches!(self, Self::Waved)
    }
}

/// Probability that the guards at `city` search the player.
///
/// A permit scales the chance down to no lower than the permit floor, and
/// never above the city's own chance.
pub fn effective_chance(city: &City, player: &Player, config: &InspectionConfig) -> f64 {
    let base = city.rules.inspection_chance;
    if player.has_permit(city.id) {
        (base * config.permit_multiplier)
            .max(config.permit_floor)
            .min(base)
    } else {
        base
    }
}

/// Rolls for a search at `city` and applies its consequences.
pub fn inspect(
    player: &mut Player,
    catalog: &ItemCatalog,
    city: &City,
    config: &InspectionConfig,
    rng: &mut GameRng,
) -> InspectionOutcome {
    let roll = rng.next_f64();
    inspect_with_roll(player, catalog, city, config, roll)
}

/// Same as [`inspect`] with an explicit roll in `[0, 1)`; a search happens
/// when `roll` is below the effective chance.
pub fn inspect_with_roll(
    player: &mut Player,
    catalog: &ItemCatalog,
    city: &City,
    config: &InspectionConfig,
    roll: f64,
) -> InspectionOutcome {
    let chance = effective_chance(city, player, config);
    if roll >= chance {
        return InspectionOutcome::Waved;
    }

    let banned: Vec<ItemId> = catalog
        .iter()
        .filter(|(_, def)| {
            def.contraband
                .as_deref()
                .is_some_and(|tag| city.rules.is_contraband(tag))
        })
        .map(|(id, _)| id)
        .collect();

    let seized: Vec<(ItemId, u32)> = banned
        .into_iter()
        .map(|id| (id, player.inventory.take_all(id)))
        .filter(|(_, units)| *units > 0)
        .collect();
    let units: u32 = seized.iter().map(|(_, units)| units).sum();

    if units == 0 {
        player.adjust_reputation(city.id, config.clean_bonus);
        info!(city = %city.name, "inspection found nothing");
        return InspectionOutcome::Clean {
            reputation: config.clean_bonus,
        };
    }

    let fine = city.rules.fine_base + units * city.rules.fine_per_item;
    let paid = player.pay(fine);
    let reputation = -(config.base_penalty + units as i32);
    player.adjust_reputation(city.id, reputation);
    info!(city = %city.name, units, fine, paid, reputation, "contraband confiscated");

    InspectionOutcome::Confiscated {
        seized,
        units,
        fine,
        paid,
        reputation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerConfig;
    use crate::map::{CityId, CityRules, TilePos, TileRect};
    use crate::state::Vec2;

    fn strict_city() -> City {
        City {
            id: CityId(0),
            key: "sunspire".into(),
            name: "Sunspire".into(),
            bounds: TileRect::new(18, 26, 22, 16),
            gate_exit: TilePos::new(29, 43),
            market: [TilePos::new(21, 29), TilePos::new(22, 29)],
            board: TilePos::new(36, 29),
            rules: CityRules {
                tax_rate: 0.18,
                inspection_chance: 0.65,
                contraband: vec!["Cursed Relics".into(), "Demon Ink".into()],
                fine_base: 18,
                fine_per_item: 6,
                ..CityRules::default()
            },
        }
    }

    fn player() -> Player {
        Player::new(Vec2::new(0.0, 0.0), &PlayerConfig::default())
    }

    #[test]
    fn hit_confiscates_all_contraband() {
        let catalog = ItemCatalog::default();
        let city = strict_city();
        let config = InspectionConfig::default();
        let relic = catalog.find_by_key("cursed_relic").unwrap();
        let ink = catalog.find_by_key("demon_ink").unwrap();
        let water = catalog.find_by_key("blessed_water").unwrap();
        let mut player = player();
        player.inventory.add(relic, 2);
        player.inventory.add(ink, 1);
        player.inventory.add(water, 4);

        let outcome = inspect_with_roll(&mut player, &catalog, &city, &config, 0.0);
        let InspectionOutcome::Confiscated {
            units, fine, paid, reputation, ..
        } = outcome
        else {
            panic!("expected confiscation, got {outcome:?}");
        };
        assert_eq!(units, 3);
        assert_eq!(fine, 36);
        assert_eq!(paid, 36);
        assert_eq!(reputation, -5);
        assert_eq!(player.gold(), 84);
        assert_eq!(player.inventory.count(relic), 0);
        assert_eq!(player.inventory.count(ink), 0);
        assert_eq!(player.inventory.count(water), 4);
        assert_eq!(player.reputation(city.id), -5);
    }

    #[test]
    fn fine_is_clamped_to_available_gold() {
        let catalog = ItemCatalog::default();
        let city = strict_city();
        let relic = catalog.find_by_key("cursed_relic").unwrap();
        let mut player = player();
        player.pay(110);
        player.inventory.add(relic, 1);

        let outcome =
            inspect_with_roll(&mut player, &catalog, &city, &InspectionConfig::default(), 0.1);
        assert!(matches!(
            outcome,
            InspectionOutcome::Confiscated { fine: 24, paid: 10, .. }
        ));
        assert_eq!(player.gold(), 0);
    }

    #[test]
    fn clean_search_rewards_reputation() {
        let catalog = ItemCatalog::default();
        let city = strict_city();
        let mut player = player();
        let outcome =
            inspect_with_roll(&mut player, &catalog, &city, &InspectionConfig::default(), 0.2);
        assert_eq!(outcome, InspectionOutcome::Clean { reputation: 1 });
        assert_eq!(player.reputation(city.id), 1);
    }

    #[test]
    fn miss_changes_nothing() {
        let catalog = ItemCatalog::default();
        let city = strict_city();
        let relic = catalog.find_by_key("cursed_relic").unwrap();
        let mut player = player();
        player.inventory.add(relic, 1);
        let before = player.clone();

        let outcome =
            inspect_with_roll(&mut player, &catalog, &city, &InspectionConfig::default(), 0.65);
        assert_eq!(outcome, InspectionOutcome::Waved);
        assert!(!outcome.was_searched());
        assert_eq!(player, before);
    }

    #[test]
    fn permit_reduces_but_never_eliminates_searches() {
        let city = strict_city();
        let config = InspectionConfig::default();
        let mut player = player();
        assert_eq!(effective_chance(&city, &player, &config), 0.65);
        player.grant_permit(city.id);
        let reduced = effective_chance(&city, &player, &config);
        assert!((reduced - 0.2925).abs() < 1e-9);

        let mut lax = strict_city();
        lax.rules.inspection_chance = 0.05;
        assert_eq!(effective_chance(&lax, &player, &config), 0.05);
    }

    #[test]
    fn permit_never_raises_a_low_chance() {
        let catalog = ItemCatalog::default();
        let config = InspectionConfig::default();
        let mut city = strict_city();
        city.rules.inspection_chance = 0.02;
        let mut player = player();
        player.grant_permit(city.id);

        assert_eq!(effective_chance(&city, &player, &config), 0.02);
        let outcome = inspect_with_roll(&mut player, &catalog, &city, &config, 0.03);
        assert_eq!(outcome, InspectionOutcome::Waved);
        assert_eq!(player.reputation(city.id), 0);
    }
}
