//! Modal choice prompts for road encounters and points of interest.
//!
//! A modal is plain data: each [`Choice`] carries an [`Effect`] describing
//! what happens, and [`apply`] is the single interpreter that mutates the
//! player. Nothing here captures state, so open modals can be inspected and
//! their effects tested in isolation.

mod poi;
mod road;

pub use poi::poi_modal;
pub use road::{EncounterKind, RoadEncounterEngine, RoadPhase, encounter_modal};

use arrayvec::ArrayVec;
use tracing::debug;

use crate::economy::{ItemCatalog, ItemId};
use crate::map::{City, PoiKind, TilePos};
use crate::rng::GameRng;
use crate::state::Player;

/// Most choices a single modal can offer.
pub const MAX_CHOICES: usize = 4;

/// What opened a modal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalSource {
    Road(EncounterKind),
    Poi { kind: PoiKind, tile: TilePos },
}

/// Side effect of picking a choice, with every parameter resolved up front.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Hand over gold, clamped to what the player has.
    Pay { amount: u32 },
    /// Escape, dropping up to `max_units` random cargo units.
    Flee { max_units: u32 },
    /// One weighted coin flip.
    Fight {
        win_chance: f64,
        loot: (u32, u32),
        drop_units: u32,
        fine: (u32, u32),
    },
    /// Avoid payment; the road stays quiet for at least `cooldown` seconds.
    Detour { cooldown: f64 },
    PushThrough { cooldown: f64, spoil_chance: f64 },
    Shelter { cost: u32 },
    Offering { cost: u32, reputation: i32 },
    Provision { cost: u32, item: ItemId, quantity: u32 },
    Rest { cooldown: f64 },
    Search {
        find_chance: f64,
        find: ItemId,
        trap_chance: f64,
        trap_fine: (u32, u32),
    },
    Leave,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Choice {
    pub label: String,
    pub effect: Effect,
}

/// Titled prompt with up to [`MAX_CHOICES`] selectable choices.
#[derive(Clone, Debug, PartialEq)]
pub struct EventModal {
    pub title: String,
    pub body: String,
    pub choices: ArrayVec<Choice, MAX_CHOICES>,
    pub selected: usize,
    pub source: ModalSource,
}

impl EventModal {
    pub fn new(source: ModalSource, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            choices: ArrayVec::new(),
            selected: 0,
            source,
        }
    }

    /// Appends a choice. Modals hold at most [`MAX_CHOICES`].
    pub fn with_choice(mut self, label: impl Into<String>, effect: Effect) -> Self {
        let pushed = self.choices.try_push(Choice {
            label: label.into(),
            effect,
        });
        debug_assert!(pushed.is_ok(), "modal '{}' exceeds {MAX_CHOICES} choices", self.title);
        self
    }

    pub fn select_next(&mut self) {
        if !self.choices.is_empty() {
            self.selected = (self.selected + 1) % self.choices.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.choices.is_empty() {
            self.selected = (self.selected + self.choices.len() - 1) % self.choices.len();
        }
    }

    pub fn selected_choice(&self) -> Option<&Choice> {
        self.choices.get(self.selected)
    }
}

/// Mutable world the effect interpreter operates on.
pub struct EffectContext<'a> {
    pub player: &'a mut Player,
    pub catalog: &'a ItemCatalog,
    pub cities: &'a [City],
    pub road: &'a mut RoadEncounterEngine,
    pub rng: &'a mut GameRng,
}

/// Outcome of applying an [`Effect`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub message: String,
    /// False when the choice was refused or declined; a point of interest
    /// stays available in that case.
    pub settled: bool,
}

impl Resolution {
    fn settled(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            settled: true,
        }
    }

    fn declined(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            settled: false,
        }
    }
}

/// Interprets `effect` against the context.
pub fn apply(effect: &Effect, ctx: &mut EffectContext<'_>) -> Resolution {
    let resolution = match *effect {
        Effect::Pay { amount } => {
            let paid = ctx.player.pay(amount);
            Resolution::settled(format!("You pay {paid}g and are left alone."))
        }
        Effect::Flee { max_units } => {
            let lost = ctx.player.inventory.drop_random(ctx.rng, max_units);
            if lost.is_empty() {
                Resolution::settled("You run with nothing to drop.")
            } else {
                Resolution::settled(format!(
                    "You escape, dropping {}.",
                    describe(ctx.catalog, &lost)
                ))
            }
        }
        Effect::Fight {
            win_chance,
            loot,
            drop_units,
            fine,
        } => {
            if ctx.rng.chance(win_chance) {
                let gold = ctx.rng.range(loot.0, loot.1);
                ctx.player.earn(gold);
                Resolution::settled(format!("You win the scuffle and take {gold}g."))
            } else {
                let lost = ctx.player.inventory.drop_random(ctx.rng, drop_units);
                let due = ctx.rng.range(fine.0, fine.1);
                let paid = ctx.player.pay(due);
                if lost.is_empty() {
                    Resolution::settled(format!("Beaten. They take {paid}g."))
                } else {
                    Resolution::settled(format!(
                        "Beaten. They take {paid}g and {}.",
                        describe(ctx.catalog, &lost)
                    ))
                }
            }
        }
        Effect::Detour { cooldown } => {
            ctx.road.extend_cooldown(cooldown);
            Resolution::settled("You take the long way around.")
        }
        Effect::PushThrough {
            cooldown,
            spoil_chance,
        } => {
            ctx.road.extend_cooldown(cooldown);
            let fragile: Vec<ItemId> = ctx
                .player
                .inventory
                .iter()
                .filter(|(id, _)| {
                    ctx.catalog
                        .get(*id)
                        .is_some_and(|def| def.category.is_fragile())
                })
                .map(|(id, _)| id)
                .collect();
            let spoiled = if ctx.rng.chance(spoil_chance) {
                ctx.rng.pick(&fragile).copied()
            } else {
                None
            };
            match spoiled {
                Some(item) => {
                    ctx.player.inventory.remove(item, 1);
                    Resolution::settled(format!("The storm ruins 1 {}.", ctx.catalog.name_of(item)))
                }
                None => Resolution::settled("You push through the storm unharmed."),
            }
        }
        Effect::Shelter { cost } => {
            let paid = ctx.player.pay(cost);
            Resolution::settled(format!("You pay {paid}g to wait out the storm."))
        }
        Effect::Offering { cost, reputation } => {
            if !ctx.player.can_afford(cost) {
                return Resolution::declined(format!("An offering costs {cost}g."));
            }
            ctx.player.pay(cost);
            for city in ctx.cities {
                ctx.player.adjust_reputation(city.id, reputation);
            }
            Resolution::settled("The shrine glows. Word of your piety spreads.")
        }
        Effect::Provision {
            cost,
            item,
            quantity,
        } => {
            let weight = ctx.catalog.get(item).map_or(0, |def| def.weight) * quantity;
            if ctx.player.cargo_weight(ctx.catalog) + weight > ctx.player.capacity {
                return Resolution::declined("No room for provisions.");
            }
            if !ctx.player.can_afford(cost) {
                return Resolution::declined(format!("Provisions cost {cost}g."));
            }
            ctx.player.pay(cost);
            ctx.player.inventory.add(item, quantity);
            Resolution::settled(format!(
                "You buy {quantity} {} for {cost}g.",
                ctx.catalog.name_of(item)
            ))
        }
        Effect::Rest { cooldown } => {
            ctx.road.extend_cooldown(cooldown);
            Resolution::settled("You rest by the fire. The road feels quieter.")
        }
        Effect::Search {
            find_chance,
            find,
            trap_chance,
            trap_fine,
        } => {
            let weight = ctx.catalog.get(find).map_or(0, |def| def.weight);
            let fits = ctx.player.cargo_weight(ctx.catalog) + weight <= ctx.player.capacity;
            if fits && ctx.rng.chance(find_chance) {
                ctx.player.inventory.add(find, 1);
                Resolution::settled(format!("Among the rubble: 1 {}.", ctx.catalog.name_of(find)))
            } else if ctx.rng.chance(trap_chance) {
                let due = ctx.rng.range(trap_fine.0, trap_fine.1);
                let paid = ctx.player.pay(due);
                Resolution::settled(format!("A trap! Patching up costs {paid}g."))
            } else {
                Resolution::settled("The ruins hold nothing of value.")
            }
        }
        Effect::Leave => Resolution::declined("You move on."),
    };

    debug!(?effect, message = %resolution.message, gold = ctx.player.gold(), "effect applied");
    resolution
}

fn describe(catalog: &ItemCatalog, lost: &[(ItemId, u32)]) -> String {
    lost.iter()
        .map(|(id, count)| format!("{count} {}", catalog.name_of(*id)))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerConfig;
    use crate::map::{CityId, CityRules, TileRect};
    use crate::state::Vec2;

    struct Fixture {
        player: Player,
        catalog: ItemCatalog,
        cities: Vec<City>,
        road: RoadEncounterEngine,
        rng: GameRng,
    }

    impl Fixture {
        fn new(seed: u64) -> Self {
            let cities = (0..2u16)
                .map(|idx| City {
                    id: CityId(idx),
                    key: format!("c{idx}"),
                    name: format!("C{idx}"),
                    bounds: TileRect::new(4 + i32::from(idx) * 20, 4, 6, 6),
                    gate_exit: TilePos::new(7 + i32::from(idx) * 20, 11),
                    market: [TilePos::new(5, 5), TilePos::new(6, 5)],
                    board: TilePos::new(8, 5),
                    rules: CityRules::default(),
                })
                .collect();
            Self {
                player: Player::new(Vec2::ZERO, &PlayerConfig::default()),
                catalog: ItemCatalog::default(),
                cities,
                road: RoadEncounterEngine::new(),
                rng: GameRng::new(seed),
            }
        }

        fn apply(&mut self, effect: Effect) -> Resolution {
            let mut ctx = EffectContext {
                player: &mut self.player,
                catalog: &self.catalog,
                cities: &self.cities,
                road: &mut self.road,
                rng: &mut self.rng,
            };
            apply(&effect, &mut ctx)
        }

        fn item(&self, key: &str) -> ItemId {
            self.catalog.find_by_key(key).unwrap()
        }
    }

    #[test]
    fn payments_clamp_to_available_gold() {
        let mut fx = Fixture::new(1);
        fx.player.pay(110);
        let res = fx.apply(Effect::Pay { amount: 25 });
        assert!(res.settled);
        assert_eq!(fx.player.gold(), 0);
        fx.apply(Effect::Shelter { cost: 10 });
        assert_eq!(fx.player.gold(), 0);
    }

    #[test]
    fn flee_drops_at_most_three_units() {
        let mut fx = Fixture::new(2);
        let grain = fx.item("grain");
        fx.player.inventory.add(grain, 5);
        fx.apply(Effect::Flee { max_units: 3 });
        assert_eq!(fx.player.inventory.count(grain), 2);

        let mut empty = Fixture::new(2);
        let res = empty.apply(Effect::Flee { max_units: 3 });
        assert!(res.settled);
        assert!(empty.player.inventory.is_empty());
    }

    #[test]
    fn fight_outcomes_respect_ranges() {
        for seed in 0..64 {
            let mut fx = Fixture::new(seed);
            let cloth = fx.item("cloth");
            fx.player.inventory.add(cloth, 4);
            fx.apply(Effect::Fight {
                win_chance: 0.58,
                loot: (12, 40),
                drop_units: 2,
                fine: (8, 30),
            });
            let gold = fx.player.gold();
            let won = (132..=160).contains(&gold) && fx.player.inventory.count(cloth) == 4;
            let lost = (90..=112).contains(&gold) && fx.player.inventory.count(cloth) == 2;
            assert!(won || lost, "seed {seed}: gold {gold}");
        }
    }

    #[test]
    fn cooldown_effects_extend_but_never_shorten() {
        let mut fx = Fixture::new(3);
        fx.apply(Effect::Detour { cooldown: 24.0 });
        assert_eq!(fx.road.cooldown(), 24.0);
        fx.apply(Effect::PushThrough {
            cooldown: 14.0,
            spoil_chance: 0.0,
        });
        assert_eq!(fx.road.cooldown(), 24.0);
        fx.apply(Effect::Rest { cooldown: 30.0 });
        assert_eq!(fx.road.cooldown(), 30.0);
    }

    #[test]
    fn storm_spoils_only_fragile_goods() {
        let mut fx = Fixture::new(4);
        let grain = fx.item("grain");
        let spice = fx.item("spice");
        fx.player.inventory.add(grain, 3);
        fx.player.inventory.add(spice, 2);
        fx.apply(Effect::PushThrough {
            cooldown: 14.0,
            spoil_chance: 1.0,
        });
        assert_eq!(fx.player.inventory.count(grain), 3);
        assert_eq!(fx.player.inventory.count(spice), 1);
    }

    #[test]
    fn offering_needs_gold_and_reaches_every_city() {
        let mut fx = Fixture::new(5);
        let res = fx.apply(Effect::Offering {
            cost: 10,
            reputation: 1,
        });
        assert!(res.settled);
        assert_eq!(fx.player.gold(), 110);
        assert_eq!(fx.player.reputation(CityId(0)), 1);
        assert_eq!(fx.player.reputation(CityId(1)), 1);

        fx.player.pay(105);
        let res = fx.apply(Effect::Offering {
            cost: 10,
            reputation: 1,
        });
        assert!(!res.settled);
        assert_eq!(fx.player.gold(), 5);
    }

    #[test]
    fn provisions_respect_capacity() {
        let mut fx = Fixture::new(6);
        let grain = fx.item("grain");
        fx.player.capacity = 1;
        let res = fx.apply(Effect::Provision {
            cost: 9,
            item: grain,
            quantity: 1,
        });
        assert!(!res.settled);
        assert_eq!(fx.player.gold(), 120);

        fx.player.capacity = 18;
        assert!(fx.apply(Effect::Provision { cost: 9, item: grain, quantity: 1 }).settled);
        assert_eq!(fx.player.inventory.count(grain), 1);
        assert_eq!(fx.player.gold(), 111);
    }

    #[test]
    fn search_finds_or_springs_trap() {
        let mut fx = Fixture::new(7);
        let relic = fx.item("cursed_relic");
        fx.apply(Effect::Search {
            find_chance: 1.0,
            find: relic,
            trap_chance: 0.0,
            trap_fine: (5, 15),
        });
        assert_eq!(fx.player.inventory.count(relic), 1);

        fx.apply(Effect::Search {
            find_chance: 0.0,
            find: relic,
            trap_chance: 1.0,
            trap_fine: (5, 15),
        });
        assert!((105..=115).contains(&fx.player.gold()));
    }

    #[test]
    fn leave_is_declined() {
        let mut fx = Fixture::new(8);
        assert!(!fx.apply(Effect::Leave).settled);
    }

    #[test]
    fn selection_wraps() {
        let mut modal = EventModal::new(
            ModalSource::Road(EncounterKind::Toll),
            "Toll",
            "",
        )
        .with_choice("Pay", Effect::Pay { amount: 12 })
        .with_choice("Detour", Effect::Detour { cooldown: 24.0 });
        modal.select_prev();
        assert_eq!(modal.selected, 1);
        modal.select_next();
        assert_eq!(modal.selected, 0);
        assert_eq!(modal.selected_choice().map(|c| c.label.as_str()), Some("Pay"));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "exceeds 4 choices")]
    fn extra_choice_is_caught() {
        let source = ModalSource::Road(EncounterKind::Bandits);
        let _ = (0..=MAX_CHOICES).fold(EventModal::new(source, "Crowded", ""), |modal, idx| {
            modal.with_choice(format!("Choice {idx}"), Effect::Leave)
        });
    }
}
