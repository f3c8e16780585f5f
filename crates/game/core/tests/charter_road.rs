//! End-to-end scenarios driven through `GameEngine::tick`.

use charter_core::{
    DeliveryOutcome, EncounterKind, GameConfig, GameEngine, GameState, InputState,
    InspectionOutcome, ItemCatalog, MapLayout, ModalSource, Panel, Pressed, TickEvent, TickReport,
    TileKind, TilePos, Vec2, movement,
};

const SEED: u64 = 0x5eed_c0de;

fn center_of(tile: TilePos, config: &GameConfig) -> Vec2 {
    let size = config.tile();
    Vec2::new(
        (f64::from(tile.x) + 0.5) * size,
        (f64::from(tile.y) + 0.5) * size,
    )
}

fn press(action: Pressed) -> InputState {
    InputState::default().with_pressed(action)
}

fn tick(state: &mut GameState, config: &GameConfig, input: InputState, dt: f64) -> TickReport {
    GameEngine::new(state, config).tick(&input, dt)
}

/// Sunspire with flat prices and guards that always search.
fn strict_layout() -> MapLayout {
    let mut layout = MapLayout::default();
    let rules = &mut layout.cities[0].rules;
    rules.price_multipliers.clear();
    rules.inspection_chance = 1.0;
    layout
}

#[test]
fn market_purchase_and_gate_search() {
    let config = GameConfig::default();
    let catalog = ItemCatalog::default();
    let relic = catalog.find_by_key("cursed_relic").unwrap();
    let lamp_oil = catalog.find_by_key("lamp_oil").unwrap();
    let mut state = GameState::new(&config, &strict_layout(), catalog, SEED).unwrap();
    let sunspire = state.cities()[0].id;
    state.player.inventory.add(relic, 1);

    // Step inside next to the market stalls and open the market.
    state.place_player(center_of(TilePos::new(22, 30), &config));
    let report = tick(&mut state, &config, press(Pressed::INTERACT), 0.0);

    assert!(report.entered(sunspire));
    match report.inspection() {
        Some(InspectionOutcome::Confiscated {
            units,
            fine,
            paid,
            reputation,
            ..
        }) => {
            assert_eq!(*units, 1);
            assert_eq!(*fine, 24);
            assert_eq!(*paid, 24);
            assert_eq!(*reputation, -3);
        }
        other => panic!("expected confiscation, got {other:?}"),
    }
    assert_eq!(state.player.gold(), 96);
    assert_eq!(state.player.reputation(sunspire), -3);
    assert_eq!(state.player.inventory.count(relic), 0);
    assert!(matches!(state.panel, Some(Panel::Market(_))));

    for _ in 0..5 {
        tick(&mut state, &config, press(Pressed::NAV_DOWN), 0.0);
    }
    let report = tick(&mut state, &config, press(Pressed::CONFIRM), 0.0);
    let bought = report.iter().any(|event| {
        matches!(event, TickEvent::Bought(p) if p.item == lamp_oil && p.price == 12)
    });
    assert!(bought);
    assert_eq!(state.player.gold(), 84);
    assert_eq!(state.player.inventory.count(lamp_oil), 1);
    assert!(state.panel.is_some(), "market stays open after a purchase");

    // Staying inside never triggers a second search.
    for _ in 0..10 {
        let report = tick(&mut state, &config, InputState::default(), 0.0);
        assert!(report.inspection().is_none());
    }

    let report = tick(&mut state, &config, press(Pressed::CANCEL), 0.0);
    assert!(report.iter().any(|event| matches!(event, TickEvent::PanelClosed)));
    assert!(state.panel.is_none());
}

#[test]
fn selling_withholds_city_tax() {
    let config = GameConfig::default();
    let catalog = ItemCatalog::default();
    let spice = catalog.find_by_key("spice").unwrap();
    let mut state = GameState::new(&config, &strict_layout(), catalog, SEED).unwrap();
    state.player.inventory.add(spice, 1);

    state.place_player(center_of(TilePos::new(22, 30), &config));
    tick(&mut state, &config, press(Pressed::INTERACT), 0.0);
    tick(&mut state, &config, press(Pressed::TOGGLE_MODE), 0.0);
    for _ in 0..3 {
        tick(&mut state, &config, press(Pressed::NAV_DOWN), 0.0);
    }
    let before = state.player.gold();
    let report = tick(&mut state, &config, press(Pressed::CONFIRM), 0.0);

    // 22g gross at 18% tax.
    assert!(
        report
            .iter()
            .any(|event| matches!(event, TickEvent::Sold(s) if s.gross == 22 && s.net == 18))
    );
    assert_eq!(state.player.gold(), before + 18);
    assert_eq!(state.player.inventory.count(spice), 0);

    let report = tick(&mut state, &config, press(Pressed::CONFIRM), 0.0);
    assert!(report.iter().any(|event| matches!(
        event,
        TickEvent::Rejected {
            code: "TRADE_NOTHING_TO_SELL",
            ..
        }
    )));
}

#[test]
fn open_panel_suspends_movement() {
    let config = GameConfig::default();
    let mut state =
        GameState::new(&config, &strict_layout(), ItemCatalog::default(), SEED).unwrap();
    state.place_player(center_of(TilePos::new(22, 30), &config));
    tick(&mut state, &config, press(Pressed::INTERACT), 0.0);
    assert!(state.modal_open());

    let start = state.player.pos;
    let held = InputState {
        right: true,
        down: true,
        ..InputState::default()
    };
    for _ in 0..10 {
        tick(&mut state, &config, held, 0.05);
    }
    assert_eq!(state.player.pos, start);
    assert_eq!(state.player.velocity, Vec2::ZERO);
}

#[test]
fn road_travel_triggers_an_encounter() {
    let config = GameConfig::default();
    let mut state =
        GameState::new(&config, &MapLayout::default(), ItemCatalog::default(), SEED).unwrap();
    let east = InputState {
        right: true,
        ..InputState::default()
    };

    let mut encounter = None;
    for _ in 0..200 {
        let report = tick(&mut state, &config, east, 0.05);
        if let Some(kind) = report.encounter() {
            encounter = Some(kind);
            break;
        }
    }
    let kind = encounter.expect("an encounter along the eastern road");
    assert!(EncounterKind::ALL.contains(&kind));
    assert_eq!(state.road.distance(), 0.0);
    assert_eq!(state.road.cooldown(), config.road.cooldown);
    match &state.panel {
        Some(Panel::Event(modal)) => assert_eq!(modal.source, ModalSource::Road(kind)),
        other => panic!("expected encounter modal, got {other:?}"),
    }

    let frozen = state.player.pos;
    tick(&mut state, &config, east, 0.05);
    assert_eq!(state.player.pos, frozen);

    // Walking away costs nothing.
    let gold = state.player.gold();
    let report = tick(&mut state, &config, press(Pressed::CANCEL), 0.0);
    assert!(report.iter().any(|event| matches!(event, TickEvent::PanelClosed)));
    assert_eq!(state.player.gold(), gold);
    assert!(state.panel.is_none());
}

#[test]
fn no_encounters_inside_cities() {
    let config = GameConfig::default();
    let mut state =
        GameState::new(&config, &MapLayout::default(), ItemCatalog::default(), SEED).unwrap();
    state.place_player(center_of(TilePos::new(20, 35), &config));

    // Pace back and forth along the city floor.
    for step in 0..600 {
        let input = InputState {
            right: (step / 60) % 2 == 0,
            left: (step / 60) % 2 == 1,
            ..InputState::default()
        };
        let report = tick(&mut state, &config, input, 0.05);
        assert!(report.encounter().is_none());
    }
    assert_eq!(state.road.distance(), 0.0);
}

#[test]
fn points_of_interest_are_one_shot() {
    let config = GameConfig::default();
    let mut state =
        GameState::new(&config, &MapLayout::default(), ItemCatalog::default(), SEED).unwrap();

    let shrine = state
        .map()
        .positions_of(TileKind::Shrine)
        .next()
        .expect("generated shrine");
    let radius = config.player.radius;
    let stand = [(0, 1), (0, -1), (1, 0), (-1, 0), (1, 1), (-1, -1), (1, -1), (-1, 1)]
        .into_iter()
        .map(|(dx, dy)| shrine.offset(dx, dy))
        .find(|pos| {
            state.map().get(*pos).is_some_and(|kind| kind.poi().is_none())
                && !movement::blocked(state.map(), center_of(*pos, &config), radius, config.tile())
        })
        .expect("walkable tile beside the shrine");
    state.place_player(center_of(stand, &config));

    let report = tick(&mut state, &config, press(Pressed::INTERACT), 0.0);
    assert!(report.iter().any(|event| matches!(
        event,
        TickEvent::PoiOpened { tile, .. } if *tile == shrine
    )));

    let report = tick(&mut state, &config, press(Pressed::CONFIRM), 0.0);
    let settled = report.iter().any(|event| matches!(
        event,
        TickEvent::ChoiceResolved { resolution, .. } if resolution.settled
    ));
    assert!(settled);
    assert_eq!(state.player.gold(), 110);
    assert!(state.spent_pois.contains(&shrine));

    let report = tick(&mut state, &config, press(Pressed::INTERACT), 0.0);
    assert!(state.panel.is_none());
    assert!(!report.iter().any(|event| matches!(event, TickEvent::PoiOpened { .. })));
    let toast = state.toast.as_ref().map(|toast| toast.text.as_str());
    assert_eq!(toast, Some("The shrine has nothing more to offer."));
}

#[test]
fn contract_accepted_on_board_and_delivered_on_arrival() {
    let config = GameConfig::default();
    let mut layout = MapLayout::default();
    layout.cities[1].rules.inspection_chance = 0.0;
    let mut state = GameState::new(&config, &layout, ItemCatalog::default(), SEED).unwrap();
    let gloomwharf = state.cities()[1].id;

    let board = state.cities()[0].board;
    state.place_player(center_of(board.offset(0, 1), &config));
    let report = tick(&mut state, &config, press(Pressed::INTERACT), 0.0);
    assert!(report.iter().any(|event| matches!(event, TickEvent::BoardOpened(_))));

    let report = tick(&mut state, &config, press(Pressed::CONFIRM), 0.0);
    assert!(report.iter().any(|event| matches!(event, TickEvent::ContractAccepted(_))));
    assert!(state.panel.is_none());
    let contract = state.contracts.active().cloned().expect("active contract");
    assert_eq!(contract.to, gloomwharf);

    // Arriving short keeps the contract open.
    state.place_player(center_of(TilePos::new(100, 60), &config));
    let report = tick(&mut state, &config, InputState::default(), 0.0);
    assert!(report.iter().any(|event| matches!(
        event,
        TickEvent::Delivery {
            outcome: DeliveryOutcome::Insufficient { held: 0, .. },
            ..
        }
    )));
    assert!(state.contracts.active().is_some());

    // Leave, stock up, and come back.
    state.place_player(center_of(state.cities()[1].gate_exit, &config));
    tick(&mut state, &config, InputState::default(), 0.0);
    state.player.inventory.add(contract.item, contract.quantity);
    let gold = state.player.gold();

    state.place_player(center_of(TilePos::new(100, 60), &config));
    let report = tick(&mut state, &config, InputState::default(), 0.0);
    assert!(report.entered(gloomwharf));
    assert!(report.iter().any(|event| matches!(
        event,
        TickEvent::Delivery {
            outcome: DeliveryOutcome::Delivered { .. },
            ..
        }
    )));
    assert_eq!(state.player.gold(), gold + contract.reward);
    assert_eq!(state.player.inventory.count(contract.item), 0);
    assert_eq!(
        state.player.reputation(gloomwharf),
        config.contracts.delivery_reputation
    );
    assert!(state.contracts.active().is_none());
}

#[test]
fn identical_seed_and_input_replay_identically() {
    let config = GameConfig::default();
    let run = || {
        let mut state =
            GameState::new(&config, &MapLayout::default(), ItemCatalog::default(), SEED).unwrap();
        let mut events = Vec::new();
        for step in 0..400 {
            let mut input = InputState {
                right: true,
                ..InputState::default()
            };
            if state.modal_open() && step % 7 == 0 {
                input = input.with_pressed(Pressed::CONFIRM);
            }
            events.extend(tick(&mut state, &config, input, 0.05).events);
        }
        (state.map().digest(), state.player.pos, state.player.gold(), events)
    };

    let first = run();
    let second = run();
    assert_eq!(first.0, second.0);
    assert_eq!(first.1, second.1);
    assert_eq!(first.2, second.2);
    assert_eq!(first.3, second.3);
}
