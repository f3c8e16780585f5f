//! The bundled data directory must load and reproduce the built-in defaults.

use std::fs;

use charter_content::{ContentFactory, bundled_data_dir};
use charter_core::{GameConfig, GameState, ItemCatalog, MapLayout};

#[test]
fn bundled_data_matches_builtin_defaults() {
    let content = ContentFactory::new(bundled_data_dir()).load_all().unwrap();

    assert_eq!(content.config, GameConfig::default());
    assert_eq!(content.layout, MapLayout::default());
    assert_eq!(content.catalog, ItemCatalog::default());
}

#[test]
fn bundled_world_generates_identically_to_default() {
    let content = ContentFactory::new(bundled_data_dir()).load_all().unwrap();
    let loaded = GameState::new(&content.config, &content.layout, content.catalog, 77).unwrap();
    let builtin = GameState::new(
        &GameConfig::default(),
        &MapLayout::default(),
        ItemCatalog::default(),
        77,
    )
    .unwrap();

    assert_eq!(loaded.map().digest(), builtin.map().digest());
}

#[test]
fn overridden_config_in_custom_directory() {
    let dir = tempfile::tempdir().unwrap();
    let bundled = bundled_data_dir();
    for file in [ContentFactory::ITEMS_FILE, ContentFactory::WORLD_FILE] {
        fs::copy(bundled.join(file), dir.path().join(file)).unwrap();
    }
    fs::write(
        dir.path().join(ContentFactory::CONFIG_FILE),
        "[player]\ngold = 500\ncapacity = 40\n",
    )
    .unwrap();

    let content = ContentFactory::new(dir.path()).load_all().unwrap();
    assert_eq!(content.config.player.gold, 500);
    assert_eq!(content.config.player.capacity, 40);
    assert_eq!(content.config.road, GameConfig::default().road);
}

#[test]
fn unknown_contract_candidate_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let bundled = bundled_data_dir();
    for file in [ContentFactory::ITEMS_FILE, ContentFactory::WORLD_FILE] {
        fs::copy(bundled.join(file), dir.path().join(file)).unwrap();
    }
    fs::write(
        dir.path().join(ContentFactory::CONFIG_FILE),
        "[contracts]\ncandidates = [\"grain\", \"dragon_egg\"]\n",
    )
    .unwrap();

    let err = ContentFactory::new(dir.path()).load_all().unwrap_err();
    assert!(format!("{err:#}").contains("dragon_egg"));
}

#[test]
fn malformed_world_reports_the_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(ContentFactory::WORLD_FILE), "(width: \"wide\")").unwrap();

    let err = ContentFactory::new(dir.path()).load_layout().unwrap_err();
    assert!(format!("{err:#}").contains(ContentFactory::WORLD_FILE));
}
