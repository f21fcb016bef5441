//! # Finite Dimension Test
//!
//! Pocket and custom dimensions lay their words out once and every
//! supertile reads from that layout. Off the board the world is void.

mod common;

use hexlex_core::Seed;
use hexlex_procedural::pocket::build_layout;
use hexlex_procedural::supertile::{colors, DOMAIN_VOID};
use hexlex_procedural::{Dimension, GeneratorConfig, WorldManager};
use hexlex_shared::{GridPosition, SupergridPosition};

/// Loads every supertile overlapping the board of radius `radius`.
fn load_board(world: &mut WorldManager, key: &str, radius: i32) {
    for pos in GridPosition::within(radius) {
        let (tile, _) = SupergridPosition::locate(pos);
        world.request(key, tile).unwrap();
    }
    world.flush();
    assert_eq!(world.pending_request_count(), 0);
}

#[test]
fn test_custom_words_read_back_through_world() {
    let config = GeneratorConfig::test();
    let mut world = common::world(11, config.clone());
    let dimension = Dimension::custom("garden", "base", &["honeycomb", "lattice", "hexagon", "cell", "wax"]);
    let key = world.add_dimension(dimension.clone());
    assert_eq!(key, "garden/custom");

    let layout = build_layout(&dimension, common::lexicon().as_ref(), Seed::new(11), &config)
        .ready()
        .unwrap();
    assert!(!layout.placed().is_empty());
    load_board(&mut world, &key, layout.radius());

    for placed in layout.placed() {
        let read: String = placed
            .cells
            .iter()
            .map(|&pos| world.glyph_at(&key, pos).unwrap().unwrap())
            .collect();
        assert_eq!(read, placed.word.to_uppercase(), "{} reads back", placed.word);
    }

    for pos in GridPosition::within(layout.radius()) {
        let (tile, cell) = SupergridPosition::locate(pos);
        let tile = world.supertile(&key, tile).unwrap();
        let cell = tile.cell(cell);
        assert!(cell.glyph().is_some(), "board cell {pos:?} is blank");
        assert_ne!(cell.domain, DOMAIN_VOID);
        assert_eq!(cell.has(colors::POCKET), layout.glyph_at(pos).is_some());
    }
}

#[test]
fn test_void_outside_board() {
    let mut world = common::world(11, GeneratorConfig::test());
    let key = world.add_dimension(Dimension::custom("garden", "base", &["fern", "moss"]));

    let far = SupergridPosition::new(40, -40);
    let tile = common::generate(&mut world, &key, far);
    assert_eq!(tile.filled_count(), 0);
    assert!(tile.cells.iter().all(|c| c.domain == DOMAIN_VOID));
    assert_eq!(world.glyph_at(&key, far.center()).unwrap(), None);
}

#[test]
fn test_pocket_samples_natural_domain() {
    let config = GeneratorConfig::test();
    let mut world = common::world(3, config.clone());
    let dimension = Dimension::pocket("base", "base");
    let key = world.add_dimension(dimension.clone());
    assert_eq!(key, "base/pocket");

    let layout = build_layout(&dimension, common::lexicon().as_ref(), Seed::new(3), &config)
        .ready()
        .unwrap();
    assert!(!layout.placed().is_empty());
    assert!(layout.placed().len() + layout.unplaced().len() <= config.pocket_word_count);
    load_board(&mut world, &key, layout.radius());

    let first = &layout.placed()[0];
    let read: String = first
        .cells
        .iter()
        .map(|&pos| world.glyph_at(&key, pos).unwrap().unwrap())
        .collect();
    assert_eq!(read, first.word.to_uppercase());
}

#[test]
fn test_pocket_waits_for_domain() {
    let lexicon = std::sync::Arc::new(hexlex_lexicon::Lexicon::new());
    let mut world = WorldManager::new(Seed::new(3), GeneratorConfig::test(), std::sync::Arc::clone(&lexicon)).unwrap();
    let origin = SupergridPosition::new(0, 0);
    world.request("base/pocket", origin).unwrap();
    for _ in 0..3 {
        world.tick();
    }
    assert!(world.supertile("base/pocket", origin).is_none());
    assert_eq!(lexicon.requested(), vec!["base".to_owned()]);

    lexicon.insert_text("base", common::ENGLISH).unwrap();
    world.flush();
    assert!(world.supertile("base/pocket", origin).is_some());
}

#[test]
fn test_dimension_from_toml() {
    let dimension = Dimension::from_toml_str(
        "name = \"grove\"\ndomain = \"base\"\nmode = \"custom\"\nseed = 9\nwords = [\"oak\", \"elm\", \"ash\"]\n",
    )
    .unwrap();
    let mut world = common::world(1, GeneratorConfig::test());
    let key = world.add_dimension(dimension);
    let center = common::generate(&mut world, &key, SupergridPosition::new(0, 0));
    assert!(center.cells.iter().any(|c| c.has(colors::POCKET)));
}
