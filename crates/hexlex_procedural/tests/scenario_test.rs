//! # Origin Scenario
//!
//! Seed 173, dimension `base/full`, supertile (0, 0): the first thing a new
//! session shows.

mod common;

use hexlex_procedural::supertile::{colors, DOMAIN_VOID};
use hexlex_procedural::GeneratorConfig;
use hexlex_shared::{GridPosition, SupergridPosition, SUPERTILE_CELLS};

const SEED: u32 = 173;
const KEY: &str = "base/full";

#[test]
fn test_origin_supertile_complete() {
    let mut world = common::world(SEED, GeneratorConfig::production());
    let origin = SupergridPosition::new(0, 0);
    let tile = common::generate(&mut world, KEY, origin);

    assert_eq!(tile.position, origin);
    assert_eq!(tile.filled_count(), SUPERTILE_CELLS);
    for (index, cell) in tile.cells.iter().enumerate() {
        assert!(cell.glyph().is_some(), "cell {index} blank");
        assert_ne!(cell.domain, DOMAIN_VOID, "cell {index} void");
        assert_ne!(cell.colors, 0, "cell {index} has no provenance");
    }
    assert!(tile.cells.iter().any(|c| c.has(colors::SOCKET)));
    assert_eq!(
        world.glyph_at(KEY, GridPosition::ORIGIN).unwrap(),
        tile.cell_at(GridPosition::ORIGIN).and_then(|c| c.glyph())
    );
}

#[test]
fn test_origin_supertile_repeatable() {
    let origin = SupergridPosition::new(0, 0);
    let first = common::generate(&mut common::world(SEED, GeneratorConfig::production()), KEY, origin);
    let second = common::generate(&mut common::world(SEED, GeneratorConfig::production()), KEY, origin);
    assert_eq!(first.as_bytes(), second.as_bytes());
    assert_eq!(first.as_bytes().len(), SUPERTILE_CELLS * 8);
}

#[test]
fn test_cache_settings_do_not_change_content() {
    let origin = SupergridPosition::new(0, 0);
    let production = common::generate(&mut common::world(SEED, GeneratorConfig::production()), KEY, origin);
    let small = GeneratorConfig {
        work_budget_per_tick: 1,
        context_cache_capacity: 2,
        ..GeneratorConfig::test()
    };
    let starved = common::generate(&mut common::world(SEED, small), KEY, origin);
    assert_eq!(*production, *starved);
}

#[test]
fn test_config_from_toml_matches_production() {
    let config = GeneratorConfig::from_toml_str("[retry]\ngive_up_after_ticks = 240\n").unwrap();
    assert_eq!(config, GeneratorConfig::production());
}
