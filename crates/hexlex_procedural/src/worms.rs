//! # Worms
//!
//! After the sockets are filled, the remaining empty cells are split into
//! worms: simple paths grown from shuffled seed cells, extended at both
//! ends over unclaimed empty neighbors until blocked. Every empty cell ends
//! up in exactly one worm.
//!
//! Worms long enough are then filled greedily with dictionary words until
//! at most a target number of cells is left for Markov infill.

use std::collections::VecDeque;

use hexlex_core::{bitmix, cohort};
use hexlex_lexicon::Domain;
use hexlex_shared::constants::SOCKET_WORD_MIN;
use hexlex_shared::hex::local_neighbor;
use hexlex_shared::SUPERTILE_CELLS;

use crate::config::GeneratorConfig;
use crate::supertile::{colors, Cell, DOMAIN_NATURAL};

const SALT_GROWTH: u32 = 0x3043_0001;
const SALT_WORD: u32 = 0x3043_0002;
const SALT_ORIENT: u32 = 0x3043_0003;

/// Summary of one filling pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WormReport {
    /// Worms found.
    pub worms: usize,
    /// Words placed.
    pub words: usize,
    /// Cells still empty afterwards.
    pub empty: usize,
}

/// Partitions the `open` cells into worms, each a path of adjacent cells.
#[must_use]
pub fn find_worms(open: &[bool; SUPERTILE_CELLS], seed: u32) -> Vec<Vec<usize>> {
    let mut claimed = open.map(|o| !o);
    let mut worms = Vec::new();
    let n = SUPERTILE_CELLS as u32;
    for k in 0..n {
        let start = cohort::shuffle(k, n, seed) as usize;
        if claimed[start] {
            continue;
        }
        claimed[start] = true;
        let mut worm = VecDeque::from([start]);
        loop {
            let back = worm.back().copied().and_then(|end| grow(end, &mut claimed, seed));
            if let Some(cell) = back {
                worm.push_back(cell);
            }
            let front = worm.front().copied().and_then(|end| grow(end, &mut claimed, seed));
            if let Some(cell) = front {
                worm.push_front(cell);
            }
            if back.is_none() && front.is_none() {
                break;
            }
        }
        worms.push(worm.into());
    }
    worms
}

/// Claims an unclaimed neighbor of `end`, trying directions in a
/// cell-seeded order.
fn grow(end: usize, claimed: &mut [bool; SUPERTILE_CELLS], seed: u32) -> Option<usize> {
    let order = bitmix::mix(end as u32, seed ^ SALT_GROWTH);
    let cell = (0..6u32)
        .map(|j| cohort::shuffle(j, 6, order) as usize)
        .filter_map(|dir| local_neighbor(end, dir))
        .find(|&cell| !claimed[cell])?;
    claimed[cell] = true;
    Some(cell)
}

/// Shortest worm worth filling for `domain`.
///
/// Starts at the configured minimum and backs off while too many of the
/// domain's words are shorter than it, down to the floor.
#[must_use]
pub fn minimum_length(domain: &Domain, config: &GeneratorConfig) -> usize {
    let mut min = config.worm_min_length;
    while min > config.worm_min_floor && domain.fraction_shorter_than(min) > config.worm_short_fraction {
        min -= 1;
    }
    min
}

/// Fills worms among the empty cells of `cells` with words from `domain`.
pub fn fill_worms(
    cells: &mut [Cell; SUPERTILE_CELLS],
    domain: &Domain,
    seed: u32,
    config: &GeneratorConfig,
) -> WormReport {
    let open = cells.map(|c| c.is_empty());
    let mut report = WormReport {
        empty: open.iter().filter(|&&o| o).count(),
        ..WormReport::default()
    };
    if report.empty <= config.worm_target_empty {
        return report;
    }

    let worms = find_worms(&open, seed);
    report.worms = worms.len();
    let min = minimum_length(domain, config);

    for (w, worm) in worms.iter().enumerate() {
        if report.empty <= config.worm_target_empty {
            break;
        }
        if worm.len() < min {
            continue;
        }
        let mut at = 0;
        let mut placed = 0u32;
        while worm.len() - at >= SOCKET_WORD_MIN && report.empty > config.worm_target_empty {
            let room = worm.len() - at;
            let word_seed = bitmix::mix3(w as u32, placed, seed, SALT_WORD);
            let Some(entry) = pick_fitting(domain, room, word_seed, config) else {
                break;
            };
            let Some(entry) = domain.entry(entry) else {
                break;
            };
            let reversed = bitmix::mix(word_seed, SALT_ORIENT) & 1 == 1;
            let glyphs: Vec<char> = if reversed {
                entry.glyphs.iter().rev().copied().collect()
            } else {
                entry.glyphs.to_vec()
            };
            for (&cell, &glyph) in worm[at..].iter().zip(&glyphs) {
                cells[cell] = Cell::new(glyph, DOMAIN_NATURAL, colors::WORM);
            }
            at += glyphs.len();
            report.empty -= glyphs.len();
            report.words += 1;
            placed += 1;
        }
    }
    report
}

/// A frequency-weighted entry of `2..=room` glyphs, falling back to a
/// uniform pick by length.
fn pick_fitting(domain: &Domain, room: usize, seed: u32, config: &GeneratorConfig) -> Option<usize> {
    let fits = |index: usize| {
        domain
            .entry(index)
            .is_some_and(|e| (SOCKET_WORD_MIN..=room).contains(&e.len()))
    };
    (0..config.worm_word_attempts)
        .map(|attempt| domain.pick_weighted(bitmix::mix(attempt, seed)))
        .find(|&index| fits(index))
        .or_else(|| domain.pick_in_length(SOCKET_WORD_MIN, room, seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexlex_shared::hex::local_offset;

    fn domain() -> Domain {
        Domain::parse("w", "oak 40\nelm 30\nash 20\nfir 10\nbirch 8\nwillow 4\nhazel 3\n").unwrap()
    }

    #[test]
    fn test_worms_partition_open_cells() {
        let mut open = [true; SUPERTILE_CELLS];
        for i in (0..SUPERTILE_CELLS).step_by(7) {
            open[i] = false;
        }
        let worms = find_worms(&open, 99);
        let mut seen = [false; SUPERTILE_CELLS];
        for worm in &worms {
            for pair in worm.windows(2) {
                let step = local_offset(pair[1]) - local_offset(pair[0]);
                assert_eq!(step.hex_len(), 1, "worm cells must be adjacent");
            }
            for &cell in worm {
                assert!(open[cell]);
                assert!(!seen[cell], "cell {cell} in two worms");
                seen[cell] = true;
            }
        }
        assert_eq!(seen, open);
        assert_eq!(find_worms(&open, 99), worms);
    }

    #[test]
    fn test_minimum_backs_off() {
        let config = GeneratorConfig::default();
        // Most words here have three glyphs, so a minimum of four backs off.
        assert_eq!(minimum_length(&domain(), &config), 3);

        let long = Domain::parse("l", "lattice 1\nhexagon 1\nworld 1\n").unwrap();
        assert_eq!(minimum_length(&long, &config), 4);
    }

    #[test]
    fn test_fill_reaches_target() {
        let config = GeneratorConfig::default();
        let mut cells = [Cell::VOID; SUPERTILE_CELLS];
        let report = fill_worms(&mut cells, &domain(), 4, &config);
        assert!(report.words > 0);
        assert_eq!(report.empty, cells.iter().filter(|c| c.is_empty()).count());
        assert!(report.empty < SUPERTILE_CELLS);
        for cell in cells.iter().filter(|c| !c.is_empty()) {
            assert!(cell.has(colors::WORM));
            assert_eq!(cell.domain, DOMAIN_NATURAL);
        }
    }

    #[test]
    fn test_nothing_to_do_below_target() {
        let config = GeneratorConfig::default();
        let mut cells = [Cell::new('X', DOMAIN_NATURAL, colors::INFILL); SUPERTILE_CELLS];
        cells[0] = Cell::VOID;
        let report = fill_worms(&mut cells, &domain(), 4, &config);
        assert_eq!(report, WormReport { worms: 0, words: 0, empty: 1 });
    }
}
