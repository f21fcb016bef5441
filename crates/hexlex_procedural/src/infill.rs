//! # Markov Infill
//!
//! Fills every remaining empty cell one glyph at a time. A cell's context is
//! the line of filled cells leading up to it from one side: up to two
//! glyphs, nearest first, sampled with the domain's trigram, bigram or
//! unigram table, whichever the context supports.
//!
//! Cells are visited in shuffled order, so later cells see earlier filler.

use hexlex_core::{bitmix, cohort};
use hexlex_lexicon::Domain;
use hexlex_shared::hex::local_neighbor;
use hexlex_shared::SUPERTILE_CELLS;

use crate::supertile::{colors, Cell, DOMAIN_NATURAL};

const SALT_ORDER: u32 = 0x1F11_0001;
const SALT_GLYPH: u32 = 0x1F11_0002;

/// Fills the empty cells of `cells` where `live` is set. Returns the number
/// of cells filled.
pub fn fill(
    cells: &mut [Cell; SUPERTILE_CELLS],
    live: &[bool; SUPERTILE_CELLS],
    domain: &Domain,
    seed: u32,
) -> usize {
    let n = SUPERTILE_CELLS as u32;
    let order_seed = seed ^ SALT_ORDER;
    let mut filled = 0;
    for k in 0..n {
        let index = cohort::shuffle(k, n, order_seed) as usize;
        if !live[index] || !cells[index].is_empty() {
            continue;
        }
        let random = bitmix::mix2(index as u32, k, seed ^ SALT_GLYPH);
        let context = context_of(cells, index, random);
        if let Some(glyph) = domain.ngrams().sample(&context, random) {
            let mut cell = Cell::new(glyph, DOMAIN_NATURAL, cells[index].colors | colors::INFILL);
            cell.object = cells[index].object;
            cells[index] = cell;
            filled += 1;
        }
    }
    filled
}

/// Richest line context around `index`, nearest glyph first.
///
/// Directions are scanned from a random start; the first direction with two
/// filled cells wins, else the first with one.
fn context_of(cells: &[Cell; SUPERTILE_CELLS], index: usize, random: u32) -> Vec<char> {
    let start = (random >> 16) as usize % 6;
    let mut best: Vec<char> = Vec::new();
    for turn in 0..6 {
        let dir = (start + turn) % 6;
        let Some(near) = local_neighbor(index, dir).and_then(|i| cells[i].glyph().map(|g| (i, g)))
        else {
            continue;
        };
        let far = local_neighbor(near.0, dir).and_then(|i| cells[i].glyph());
        match far {
            Some(far) => return vec![near.1, far],
            None if best.is_empty() => best = vec![near.1],
            None => {}
        }
    }
    best
}
