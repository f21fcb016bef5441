//! # Pocket Layouts
//!
//! A pocket or custom dimension is finite: a hexagon of grid cells around
//! the origin, seeded with a fixed word list laid out once and then read by
//! every supertile overlapping it.
//!
//! Words are placed longest first. Each word first tries to cross a glyph
//! already on the board (a random walk out from a matching cell, sharing
//! only equal glyphs), then tries a fresh start cell whose neighbors are
//! all empty. A word that finds no spot in either way is left out.
//!
//! The radius is the smallest that gives the words twice their glyph count
//! in cells.

use std::collections::{BTreeMap, HashSet};

use hexlex_core::{bitmix, Readiness, Seed};
use hexlex_lexicon::glyph::glyphs_of;
use hexlex_lexicon::{Domain, DomainSource};
use hexlex_shared::constants::{SOCKET_WORD_MAX, SOCKET_WORD_MIN};
use hexlex_shared::GridPosition;

use crate::config::GeneratorConfig;
use crate::dimension::{Dimension, GenerationMode};

const SALT_SAMPLE: u32 = 0x9C3E_0001;
const SALT_OVERLAP: u32 = 0x9C3E_0002;
const SALT_FRESH: u32 = 0x9C3E_0003;
const SALT_STEP: u32 = 0x9C3E_0004;

/// Draws per wanted word when sampling a pocket word list.
const SAMPLE_DRAWS_PER_WORD: usize = 8;

/// A word on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedWord {
    /// The word as listed.
    pub word: String,
    /// Cells in reading order.
    pub cells: Vec<GridPosition>,
}

/// Finite word layout of one dimension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PocketLayout {
    radius: i32,
    glyphs: BTreeMap<GridPosition, char>,
    placed: Vec<PlacedWord>,
    unplaced: Vec<String>,
}

impl PocketLayout {
    /// Lays out `words` under `seed`.
    #[must_use]
    pub fn compute<S: AsRef<str>>(words: &[S], seed: u32, config: &GeneratorConfig) -> Self {
        let mut words: Vec<(String, Vec<char>)> = words
            .iter()
            .map(|w| (w.as_ref().to_owned(), glyphs_of(w.as_ref())))
            .filter(|(_, glyphs)| !glyphs.is_empty())
            .collect();
        words.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.1.cmp(&b.1)));

        let total: usize = words.iter().map(|(_, g)| g.len()).sum();
        let mut layout = Self {
            radius: radius_for(total, config.pocket_min_radius),
            glyphs: BTreeMap::new(),
            placed: Vec::new(),
            unplaced: Vec::new(),
        };

        for (w, (word, glyphs)) in words.into_iter().enumerate() {
            let w = w as u32;
            let cells = layout
                .place_overlapping(&glyphs, w, seed, config.pocket_attempts)
                .or_else(|| layout.place_fresh(&glyphs, w, seed, config.pocket_attempts));
            match cells {
                Some(cells) => {
                    for (&cell, &glyph) in cells.iter().zip(&glyphs) {
                        layout.glyphs.insert(cell, glyph);
                    }
                    layout.placed.push(PlacedWord { word, cells });
                }
                None => {
                    tracing::debug!(target: "hexlex::procedural", word = %word, "pocket word left unplaced");
                    layout.unplaced.push(word);
                }
            }
        }
        layout
    }

    /// Hex radius of the finite board.
    #[inline]
    #[must_use]
    pub const fn radius(&self) -> i32 {
        self.radius
    }

    /// Returns true if `pos` lies on the board.
    #[inline]
    #[must_use]
    pub const fn contains(&self, pos: GridPosition) -> bool {
        pos.hex_len() <= self.radius
    }

    /// Layout glyph at `pos`, if a word covers it.
    #[must_use]
    pub fn glyph_at(&self, pos: GridPosition) -> Option<char> {
        self.glyphs.get(&pos).copied()
    }

    /// Words on the board, in placement order.
    #[inline]
    #[must_use]
    pub fn placed(&self) -> &[PlacedWord] {
        &self.placed
    }

    /// Words that found no spot.
    #[inline]
    #[must_use]
    pub fn unplaced(&self) -> &[String] {
        &self.unplaced
    }

    fn place_overlapping(&self, glyphs: &[char], w: u32, seed: u32, attempts: u32) -> Option<Vec<GridPosition>> {
        if self.glyphs.is_empty() {
            return None;
        }
        (0..attempts).find_map(|attempt| {
            let random = bitmix::mix3(w, attempt, SALT_OVERLAP, seed);
            let pivot = random as usize % glyphs.len();
            let matching: Vec<GridPosition> = self
                .glyphs
                .iter()
                .filter(|&(_, &g)| g == glyphs[pivot])
                .map(|(&pos, _)| pos)
                .collect();
            if matching.is_empty() {
                return None;
            }
            let start = matching[bitmix::mix(random, seed) as usize % matching.len()];
            self.walk(glyphs, pivot, start, random)
        })
    }

    fn place_fresh(&self, glyphs: &[char], w: u32, seed: u32, attempts: u32) -> Option<Vec<GridPosition>> {
        let area = cell_count(self.radius);
        (0..attempts).find_map(|attempt| {
            let random = bitmix::mix3(w, attempt, SALT_FRESH, seed);
            let start = GridPosition::within(self.radius).nth(random as usize % area)?;
            let clear = !self.glyphs.contains_key(&start)
                && start.neighbors().iter().all(|n| !self.glyphs.contains_key(n));
            if clear {
                self.walk(glyphs, 0, start, random)
            } else {
                None
            }
        })
    }

    /// Random walk placing `glyphs` with `glyphs[pivot]` at `start`.
    fn walk(&self, glyphs: &[char], pivot: usize, start: GridPosition, random: u32) -> Option<Vec<GridPosition>> {
        let mut cells = vec![start; glyphs.len()];
        let usable = |pos: GridPosition, glyph: char, taken: &[GridPosition]| {
            self.contains(pos)
                && !taken.contains(&pos)
                && self.glyph_at(pos).map_or(true, |g| g == glyph)
        };
        let step = |from: GridPosition, i: usize, taken: &[GridPosition]| {
            let first = bitmix::mix2(i as u32, random, SALT_STEP) as usize % 6;
            (0..6)
                .map(|turn| from.neighbor(first + turn))
                .find(|&pos| usable(pos, glyphs[i], taken))
        };

        let mut taken = vec![start];
        for i in pivot + 1..glyphs.len() {
            let next = step(cells[i - 1], i, &taken)?;
            cells[i] = next;
            taken.push(next);
        }
        for i in (0..pivot).rev() {
            let next = step(cells[i + 1], i, &taken)?;
            cells[i] = next;
            taken.push(next);
        }
        Some(cells)
    }
}

/// Cells in a hexagon of `radius`.
const fn cell_count(radius: i32) -> usize {
    (3 * radius * radius + 3 * radius + 1) as usize
}

/// Smallest radius, at least `min`, whose hexagon holds twice `glyphs`.
fn radius_for(glyphs: usize, min: i32) -> i32 {
    let mut radius = min.max(1);
    while cell_count(radius) < 2 * glyphs {
        radius += 1;
    }
    radius
}

/// Words a pocket dimension lays out: distinct frequency-weighted draws of
/// socket-sized words from its natural domain.
#[must_use]
pub fn pocket_words(domain: &Domain, seed: u32, config: &GeneratorConfig) -> Vec<String> {
    let wanted = config.pocket_word_count;
    let mut seen = HashSet::new();
    let mut words = Vec::with_capacity(wanted);
    for draw in 0..wanted * SAMPLE_DRAWS_PER_WORD {
        if words.len() == wanted {
            break;
        }
        let index = domain.pick_weighted(bitmix::mix2(draw as u32, seed, SALT_SAMPLE));
        let Some(entry) = domain.entry(index) else {
            continue;
        };
        if (SOCKET_WORD_MIN..=SOCKET_WORD_MAX).contains(&entry.len()) && seen.insert(index) {
            words.push(entry.word.clone());
        }
    }
    words
}

/// Builds the layout of a finite dimension, or reports pending while its
/// natural domain is loading. A full dimension gets an empty layout.
pub fn build_layout<S: DomainSource + ?Sized>(
    dimension: &Dimension,
    source: &S,
    global: Seed,
    config: &GeneratorConfig,
) -> Readiness<PocketLayout> {
    let seed = dimension
        .generation_seed(global, config.dimension_seed_rounds)
        .value();
    match dimension.mode {
        GenerationMode::Pocket => source
            .lookup_domain(&dimension.domain)
            .map(|domain| PocketLayout::compute(&pocket_words(&domain, seed, config), seed, config)),
        GenerationMode::Custom => Readiness::Ready(PocketLayout::compute(&dimension.words, seed, config)),
        GenerationMode::Full => Readiness::Ready(PocketLayout::compute::<&str>(&[], seed, config)),
    }
}
