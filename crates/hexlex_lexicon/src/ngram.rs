//! # Glyph N-grams
//!
//! Unigram, bigram and trigram glyph tables for Markov infill, weighted by
//! word frequency. Tables are sorted by glyph so sampling never depends on
//! hash order.

use std::collections::{BTreeMap, HashMap};

use hexlex_core::bitmix;

/// A weighted glyph distribution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphWeights {
    glyphs: Vec<char>,
    /// Running weight totals, parallel to `glyphs`.
    cumulative: Vec<u64>,
}

impl GlyphWeights {
    fn from_counts(counts: BTreeMap<char, u64>) -> Self {
        let mut glyphs = Vec::with_capacity(counts.len());
        let mut cumulative = Vec::with_capacity(counts.len());
        let mut total = 0u64;
        for (glyph, count) in counts {
            total = total.saturating_add(count);
            glyphs.push(glyph);
            cumulative.push(total);
        }
        Self { glyphs, cumulative }
    }

    /// Total weight.
    #[inline]
    #[must_use]
    pub fn total(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// Number of distinct glyphs.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Returns true if no glyph has weight.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Samples a glyph from a 32-bit random value.
    #[must_use]
    pub fn sample(&self, random: u32) -> Option<char> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let target = bitmix::scale(random, total);
        let index = self.cumulative.partition_point(|&end| end <= target);
        self.glyphs.get(index).copied()
    }
}

/// Adds `weight` to a count, saturating.
fn add(count: &mut u64, weight: u64) {
    *count = count.saturating_add(weight);
}

/// Glyph adjacency statistics of one domain.
#[derive(Clone, Debug, Default)]
pub struct NgramTables {
    unigrams: GlyphWeights,
    bigrams: HashMap<char, GlyphWeights>,
    trigrams: HashMap<(char, char), GlyphWeights>,
}

impl NgramTables {
    /// Counts n-grams over `(glyphs, weight)` pairs.
    pub fn build<'a>(words: impl IntoIterator<Item = (&'a [char], u64)>) -> Self {
        let mut unigrams: BTreeMap<char, u64> = BTreeMap::new();
        let mut bigrams: BTreeMap<char, BTreeMap<char, u64>> = BTreeMap::new();
        let mut trigrams: BTreeMap<(char, char), BTreeMap<char, u64>> = BTreeMap::new();

        for (glyphs, weight) in words {
            let weight = weight.max(1);
            for (i, &g) in glyphs.iter().enumerate() {
                add(unigrams.entry(g).or_default(), weight);
                if i >= 1 {
                    add(bigrams.entry(glyphs[i - 1]).or_default().entry(g).or_default(), weight);
                }
                if i >= 2 {
                    let counts = trigrams.entry((glyphs[i - 2], glyphs[i - 1])).or_default();
                    add(counts.entry(g).or_default(), weight);
                }
            }
        }

        Self {
            unigrams: GlyphWeights::from_counts(unigrams),
            bigrams: bigrams
                .into_iter()
                .map(|(k, v)| (k, GlyphWeights::from_counts(v)))
                .collect(),
            trigrams: trigrams
                .into_iter()
                .map(|(k, v)| (k, GlyphWeights::from_counts(v)))
                .collect(),
        }
    }

    /// Overall glyph distribution.
    #[inline]
    #[must_use]
    pub fn unigrams(&self) -> &GlyphWeights {
        &self.unigrams
    }

    /// Distribution of glyphs following `prev`.
    #[inline]
    #[must_use]
    pub fn after(&self, prev: char) -> Option<&GlyphWeights> {
        self.bigrams.get(&prev)
    }

    /// Distribution of glyphs following `first, second`.
    #[inline]
    #[must_use]
    pub fn after_pair(&self, first: char, second: char) -> Option<&GlyphWeights> {
        self.trigrams.get(&(first, second))
    }

    /// Samples with the richest context available: trigram, then bigram,
    /// then unigram.
    ///
    /// `context` lists preceding glyphs nearest first.
    #[must_use]
    pub fn sample(&self, context: &[char], random: u32) -> Option<char> {
        if let [near, far, ..] = context {
            if let Some(glyph) = self.after_pair(*far, *near).and_then(|w| w.sample(random)) {
                return Some(glyph);
            }
        }
        if let Some(near) = context.first() {
            if let Some(glyph) = self.after(*near).and_then(|w| w.sample(random)) {
                return Some(glyph);
            }
        }
        self.unigrams.sample(random)
    }
}
