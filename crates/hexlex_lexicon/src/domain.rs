//! # Word Domains
//!
//! A domain is one named word list: entries sorted by descending frequency,
//! plus the derived tables the generator samples from.
//!
//! ## Frequency list format
//!
//! ```text
//! # comment
//! hexagon 120
//! honeycomb 45
//! lattice          # no count: one occurrence
//! ```

use std::cmp::Reverse;
use std::collections::HashMap;

use hexlex_core::bitmix;

use crate::error::{LexiconError, LexiconResult};
use crate::frequency::FrequencyTable;
use crate::glyph::glyphs_of;
use crate::ngram::NgramTables;
use crate::prefix::PrefixIndex;

/// One word of a domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Glyphs drawn into cells.
    pub glyphs: Box<[char]>,
    /// The word as written in the source list.
    pub word: String,
    /// Corpus frequency.
    pub frequency: u64,
}

impl Entry {
    /// Creates an entry, deriving glyphs from the word.
    #[must_use]
    pub fn new(word: &str, frequency: u64) -> Self {
        Self {
            glyphs: glyphs_of(word).into_boxed_slice(),
            word: word.to_owned(),
            frequency,
        }
    }

    /// Number of glyphs.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Returns true if the entry has no glyphs.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// A searchable word domain.
#[derive(Debug)]
pub struct Domain {
    name: String,
    entries: Vec<Entry>,
    frequency: FrequencyTable,
    prefixes: PrefixIndex,
    ngrams: NgramTables,
    /// Entry indices grouped by glyph count.
    by_length: Vec<Vec<u32>>,
}

impl Domain {
    /// Builds a domain from raw entries.
    ///
    /// Entries with the same glyphs merge, summing frequencies and keeping
    /// the spelling of the first. Entries without glyphs are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError::EmptyDomain`] if nothing usable remains.
    pub fn new(name: &str, entries: Vec<Entry>) -> LexiconResult<Self> {
        let mut merged: Vec<Entry> = Vec::with_capacity(entries.len());
        let mut seen: HashMap<Box<[char]>, usize> = HashMap::with_capacity(entries.len());
        for entry in entries {
            if entry.is_empty() {
                continue;
            }
            if let Some(&at) = seen.get(&entry.glyphs) {
                merged[at].frequency = merged[at].frequency.saturating_add(entry.frequency);
            } else {
                seen.insert(entry.glyphs.clone(), merged.len());
                merged.push(entry);
            }
        }
        if merged.is_empty() {
            return Err(LexiconError::EmptyDomain(name.to_owned()));
        }

        merged.sort_by(|a, b| {
            (Reverse(a.frequency), &a.glyphs).cmp(&(Reverse(b.frequency), &b.glyphs))
        });

        let frequencies: Vec<u64> = merged.iter().map(|e| e.frequency).collect();
        let frequency = FrequencyTable::new(&frequencies);
        let prefixes = PrefixIndex::build(merged.iter().map(|e| &*e.glyphs));
        let ngrams = NgramTables::build(merged.iter().map(|e| (&*e.glyphs, e.frequency)));

        let longest = merged.iter().map(Entry::len).max().unwrap_or(0);
        let mut by_length = vec![Vec::new(); longest + 1];
        for (index, entry) in merged.iter().enumerate() {
            by_length[entry.len()].push(index as u32);
        }

        tracing::debug!(
            target: "hexlex::lexicon",
            domain = name,
            entries = merged.len(),
            occurrences = frequency.total(),
            "domain built"
        );

        Ok(Self {
            name: name.to_owned(),
            entries: merged,
            frequency,
            prefixes,
            ngrams,
            by_length,
        })
    }

    /// Parses a frequency list.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError::Parse`] for a negative or malformed count or
    /// a word without glyphs, and [`LexiconError::EmptyDomain`] if the list
    /// has no words.
    pub fn parse(name: &str, text: &str) -> LexiconResult<Self> {
        let mut entries = Vec::new();
        for (number, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let parse_error = |reason: &str| LexiconError::Parse {
                domain: name.to_owned(),
                line: number + 1,
                reason: reason.to_owned(),
            };

            let (word, frequency) = match line.rsplit_once(char::is_whitespace) {
                Some((word, count)) if looks_numeric(count) => {
                    let frequency = count
                        .parse::<u64>()
                        .map_err(|_| parse_error("count is not a non-negative integer"))?;
                    (word.trim(), frequency)
                }
                _ => (line, 1),
            };

            let entry = Entry::new(word, frequency);
            if entry.is_empty() {
                return Err(parse_error("word has no glyphs"));
            }
            entries.push(entry);
        }
        Self::new(name, entries)
    }

    /// Builds a domain from bare words, one occurrence each.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError::EmptyDomain`] if no word has glyphs.
    pub fn from_words<S: AsRef<str>>(name: &str, words: &[S]) -> LexiconResult<Self> {
        Self::new(name, words.iter().map(|w| Entry::new(w.as_ref(), 1)).collect())
    }

    /// Merges several domains into one logical domain.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError::EmptyDomain`] if every part is empty.
    pub fn combine(name: &str, parts: &[&Self]) -> LexiconResult<Self> {
        let entries = parts
            .iter()
            .flat_map(|part| part.entries.iter().cloned())
            .collect();
        Self::new(name, entries)
    }

    /// Domain name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of distinct entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: empty domains are rejected at construction.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries, most frequent first.
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entry at `index`, if any.
    #[inline]
    #[must_use]
    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Sum of all frequencies (zero counts as one).
    #[inline]
    #[must_use]
    pub fn total_frequency(&self) -> u64 {
        self.frequency.total()
    }

    /// Index of the entry holding occurrence `n` of the corpus.
    #[inline]
    #[must_use]
    pub fn index_for_occurrence(&self, n: u64) -> usize {
        self.frequency.entry_for(n)
    }

    /// Frequency-weighted pick from a 32-bit random value.
    #[must_use]
    pub fn pick_weighted(&self, random: u32) -> usize {
        self.index_for_occurrence(bitmix::scale(random, self.total_frequency()))
    }

    /// Prefix index.
    #[inline]
    #[must_use]
    pub fn prefixes(&self) -> &PrefixIndex {
        &self.prefixes
    }

    /// Returns true if `glyphs` is a word of this domain.
    #[inline]
    #[must_use]
    pub fn contains(&self, glyphs: &[char]) -> bool {
        self.prefixes.contains(glyphs)
    }

    /// N-gram tables for Markov infill.
    #[inline]
    #[must_use]
    pub fn ngrams(&self) -> &NgramTables {
        &self.ngrams
    }

    /// Length of the longest entry.
    #[inline]
    #[must_use]
    pub fn longest(&self) -> usize {
        self.by_length.len().saturating_sub(1)
    }

    /// Entry indices with exactly `len` glyphs.
    #[must_use]
    pub fn with_length(&self, len: usize) -> &[u32] {
        self.by_length.get(len).map_or(&[][..], Vec::as_slice)
    }

    /// Number of entries with `min..=max` glyphs.
    #[must_use]
    pub fn count_in_length(&self, min: usize, max: usize) -> usize {
        (min..=max.min(self.longest()))
            .map(|len| self.with_length(len).len())
            .sum()
    }

    /// Uniform pick among entries with `min..=max` glyphs.
    ///
    /// Returns `None` when no entry fits.
    #[must_use]
    pub fn pick_in_length(&self, min: usize, max: usize, random: u32) -> Option<usize> {
        let count = self.count_in_length(min, max);
        if count == 0 {
            return None;
        }
        let mut k = bitmix::scale(random, count as u64) as usize;
        for len in min..=max.min(self.longest()) {
            let bucket = self.with_length(len);
            if k < bucket.len() {
                return Some(bucket[k] as usize);
            }
            k -= bucket.len();
        }
        None
    }

    /// Fraction of distinct entries with fewer than `len` glyphs.
    #[must_use]
    pub fn fraction_shorter_than(&self, len: usize) -> f64 {
        let shorter: usize = (0..len.min(self.by_length.len()))
            .map(|l| self.with_length(l).len())
            .sum();
        shorter as f64 / self.entries.len().max(1) as f64
    }
}

/// Returns true if a trailing token is meant as a count.
fn looks_numeric(token: &str) -> bool {
    let digits = token.strip_prefix(['-', '+']).unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
