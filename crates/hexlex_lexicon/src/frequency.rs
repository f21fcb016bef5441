//! # Binned Cumulative Frequency Table
//!
//! Maps an occurrence index `n < total_frequency` to the entry holding the
//! `n`-th raw occurrence, without one slot per occurrence.
//!
//! Entries arrive sorted by descending frequency. Entries whose frequency
//! is below [`FREQUENCY_BINS`] share a bin per frequency value; inside a bin
//! every entry has the same weight, so the lookup is one division. Entries
//! at or above the bin count form the aggregate bin, which keeps a compact
//! cumulative array over its own entries only.
//!
//! ```text
//! occurrences: [ aggregate (binary search) | bin 63 | bin 62 | ... | bin 1 ]
//! ```

/// Number of frequency bins, including the aggregate bin.
pub const FREQUENCY_BINS: usize = 64;

/// Entries of one uniform bin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Bin {
    /// First entry index.
    first: u32,
    /// Number of entries.
    count: u32,
    /// Occurrence index at which the bin starts.
    start: u64,
}

/// Frequency-weighted entry lookup.
#[derive(Clone, Debug)]
pub struct FrequencyTable {
    /// Running totals over the aggregate bin, one per entry.
    aggregate: Vec<u64>,
    /// Uniform bins, indexed by frequency. Index 0 is unused.
    bins: [Bin; FREQUENCY_BINS],
    /// Total occurrences.
    total: u64,
    /// Number of entries.
    entries: u32,
}

impl FrequencyTable {
    /// Builds the table from frequencies sorted in descending order.
    ///
    /// Zero frequencies count as one occurrence.
    #[must_use]
    pub fn new(frequencies: &[u64]) -> Self {
        debug_assert!(
            frequencies.windows(2).all(|w| w[0] >= w[1]),
            "frequencies must be sorted descending"
        );

        let mut aggregate = Vec::new();
        let mut bins = [Bin::default(); FREQUENCY_BINS];
        let mut total = 0u64;

        for (index, &raw) in frequencies.iter().enumerate() {
            let freq = raw.max(1);
            if freq >= FREQUENCY_BINS as u64 {
                total = total.saturating_add(freq);
                aggregate.push(total);
                continue;
            }
            let bin = &mut bins[freq as usize];
            if bin.count == 0 {
                bin.first = index as u32;
                bin.start = total;
            }
            bin.count += 1;
            total = total.saturating_add(freq);
        }

        Self {
            aggregate,
            bins,
            total,
            entries: frequencies.len() as u32,
        }
    }

    /// Total occurrences across all entries.
    #[inline]
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Number of entries.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries as usize
    }

    /// Returns true if the table has no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Index of the entry holding occurrence `n`.
    ///
    /// An out-of-range `n` is reported on the diagnostics channel and
    /// resolves to the most frequent entry.
    #[must_use]
    pub fn entry_for(&self, n: u64) -> usize {
        let aggregate_total = self.aggregate.last().copied().unwrap_or(0);
        if n < aggregate_total {
            return self.aggregate.partition_point(|&end| end <= n);
        }

        for freq in (1..FREQUENCY_BINS).rev() {
            let bin = self.bins[freq];
            if bin.count == 0 {
                continue;
            }
            let end = bin.start.saturating_add(u64::from(bin.count) * freq as u64);
            if n < end {
                return bin.first as usize + ((n - bin.start) / freq as u64) as usize;
            }
        }

        tracing::warn!(
            target: "hexlex::diagnostics",
            occurrence = n,
            total = self.total,
            "frequency scan ran past its bound; using most frequent entry"
        );
        0
    }
}
