//! Sorted prefix index over glyph sequences.

/// Existence and prefix lookup over a domain's glyph sequences.
#[derive(Clone, Debug, Default)]
pub struct PrefixIndex {
    sorted: Vec<Box<[char]>>,
}

impl PrefixIndex {
    /// Builds the index. Duplicates collapse.
    pub fn build<'a>(words: impl IntoIterator<Item = &'a [char]>) -> Self {
        let mut sorted: Vec<Box<[char]>> = words.into_iter().map(Box::from).collect();
        sorted.sort_unstable();
        sorted.dedup();
        Self { sorted }
    }

    /// Number of distinct sequences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Returns true if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Returns true if `glyphs` is a whole indexed sequence.
    #[must_use]
    pub fn contains(&self, glyphs: &[char]) -> bool {
        self.sorted
            .binary_search_by(|entry| entry.as_ref().cmp(glyphs))
            .is_ok()
    }

    /// Returns true if some indexed sequence starts with `prefix`.
    #[must_use]
    pub fn has_prefix(&self, prefix: &[char]) -> bool {
        let at = self.sorted.partition_point(|entry| entry.as_ref() < prefix);
        self.sorted
            .get(at)
            .is_some_and(|entry| entry.starts_with(prefix))
    }

    /// Number of indexed sequences starting with `prefix`.
    #[must_use]
    pub fn count_with_prefix(&self, prefix: &[char]) -> usize {
        let start = self.sorted.partition_point(|entry| entry.as_ref() < prefix);
        self.sorted[start..]
            .iter()
            .take_while(|entry| entry.starts_with(prefix))
            .count()
    }
}
