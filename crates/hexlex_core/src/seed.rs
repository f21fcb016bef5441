//! # Seeds
//!
//! The process-wide determinism root. A seed is combined with coordinates
//! through mixing and is never mutated.

use crate::bitmix;

/// Global generation seed.
///
/// All procedural content derives from this value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Seed(u32);

impl Seed {
    /// Creates a new seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Derives a sub-seed for a specific purpose.
    ///
    /// Distinct purposes give independent streams from one root.
    #[inline]
    #[must_use]
    pub const fn derive(self, purpose: u32) -> Self {
        Self(bitmix::mix(purpose, self.0))
    }

    /// Folds `other` into this seed through `rounds` mixing rounds.
    ///
    /// Used to give each dimension generation state that never collides with
    /// another dimension's, even under an identical global seed.
    #[must_use]
    pub const fn fold_in(self, other: u32, rounds: u32) -> Self {
        let mut state = self.0;
        let mut round = 0;
        while round < rounds {
            state = bitmix::mix2(state, other, state.rotate_left(round + 1) ^ round);
            round += 1;
        }
        Self(state)
    }
}

impl From<u32> for Seed {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// FNV-1a hash of a string, for folding names into seeds.
#[must_use]
pub fn hash_name(name: &str) -> u32 {
    let mut hash: u32 = 0x811C_9DC5;
    for byte in name.bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}
