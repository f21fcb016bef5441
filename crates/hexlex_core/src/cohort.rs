//! # Cohort Shuffle
//!
//! Seeded bijections over `[0, n)` computable one index at a time, in O(1),
//! without materialising an `n`-sized permutation table.
//!
//! [`shuffle`] composes a fixed sequence of small invertible permutation
//! primitives, each given `(index, n, seed + offset)`. [`unshuffle`] applies
//! their inverses in exactly reverse order:
//!
//! ```text
//! unshuffle(shuffle(i, n, s), n, s) == i
//! ```
//!
//! This is how the generator picks "pseudo-randomly, without repeats, from a
//! bounded range": ranked word sampling, object placement order, worm growth
//! order.
//!
//! ## Primitives
//!
//! | primitive    | effect                                              | inverse              |
//! |--------------|-----------------------------------------------------|----------------------|
//! | interleave   | folds the top half between the bottom half's items  | [`rev_interleave`]   |
//! | spin         | circular add modulo `n`                             | [`rev_spin`]         |
//! | upend        | reverses each seeded-size region                    | self                 |
//! | fold         | moves a seeded tail region into the middle          | [`rev_fold`]         |
//! | flop         | swaps seeded-size adjacent blocks                   | self                 |
//! | mix          | recursively spins even/odd sub-sequences            | [`rev_mix`]          |
//! | spread       | scatters across a seeded number of regions         | [`rev_spread`]       |

use crate::bitmix;

/// Salt for deriving the spin amount.
const SPIN_SALT: u32 = 0x5EED_0001;
/// Salt for deriving the upend region size.
const UPEND_SALT: u32 = 0x5EED_0002;
/// Salt for deriving the fold cut.
const FOLD_SALT: u32 = 0x5EED_0003;
/// Salt for deriving the flop block size.
const FLOP_SALT: u32 = 0x5EED_0004;
/// Salt for deriving the sub-sequence seeds of [`mix`].
const MIX_SALT: u32 = 0x5EED_0005;
/// Salt for deriving the spread region count.
const SPREAD_SALT: u32 = 0x5EED_0006;

/// Recursion depth of [`mix`]: residue classes modulo `2^depth` are spun
/// independently.
const MIX_DEPTH: u32 = 3;

/// Seeded parameter in `[0, bound)`; `bound` must be nonzero.
#[inline]
const fn parameter(seed: u32, salt: u32, bound: u32) -> u32 {
    bitmix::mix(seed, salt) % bound
}

/// Folds the top half of the cohort between the bottom half's items.
///
/// `0, 1, 2, 3, 4` becomes `0, 4, 1, 3, 2` (read as output positions
/// `0, 2, 4, 3, 1`).
#[inline]
#[must_use]
pub const fn interleave(index: u32, n: u32) -> u32 {
    if index < n - n / 2 {
        index * 2
    } else {
        (n - 1 - index) * 2 + 1
    }
}

/// Inverse of [`interleave`].
#[inline]
#[must_use]
pub const fn rev_interleave(index: u32, n: u32) -> u32 {
    if index % 2 == 0 {
        index / 2
    } else {
        n - 1 - index / 2
    }
}

/// Circular add of a seeded amount modulo `n`.
#[inline]
#[must_use]
pub const fn spin(index: u32, n: u32, seed: u32) -> u32 {
    let amount = parameter(seed, SPIN_SALT, n);
    ((index as u64 + amount as u64) % n as u64) as u32
}

/// Inverse of [`spin`].
#[inline]
#[must_use]
pub const fn rev_spin(index: u32, n: u32, seed: u32) -> u32 {
    let amount = parameter(seed, SPIN_SALT, n);
    ((index as u64 + n as u64 - amount as u64) % n as u64) as u32
}

/// Reverses the order within consecutive regions of seeded size; the last
/// region may be shorter.
///
/// Self-inverse.
#[inline]
#[must_use]
pub const fn upend(index: u32, n: u32, seed: u32) -> u32 {
    if n < 2 {
        return index;
    }
    let size = 2 + parameter(seed, UPEND_SALT, n / 2);
    let start = (index / size) * size;
    let end = if start as u64 + size as u64 > n as u64 {
        n
    } else {
        start + size
    };
    start + (end - 1 - index)
}

/// Moves a seeded tail region into the middle of the head region.
///
/// With cut `c`, head `[0, c)` is split at `c / 2` and the tail `[c, n)` is
/// inserted there.
#[inline]
#[must_use]
pub const fn fold(index: u32, n: u32, seed: u32) -> u32 {
    let cut = 1 + parameter(seed, FOLD_SALT, n);
    let tail = n - cut;
    let half = cut / 2;
    if index < half {
        index
    } else if index < cut {
        index + tail
    } else {
        half + (index - cut)
    }
}

/// Inverse of [`fold`].
#[inline]
#[must_use]
pub const fn rev_fold(index: u32, n: u32, seed: u32) -> u32 {
    let cut = 1 + parameter(seed, FOLD_SALT, n);
    let tail = n - cut;
    let half = cut / 2;
    if index < half {
        index
    } else if index < half + tail {
        cut + (index - half)
    } else {
        index - tail
    }
}

/// Swaps each even block of seeded size with the block after it; a trailing
/// incomplete pair stays in place.
///
/// Self-inverse.
#[inline]
#[must_use]
pub const fn flop(index: u32, n: u32, seed: u32) -> u32 {
    if n < 2 {
        return index;
    }
    let block = 1 + parameter(seed, FLOP_SALT, n / 2);
    let pair = block as u64 * 2;
    let start = (index as u64 / pair) * pair;
    if start + pair > n as u64 {
        return index;
    }
    if (index as u64 - start) < block as u64 {
        index + block
    } else {
        index - block
    }
}

/// Seed for the even (`parity == 0`) or odd sub-sequence.
#[inline]
const fn sub_seed(seed: u32, parity: u32) -> u32 {
    bitmix::mix(seed, MIX_SALT.wrapping_add(parity))
}

/// Spins the even and odd sub-sequences independently, recursively.
#[must_use]
pub const fn mix(index: u32, n: u32, seed: u32) -> u32 {
    mix_level(index, n, seed, MIX_DEPTH)
}

const fn mix_level(index: u32, n: u32, seed: u32, depth: u32) -> u32 {
    if n < 2 {
        return index;
    }
    if depth == 0 {
        return spin(index, n, seed);
    }
    let parity = index % 2;
    let sub_n = if parity == 0 { n - n / 2 } else { n / 2 };
    let inner = mix_level(index / 2, sub_n, sub_seed(seed, parity), depth - 1);
    inner * 2 + parity
}

/// Inverse of [`mix`].
#[must_use]
pub const fn rev_mix(index: u32, n: u32, seed: u32) -> u32 {
    rev_mix_level(index, n, seed, MIX_DEPTH)
}

const fn rev_mix_level(index: u32, n: u32, seed: u32, depth: u32) -> u32 {
    if n < 2 {
        return index;
    }
    if depth == 0 {
        return rev_spin(index, n, seed);
    }
    let parity = index % 2;
    let sub_n = if parity == 0 { n - n / 2 } else { n / 2 };
    let inner = rev_mix_level(index / 2, sub_n, sub_seed(seed, parity), depth - 1);
    inner * 2 + parity
}

/// Deals items round-robin across a seeded number of regions. Items past the
/// last full round stay in place.
#[inline]
#[must_use]
pub const fn spread(index: u32, n: u32, seed: u32) -> u32 {
    if n < 2 {
        return index;
    }
    let regions = 2 + parameter(seed, SPREAD_SALT, n / 2);
    let per_region = n / regions;
    let dealt = per_region * regions;
    if index >= dealt {
        return index;
    }
    (index % regions) * per_region + index / regions
}

/// Inverse of [`spread`].
#[inline]
#[must_use]
pub const fn rev_spread(index: u32, n: u32, seed: u32) -> u32 {
    if n < 2 {
        return index;
    }
    let regions = 2 + parameter(seed, SPREAD_SALT, n / 2);
    let per_region = n / regions;
    let dealt = per_region * regions;
    if index >= dealt {
        return index;
    }
    (index % per_region) * regions + index / per_region
}

/// Seeded bijection `[0, n) -> [0, n)`.
///
/// # Panics
///
/// Panics if `n == 0` (there is nothing to shuffle) or, in debug builds, if
/// `index >= n`.
#[must_use]
pub fn shuffle(index: u32, n: u32, seed: u32) -> u32 {
    assert!(n > 0, "cohort size must be nonzero");
    debug_assert!(index < n, "index {index} outside cohort of {n}");
    if n == 1 {
        return 0;
    }
    let mut r = index;
    r = spread(r, n, seed.wrapping_add(457));
    r = mix(r, n, seed.wrapping_add(811));
    r = interleave(r, n);
    r = flop(r, n, seed.wrapping_add(38));
    r = fold(r, n, seed.wrapping_add(1010));
    r = interleave(r, n);
    r = upend(r, n, seed.wrapping_add(2923));
    r = spin(r, n, seed.wrapping_add(19));
    r = fold(r, n, seed.wrapping_add(617));
    spread(r, n, seed.wrapping_add(1291))
}

/// Inverse of [`shuffle`]: `unshuffle(shuffle(i, n, s), n, s) == i`.
///
/// # Panics
///
/// Panics if `n == 0` or, in debug builds, if `index >= n`.
#[must_use]
pub fn unshuffle(index: u32, n: u32, seed: u32) -> u32 {
    assert!(n > 0, "cohort size must be nonzero");
    debug_assert!(index < n, "index {index} outside cohort of {n}");
    if n == 1 {
        return 0;
    }
    let mut r = index;
    r = rev_spread(r, n, seed.wrapping_add(1291));
    r = rev_fold(r, n, seed.wrapping_add(617));
    r = rev_spin(r, n, seed.wrapping_add(19));
    r = upend(r, n, seed.wrapping_add(2923));
    r = rev_interleave(r, n);
    r = rev_fold(r, n, seed.wrapping_add(1010));
    r = flop(r, n, seed.wrapping_add(38));
    r = rev_interleave(r, n);
    r = rev_mix(r, n, seed.wrapping_add(811));
    rev_spread(r, n, seed.wrapping_add(457))
}
