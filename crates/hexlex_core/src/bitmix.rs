//! # Bit Mixer
//!
//! Reversible 32-bit transforms and cheap pseudo-random state steps.
//!
//! Every primitive here is a bijection on `u32` (for a fixed parameter) with a
//! documented inverse, so [`mix`] can be undone exactly by [`unmix`]:
//!
//! ```text
//! unmix(mix(x, seed), seed) == x   for every x, seed
//! ```
//!
//! [`lfsr`] is the odd one out: it is a maximal-length linear-feedback shift
//! register step, used wherever only "the next pseudo-random state" is needed.
//! It is not meant to be inverted.
//!
//! ## Determinism Guarantee
//!
//! All arithmetic is modulo `2^32` and spelled out with `wrapping_*` /
//! `rotate_*`, so results are identical on every platform and build profile.

/// Width of every mixed value in bits.
pub const ID_BITS: u32 = 32;

/// Narrowest fold width. Must stay at or below half of [`ID_BITS`].
const FOLD_MIN: u32 = 8;

/// Widest fold width. Half of [`ID_BITS`] keeps the folded regions disjoint.
const FOLD_MAX: u32 = 16;

/// Bits inspected by [`scramble`] before it rotates.
const SCRAMBLE_TRIGGER: u32 = 0x8020_0003;

/// Where the trigger bits land after the one-bit rotation.
const SCRAMBLE_TRIGGER_AFTER: u32 = SCRAMBLE_TRIGGER.rotate_right(1);

/// Toggle applied by [`scramble`]; disjoint from [`SCRAMBLE_TRIGGER_AFTER`].
const SCRAMBLE_TOGGLE: u32 = 0x0304_0610;

/// Galois toggle mask for x^32 + x^22 + x^2 + x + 1.
pub const LFSR_MASK: u32 = 0x8020_0003;

/// First odd multiplier used by [`mix`].
const MIX_MULTIPLIER: u32 = 0x2C1B_3C6D;

/// Second odd multiplier used by [`mix`].
const MIX_MULTIPLIER_2: u32 = 0x297A_2D39;

/// Modular inverse of [`MIX_MULTIPLIER`].
const MIX_INVERSE: u32 = mul_inverse(MIX_MULTIPLIER);

/// Modular inverse of [`MIX_MULTIPLIER_2`].
const MIX_INVERSE_2: u32 = mul_inverse(MIX_MULTIPLIER_2);

/// Additive whitening constant (golden ratio bits).
const MIX_WHITENING: u32 = 0x9E37_79B9;

/// Seed offset separating the second input of [`mix2`].
const MIX2_OFFSET: u32 = 0x68E3_1DA4;

/// Seed offset separating the third input of [`mix3`].
const MIX3_OFFSET: u32 = 0xB529_7A4D;

/// `2^32` as a float, for converting states to unit deviates.
const TWO_POW_32: f64 = 4_294_967_296.0;

// The toggle must never touch the post-rotation trigger bits, or the inverse
// could not recognise whether the toggle was applied.
const _: () = assert!(SCRAMBLE_TOGGLE & SCRAMBLE_TRIGGER_AFTER == 0);
const _: () = assert!(MIX_MULTIPLIER.wrapping_mul(MIX_INVERSE) == 1);
const _: () = assert!(MIX_MULTIPLIER_2.wrapping_mul(MIX_INVERSE_2) == 1);

/// Multiplicative inverse of an odd number modulo `2^32` (Newton iteration).
const fn mul_inverse(m: u32) -> u32 {
    // m * m == 1 (mod 8) for odd m; each round doubles the correct low bits.
    let mut inv = m;
    let mut round = 0;
    while round < 5 {
        inv = inv.wrapping_mul(2u32.wrapping_sub(m.wrapping_mul(inv)));
        round += 1;
    }
    inv
}

/// XORs the lowest `w` bits into the highest `w` bits, with `w` in `[8, 16]`
/// derived from `at`.
///
/// Self-inverse: `fold(fold(x, at), at) == x`.
#[inline]
#[must_use]
pub const fn fold(x: u32, at: u32) -> u32 {
    let width = FOLD_MIN + at % (FOLD_MAX - FOLD_MIN + 1);
    let lower = x & ((1u32 << width) - 1);
    x ^ (lower << (ID_BITS - width))
}

/// Swaps every pair of adjacent nibbles.
///
/// Self-inverse.
#[inline]
#[must_use]
pub const fn flop(x: u32) -> u32 {
    ((x & 0xF0F0_F0F0) >> 4) | ((x & 0x0F0F_0F0F) << 4)
}

/// Swaps every pair of adjacent bytes.
///
/// Self-inverse.
#[inline]
#[must_use]
pub const fn flop_bytes(x: u32) -> u32 {
    ((x & 0xFF00_FF00) >> 8) | ((x & 0x00FF_00FF) << 8)
}

/// Circular right shift by `1 + distance % 31`, so the shift is never a no-op.
///
/// Inverse: [`rev_swirl`] with the same `distance`.
#[inline]
#[must_use]
pub const fn swirl(x: u32, distance: u32) -> u32 {
    x.rotate_right(1 + distance % (ID_BITS - 1))
}

/// Inverse of [`swirl`].
#[inline]
#[must_use]
pub const fn rev_swirl(x: u32, distance: u32) -> u32 {
    x.rotate_left(1 + distance % (ID_BITS - 1))
}

/// Rotates right by one bit, then toggles a fixed pattern if any trigger bit
/// was set beforehand.
///
/// Inverse: [`unscramble`].
#[inline]
#[must_use]
pub const fn scramble(x: u32) -> u32 {
    let rotated = x.rotate_right(1);
    if x & SCRAMBLE_TRIGGER != 0 {
        rotated ^ SCRAMBLE_TOGGLE
    } else {
        rotated
    }
}

/// Inverse of [`scramble`].
///
/// The trigger bits sit where the rotation moved them, and the toggle never
/// touches them, so the condition can be read back from the output.
#[inline]
#[must_use]
pub const fn unscramble(x: u32) -> u32 {
    let untoggled = if x & SCRAMBLE_TRIGGER_AFTER != 0 {
        x ^ SCRAMBLE_TOGGLE
    } else {
        x
    };
    untoggled.rotate_left(1)
}

/// Seeded bijection on `u32`.
///
/// Combines xor, folds, flops, swirls, scrambles, odd multiplications and
/// xorshifts with seed-derived parameters.
#[must_use]
pub const fn mix(x: u32, seed: u32) -> u32 {
    let mut r = x ^ seed;
    r = fold(r, seed.wrapping_add(17));
    r = flop(r);
    r = swirl(r, seed.wrapping_add(37));
    r = scramble(r);
    r = r.wrapping_mul(MIX_MULTIPLIER);
    r = fold(r, seed.wrapping_add(89) >> 3);
    r = flop_bytes(r);
    r = r.wrapping_add(seed.rotate_left(11) ^ MIX_WHITENING);
    r = scramble(r);
    r = swirl(r, seed.wrapping_add(53));
    r ^= r >> 16;
    r = r.wrapping_mul(MIX_MULTIPLIER_2);
    r ^ (r >> 16)
}

/// Exact inverse of [`mix`]: `unmix(mix(x, seed), seed) == x`.
#[must_use]
pub const fn unmix(x: u32, seed: u32) -> u32 {
    let mut r = x ^ (x >> 16);
    r = r.wrapping_mul(MIX_INVERSE_2);
    r ^= r >> 16;
    r = rev_swirl(r, seed.wrapping_add(53));
    r = unscramble(r);
    r = r.wrapping_sub(seed.rotate_left(11) ^ MIX_WHITENING);
    r = flop_bytes(r);
    r = fold(r, seed.wrapping_add(89) >> 3);
    r = r.wrapping_mul(MIX_INVERSE);
    r = unscramble(r);
    r = rev_swirl(r, seed.wrapping_add(37));
    r = flop(r);
    r = fold(r, seed.wrapping_add(17));
    r ^ seed
}

/// Mixes two values under one seed (e.g. a coordinate pair).
#[inline]
#[must_use]
pub const fn mix2(a: u32, b: u32, seed: u32) -> u32 {
    mix(b ^ mix(a, seed), seed.wrapping_add(MIX2_OFFSET))
}

/// Mixes three values under one seed.
#[inline]
#[must_use]
pub const fn mix3(a: u32, b: u32, c: u32, seed: u32) -> u32 {
    mix(c ^ mix2(a, b, seed), seed.wrapping_add(MIX3_OFFSET))
}

/// One step of a 32-bit maximal-length Galois LFSR.
///
/// Cycles through all `2^32 - 1` nonzero states; zero maps to zero.
#[inline]
#[must_use]
pub const fn lfsr(x: u32) -> u32 {
    let shifted = x >> 1;
    if x & 1 != 0 {
        shifted ^ LFSR_MASK
    } else {
        shifted
    }
}

/// Uniform deviate in `[0, 1)` from one LFSR step of `state`.
#[inline]
#[must_use]
pub fn uniform(state: u32) -> f64 {
    f64::from(lfsr(state)) / TWO_POW_32
}

/// Exponential deviate with mean `0.5`, by inverse CDF of [`uniform`].
#[inline]
#[must_use]
pub fn exponential(state: u32) -> f64 {
    -(1.0 - uniform(state)).ln() * 0.5
}

/// Scales a mixed 32-bit value onto `[0, bound)` without modulo bias hot spots.
///
/// The product is taken in 128 bits, so any `u64` bound is exact.
#[inline]
#[must_use]
pub const fn scale(value: u32, bound: u64) -> u64 {
    ((value as u128 * bound as u128) >> ID_BITS) as u64
}
