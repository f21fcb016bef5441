//! # Socket Word Assignment
//!
//! Maps an assignment slot to the word crossing its edge, and splits that
//! word between the two supertiles sharing the edge.
//!
//! Natural slots take a rank from a region-wide shuffle. Ranks below the
//! domain's distinct-entry count pick one distinct word each, so every
//! word is represented. Higher ranks pick in proportion to corpus
//! frequency. Inclusions pick by frequency in the borrowed domain.
//!
//! Both sides of an edge derive the same [`SocketWord`] from the owning
//! slot, so they agree on the shared glyphs without talking.

use hexlex_core::{bitmix, cohort};
use hexlex_lexicon::Domain;
use hexlex_shared::constants::{SOCKET_SIDE_MAX, SOCKET_WORD_MAX, SOCKET_WORD_MIN};
use hexlex_shared::AssignmentSlot;

use crate::config::GeneratorConfig;
use crate::context::SlotKind;

const SALT_RANK: u32 = 0x5107_0001;
const SALT_ROTATION: u32 = 0x5107_0002;
const SALT_INCLUSION: u32 = 0x5107_0003;
const SALT_RESAMPLE: u32 = 0x5107_0004;
const SALT_FALLBACK: u32 = 0x5107_0005;
const SALT_ORIENT: u32 = 0x5107_0006;
const SALT_CUT: u32 = 0x5107_0007;

/// A word assigned to one edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SocketWord {
    /// Entry index in the domain it came from.
    pub entry: usize,
    /// Glyphs in crossing order, from deep in the canonical side to deep in
    /// the other.
    pub glyphs: Vec<char>,
    /// Glyphs kept on the canonical side.
    pub cut: usize,
    /// Multiplanar offset of the word's domain, zero for natural.
    pub offset: u8,
}

impl SocketWord {
    /// Glyphs one side places, anchor first.
    #[must_use]
    pub fn side(&self, canonical: bool) -> Vec<char> {
        if canonical {
            self.glyphs[..self.cut].iter().rev().copied().collect()
        } else {
            self.glyphs[self.cut..].to_vec()
        }
    }
}

/// Returns true if a word of `len` glyphs fits a socket.
#[inline]
#[must_use]
pub const fn fits_socket(len: usize) -> bool {
    len >= SOCKET_WORD_MIN && len <= SOCKET_WORD_MAX
}

/// Entry index for a slot, before length filtering.
#[must_use]
pub fn pick_entry(domain: &Domain, kind: SlotKind, slot: AssignmentSlot, region_seed: u32) -> usize {
    match kind {
        SlotKind::Natural { index, total } => {
            let rank = cohort::shuffle(index, total, region_seed ^ SALT_RANK);
            let distinct = domain.len() as u32;
            if rank < distinct {
                let rotation = bitmix::mix(region_seed, SALT_ROTATION) % distinct;
                ((u64::from(rank) + u64::from(rotation)) % u64::from(distinct)) as usize
            } else {
                let occurrence = u128::from(rank - distinct) * u128::from(domain.total_frequency())
                    / u128::from(total - distinct);
                domain.index_for_occurrence(occurrence as u64)
            }
        }
        SlotKind::Inclusion { .. } => {
            domain.pick_weighted(bitmix::mix(slot.index, region_seed ^ SALT_INCLUSION))
        }
    }
}

/// Chooses the word of a slot and where it splits.
///
/// Returns `None` when the domain has no word of a usable length; the
/// socket then stays open for worms and infill.
#[must_use]
pub fn choose_word(
    domain: &Domain,
    kind: SlotKind,
    slot: AssignmentSlot,
    region_seed: u32,
    config: &GeneratorConfig,
) -> Option<SocketWord> {
    let fits = |index: usize| domain.entry(index).is_some_and(|e| fits_socket(e.len()));

    let mut entry = pick_entry(domain, kind, slot, region_seed);
    if !fits(entry) {
        let resampled = (0..config.resample_attempts)
            .map(|attempt| {
                domain.pick_weighted(bitmix::mix2(slot.index, attempt, region_seed ^ SALT_RESAMPLE))
            })
            .find(|&index| fits(index));
        entry = match resampled {
            Some(index) => index,
            None => domain.pick_in_length(
                SOCKET_WORD_MIN,
                SOCKET_WORD_MAX,
                bitmix::mix(slot.index, region_seed ^ SALT_FALLBACK),
            )?,
        };
    }

    let mut glyphs = domain.entry(entry)?.glyphs.to_vec();
    if bitmix::mix(slot.index, region_seed ^ SALT_ORIENT) & 1 == 1 {
        glyphs.reverse();
    }
    let len = glyphs.len();
    let lo = len.saturating_sub(SOCKET_SIDE_MAX).max(1);
    let hi = (len - 1).min(SOCKET_SIDE_MAX);
    let span = (hi - lo + 1) as u32;
    let cut = lo + (bitmix::mix(slot.index, region_seed ^ SALT_CUT) % span) as usize;

    let offset = match kind {
        SlotKind::Natural { .. } => 0,
        SlotKind::Inclusion { offset } => offset,
    };
    Some(SocketWord {
        entry,
        glyphs,
        cut,
        offset,
    })
}
