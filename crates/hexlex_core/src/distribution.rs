//! # Capacity-Aware Distribution
//!
//! Deterministically distributes `total` items over `segments` ordered
//! buckets, each holding at most `capacity` items.
//!
//! Every query walks the same recursive halving: at each node the first
//! `segments / 2` buckets receive a pseudo-random share chosen inside the
//! capacity-feasible window around an even split, and the walk descends into
//! whichever half holds the bucket or item of interest. The seed is passed
//! unchanged to every node, so [`Distribution::portion`],
//! [`Distribution::prior_sum`] and [`Distribution::segment_of`] always agree.
//!
//! Cost is O(log segments) per query and nothing is allocated.

use crate::bitmix;

/// Parameters of one distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Distribution {
    /// Items to distribute.
    pub total: u32,
    /// Number of ordered buckets.
    pub segments: u32,
    /// Maximum items per bucket. `capacity * segments >= total` is the
    /// caller's responsibility.
    pub capacity: u32,
    /// Deviation from an even split, `0.0` (even) to `1.0` (anything the
    /// capacities allow).
    pub roughness: f64,
}

/// One node of the halving walk.
#[derive(Clone, Copy, Debug)]
struct Node {
    /// First bucket covered by this node.
    first: u32,
    /// Buckets covered by this node.
    segments: u32,
    /// Items assigned to this node.
    total: u32,
    /// Items assigned to buckets before `first`.
    prior: u32,
}

impl Distribution {
    /// Creates a distribution.
    #[inline]
    #[must_use]
    pub const fn new(total: u32, segments: u32, capacity: u32, roughness: f64) -> Self {
        Self {
            total,
            segments,
            capacity,
            roughness,
        }
    }

    /// Items assigned to the first `left` of a node's buckets.
    fn split(&self, total: u32, segments: u32, seed: u32) -> u32 {
        let left = segments / 2;
        let right = segments - left;
        let total_wide = u64::from(total);
        let cap = u64::from(self.capacity);

        let split_max = (u64::from(left) * cap).min(total_wide);
        let split_min = total_wide
            .saturating_sub(u64::from(right) * cap)
            .min(split_max);
        let even = (total_wide * u64::from(left) / u64::from(segments)).clamp(split_min, split_max);

        let rough = self.roughness.clamp(0.0, 1.0);
        let lo = even - ((even - split_min) as f64 * rough).floor() as u64;
        let hi = even + ((split_max - even) as f64 * rough).floor() as u64;
        if hi == lo {
            return lo as u32;
        }
        let pick = bitmix::mix(total ^ segments.rotate_left(16), seed);
        (lo + u64::from(pick) % (hi - lo + 1)) as u32
    }

    /// Walks from the root to the leaf selected by `go_left`.
    ///
    /// `go_left` receives the current node and its left share and returns
    /// whether the target lies in the left half.
    fn descend(&self, seed: u32, mut go_left: impl FnMut(&Node, u32) -> bool) -> Node {
        let mut node = Node {
            first: 0,
            segments: self.segments,
            total: self.total,
            prior: 0,
        };
        while node.segments > 1 {
            let left = node.segments / 2;
            let share = self.split(node.total, node.segments, seed);
            if go_left(&node, share) {
                node.segments = left;
                node.total = share;
            } else {
                node.first += left;
                node.segments -= left;
                node.prior += share;
                node.total -= share;
            }
        }
        node
    }

    /// Items in bucket `segment`. Zero for buckets out of range.
    #[must_use]
    pub fn portion(&self, segment: u32, seed: u32) -> u32 {
        if segment >= self.segments {
            return 0;
        }
        self.descend(seed, |node, _| segment < node.first + node.segments / 2)
            .total
    }

    /// Items in all buckets before `segment`.
    ///
    /// For `segment >= segments` this is the whole total.
    #[must_use]
    pub fn prior_sum(&self, segment: u32, seed: u32) -> u32 {
        if self.segments == 0 {
            return 0;
        }
        if segment >= self.segments {
            return self.total;
        }
        self.descend(seed, |node, _| segment < node.first + node.segments / 2)
            .prior
    }

    /// Bucket holding item `index`, with `index` counted across buckets in
    /// order. `None` if `index >= total`.
    #[must_use]
    pub fn segment_of(&self, index: u32, seed: u32) -> Option<u32> {
        if self.segments == 0 || index >= self.total {
            return None;
        }
        let leaf = self.descend(seed, |node, share| index < node.prior + share);
        Some(leaf.first)
    }

    /// `(prior_sum, portion)` of `segment` from a single walk.
    #[must_use]
    pub fn span(&self, segment: u32, seed: u32) -> (u32, u32) {
        if segment >= self.segments {
            return (self.total, 0);
        }
        let leaf = self.descend(seed, |node, _| segment < node.first + node.segments / 2);
        (leaf.prior, leaf.total)
    }
}
