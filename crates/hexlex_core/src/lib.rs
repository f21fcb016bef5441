//! # HEXLEX Core
//!
//! Deterministic primitives underneath the hex word-search world generator:
//! - **Bit mixer**: reversible 32-bit transforms and a maximal-length LFSR
//! - **Cohort shuffle**: seeded bijections over `[0, n)` in O(1) per index
//! - **Capacity allocator**: recursive binary-split distribution of items
//!   over capacity-limited buckets
//! - **Memory**: bounded caches and a poll-based memo for derived state
//!
//! ## Rules
//!
//! 1. **Pure** - every function here depends only on its arguments
//! 2. **Wrapping** - 32-bit arithmetic wraps explicitly
//! 3. **Non-blocking** - missing values are [`Readiness::Pending`], never a wait
//!
//! ## Example
//!
//! ```rust
//! use hexlex_core::{bitmix, cohort};
//!
//! let x = bitmix::mix(1234, 173);
//! assert_eq!(bitmix::unmix(x, 173), 1234);
//!
//! let i = cohort::shuffle(5, 10, 173);
//! assert_eq!(cohort::unshuffle(i, 10, 173), 5);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod bitmix;
pub mod cohort;
pub mod distribution;
pub mod memory;
pub mod readiness;
pub mod seed;

pub use distribution::Distribution;
pub use memory::{BoundedCache, Memo, ProcessStats};
pub use readiness::Readiness;
pub use seed::{hash_name, Seed};
