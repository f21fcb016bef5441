//! # Memory Management
//!
//! Bounded, explicitly owned caches for derived generation state.
//!
//! Nothing here is ambient: the world manager owns each cache and passes it
//! to the code that needs it. Everything cached is a pure function of its
//! key, so capacity only trades memory for recomputation.

mod bounded_cache;
mod memo;

pub use bounded_cache::BoundedCache;
pub use memo::{Memo, ProcessStats};
