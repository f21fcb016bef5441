//! # HEXLEX Lexicon
//!
//! Word domains for the hex word-search generator.
//!
//! ## Architecture
//!
//! ```text
//! frequency list ──parse──> Domain ──insert──> Lexicon ──lookup_domain──> Ready | Pending
//!                           ├─ FrequencyTable (binned cumulative)
//!                           ├─ PrefixIndex
//!                           └─ NgramTables (Markov infill)
//! ```
//!
//! Dictionary files are read by the host; this crate only parses text it is
//! handed.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod domain;
pub mod error;
pub mod frequency;
pub mod glyph;
pub mod manifest;
pub mod ngram;
pub mod prefix;
pub mod store;

pub use domain::{Domain, Entry};
pub use error::{LexiconError, LexiconResult};
pub use frequency::{FrequencyTable, FREQUENCY_BINS};
pub use manifest::{DomainDecl, LexiconManifest};
pub use ngram::{GlyphWeights, NgramTables};
pub use prefix::PrefixIndex;
pub use store::{DomainSource, Lexicon};
