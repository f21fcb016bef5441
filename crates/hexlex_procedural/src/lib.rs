//! # HEXLEX Procedural Generation
//!
//! Supertile synthesis for an unbounded hex word-search world.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: same (dimension, position, seed) gives the same supertile
//! 2. **Seamless**: neighbors agree on every word crossing their shared edge
//! 3. **Non-blocking**: missing inputs are [`GenerationError::NotReady`], retried later
//! 4. **Bounded**: caches evict, requests give up, ticks have a work budget
//!
//! ## Core Components
//!
//! - `UltratileContext`: multiplanar inclusions, natural slot ranks, objects
//! - `assignment`: slot to socket word, and where the word splits
//! - `paths`: the per-socket path catalogue
//! - `worms` and `infill`: filling what the sockets leave empty
//! - `PocketLayout`: finite boards for pocket and custom dimensions
//! - `Synthesizer`: one supertile from injected caches
//! - `WorldManager`: caches, requests and retry scheduling
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use hexlex_core::Seed;
//! use hexlex_lexicon::Lexicon;
//! use hexlex_procedural::{GeneratorConfig, WorldManager};
//! use hexlex_shared::SupergridPosition;
//!
//! let lexicon = Arc::new(Lexicon::new());
//! lexicon.insert_text("base", "word 9\nsearch 4\nhex 3\ngrid 2").unwrap();
//!
//! let mut world = WorldManager::new(Seed::new(173), GeneratorConfig::test(), lexicon).unwrap();
//! let origin = SupergridPosition::new(0, 0);
//! assert!(!world.request("base/full", origin).unwrap().is_ready());
//! world.flush();
//!
//! let tile = world.supertile("base/full", origin).unwrap();
//! assert_eq!(tile.filled_count(), 61);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod assignment;
pub mod config;
pub mod context;
pub mod dimension;
pub mod error;
pub mod infill;
pub mod paths;
pub mod pocket;
pub mod supertile;
pub mod synth;
pub mod world_manager;
pub mod worms;

pub use assignment::SocketWord;
pub use config::{GeneratorConfig, RetryPolicy};
pub use context::{ContextKey, ObjectPlacement, SlotKind, UltratileContext};
pub use dimension::{Dimension, GenerationMode};
pub use error::{Dependency, GenerationError, GenerationResult};
pub use pocket::{PlacedWord, PocketLayout};
pub use supertile::{Cell, Supertile};
pub use synth::Synthesizer;
pub use world_manager::{TileKey, WorldManager, WorldStats};
