//! # Generation Error Types
//!
//! "Not ready" is an ordinary value here: it tells the caller which input
//! is still loading so the request can be retried on a later tick.

use hexlex_lexicon::LexiconError;
use hexlex_shared::UltragridPosition;
use thiserror::Error;

/// An input a supertile waits on.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum Dependency {
    /// Multiplanar offsets and objects of an ultratile.
    #[error("ultratile context at ({}, {})", .0.x, .0.y)]
    UltratileContext(UltragridPosition),

    /// A dictionary domain.
    #[error("domain {0}")]
    Domain(String),

    /// The finite word layout of a pocket or custom dimension.
    #[error("pocket layout of {0}")]
    PocketLayout(String),
}

/// Errors raised while generating supertiles.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// An input is still loading or computing. Retry later.
    #[error("not ready: waiting on {0}")]
    NotReady(Dependency),

    /// The generator configuration is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// No dimension is registered under this key.
    #[error("unknown dimension: {0}")]
    UnknownDimension(String),

    /// A dimension's word list could not be used.
    #[error(transparent)]
    Lexicon(#[from] LexiconError),
}

impl GenerationError {
    /// Returns true for the retryable "not ready" condition.
    #[inline]
    #[must_use]
    pub const fn is_not_ready(&self) -> bool {
        matches!(self, Self::NotReady(_))
    }
}

/// Result type for generation.
pub type GenerationResult<T> = Result<T, GenerationError>;
