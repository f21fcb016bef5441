//! # Lexicon Error Types

use thiserror::Error;

/// Errors raised while building or registering domains.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexiconError {
    /// A frequency list line could not be parsed.
    #[error("domain {domain}, line {line}: {reason}")]
    Parse {
        /// Domain being parsed.
        domain: String,
        /// One-based line number.
        line: usize,
        /// What was wrong.
        reason: String,
    },

    /// A domain has no usable entries.
    #[error("domain {0} has no entries")]
    EmptyDomain(String),

    /// A combined domain would contain itself.
    #[error("combined domain {0} refers to itself")]
    CombineCycle(String),

    /// The lexicon manifest is malformed.
    #[error("invalid manifest: {0}")]
    Manifest(String),
}

impl From<toml::de::Error> for LexiconError {
    fn from(err: toml::de::Error) -> Self {
        Self::Manifest(err.to_string())
    }
}

/// Result type for lexicon operations.
pub type LexiconResult<T> = Result<T, LexiconError>;
