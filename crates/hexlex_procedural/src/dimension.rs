//! # Dimensions
//!
//! A dimension is one independently generated world. Its descriptor is
//! read-only input to the synthesizer: how it is generated, which word
//! domain it speaks natively, and its own seed.
//!
//! Dimensions are addressed by keys of the form `"<name>/<mode>"`, e.g.
//! `"base/full"` or `"base/pocket"`.

use hexlex_core::{hash_name, Seed};
use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, GenerationResult};

/// How a dimension produces its supertiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Infinite world filled through socket words, worms and infill.
    Full,
    /// Finite world seeded with words sampled from the natural domain.
    Pocket,
    /// Finite world seeded with an explicit word list.
    Custom,
}

impl GenerationMode {
    /// Key suffix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Pocket => "pocket",
            Self::Custom => "custom",
        }
    }

    /// Returns true for the finite, layout-driven modes.
    #[inline]
    #[must_use]
    pub const fn is_finite(self) -> bool {
        !matches!(self, Self::Full)
    }

    fn parse(text: &str) -> Option<Self> {
        match text {
            "full" => Some(Self::Full),
            "pocket" => Some(Self::Pocket),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

/// Dimension descriptor.
///
/// ```toml
/// name = "garden"
/// domain = "plants"
/// mode = "custom"
/// words = ["fern", "moss", "ivy"]
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    /// Dimension name, the first half of its key.
    pub name: String,
    /// Natural word domain.
    pub domain: String,
    /// Generation mode.
    pub mode: GenerationMode,
    /// Explicit seed. Defaults to a hash of the key.
    #[serde(default)]
    pub seed: Option<u32>,
    /// Word list of a custom dimension.
    #[serde(default)]
    pub words: Vec<String>,
    /// Domains multiplanar inclusions borrow from, by offset. Empty means
    /// inclusions fall back to the natural domain.
    #[serde(default)]
    pub multiplanar: Vec<String>,
}

impl Dimension {
    /// An infinite dimension speaking `domain`.
    #[must_use]
    pub fn full(name: &str, domain: &str) -> Self {
        Self::with_mode(name, domain, GenerationMode::Full)
    }

    /// A pocket dimension sampling its words from `domain`.
    #[must_use]
    pub fn pocket(name: &str, domain: &str) -> Self {
        Self::with_mode(name, domain, GenerationMode::Pocket)
    }

    /// A custom dimension laid out from `words`.
    #[must_use]
    pub fn custom<S: AsRef<str>>(name: &str, domain: &str, words: &[S]) -> Self {
        Self {
            words: words.iter().map(|w| w.as_ref().to_owned()).collect(),
            ..Self::with_mode(name, domain, GenerationMode::Custom)
        }
    }

    fn with_mode(name: &str, domain: &str, mode: GenerationMode) -> Self {
        Self {
            name: name.to_owned(),
            domain: domain.to_owned(),
            mode,
            seed: None,
            words: Vec::new(),
            multiplanar: Vec::new(),
        }
    }

    /// Builds a descriptor from a key like `"base/full"`. The natural domain
    /// is the dimension name.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::UnknownDimension`] for a malformed key or
    /// an unknown mode.
    pub fn parse_key(key: &str) -> GenerationResult<Self> {
        let unknown = || GenerationError::UnknownDimension(key.to_owned());
        let (name, mode) = key.split_once('/').ok_or_else(unknown)?;
        if name.is_empty() {
            return Err(unknown());
        }
        let mode = GenerationMode::parse(mode).ok_or_else(unknown)?;
        Ok(Self::with_mode(name, name, mode))
    }

    /// Parses a descriptor from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidConfig`] if the document does not
    /// describe a dimension.
    pub fn from_toml_str(text: &str) -> GenerationResult<Self> {
        toml::from_str(text).map_err(|err| GenerationError::InvalidConfig(err.to_string()))
    }

    /// Sets an explicit seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the multiplanar neighbor domains.
    #[must_use]
    pub fn with_multiplanar<S: AsRef<str>>(mut self, domains: &[S]) -> Self {
        self.multiplanar = domains.iter().map(|d| d.as_ref().to_owned()).collect();
        self
    }

    /// Lookup key, `"<name>/<mode>"`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}/{}", self.name, self.mode.as_str())
    }

    /// The dimension's own seed.
    #[must_use]
    pub fn own_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| hash_name(&self.key()))
    }

    /// Generation seed: the dimension seed folded into the global seed.
    #[must_use]
    pub fn generation_seed(&self, global: Seed, rounds: u32) -> Seed {
        global.fold_in(self.own_seed(), rounds)
    }

    /// Domain for a multiplanar offset in `1..=4`. Offset 0 is the natural
    /// domain.
    #[must_use]
    pub fn multiplanar_domain(&self, offset: u8) -> &str {
        if offset == 0 || self.multiplanar.is_empty() {
            return &self.domain;
        }
        let at = usize::from(offset - 1) % self.multiplanar.len();
        &self.multiplanar[at]
    }
}
