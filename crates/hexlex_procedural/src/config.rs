//! # Generator Configuration
//!
//! Every tunable of the generator, loadable from TOML. Each field has a
//! default, so an empty document is a valid configuration.
//!
//! ```toml
//! inclusion_rate = 0.08
//! work_budget_per_tick = 16
//!
//! [retry]
//! give_up_after_ticks = 600
//! ```
//!
//! Changing any generation field changes world content. Cache, retry and
//! budget fields only change how fast content appears.

use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, GenerationResult};

/// Retry schedule for supertile requests, in ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Wait after the first "not ready".
    pub initial_backoff_ticks: u32,
    /// Longest wait between attempts.
    pub max_backoff_ticks: u32,
    /// Age at which a request is dropped. It is regenerated from scratch on
    /// the next access.
    pub give_up_after_ticks: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_backoff_ticks: 1,
            max_backoff_ticks: 16,
            give_up_after_ticks: 240,
        }
    }
}

/// Generator tunables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    // ---------------------------------------------------------------- seeding
    /// Mixing rounds folding a dimension's seed into the global seed.
    pub dimension_seed_rounds: u32,

    // ------------------------------------------------------------ allocation
    /// Fraction of assignment slots borrowed from neighboring dimensions.
    pub inclusion_rate: f64,
    /// Roughness of spreading inclusions over a region's ultratiles.
    pub ultratile_roughness: f64,
    /// Roughness of spreading an ultratile's inclusions over its rows.
    pub row_roughness: f64,

    // ---------------------------------------------------------------- words
    /// Frequency-weighted redraws before falling back to a uniform pick
    /// among short words.
    pub resample_attempts: u32,

    // ---------------------------------------------------------------- worms
    /// Starting minimum worm length.
    pub worm_min_length: usize,
    /// The minimum never backs off below this.
    pub worm_min_floor: usize,
    /// Back off while more than this fraction of the domain is shorter
    /// than the current minimum.
    pub worm_short_fraction: f64,
    /// Stop filling worms once at most this many cells are empty.
    pub worm_target_empty: usize,
    /// Word draws per worm segment before giving up on it.
    pub worm_word_attempts: u32,

    // -------------------------------------------------------------- objects
    /// Objects placed per ultratile.
    pub objects_per_ultratile: u32,
    /// Distinct object kinds.
    pub object_kinds: u8,

    // --------------------------------------------------------------- pocket
    /// Words sampled from the natural domain for a pocket dimension.
    pub pocket_word_count: usize,
    /// Placement attempts per word and strategy.
    pub pocket_attempts: u32,
    /// Smallest pocket radius.
    pub pocket_min_radius: i32,

    // --------------------------------------------------------------- caches
    /// Ultratile contexts kept.
    pub context_cache_capacity: usize,
    /// Pocket layouts kept.
    pub pocket_cache_capacity: usize,
    /// Supertiles kept by the world manager.
    pub supertile_cache_capacity: usize,

    // ------------------------------------------------------------ scheduling
    /// Retry schedule.
    pub retry: RetryPolicy,
    /// Computations (contexts, layouts, supertiles) per tick.
    pub work_budget_per_tick: usize,
    /// Supertiles kept loaded around a moving viewer, in supergrid steps.
    pub load_radius: i32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            dimension_seed_rounds: 4,
            inclusion_rate: 0.1,
            ultratile_roughness: 0.5,
            row_roughness: 0.5,
            resample_attempts: 8,
            worm_min_length: 4,
            worm_min_floor: 2,
            worm_short_fraction: 0.5,
            worm_target_empty: 6,
            worm_word_attempts: 12,
            objects_per_ultratile: 8,
            object_kinds: 4,
            pocket_word_count: 24,
            pocket_attempts: 64,
            pocket_min_radius: 2,
            context_cache_capacity: 64,
            pocket_cache_capacity: 16,
            supertile_cache_capacity: 512,
            retry: RetryPolicy::default(),
            work_budget_per_tick: 16,
            load_radius: 2,
        }
    }
}

impl GeneratorConfig {
    /// Settings for a live session.
    #[must_use]
    pub fn production() -> Self {
        Self::default()
    }

    /// Small caches and a generous budget, for tests.
    #[must_use]
    pub fn test() -> Self {
        Self {
            context_cache_capacity: 16,
            supertile_cache_capacity: 64,
            work_budget_per_tick: 64,
            load_radius: 1,
            ..Self::default()
        }
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidConfig`] for malformed TOML or
    /// out-of-range values.
    pub fn from_toml_str(text: &str) -> GenerationResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|err| GenerationError::InvalidConfig(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field is in range.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> GenerationResult<()> {
        fn unit(name: &str, value: f64) -> GenerationResult<()> {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(GenerationError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {value}"
                )))
            }
        }
        fn positive(name: &str, value: usize) -> GenerationResult<()> {
            if value > 0 {
                Ok(())
            } else {
                Err(GenerationError::InvalidConfig(format!("{name} must be positive")))
            }
        }

        unit("inclusion_rate", self.inclusion_rate)?;
        unit("ultratile_roughness", self.ultratile_roughness)?;
        unit("row_roughness", self.row_roughness)?;
        unit("worm_short_fraction", self.worm_short_fraction)?;
        positive("context_cache_capacity", self.context_cache_capacity)?;
        positive("pocket_cache_capacity", self.pocket_cache_capacity)?;
        positive("supertile_cache_capacity", self.supertile_cache_capacity)?;
        positive("work_budget_per_tick", self.work_budget_per_tick)?;
        positive("object_kinds", usize::from(self.object_kinds))?;

        if self.worm_min_floor < 2 || self.worm_min_floor > self.worm_min_length {
            return Err(GenerationError::InvalidConfig(
                "worm_min_floor must be at least 2 and at most worm_min_length".into(),
            ));
        }
        if self.load_radius < 0 {
            return Err(GenerationError::InvalidConfig(
                "load_radius must not be negative".into(),
            ));
        }
        if self.pocket_min_radius < 1 {
            return Err(GenerationError::InvalidConfig(
                "pocket_min_radius must be at least 1".into(),
            ));
        }
        let retry = self.retry;
        if retry.initial_backoff_ticks == 0 || retry.initial_backoff_ticks > retry.max_backoff_ticks {
            return Err(GenerationError::InvalidConfig(
                "retry backoff must satisfy 0 < initial <= max".into(),
            ));
        }
        Ok(())
    }
}
