//! # World Manager
//!
//! The application layer around the pure synthesizer. It owns the caches
//! and drives all computation from an explicit tick:
//!
//! - callers [`request`](WorldManager::request) supertiles and get `Ready`
//!   or `Pending` back at once
//! - each [`tick`](WorldManager::tick) computes queued ultratile contexts
//!   and pocket layouts, then retries due supertile requests
//! - a request that stays not-ready backs off exponentially and is dropped
//!   once it reaches the give-up horizon; the next access starts it afresh
//!
//! Every step is bounded by the per-tick work budget, and finished
//! supertiles live in a bounded cache that evicts the oldest first.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use hexlex_core::Seed;
//! use hexlex_lexicon::Lexicon;
//! use hexlex_procedural::{GeneratorConfig, WorldManager};
//! use hexlex_shared::GridPosition;
//!
//! let lexicon = Arc::new(Lexicon::new());
//! lexicon.insert_text("base", "hex 5\nlattice 3\nword 2\ncell 1").unwrap();
//!
//! let mut world = WorldManager::new(Seed::new(173), GeneratorConfig::test(), lexicon).unwrap();
//! world.ensure_loaded_around("base/full", GridPosition::ORIGIN, 1).unwrap();
//! world.flush();
//! assert!(world.glyph_at("base/full", GridPosition::ORIGIN).unwrap().is_some());
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use hexlex_core::{BoundedCache, Memo, Readiness, Seed};
use hexlex_lexicon::Lexicon;
use hexlex_shared::{GridPosition, SupergridPosition};

use crate::config::GeneratorConfig;
use crate::context::{ContextKey, UltratileContext};
use crate::dimension::Dimension;
use crate::error::{GenerationError, GenerationResult};
use crate::pocket::{self, PocketLayout};
use crate::supertile::Supertile;
use crate::synth::Synthesizer;

/// Cache key of a supertile.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileKey {
    /// Dimension key, e.g. `"base/full"`.
    pub dimension: String,
    /// Supertile position.
    pub position: SupergridPosition,
}

/// Retry bookkeeping of one outstanding request.
#[derive(Clone, Copy, Debug)]
struct Request {
    first_tick: u64,
    next_attempt: u64,
    backoff: u32,
}

/// Session statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldStats {
    /// Supertiles synthesized.
    pub generated_this_session: u64,
    /// Supertiles evicted from the cache.
    pub evicted_this_session: u64,
    /// Requests dropped at the give-up horizon.
    pub dropped_requests: u64,
    /// Not-ready results, each followed by a backoff.
    pub deferred_attempts: u64,
    /// Ticks run.
    pub ticks: u64,
}

/// Owner of all generation state for one session.
pub struct WorldManager {
    seed: Seed,
    config: GeneratorConfig,
    lexicon: Arc<Lexicon>,
    dimensions: HashMap<String, Dimension>,
    contexts: Memo<ContextKey, UltratileContext>,
    pockets: Memo<String, PocketLayout>,
    supertiles: BoundedCache<TileKey, Arc<Supertile>>,
    requests: BTreeMap<TileKey, Request>,
    tick: u64,
    stats: WorldStats,
}

impl WorldManager {
    /// Creates a manager over `lexicon`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidConfig`] if `config` fails
    /// validation.
    pub fn new(seed: Seed, config: GeneratorConfig, lexicon: Arc<Lexicon>) -> GenerationResult<Self> {
        config.validate()?;
        tracing::debug!(target: "hexlex::procedural", seed = seed.value(), "world manager created");
        Ok(Self {
            seed,
            contexts: Memo::new("ultratile_contexts", config.context_cache_capacity),
            pockets: Memo::new("pocket_layouts", config.pocket_cache_capacity),
            supertiles: BoundedCache::new(config.supertile_cache_capacity),
            config,
            lexicon,
            dimensions: HashMap::new(),
            requests: BTreeMap::new(),
            tick: 0,
            stats: WorldStats::default(),
        })
    }

    /// Global seed.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> Seed {
        self.seed
    }

    /// Generator configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The shared domain store.
    #[inline]
    #[must_use]
    pub fn lexicon(&self) -> &Arc<Lexicon> {
        &self.lexicon
    }

    /// Supplies the frequency list of domain `name`. Requests waiting on it
    /// succeed on their next attempt.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Lexicon`] if the list does not parse.
    pub fn load_domain(&self, name: &str, text: &str) -> GenerationResult<usize> {
        let domain = self.lexicon.insert_text(name, text)?;
        tracing::debug!(target: "hexlex::procedural", domain = name, entries = domain.len(), "domain loaded");
        Ok(domain.len())
    }

    /// Registers a dimension under its key, replacing any previous
    /// descriptor and its cached supertiles.
    pub fn add_dimension(&mut self, dimension: Dimension) -> String {
        let key = dimension.key();
        if self.dimensions.insert(key.clone(), dimension).is_some() {
            self.forget_dimension(&key);
        }
        key
    }

    /// Descriptor registered under `key`, if any.
    #[must_use]
    pub fn dimension(&self, key: &str) -> Option<&Dimension> {
        self.dimensions.get(key)
    }

    fn forget_dimension(&mut self, key: &str) {
        let stale: Vec<TileKey> = self
            .supertiles
            .iter()
            .filter(|(k, _)| k.dimension == key)
            .map(|(k, _)| k.clone())
            .collect();
        for k in stale {
            self.supertiles.remove(&k);
        }
        self.requests.retain(|k, _| k.dimension != key);
        self.pockets.cancel(&key.to_owned());
    }

    /// Registered descriptor, or one parsed from the key.
    fn resolve(&mut self, key: &str) -> GenerationResult<()> {
        if !self.dimensions.contains_key(key) {
            let dimension = Dimension::parse_key(key)?;
            self.dimensions.insert(key.to_owned(), dimension);
        }
        Ok(())
    }

    /// Returns the supertile if it is loaded, otherwise schedules it.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::UnknownDimension`] if `key` is neither
    /// registered nor a valid dimension key.
    pub fn request(
        &mut self,
        key: &str,
        position: SupergridPosition,
    ) -> GenerationResult<Readiness<Arc<Supertile>>> {
        self.resolve(key)?;
        let tile_key = TileKey {
            dimension: key.to_owned(),
            position,
        };
        if let Some(tile) = self.supertiles.get(&tile_key) {
            return Ok(Readiness::Ready(Arc::clone(tile)));
        }
        let tick = self.tick;
        self.requests.entry(tile_key).or_insert(Request {
            first_tick: tick,
            next_attempt: tick,
            backoff: self.config.retry.initial_backoff_ticks,
        });
        Ok(Readiness::Pending)
    }

    /// Loaded supertile, without scheduling anything.
    #[must_use]
    pub fn supertile(&self, key: &str, position: SupergridPosition) -> Option<Arc<Supertile>> {
        self.supertiles
            .get(&TileKey {
                dimension: key.to_owned(),
                position,
            })
            .map(Arc::clone)
    }

    /// Glyph at a grid position, scheduling its supertile if needed.
    ///
    /// `Ok(None)` means not loaded yet, or a void cell.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::UnknownDimension`] for a bad key.
    pub fn glyph_at(&mut self, key: &str, pos: GridPosition) -> GenerationResult<Option<char>> {
        let (position, cell) = SupergridPosition::locate(pos);
        Ok(self.request(key, position)?.ready().and_then(|tile| tile.glyph(cell)))
    }

    /// Schedules every supertile within `radius` supergrid steps of the
    /// supertile holding `center`. Returns how many were not loaded yet.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::UnknownDimension`] for a bad key.
    pub fn ensure_loaded_around(
        &mut self,
        key: &str,
        center: GridPosition,
        radius: i32,
    ) -> GenerationResult<usize> {
        let (origin, _) = SupergridPosition::locate(center);
        let mut pending = 0;
        for offset in GridPosition::within(radius) {
            let position = SupergridPosition::new(origin.x + offset.x, origin.y + offset.y);
            if !self.request(key, position)?.is_ready() {
                pending += 1;
            }
        }
        Ok(pending)
    }

    /// Keeps the neighborhood of a moving viewer loaded and runs one tick.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::UnknownDimension`] for a bad key.
    pub fn update(&mut self, key: &str, viewer: GridPosition) -> GenerationResult<usize> {
        self.ensure_loaded_around(key, viewer, self.config.load_radius)?;
        Ok(self.tick())
    }

    /// Runs one scheduling step. Returns the supertiles generated.
    pub fn tick(&mut self) -> usize {
        self.tick += 1;
        self.stats.ticks += 1;
        let budget = self.config.work_budget_per_tick;

        let config = &self.config;
        self.contexts
            .process(budget, |key| Some(UltratileContext::compute(key, config)));
        let (dimensions, lexicon, seed) = (&self.dimensions, &self.lexicon, self.seed);
        self.pockets.process(budget, |key| {
            let dimension = dimensions.get(key)?;
            pocket::build_layout(dimension, lexicon.as_ref(), seed, config).ready()
        });

        let due: Vec<TileKey> = self
            .requests
            .iter()
            .filter(|(_, r)| r.next_attempt <= self.tick)
            .map(|(k, _)| k.clone())
            .take(budget)
            .collect();

        let mut generated = 0;
        for key in due {
            match self.attempt(&key) {
                Ok(tile) => {
                    self.requests.remove(&key);
                    if let Some((evicted, _)) = self.supertiles.insert(key, Arc::new(tile)) {
                        self.stats.evicted_this_session += 1;
                        tracing::debug!(
                            target: "hexlex::procedural",
                            dimension = %evicted.dimension,
                            x = evicted.position.x,
                            y = evicted.position.y,
                            "supertile evicted"
                        );
                    }
                    self.stats.generated_this_session += 1;
                    generated += 1;
                }
                Err(GenerationError::NotReady(dependency)) => {
                    self.stats.deferred_attempts += 1;
                    self.back_off(&key, &dependency.to_string());
                }
                Err(err) => {
                    tracing::warn!(target: "hexlex::diagnostics", %err, "supertile request failed");
                    self.drop_request(&key);
                }
            }
        }
        generated
    }

    fn attempt(&self, key: &TileKey) -> GenerationResult<Supertile> {
        let dimension = self
            .dimensions
            .get(&key.dimension)
            .ok_or_else(|| GenerationError::UnknownDimension(key.dimension.clone()))?;
        Synthesizer::new(&self.config, self.lexicon.as_ref(), &self.contexts, &self.pockets)
            .synthesize(dimension, key.position, self.seed)
    }

    fn back_off(&mut self, key: &TileKey, waiting_on: &str) {
        let retry = self.config.retry;
        let tick = self.tick;
        let Some(request) = self.requests.get_mut(key) else {
            return;
        };
        if tick - request.first_tick >= u64::from(retry.give_up_after_ticks) {
            self.drop_request(key);
            tracing::debug!(
                target: "hexlex::procedural",
                dimension = %key.dimension,
                x = key.position.x,
                y = key.position.y,
                waiting_on,
                "request dropped"
            );
            return;
        }
        request.next_attempt = tick + u64::from(request.backoff);
        request.backoff = request.backoff.saturating_mul(2).min(retry.max_backoff_ticks);
    }

    /// Abandons a request. The dimension's layout is no longer computed
    /// once nothing waits on it.
    fn drop_request(&mut self, key: &TileKey) {
        self.requests.remove(key);
        self.stats.dropped_requests += 1;
        if !self.requests.keys().any(|k| k.dimension == key.dimension) {
            self.pockets.cancel(&key.dimension);
        }
    }

    /// Ticks until no request is outstanding, or until every remaining one
    /// has had time to reach the give-up horizon. Returns the supertiles
    /// generated.
    pub fn flush(&mut self) -> usize {
        let retry = self.config.retry;
        let limit = u64::from(retry.give_up_after_ticks) + u64::from(retry.max_backoff_ticks) + 1;
        let mut generated = 0;
        for _ in 0..limit {
            if self.requests.is_empty() {
                break;
            }
            generated += self.tick();
        }
        generated
    }

    /// Supertiles currently cached.
    #[must_use]
    pub fn loaded_supertile_count(&self) -> usize {
        self.supertiles.len()
    }

    /// Requests waiting to be generated.
    #[must_use]
    pub fn pending_request_count(&self) -> usize {
        self.requests.len()
    }

    /// Session statistics.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> &WorldStats {
        &self.stats
    }

    /// Drops every cached value and outstanding request.
    pub fn clear(&mut self) {
        self.supertiles.clear();
        self.requests.clear();
        self.contexts.clear();
        self.pockets.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn world() -> WorldManager {
        WorldManager::new(Seed::new(173), GeneratorConfig::test(), fixtures::lexicon()).unwrap()
    }

    #[test]
    fn test_request_then_tick() {
        let mut world = world();
        let pos = SupergridPosition::new(0, 0);
        assert_eq!(world.request("base/full", pos).unwrap(), Readiness::Pending);
        assert_eq!(world.pending_request_count(), 1);

        let generated = world.flush();
        assert_eq!(generated, 1);
        assert!(world.request("base/full", pos).unwrap().is_ready());
        assert_eq!(world.stats().generated_this_session, 1);
        assert!(world.stats().deferred_attempts >= 1, "contexts are computed lazily");
    }

    #[test]
    fn test_unknown_dimension() {
        let mut world = world();
        let err = world.request("nonsense", SupergridPosition::new(0, 0)).unwrap_err();
        assert_eq!(err, GenerationError::UnknownDimension("nonsense".into()));
    }

    #[test]
    fn test_missing_domain_gives_up() {
        let config = GeneratorConfig {
            retry: crate::config::RetryPolicy {
                initial_backoff_ticks: 1,
                max_backoff_ticks: 4,
                give_up_after_ticks: 20,
            },
            ..GeneratorConfig::test()
        };
        let lexicon = Arc::new(Lexicon::new());
        let mut world = WorldManager::new(Seed::new(1), config, Arc::clone(&lexicon)).unwrap();
        world.request("missing/full", SupergridPosition::new(2, 2)).unwrap();
        world.flush();
        assert_eq!(world.pending_request_count(), 0);
        assert_eq!(world.stats().dropped_requests, 1);
        assert_eq!(world.loaded_supertile_count(), 0);
        assert_eq!(lexicon.requested(), vec!["missing".to_owned()]);
    }

    #[test]
    fn test_late_domain_unblocks_request() {
        let mut world = WorldManager::new(Seed::new(2), GeneratorConfig::test(), Arc::new(Lexicon::new())).unwrap();
        let pos = SupergridPosition::new(1, -1);
        world.request("base/full", pos).unwrap();
        for _ in 0..5 {
            world.tick();
        }
        assert!(world.supertile("base/full", pos).is_none());

        assert!(matches!(world.load_domain("base", "   "), Err(GenerationError::Lexicon(_))));
        assert_eq!(world.load_domain("base", "hex 5\ncell 3\nword 2").unwrap(), 3);
        world.flush();
        assert!(world.supertile("base/full", pos).is_some());
    }

    #[test]
    fn test_dropped_requests_release_pocket_layout() {
        let config = GeneratorConfig {
            retry: crate::config::RetryPolicy {
                initial_backoff_ticks: 1,
                max_backoff_ticks: 4,
                give_up_after_ticks: 12,
            },
            ..GeneratorConfig::test()
        };
        let mut world = WorldManager::new(Seed::new(5), config, Arc::new(Lexicon::new())).unwrap();
        let key = world.add_dimension(Dimension::pocket("garden", "missing"));
        world.request(&key, SupergridPosition::new(0, 0)).unwrap();
        world.request(&key, SupergridPosition::new(1, 0)).unwrap();
        assert!(!world.pockets.try_get(&key).is_ready());
        world.tick();
        assert_eq!(world.pockets.pending_requests(), 1, "layout retried while tiles wait");

        world.flush();
        assert_eq!(world.pending_request_count(), 0);
        assert_eq!(world.stats().dropped_requests, 2);
        assert_eq!(world.pockets.pending_requests(), 0);
    }

    #[test]
    fn test_backoff_grows() {
        let lexicon = Arc::new(Lexicon::new());
        let mut world = WorldManager::new(Seed::new(1), GeneratorConfig::test(), lexicon).unwrap();
        world.request("late/full", SupergridPosition::new(0, 0)).unwrap();
        for _ in 0..40 {
            world.tick();
        }
        // Attempts at ticks 1, 2, 4, 8, 16, 32 (backoff 1, 2, 4, 8, 16, 16).
        assert_eq!(world.stats().deferred_attempts, 6);
    }

    #[test]
    fn test_eviction_counts() {
        let config = GeneratorConfig {
            supertile_cache_capacity: 4,
            ..GeneratorConfig::test()
        };
        let mut world = WorldManager::new(Seed::new(5), config, fixtures::lexicon()).unwrap();
        world.ensure_loaded_around("base/full", GridPosition::ORIGIN, 1).unwrap();
        world.flush();
        assert_eq!(world.stats().generated_this_session, 7);
        assert_eq!(world.loaded_supertile_count(), 4);
        assert_eq!(world.stats().evicted_this_session, 3);
    }

    #[test]
    fn test_replacing_dimension_forgets_tiles() {
        let mut world = world();
        world.request("base/full", SupergridPosition::new(0, 0)).unwrap();
        world.flush();
        assert_eq!(world.loaded_supertile_count(), 1);
        let key = world.add_dimension(Dimension::full("base", "base").with_seed(3));
        assert_eq!(key, "base/full");
        assert_eq!(world.loaded_supertile_count(), 0);
    }
}
