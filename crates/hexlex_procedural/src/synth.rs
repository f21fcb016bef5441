//! # Supertile Synthesis
//!
//! Turns `(dimension, position, seed)` into one finished [`Supertile`].
//!
//! ## Full Dimensions
//!
//! 1. Fold the dimension seed into the global seed.
//! 2. For each socket in order, find the owning slot and its ultratile
//!    context, pick the slot's word and lay this side's half along a
//!    catalogued path from the anchor.
//! 3. Fill worms among the empty cells with more words.
//! 4. Markov-fill whatever is still empty.
//! 5. Mark the ultratile's objects.
//!
//! ## Pocket and Custom Dimensions
//!
//! Cells on the finite board take their glyph from the dimension's
//! [`PocketLayout`] or from Markov infill; cells off the board are void.
//!
//! ## Not Ready
//!
//! Missing inputs are polled, never waited for. Every context a supertile
//! needs is requested in the same call, so one round of computation
//! satisfies them all.

use std::sync::Arc;

use hexlex_core::{bitmix, Memo, Readiness, Seed};
use hexlex_lexicon::{Domain, DomainSource};
use hexlex_shared::{Socket, SocketRef, SupergridPosition, SUPERTILE_CELLS};

use crate::assignment::choose_word;
use crate::config::GeneratorConfig;
use crate::context::{ContextKey, UltratileContext};
use crate::dimension::{Dimension, GenerationMode};
use crate::error::{Dependency, GenerationError, GenerationResult};
use crate::pocket::PocketLayout;
use crate::supertile::{colors, Cell, Supertile, DOMAIN_NATURAL};
use crate::{infill, paths, worms};

const PURPOSE_TILE: u32 = 0x7113_0001;
const SALT_PATH: u32 = 0x7113_0002;
const SALT_WORMS: u32 = 0x7113_0003;
const SALT_INFILL: u32 = 0x7113_0004;

/// Synthesizes supertiles against injected caches.
///
/// The synthesizer owns nothing: the domain source and both memos are
/// borrowed, so the same code runs under the world manager or a test
/// harness.
pub struct Synthesizer<'a, S: ?Sized> {
    config: &'a GeneratorConfig,
    source: &'a S,
    contexts: &'a Memo<ContextKey, UltratileContext>,
    pockets: &'a Memo<String, PocketLayout>,
}

impl<'a, S: DomainSource + ?Sized> Synthesizer<'a, S> {
    /// Creates a synthesizer.
    #[must_use]
    pub const fn new(
        config: &'a GeneratorConfig,
        source: &'a S,
        contexts: &'a Memo<ContextKey, UltratileContext>,
        pockets: &'a Memo<String, PocketLayout>,
    ) -> Self {
        Self {
            config,
            source,
            contexts,
            pockets,
        }
    }

    /// Synthesizes the supertile of `dimension` at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::NotReady`] naming the first missing input.
    /// The caller retries once it may have been computed.
    pub fn synthesize(
        &self,
        dimension: &Dimension,
        position: SupergridPosition,
        global: Seed,
    ) -> GenerationResult<Supertile> {
        let seed = dimension.generation_seed(global, self.config.dimension_seed_rounds);
        let natural = self.domain(&dimension.domain)?;
        let tile_seed = bitmix::mix2(
            position.x as u32,
            position.y as u32,
            seed.derive(PURPOSE_TILE).value(),
        );

        let cells = match dimension.mode {
            GenerationMode::Full => self.synthesize_full(dimension, position, seed, tile_seed, &natural)?,
            GenerationMode::Pocket | GenerationMode::Custom => {
                self.synthesize_finite(dimension, position, tile_seed, &natural)?
            }
        };
        Ok(Supertile { position, cells })
    }

    fn domain(&self, name: &str) -> GenerationResult<Arc<Domain>> {
        match self.source.lookup_domain(name) {
            Readiness::Ready(domain) => Ok(domain),
            Readiness::Pending => Err(GenerationError::NotReady(Dependency::Domain(name.to_owned()))),
        }
    }

    /// Contexts of the six socket owners, requesting every missing one.
    fn socket_contexts(
        &self,
        position: SupergridPosition,
        seed: Seed,
    ) -> GenerationResult<[Arc<UltratileContext>; 6]> {
        let polled = Socket::ALL.map(|socket| {
            let owner = SocketRef::new(position, socket).canonical();
            let key = ContextKey::new(seed, owner.supertile.ultragrid());
            (key, self.contexts.try_get(&key))
        });
        let mut ready = Vec::with_capacity(polled.len());
        for (key, readiness) in polled {
            match readiness {
                Readiness::Ready(context) => ready.push(context),
                Readiness::Pending => {
                    return Err(GenerationError::NotReady(Dependency::UltratileContext(
                        key.ultratile,
                    )))
                }
            }
        }
        ready.try_into().map_err(|_| {
            GenerationError::NotReady(Dependency::UltratileContext(position.ultragrid()))
        })
    }

    fn synthesize_full(
        &self,
        dimension: &Dimension,
        position: SupergridPosition,
        seed: Seed,
        tile_seed: u32,
        natural: &Domain,
    ) -> GenerationResult<[Cell; SUPERTILE_CELLS]> {
        let contexts = self.socket_contexts(position, seed)?;
        let mut cells = [Cell::VOID; SUPERTILE_CELLS];
        let mut occupied = [false; SUPERTILE_CELLS];

        for (socket, context) in Socket::ALL.into_iter().zip(&contexts) {
            let here = SocketRef::new(position, socket);
            let slot = here.slot();
            let kind = context.slot_kind(slot.index_in_ultratile());
            let offset = context.offset(slot.index_in_ultratile());
            let domain = if offset == 0 {
                None
            } else {
                Some(self.domain(dimension.multiplanar_domain(offset))?)
            };
            let domain = domain.as_deref().unwrap_or(natural);

            let Some(word) = choose_word(domain, kind, slot, context.region_seed(), self.config) else {
                tracing::debug!(
                    target: "hexlex::procedural",
                    socket = socket.index(),
                    domain = domain.name(),
                    "no feasible socket word"
                );
                continue;
            };
            let half = word.side(socket.is_canonical());
            let path_seed = bitmix::mix(socket.index() as u32, tile_seed ^ SALT_PATH);
            let Some(path) = paths::catalogue(socket).select(half.len(), &occupied, path_seed) else {
                continue;
            };
            let flags = if word.offset == 0 {
                colors::SOCKET
            } else {
                colors::SOCKET | colors::INCLUSION
            };
            lay_half(&mut cells, &mut occupied, path, &half, word.offset, flags);
        }

        worms::fill_worms(&mut cells, natural, tile_seed ^ SALT_WORMS, self.config);
        infill::fill(&mut cells, &[true; SUPERTILE_CELLS], natural, tile_seed ^ SALT_INFILL);

        // The first three sockets are owned by this supertile, so its own
        // ultratile context is the first one polled.
        let own = &contexts[0];
        for object in own.objects_in(position.index_in_ultratile()) {
            let cell = &mut cells[usize::from(object.cell)];
            cell.colors |= colors::OBJECT;
            cell.object = object.kind + 1;
        }
        Ok(cells)
    }

    fn synthesize_finite(
        &self,
        dimension: &Dimension,
        position: SupergridPosition,
        tile_seed: u32,
        natural: &Domain,
    ) -> GenerationResult<[Cell; SUPERTILE_CELLS]> {
        let key = dimension.key();
        let Readiness::Ready(layout) = self.pockets.try_get(&key) else {
            return Err(GenerationError::NotReady(Dependency::PocketLayout(key)));
        };

        let mut cells = [Cell::VOID; SUPERTILE_CELLS];
        let mut live = [false; SUPERTILE_CELLS];
        for (index, cell) in cells.iter_mut().enumerate() {
            let pos = position.cell(index);
            if !layout.contains(pos) {
                continue;
            }
            live[index] = true;
            if let Some(glyph) = layout.glyph_at(pos) {
                *cell = Cell::new(glyph, DOMAIN_NATURAL, colors::POCKET);
            }
        }
        infill::fill(&mut cells, &live, natural, tile_seed ^ SALT_INFILL);
        Ok(cells)
    }
}

/// Writes `half` along `path`, anchor first.
///
/// A fallback path shorter than the half keeps the glyphs nearest the cut,
/// so both anchors still agree on the seam.
fn lay_half(
    cells: &mut [Cell; SUPERTILE_CELLS],
    occupied: &mut [bool; SUPERTILE_CELLS],
    path: &[u8],
    half: &[char],
    domain: u8,
    flags: u8,
) {
    debug_assert!(path.len() <= half.len(), "path longer than its word half");
    let placed = &half[..path.len().min(half.len())];
    for (&cell, &glyph) in path.iter().zip(placed) {
        let cell = usize::from(cell);
        cells[cell] = Cell::new(glyph, domain, flags);
        occupied[cell] = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::supertile::DOMAIN_VOID;
    use hexlex_shared::hex::local_index;
    use hexlex_shared::GridPosition;

    #[test]
    fn test_not_ready_until_inputs_exist() {
        let config = GeneratorConfig::test();
        let lexicon = hexlex_lexicon::Lexicon::new();
        let contexts = Memo::new("contexts", 16);
        let pockets = Memo::new("pockets", 4);
        let synth = Synthesizer::new(&config, &lexicon, &contexts, &pockets);
        let dim = Dimension::full("base", "base");

        let err = synth
            .synthesize(&dim, SupergridPosition::new(0, 0), Seed::new(173))
            .unwrap_err();
        assert_eq!(err, GenerationError::NotReady(Dependency::Domain("base".into())));

        fixtures::load_base(&lexicon);
        let err = synth
            .synthesize(&dim, SupergridPosition::new(0, 0), Seed::new(173))
            .unwrap_err();
        assert!(matches!(err, GenerationError::NotReady(Dependency::UltratileContext(_))));
        // Sockets 3 and 4 of tile (0, 0) are owned by tiles in ultratile (-1, 0).
        assert_eq!(contexts.pending_requests(), 2);
    }

    #[test]
    fn test_full_tile_complete_and_repeatable() {
        let dim = Dimension::full("base", "base");
        let pos = SupergridPosition::new(0, 0);
        let a = fixtures::synthesize(&dim, pos, 173);
        let b = fixtures::synthesize(&dim, pos, 173);
        assert_eq!(a, b);
        for cell in &a.cells {
            assert!(cell.glyph().is_some());
            assert_ne!(cell.domain, DOMAIN_VOID);
        }
        assert!(a.cells.iter().any(|c| c.has(colors::SOCKET)));
        assert_ne!(a, fixtures::synthesize(&dim, pos, 174));
    }

    #[test]
    fn test_anchor_glyphs_agree_across_edge() {
        let config = GeneratorConfig::test();
        let dim = Dimension::full("base", "base");
        let lexicon = fixtures::lexicon();
        let domain = lexicon.lookup_domain("base").ready().unwrap();
        let seed = dim.generation_seed(Seed::new(42), config.dimension_seed_rounds);

        let mut checked = 0;
        for pos in [SupergridPosition::new(11, 3), SupergridPosition::new(0, 0)] {
            let tile = fixtures::synthesize(&dim, pos, 42);
            for socket in Socket::ALL {
                let here = SocketRef::new(pos, socket);
                let across = here.across();
                let neighbor = fixtures::synthesize(&dim, across.supertile, 42);
                let mine = tile.cells[socket.anchor_index()];
                let theirs = neighbor.cells[across.socket.anchor_index()];
                if !mine.has(colors::SOCKET) {
                    continue;
                }
                assert!(theirs.has(colors::SOCKET), "socket {socket:?}");
                assert_eq!(mine.domain, theirs.domain);

                let owner = here.canonical();
                let context = UltratileContext::compute(
                    &ContextKey::new(seed, owner.supertile.ultragrid()),
                    &config,
                );
                let slot = here.slot();
                if context.offset(slot.index_in_ultratile()) != 0 {
                    continue;
                }
                let word = choose_word(
                    &domain,
                    context.slot_kind(slot.index_in_ultratile()),
                    slot,
                    context.region_seed(),
                    &config,
                )
                .unwrap();
                let (before, after) = (word.glyphs[word.cut - 1], word.glyphs[word.cut]);
                let (canonical, other) = if socket.is_canonical() {
                    (mine, theirs)
                } else {
                    (theirs, mine)
                };
                assert_eq!(canonical.glyph(), Some(before), "{pos:?} socket {socket:?}");
                assert_eq!(other.glyph(), Some(after), "{pos:?} socket {socket:?}");
                checked += 1;
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn test_short_path_keeps_glyphs_nearest_cut() {
        let mut cells = [Cell::VOID; SUPERTILE_CELLS];
        let mut occupied = [false; SUPERTILE_CELLS];
        let path = [7u8, 8];
        lay_half(&mut cells, &mut occupied, &path, &['R', 'O', 'W', 'S'], 2, colors::SOCKET);

        assert_eq!(cells[7].glyph(), Some('R'));
        assert_eq!(cells[8].glyph(), Some('O'));
        assert_eq!(cells[7].domain, 2);
        assert!(cells[8].has(colors::SOCKET));
        assert_eq!(occupied.iter().filter(|&&o| o).count(), 2);
        assert_eq!(cells.iter().filter(|c| !c.is_empty()).count(), 2);
    }

    #[test]
    fn test_pocket_tile_void_outside_board() {
        let dim = Dimension::custom("garden", "base", &["moss", "fern"]);
        let tile = fixtures::synthesize(&dim, SupergridPosition::new(0, 0), 7);
        let center = local_index(GridPosition::ORIGIN).unwrap();
        assert!(tile.cells[center].glyph().is_some());

        let far = fixtures::synthesize(&dim, SupergridPosition::new(5, 5), 7);
        assert!(far.cells.iter().all(|c| c.domain == DOMAIN_VOID && c.is_empty()));
    }
}
