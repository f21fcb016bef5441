//! # Ultratile Contexts
//!
//! Everything the synthesizer needs to know about one ultratile before it
//! can place socket words there:
//!
//! - which of the 432 assignment slots are multiplanar inclusions, and
//!   from which offset they borrow
//! - how many natural slots precede each supertile row, so a slot maps to
//!   its natural index inside the assignment region in O(row)
//! - where the ultratile's objects lie
//!
//! ## Allocation
//!
//! A region holds `round(6912 * inclusion_rate)` inclusions. They are
//! spread over the region's 16 ultratiles with a [`Distribution`], then
//! over each ultratile's 12 rows with another. Inside a row, the slots
//! whose shuffled position falls below the row's count are inclusions.
//!
//! A context is a pure function of its [`ContextKey`]; caching it only
//! saves time.

use hexlex_core::{bitmix, cohort, Distribution, Seed};
use hexlex_shared::constants::{
    MULTIPLANAR_OFFSETS, SLOTS_PER_REGION, SLOTS_PER_ROW, SLOTS_PER_ULTRATILE,
    SUPERTILES_PER_ULTRATILE, ULTRATILES_PER_REGION, ULTRATILE_SIZE,
};
use hexlex_shared::{UltragridPosition, SUPERTILE_CELLS};

use crate::config::GeneratorConfig;

/// Purpose tags for seed derivation.
const PURPOSE_REGION: u32 = 0xC0_0001;
const PURPOSE_ROWS: u32 = 0xC0_0002;
const PURPOSE_OBJECTS: u32 = 0xC0_0003;

const ROWS: usize = ULTRATILE_SIZE as usize;

/// Cache key of a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextKey {
    /// Generation seed of the dimension.
    pub seed: u32,
    /// The ultratile.
    pub ultratile: UltragridPosition,
}

impl ContextKey {
    /// Creates a key.
    #[inline]
    #[must_use]
    pub const fn new(seed: Seed, ultratile: UltragridPosition) -> Self {
        Self {
            seed: seed.value(),
            ultratile,
        }
    }
}

/// What an assignment slot carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotKind {
    /// A natural-domain word.
    Natural {
        /// Rank of the slot among the region's natural slots.
        index: u32,
        /// Natural slots in the region.
        total: u32,
    },
    /// A word borrowed from a neighboring dimension.
    Inclusion {
        /// Multiplanar offset in `1..=4`.
        offset: u8,
    },
}

/// One object of an ultratile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObjectPlacement {
    /// Supertile index inside the ultratile.
    pub supertile: u8,
    /// Local cell.
    pub cell: u8,
    /// Kind in `0..object_kinds`.
    pub kind: u8,
}

/// Derived allocation data of one ultratile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UltratileContext {
    key: ContextKey,
    /// Seed shared by every ultratile of the region.
    region_seed: u32,
    /// Multiplanar offset per slot, zero for natural.
    offsets: Box<[u8; SLOTS_PER_ULTRATILE]>,
    /// Natural slots before each row, within this ultratile.
    row_natural_prefix: [u16; ROWS + 1],
    /// Natural slots of the region before this ultratile.
    natural_before: u32,
    /// Natural slots in the whole region.
    region_natural_total: u32,
    /// Objects sorted by supertile.
    objects: Vec<ObjectPlacement>,
}

impl UltratileContext {
    /// Computes the context of `key`.
    #[must_use]
    pub fn compute(key: &ContextKey, config: &GeneratorConfig) -> Self {
        let seed = Seed::new(key.seed);
        let ultratile = key.ultratile;
        let region = ultratile.assignment();
        let ut_index = ultratile.index_in_region() as u32;

        let region_seed = bitmix::mix2(
            region.x as u32,
            region.y as u32,
            seed.derive(PURPOSE_REGION).value(),
        );
        let region_inclusions = region_inclusions(config.inclusion_rate);
        let (inclusions_before, inclusions) = Distribution::new(
            region_inclusions,
            ULTRATILES_PER_REGION as u32,
            SLOTS_PER_ULTRATILE as u32,
            config.ultratile_roughness,
        )
        .span(ut_index, region_seed);

        let rows = Distribution::new(
            inclusions,
            ROWS as u32,
            SLOTS_PER_ROW as u32,
            config.row_roughness,
        );
        let row_seed = bitmix::mix2(
            ultratile.x as u32,
            ultratile.y as u32,
            seed.derive(PURPOSE_ROWS).value(),
        );

        let mut offsets = Box::new([0u8; SLOTS_PER_ULTRATILE]);
        let mut row_natural_prefix = [0u16; ROWS + 1];
        for row in 0..ROWS {
            let row_inclusions = rows.portion(row as u32, row_seed);
            let shuffle_seed = bitmix::mix(row as u32, row_seed);
            for position in 0..SLOTS_PER_ROW {
                let p = position as u32;
                if cohort::shuffle(p, SLOTS_PER_ROW as u32, shuffle_seed) < row_inclusions {
                    let pick = bitmix::mix2(row as u32, p, row_seed);
                    offsets[row * SLOTS_PER_ROW + position] =
                        1 + (pick % u32::from(MULTIPLANAR_OFFSETS)) as u8;
                }
            }
            row_natural_prefix[row + 1] =
                row_natural_prefix[row] + (SLOTS_PER_ROW as u32 - row_inclusions) as u16;
        }

        let objects = place_objects(ultratile, seed, config);

        Self {
            key: *key,
            region_seed,
            offsets,
            row_natural_prefix,
            natural_before: ut_index * SLOTS_PER_ULTRATILE as u32 - inclusions_before,
            region_natural_total: SLOTS_PER_REGION as u32 - region_inclusions,
            objects,
        }
    }

    /// The key this context was computed for.
    #[inline]
    #[must_use]
    pub const fn key(&self) -> &ContextKey {
        &self.key
    }

    /// Seed shared by the region.
    #[inline]
    #[must_use]
    pub const fn region_seed(&self) -> u32 {
        self.region_seed
    }

    /// Multiplanar offset of a slot (index inside this ultratile), zero for
    /// natural slots.
    #[inline]
    #[must_use]
    pub fn offset(&self, slot: usize) -> u8 {
        self.offsets[slot % SLOTS_PER_ULTRATILE]
    }

    /// Number of inclusions in this ultratile.
    #[must_use]
    pub fn inclusion_count(&self) -> usize {
        SLOTS_PER_ULTRATILE - usize::from(self.row_natural_prefix[ROWS])
    }

    /// Rank of a natural slot among the region's natural slots. `None` for
    /// inclusions.
    #[must_use]
    pub fn natural_index(&self, slot: usize) -> Option<u32> {
        let slot = slot % SLOTS_PER_ULTRATILE;
        if self.offsets[slot] != 0 {
            return None;
        }
        let row = slot / SLOTS_PER_ROW;
        let row_start = row * SLOTS_PER_ROW;
        let in_row = self.offsets[row_start..slot]
            .iter()
            .filter(|&&o| o == 0)
            .count() as u32;
        Some(self.natural_before + u32::from(self.row_natural_prefix[row]) + in_row)
    }

    /// Classifies a slot (index inside this ultratile).
    #[must_use]
    pub fn slot_kind(&self, slot: usize) -> SlotKind {
        match self.natural_index(slot) {
            Some(index) => SlotKind::Natural {
                index,
                total: self.region_natural_total,
            },
            None => SlotKind::Inclusion {
                offset: self.offset(slot),
            },
        }
    }

    /// Objects of the supertile at `index` inside this ultratile.
    pub fn objects_in(&self, index: usize) -> impl Iterator<Item = &ObjectPlacement> {
        let start = self
            .objects
            .partition_point(|o| usize::from(o.supertile) < index);
        self.objects[start..]
            .iter()
            .take_while(move |o| usize::from(o.supertile) == index)
    }

    /// All objects, sorted by supertile.
    #[inline]
    #[must_use]
    pub fn objects(&self) -> &[ObjectPlacement] {
        &self.objects
    }
}

/// Inclusions per region.
fn region_inclusions(rate: f64) -> u32 {
    let slots = SLOTS_PER_REGION as f64;
    (slots * rate.clamp(0.0, 1.0)).round() as u32
}

fn place_objects(
    ultratile: UltragridPosition,
    seed: Seed,
    config: &GeneratorConfig,
) -> Vec<ObjectPlacement> {
    let cohort = (SUPERTILES_PER_ULTRATILE * SUPERTILE_CELLS) as u32;
    let object_seed = bitmix::mix2(
        ultratile.x as u32,
        ultratile.y as u32,
        seed.derive(PURPOSE_OBJECTS).value(),
    );
    let kinds = u32::from(config.object_kinds.max(1));
    let mut objects: Vec<ObjectPlacement> = (0..config.objects_per_ultratile.min(cohort))
        .map(|k| {
            let id = cohort::shuffle(k, cohort, object_seed);
            ObjectPlacement {
                supertile: (id / SUPERTILE_CELLS as u32) as u8,
                cell: (id % SUPERTILE_CELLS as u32) as u8,
                kind: (bitmix::mix(k, object_seed) % kinds) as u8,
            }
        })
        .collect();
    objects.sort_by_key(|o| (o.supertile, o.cell));
    objects
}
