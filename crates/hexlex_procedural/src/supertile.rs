//! # Supertiles
//!
//! The unit of generation: 61 cells, each with a glyph, a domain tag and
//! color flags. A supertile is immutable once synthesized.
//!
//! ## Memory Layout
//!
//! Cells are `#[repr(C)]` and `Pod`, 8 bytes each, so a host can upload a
//! supertile's cells as one contiguous byte slice.

use bytemuck::{Pod, Zeroable};
use hexlex_lexicon::glyph::{decode, encode, EMPTY_GLYPH};
use hexlex_shared::hex::local_index;
use hexlex_shared::{GridPosition, SupergridPosition, SUPERTILE_CELLS};

/// Color flags of a cell.
pub mod colors {
    /// Part of a socket word.
    pub const SOCKET: u8 = 1 << 0;
    /// Part of a word borrowed from a neighboring dimension.
    pub const INCLUSION: u8 = 1 << 1;
    /// Part of a worm word.
    pub const WORM: u8 = 1 << 2;
    /// Markov filler.
    pub const INFILL: u8 = 1 << 3;
    /// Carries an object.
    pub const OBJECT: u8 = 1 << 4;
    /// Part of a pocket layout word.
    pub const POCKET: u8 = 1 << 5;
}

/// Domain tag of a natural-domain cell.
pub const DOMAIN_NATURAL: u8 = 0;

/// Domain tag of a cell outside a finite dimension.
pub const DOMAIN_VOID: u8 = u8::MAX;

/// One cell of a supertile.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Cell {
    /// Encoded glyph, [`EMPTY_GLYPH`] for none.
    pub glyph: u32,
    /// [`DOMAIN_NATURAL`], a multiplanar offset in `1..=4`, or
    /// [`DOMAIN_VOID`].
    pub domain: u8,
    /// Bitwise OR of [`colors`] flags.
    pub colors: u8,
    /// Object kind plus one, zero for none.
    pub object: u8,
    _pad: u8,
}

impl Cell {
    /// A cell with nothing in it.
    pub const VOID: Self = Self {
        glyph: EMPTY_GLYPH,
        domain: DOMAIN_VOID,
        colors: 0,
        object: 0,
        _pad: 0,
    };

    /// A cell holding `glyph`.
    #[inline]
    #[must_use]
    pub const fn new(glyph: char, domain: u8, colors: u8) -> Self {
        Self {
            glyph: encode(glyph),
            domain,
            colors,
            object: 0,
            _pad: 0,
        }
    }

    /// The glyph, if any.
    #[inline]
    #[must_use]
    pub fn glyph(&self) -> Option<char> {
        decode(self.glyph)
    }

    /// Returns true if no glyph is placed.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.glyph == EMPTY_GLYPH
    }

    /// Returns true if every flag in `flags` is set.
    #[inline]
    #[must_use]
    pub const fn has(&self, flags: u8) -> bool {
        self.colors & flags == flags
    }

    /// Object kind, if the cell carries one.
    #[inline]
    #[must_use]
    pub const fn object_kind(&self) -> Option<u8> {
        if self.object == 0 {
            None
        } else {
            Some(self.object - 1)
        }
    }
}

/// A finished supertile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Supertile {
    /// Where it sits on the supergrid.
    pub position: SupergridPosition,
    /// Cells in local row-major order.
    pub cells: [Cell; SUPERTILE_CELLS],
}

impl Supertile {
    /// Local cell `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= SUPERTILE_CELLS`.
    #[inline]
    #[must_use]
    pub fn cell(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    /// Glyph of local cell `index`.
    #[inline]
    #[must_use]
    pub fn glyph(&self, index: usize) -> Option<char> {
        self.cells.get(index).and_then(Cell::glyph)
    }

    /// Cell at a grid position, if it lies in this supertile.
    #[must_use]
    pub fn cell_at(&self, pos: GridPosition) -> Option<&Cell> {
        local_index(pos - self.position.center()).map(|index| &self.cells[index])
    }

    /// Number of cells holding a glyph.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Cells as raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.cells)
    }
}
