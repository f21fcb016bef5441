//! # Coordinate Hierarchy
//!
//! ```text
//! GridPosition ─┬─> SupergridPosition ─> UltragridPosition ─> AssignmentPosition
//!               └─> local cell index       (12 × 12 supertiles)  (4 × 4 ultratiles)
//! ```
//!
//! Supertiles are hexagons of radius `R` centred on the lattice spanned by
//! `A = (2R+1, -R)` and `B = (R, R+1)`. The lattice determinant equals the
//! supertile cell count, so the hexagons tile the plane exactly. Lattice
//! coordinates form a hex grid of their own: the supertile across edge `k`
//! is the supergrid neighbor in direction `k`.
//!
//! Ultratiles and assignment regions are plain squares of the level below,
//! by floor division.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::constants::{
    ASSIGNMENT_SIZE, GRID_LIMIT, SLOTS_PER_ROW, SLOTS_PER_ULTRATILE, SUPERTILE_CELLS,
    SUPERTILE_RADIUS, ULTRATILE_SIZE,
};
use crate::hex::{local_index, local_offset, GridPosition};

/// Lattice basis vector `A`: center of supertile `(1, 0)`.
const BASIS_A: GridPosition = GridPosition::new(2 * SUPERTILE_RADIUS + 1, -SUPERTILE_RADIUS);

/// Lattice basis vector `B`: center of supertile `(0, 1)`.
const BASIS_B: GridPosition = GridPosition::new(SUPERTILE_RADIUS, SUPERTILE_RADIUS + 1);

/// Lattice determinant.
const DETERMINANT: i64 = SUPERTILE_CELLS as i64;

/// Boundary correction passes after rounding.
const CORRECTION_PASSES: usize = 3;

/// Rounds `num / DETERMINANT` to the nearest integer, halves upward.
#[inline]
const fn round_div(num: i64) -> i32 {
    (2 * num + DETERMINANT).div_euclid(2 * DETERMINANT) as i32
}

/// Position of a supertile on the supergrid.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Pod, Zeroable, Serialize,
    Deserialize,
)]
pub struct SupergridPosition {
    /// Lattice coordinate along `A`.
    pub x: i32,
    /// Lattice coordinate along `B`.
    pub y: i32,
}

impl SupergridPosition {
    /// Creates a supergrid position.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The supertile across edge `k`.
    #[inline]
    #[must_use]
    pub const fn neighbor(self, k: usize) -> Self {
        let d = GridPosition::direction(k);
        Self::new(self.x + d.x, self.y + d.y)
    }

    /// Grid position of the supertile's center cell.
    ///
    /// Exact for coordinates within [`SUPERGRID_LIMIT`](crate::constants::SUPERGRID_LIMIT).
    #[inline]
    #[must_use]
    pub const fn center(self) -> GridPosition {
        GridPosition::new(
            self.x * BASIS_A.x + self.y * BASIS_B.x,
            self.x * BASIS_A.y + self.y * BASIS_B.y,
        )
    }

    /// Grid position of local cell `index`.
    #[inline]
    #[must_use]
    pub const fn cell(self, index: usize) -> GridPosition {
        let c = self.center();
        let o = local_offset(index);
        GridPosition::new(c.x + o.x, c.y + o.y)
    }

    /// Supertile containing `pos`, and `pos`'s local cell index in it.
    ///
    /// `pos` must lie within [`GRID_LIMIT`] on both axes.
    #[must_use]
    pub fn locate(pos: GridPosition) -> (Self, usize) {
        let limit = GRID_LIMIT.unsigned_abs();
        debug_assert!(
            pos.x.unsigned_abs() <= limit && pos.y.unsigned_abs() <= limit,
            "grid position outside the addressable range"
        );
        let r = i64::from(SUPERTILE_RADIUS);
        let (x, y) = (i64::from(pos.x), i64::from(pos.y));
        let mut tile = Self::new(
            round_div((r + 1) * x - r * y),
            round_div(r * x + (2 * r + 1) * y),
        );

        // Rounding the skewed solution can land one tile off near corners.
        for _ in 0..CORRECTION_PASSES {
            if (pos - tile.center()).hex_len() <= SUPERTILE_RADIUS {
                break;
            }
            let mut best = tile;
            let mut best_len = i32::MAX;
            for k in 0..6 {
                let candidate = tile.neighbor(k);
                let len = (pos - candidate.center()).hex_len();
                if len < best_len {
                    best = candidate;
                    best_len = len;
                }
            }
            tile = best;
        }

        let local = local_index(pos - tile.center()).unwrap_or(SUPERTILE_CELLS / 2);
        (tile, local)
    }

    /// Ultratile containing this supertile.
    #[inline]
    #[must_use]
    pub const fn ultragrid(self) -> UltragridPosition {
        UltragridPosition::new(
            self.x.div_euclid(ULTRATILE_SIZE),
            self.y.div_euclid(ULTRATILE_SIZE),
        )
    }

    /// `(column, row)` of this supertile inside its ultratile.
    #[inline]
    #[must_use]
    pub const fn position_in_ultratile(self) -> (usize, usize) {
        (
            self.x.rem_euclid(ULTRATILE_SIZE) as usize,
            self.y.rem_euclid(ULTRATILE_SIZE) as usize,
        )
    }

    /// Row-major index of this supertile inside its ultratile.
    #[inline]
    #[must_use]
    pub const fn index_in_ultratile(self) -> usize {
        let (column, row) = self.position_in_ultratile();
        row * ULTRATILE_SIZE as usize + column
    }
}

/// Position of an ultratile: a 12 × 12 square of supertiles.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Pod, Zeroable, Serialize,
    Deserialize,
)]
pub struct UltragridPosition {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl UltragridPosition {
    /// Creates an ultragrid position.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Supertile at `index` (row-major) inside this ultratile.
    #[inline]
    #[must_use]
    pub const fn supertile(self, index: usize) -> SupergridPosition {
        let size = ULTRATILE_SIZE as usize;
        SupergridPosition::new(
            self.x * ULTRATILE_SIZE + (index % size) as i32,
            self.y * ULTRATILE_SIZE + (index / size) as i32,
        )
    }

    /// Assignment region containing this ultratile.
    #[inline]
    #[must_use]
    pub const fn assignment(self) -> AssignmentPosition {
        AssignmentPosition::new(
            self.x.div_euclid(ASSIGNMENT_SIZE),
            self.y.div_euclid(ASSIGNMENT_SIZE),
        )
    }

    /// Row-major index of this ultratile inside its assignment region.
    #[inline]
    #[must_use]
    pub const fn index_in_region(self) -> usize {
        let column = self.x.rem_euclid(ASSIGNMENT_SIZE) as usize;
        let row = self.y.rem_euclid(ASSIGNMENT_SIZE) as usize;
        row * ASSIGNMENT_SIZE as usize + column
    }
}

/// Position of an assignment region: a 4 × 4 square of ultratiles.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Pod, Zeroable, Serialize,
    Deserialize,
)]
pub struct AssignmentPosition {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl AssignmentPosition {
    /// Creates an assignment position.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Ultratile at `index` (row-major) inside this region.
    #[inline]
    #[must_use]
    pub const fn ultratile(self, index: usize) -> UltragridPosition {
        let size = ASSIGNMENT_SIZE as usize;
        UltragridPosition::new(
            self.x * ASSIGNMENT_SIZE + (index % size) as i32,
            self.y * ASSIGNMENT_SIZE + (index / size) as i32,
        )
    }
}

/// One slot of an assignment region.
///
/// Slots are numbered ultratile by ultratile; inside an ultratile the order
/// is `(row * 12 + column) * 3 + socket`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AssignmentSlot {
    /// Region the slot belongs to.
    pub region: AssignmentPosition,
    /// Index in `0..SLOTS_PER_REGION`.
    pub index: u32,
}

impl AssignmentSlot {
    /// Slot of canonical socket `socket` of supertile `supertile`.
    #[must_use]
    pub const fn of(supertile: SupergridPosition, socket: usize) -> Self {
        let ultratile = supertile.ultragrid();
        let within = supertile.index_in_ultratile() * 3 + socket;
        Self {
            region: ultratile.assignment(),
            index: (ultratile.index_in_region() * SLOTS_PER_ULTRATILE + within) as u32,
        }
    }

    /// Index of the slot's ultratile inside the region.
    #[inline]
    #[must_use]
    pub const fn ultratile_index(self) -> usize {
        self.index as usize / SLOTS_PER_ULTRATILE
    }

    /// Index of the slot inside its ultratile.
    #[inline]
    #[must_use]
    pub const fn index_in_ultratile(self) -> usize {
        self.index as usize % SLOTS_PER_ULTRATILE
    }

    /// Supertile row of the slot inside its ultratile.
    #[inline]
    #[must_use]
    pub const fn row(self) -> usize {
        self.index_in_ultratile() / SLOTS_PER_ROW
    }

    /// Position of the slot inside its row.
    #[inline]
    #[must_use]
    pub const fn position_in_row(self) -> usize {
        self.index_in_ultratile() % SLOTS_PER_ROW
    }
}

/// Full hierarchical address of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexAddress {
    /// Assignment region.
    pub assignment: AssignmentPosition,
    /// Ultratile inside the region, row-major `0..16`.
    pub ultratile: u8,
    /// Supertile inside the ultratile, row-major `0..144`.
    pub supertile: u8,
    /// Cell inside the supertile, `0..61`.
    pub cell: u8,
}

impl HexAddress {
    /// Resolves a grid position into its full address.
    #[must_use]
    pub fn from_grid(pos: GridPosition) -> Self {
        let (supertile, cell) = SupergridPosition::locate(pos);
        let ultratile = supertile.ultragrid();
        Self {
            assignment: ultratile.assignment(),
            ultratile: ultratile.index_in_region() as u8,
            supertile: supertile.index_in_ultratile() as u8,
            cell: cell as u8,
        }
    }

    /// Ultratile of this address.
    #[inline]
    #[must_use]
    pub const fn ultragrid(self) -> UltragridPosition {
        self.assignment.ultratile(self.ultratile as usize)
    }

    /// Supertile of this address.
    #[inline]
    #[must_use]
    pub const fn supergrid(self) -> SupergridPosition {
        self.ultragrid().supertile(self.supertile as usize)
    }

    /// Rebuilds the grid position. Exact inverse of [`Self::from_grid`].
    #[inline]
    #[must_use]
    pub const fn to_grid(self) -> GridPosition {
        self.supergrid().cell(self.cell as usize)
    }
}

impl From<GridPosition> for HexAddress {
    fn from(pos: GridPosition) -> Self {
        Self::from_grid(pos)
    }
}
