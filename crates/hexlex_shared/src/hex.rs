//! # Hex Grid
//!
//! Axial hex coordinates and the cell layout of one supertile.
//!
//! ```text
//!        NW(0,-1)   NE(1,-1)
//!   W(-1,0)    cell      E(1,0)
//!        SW(-1,1)   SE(0,1)
//! ```
//!
//! Directions are numbered counter-clockwise from east; direction `k + 3` is
//! the opposite of direction `k`.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::constants::{SUPERTILE_CELLS, SUPERTILE_RADIUS, SUPERTILE_ROWS};

/// One cell of the unbounded hex grid, in axial coordinates.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Pod, Zeroable, Serialize,
    Deserialize,
)]
pub struct GridPosition {
    /// Column (the `q` axis).
    pub x: i32,
    /// Row (the `r` axis).
    pub y: i32,
}

/// The six axial unit offsets, counter-clockwise from east.
pub const DIRECTIONS: [GridPosition; 6] = [
    GridPosition::new(1, 0),
    GridPosition::new(1, -1),
    GridPosition::new(0, -1),
    GridPosition::new(-1, 0),
    GridPosition::new(-1, 1),
    GridPosition::new(0, 1),
];

impl GridPosition {
    /// The origin.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Creates a position.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Unit offset for direction `k` (taken modulo 6).
    #[inline]
    #[must_use]
    pub const fn direction(k: usize) -> Self {
        DIRECTIONS[k % 6]
    }

    /// The adjacent cell in direction `k`.
    #[inline]
    #[must_use]
    pub const fn neighbor(self, k: usize) -> Self {
        let d = Self::direction(k);
        Self::new(self.x + d.x, self.y + d.y)
    }

    /// `self + k * direction(dir)`.
    #[inline]
    #[must_use]
    pub const fn step(self, dir: usize, k: i32) -> Self {
        let d = Self::direction(dir);
        Self::new(self.x + d.x * k, self.y + d.y * k)
    }

    /// Hex distance from the origin.
    #[inline]
    #[must_use]
    pub const fn hex_len(self) -> i32 {
        let a = self.x.abs();
        let b = self.y.abs();
        let c = (self.x + self.y).abs();
        max(a, max(b, c))
    }

    /// Hex distance between two cells.
    #[inline]
    #[must_use]
    pub const fn distance(self, other: Self) -> i32 {
        Self::new(self.x - other.x, self.y - other.y).hex_len()
    }

    /// Direction index of a unit offset, if `self` is one.
    #[must_use]
    pub fn as_direction(self) -> Option<usize> {
        DIRECTIONS.iter().position(|&d| d == self)
    }

    /// The six neighbors, in direction order.
    #[must_use]
    pub fn neighbors(self) -> [Self; 6] {
        std::array::from_fn(|k| self.neighbor(k))
    }

    /// Every offset within hex distance `radius` of the origin, row by row.
    pub fn within(radius: i32) -> impl Iterator<Item = Self> {
        (-radius..=radius).flat_map(move |y| {
            let lo = max(-radius, -radius - y);
            let hi = min(radius, radius - y);
            (lo..=hi).map(move |x| Self::new(x, y))
        })
    }
}

impl std::ops::Add for GridPosition {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for GridPosition {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<i32> for GridPosition {
    type Output = Self;
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl std::ops::Neg for GridPosition {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

#[inline]
const fn max(a: i32, b: i32) -> i32 {
    if a > b {
        a
    } else {
        b
    }
}

#[inline]
const fn min(a: i32, b: i32) -> i32 {
    if a < b {
        a
    } else {
        b
    }
}

// =============================================================================
// SUPERTILE LAYOUT
// =============================================================================

/// Number of cells in supertile row `row` (`0..2R+1`, top to bottom).
#[inline]
#[must_use]
pub const fn row_width(row: usize) -> usize {
    let dy = row as i32 - SUPERTILE_RADIUS;
    (2 * SUPERTILE_RADIUS + 1 - dy.abs()) as usize
}

const fn build_row_starts() -> [usize; SUPERTILE_ROWS] {
    let mut starts = [0; SUPERTILE_ROWS];
    let mut row = 1;
    while row < SUPERTILE_ROWS {
        starts[row] = starts[row - 1] + row_width(row - 1);
        row += 1;
    }
    starts
}

const fn build_local_offsets() -> [GridPosition; SUPERTILE_CELLS] {
    let r = SUPERTILE_RADIUS;
    let mut out = [GridPosition::ORIGIN; SUPERTILE_CELLS];
    let mut i = 0;
    let mut y = -r;
    while y <= r {
        let mut x = max(-r, -r - y);
        while x <= min(r, r - y) {
            out[i] = GridPosition::new(x, y);
            i += 1;
            x += 1;
        }
        y += 1;
    }
    out
}

/// First local index of each supertile row.
const ROW_STARTS: [usize; SUPERTILE_ROWS] = build_row_starts();

/// Offset from the supertile center of each local cell, row-major.
pub const LOCAL_OFFSETS: [GridPosition; SUPERTILE_CELLS] = build_local_offsets();

/// Local index of an offset from a supertile center, if it lies inside.
#[inline]
#[must_use]
pub const fn local_index(offset: GridPosition) -> Option<usize> {
    let r = SUPERTILE_RADIUS;
    if offset.hex_len() > r {
        return None;
    }
    let row = (offset.y + r) as usize;
    let first_x = max(-r, -r - offset.y);
    Some(ROW_STARTS[row] + (offset.x - first_x) as usize)
}

/// Offset from the supertile center of local cell `index`.
///
/// # Panics
///
/// Panics if `index >= SUPERTILE_CELLS`.
#[inline]
#[must_use]
pub const fn local_offset(index: usize) -> GridPosition {
    LOCAL_OFFSETS[index]
}

/// Local index of the neighbor of cell `index` in direction `dir`, if that
/// neighbor is inside the same supertile.
#[inline]
#[must_use]
pub const fn local_neighbor(index: usize, dir: usize) -> Option<usize> {
    local_index(local_offset(index).neighbor(dir))
}

/// Returns true if cell `index` lies on the supertile's outer ring.
#[inline]
#[must_use]
pub const fn is_edge_cell(index: usize) -> bool {
    local_offset(index).hex_len() == SUPERTILE_RADIUS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directions_are_opposed() {
        for k in 0..6 {
            let d = DIRECTIONS[k];
            let back = DIRECTIONS[(k + 3) % 6];
            assert_eq!(d + back, GridPosition::ORIGIN);
            assert_eq!(d.hex_len(), 1);
            assert_eq!(d.as_direction(), Some(k));
        }
    }

    #[test]
    fn test_hex_distance() {
        let a = GridPosition::new(0, 0);
        assert_eq!(a.distance(GridPosition::new(3, -3)), 3);
        assert_eq!(a.distance(GridPosition::new(2, 2)), 4);
        assert_eq!(a.distance(GridPosition::new(-1, -2)), 3);
        assert_eq!(GridPosition::new(5, 1).distance(GridPosition::new(5, 1)), 0);
    }

    #[test]
    fn test_within_counts() {
        assert_eq!(GridPosition::within(0).count(), 1);
        assert_eq!(GridPosition::within(1).count(), 7);
        assert_eq!(GridPosition::within(SUPERTILE_RADIUS).count(), SUPERTILE_CELLS);
        assert!(GridPosition::within(3).all(|p| p.hex_len() <= 3));
    }

    #[test]
    fn test_local_layout_round_trip() {
        for index in 0..SUPERTILE_CELLS {
            let offset = local_offset(index);
            assert!(offset.hex_len() <= SUPERTILE_RADIUS);
            assert_eq!(local_index(offset), Some(index));
        }
        assert_eq!(local_index(GridPosition::new(SUPERTILE_RADIUS + 1, 0)), None);
        assert_eq!(local_offset(0), GridPosition::new(0, -SUPERTILE_RADIUS));
        assert_eq!(local_index(GridPosition::ORIGIN), Some(SUPERTILE_CELLS / 2));
    }

    #[test]
    fn test_row_widths() {
        let total: usize = (0..SUPERTILE_ROWS).map(row_width).sum();
        assert_eq!(total, SUPERTILE_CELLS);
        assert_eq!(row_width(0), SUPERTILE_RADIUS as usize + 1);
        assert_eq!(row_width(SUPERTILE_RADIUS as usize), 2 * SUPERTILE_RADIUS as usize + 1);
    }

    #[test]
    fn test_local_neighbors() {
        let center = SUPERTILE_CELLS / 2;
        for k in 0..6 {
            let n = local_neighbor(center, k).unwrap();
            assert_eq!(local_offset(n), DIRECTIONS[k]);
        }
        let edge_count = (0..SUPERTILE_CELLS).filter(|&i| is_edge_cell(i)).count();
        assert_eq!(edge_count, 6 * SUPERTILE_RADIUS as usize);
        // The top-left corner has no neighbor to the north-west.
        assert_eq!(local_neighbor(0, 2), None);
    }
}
