//! # Geometry Constants
//!
//! Sizes of every level of the hierarchy. These values are baked into every
//! generated world: changing any of them changes all content.

// =============================================================================
// SUPERTILE
// =============================================================================

/// Hex radius of a supertile, in cells.
pub const SUPERTILE_RADIUS: i32 = 4;

/// Cells per supertile: `3R² + 3R + 1`.
pub const SUPERTILE_CELLS: usize =
    (3 * SUPERTILE_RADIUS * SUPERTILE_RADIUS + 3 * SUPERTILE_RADIUS + 1) as usize;

/// Rows in a supertile (`2R + 1`).
pub const SUPERTILE_ROWS: usize = (2 * SUPERTILE_RADIUS + 1) as usize;

// =============================================================================
// COORDINATE RANGE
// =============================================================================

/// Largest grid coordinate magnitude [`crate::SupergridPosition::locate`]
/// supports. Beyond it the supertile arithmetic leaves `i32`.
pub const GRID_LIMIT: i32 = i32::MAX / 2;

/// Largest supergrid coordinate magnitude whose cells all lie within
/// [`GRID_LIMIT`].
pub const SUPERGRID_LIMIT: i32 = GRID_LIMIT / (3 * SUPERTILE_RADIUS + 2);

// =============================================================================
// HIERARCHY
// =============================================================================

/// Supertiles along each side of an ultratile.
pub const ULTRATILE_SIZE: i32 = 12;

/// Supertiles per ultratile.
pub const SUPERTILES_PER_ULTRATILE: usize = (ULTRATILE_SIZE * ULTRATILE_SIZE) as usize;

/// Ultratiles along each side of an assignment region.
pub const ASSIGNMENT_SIZE: i32 = 4;

/// Ultratiles per assignment region.
pub const ULTRATILES_PER_REGION: usize = (ASSIGNMENT_SIZE * ASSIGNMENT_SIZE) as usize;

// =============================================================================
// SOCKETS & SLOTS
// =============================================================================

/// Sockets around a supertile, one per edge.
pub const SOCKET_COUNT: usize = 6;

/// Sockets that own their edge. The rest defer to a neighbor.
pub const CANONICAL_SOCKETS: usize = 3;

/// Assignment slots per supertile row of an ultratile.
pub const SLOTS_PER_ROW: usize = ULTRATILE_SIZE as usize * CANONICAL_SOCKETS;

/// Assignment slots per ultratile.
pub const SLOTS_PER_ULTRATILE: usize = SUPERTILES_PER_ULTRATILE * CANONICAL_SOCKETS;

/// Assignment slots per assignment region.
pub const SLOTS_PER_REGION: usize = SLOTS_PER_ULTRATILE * ULTRATILES_PER_REGION;

/// Most glyphs a socket word keeps on either side of its edge.
pub const SOCKET_SIDE_MAX: usize = 6;

/// Shortest word a socket carries.
pub const SOCKET_WORD_MIN: usize = 2;

/// Longest word a socket carries.
pub const SOCKET_WORD_MAX: usize = 2 * SOCKET_SIDE_MAX;

/// Largest multiplanar offset: inclusions borrow from one of this many
/// neighboring domains.
pub const MULTIPLANAR_OFFSETS: u8 = 4;

const _: () = assert!(SUPERTILE_CELLS == 61);
const _: () = assert!(SLOTS_PER_REGION == 6912);
const _: () = assert!(SUPERTILE_CELLS <= u8::MAX as usize);
