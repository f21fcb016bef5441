//! # HEXLEX Shared
//!
//! Hex geometry for the word-search world:
//! - [`GridPosition`]: one cell of the unbounded axial grid
//! - Supertile layout: local cell indices and neighbors inside one patch
//! - The hierarchy: supertile ⊂ ultratile ⊂ assignment region
//! - Sockets: the edge slots through which words cross between supertiles
//!
//! Nothing here is random. Every conversion is exact and round-trips.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod address;
pub mod constants;
pub mod hex;
pub mod socket;

pub use address::{
    AssignmentPosition, AssignmentSlot, HexAddress, SupergridPosition, UltragridPosition,
};
pub use constants::{SUPERTILE_CELLS, SUPERTILE_RADIUS};
pub use hex::{GridPosition, DIRECTIONS};
pub use socket::{Socket, SocketRef};
