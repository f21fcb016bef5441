//! # Sockets
//!
//! A socket is the edge slot through which one word crosses from a supertile
//! into its neighbor. Socket `k` sits on the edge facing direction `k`.
//!
//! Each shared edge is owned by exactly one socket: sockets `0..3` are
//! canonical, and socket `k >= 3` defers to socket `k - 3` of the supertile
//! across that edge. Allocation only ever looks at canonical sockets, so no
//! edge is allocated twice.
//!
//! The anchor is the middle cell of the edge. The two anchors of a shared
//! edge are adjacent cells, so a word split between them reads straight
//! across the boundary.

use serde::{Deserialize, Serialize};

use crate::address::{AssignmentSlot, SupergridPosition};
use crate::constants::{CANONICAL_SOCKETS, SOCKET_COUNT, SUPERTILE_RADIUS};
use crate::hex::{local_index, GridPosition};

/// One of the six sockets of a supertile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Socket(u8);

impl Socket {
    /// All sockets in canonical processing order.
    pub const ALL: [Self; SOCKET_COUNT] = [
        Self(0),
        Self(1),
        Self(2),
        Self(3),
        Self(4),
        Self(5),
    ];

    /// Socket facing direction `k`, if `k < 6`.
    #[inline]
    #[must_use]
    pub const fn new(k: usize) -> Option<Self> {
        if k < SOCKET_COUNT {
            Some(Self(k as u8))
        } else {
            None
        }
    }

    /// Direction index this socket faces.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns true if this socket owns its edge.
    #[inline]
    #[must_use]
    pub const fn is_canonical(self) -> bool {
        (self.0 as usize) < CANONICAL_SOCKETS
    }

    /// The socket on the other side of the same edge.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self((self.0 + 3) % 6)
    }

    /// Anchor cell offset from the supertile center.
    #[inline]
    #[must_use]
    pub const fn anchor(self) -> GridPosition {
        let k = self.0 as usize;
        let along = GridPosition::direction(k);
        let across = GridPosition::direction(k + 2);
        GridPosition::new(
            along.x * SUPERTILE_RADIUS + across.x * (SUPERTILE_RADIUS / 2),
            along.y * SUPERTILE_RADIUS + across.y * (SUPERTILE_RADIUS / 2),
        )
    }

    /// Local cell index of the anchor.
    #[must_use]
    pub fn anchor_index(self) -> usize {
        // Anchors lie on the outer ring by construction.
        local_index(self.anchor()).unwrap_or(0)
    }

    /// The two directions that step from the anchor into the supertile.
    #[inline]
    #[must_use]
    pub const fn inward(self) -> [usize; 2] {
        let k = self.0 as usize;
        [(k + 3) % 6, (k + 4) % 6]
    }
}

/// A socket of a specific supertile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SocketRef {
    /// Supertile owning the socket.
    pub supertile: SupergridPosition,
    /// The socket.
    pub socket: Socket,
}

impl SocketRef {
    /// Creates a socket reference.
    #[inline]
    #[must_use]
    pub const fn new(supertile: SupergridPosition, socket: Socket) -> Self {
        Self { supertile, socket }
    }

    /// The same edge seen from the supertile across it.
    #[inline]
    #[must_use]
    pub const fn across(self) -> Self {
        Self::new(
            self.supertile.neighbor(self.socket.index()),
            self.socket.opposite(),
        )
    }

    /// The canonical socket owning this edge.
    #[inline]
    #[must_use]
    pub const fn canonical(self) -> Self {
        if self.socket.is_canonical() {
            self
        } else {
            self.across()
        }
    }

    /// Assignment slot of this edge.
    #[inline]
    #[must_use]
    pub const fn slot(self) -> AssignmentSlot {
        let owner = self.canonical();
        AssignmentSlot::of(owner.supertile, owner.socket.index())
    }

    /// Grid position of the anchor cell.
    #[inline]
    #[must_use]
    pub const fn anchor_position(self) -> GridPosition {
        let c = self.supertile.center();
        let a = self.socket.anchor();
        GridPosition::new(c.x + a.x, c.y + a.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchors_on_edge() {
        for socket in Socket::ALL {
            assert_eq!(socket.anchor().hex_len(), SUPERTILE_RADIUS);
            for dir in socket.inward() {
                let inside = socket.anchor().neighbor(dir);
                assert!(inside.hex_len() < SUPERTILE_RADIUS, "{socket:?} dir {dir}");
            }
        }
    }

    #[test]
    fn test_anchors_distinct() {
        let mut indices: Vec<usize> = Socket::ALL.iter().map(|s| s.anchor_index()).collect();
        indices.sort_unstable();
        indices.dedup();
        assert_eq!(indices.len(), SOCKET_COUNT);
    }

    #[test]
    fn test_shared_edge_anchors_adjacent() {
        let tile = SupergridPosition::new(-7, 3);
        for socket in Socket::ALL {
            let here = SocketRef::new(tile, socket);
            let there = here.across();
            let step = there.anchor_position() - here.anchor_position();
            assert_eq!(step.as_direction(), Some(socket.index()));
            assert_eq!(there.across(), here);
        }
    }

    #[test]
    fn test_canonical_owner_unique() {
        let tile = SupergridPosition::new(12, -1);
        for socket in Socket::ALL {
            let here = SocketRef::new(tile, socket);
            let owner = here.canonical();
            assert!(owner.socket.is_canonical());
            assert_eq!(owner, here.across().canonical());
            assert_eq!(here.slot(), here.across().slot());
        }
        assert_eq!(Socket::new(6), None);
    }
}
