//! # Socket Path Catalogue
//!
//! For each socket, every hex path a socket word half may follow: it starts
//! at the anchor, visits 1 to 6 distinct cells of the supertile, bends at
//! most twice, and never touches another socket's anchor. Anchors are thus
//! reserved for their own socket's word.
//!
//! The catalogue is built once per process.

use std::sync::OnceLock;

use hexlex_core::cohort;
use hexlex_shared::constants::{SOCKET_COUNT, SOCKET_SIDE_MAX};
use hexlex_shared::hex::local_neighbor;
use hexlex_shared::{Socket, SUPERTILE_CELLS};

/// Most direction changes along a path.
const MAX_BENDS: usize = 2;

/// Paths of one socket, grouped by cell count.
#[derive(Debug, Default)]
pub struct SocketPaths {
    by_length: [Vec<Box<[u8]>>; SOCKET_SIDE_MAX + 1],
}

impl SocketPaths {
    fn build(socket: Socket) -> Self {
        let anchors: Vec<usize> = Socket::ALL.iter().map(|s| s.anchor_index()).collect();
        let start = socket.anchor_index();
        let mut paths = Self::default();
        let mut cells = vec![start];
        paths.by_length[1].push(Box::from([start as u8]));
        for dir in 0..6 {
            extend(&mut paths, &mut cells, &anchors, dir, None, 0);
        }
        paths
    }

    /// Paths of exactly `len` cells.
    #[must_use]
    pub fn with_length(&self, len: usize) -> &[Box<[u8]>] {
        self.by_length.get(len).map_or(&[][..], Vec::as_slice)
    }

    /// Total number of paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_length.iter().map(Vec::len).sum()
    }

    /// Always false: the single-cell path exists for every socket.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Picks a path of `len` cells avoiding `occupied`, falling back to
    /// shorter paths. Candidates of each length are tried in shuffled order.
    #[must_use]
    pub fn select(&self, len: usize, occupied: &[bool; SUPERTILE_CELLS], seed: u32) -> Option<&[u8]> {
        for len in (1..=len.min(SOCKET_SIDE_MAX)).rev() {
            let candidates = self.with_length(len);
            let n = candidates.len() as u32;
            for k in 0..n {
                let path = &candidates[cohort::shuffle(k, n, seed ^ len as u32) as usize];
                if path.iter().all(|&c| !occupied[usize::from(c)]) {
                    return Some(path);
                }
            }
        }
        None
    }
}

fn extend(
    paths: &mut SocketPaths,
    cells: &mut Vec<usize>,
    anchors: &[usize],
    dir: usize,
    previous: Option<usize>,
    bends: usize,
) {
    let bends = match previous {
        Some(p) if p != dir => bends + 1,
        _ => bends,
    };
    if bends > MAX_BENDS || cells.len() >= SOCKET_SIDE_MAX {
        return;
    }
    let Some(&last) = cells.last() else {
        return;
    };
    let Some(next) = local_neighbor(last, dir) else {
        return;
    };
    if cells.contains(&next) || anchors.contains(&next) {
        return;
    }
    cells.push(next);
    paths.by_length[cells.len()].push(cells.iter().map(|&c| c as u8).collect());
    for turn in 0..6 {
        extend(paths, cells, anchors, turn, Some(dir), bends);
    }
    cells.pop();
}

/// The catalogue of `socket`.
#[must_use]
pub fn catalogue(socket: Socket) -> &'static SocketPaths {
    static CATALOGUE: OnceLock<[SocketPaths; SOCKET_COUNT]> = OnceLock::new();
    let all = CATALOGUE.get_or_init(|| Socket::ALL.map(SocketPaths::build));
    &all[socket.index()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexlex_shared::hex::local_offset;

    #[test]
    fn test_paths_are_connected_and_distinct() {
        for socket in Socket::ALL {
            let paths = catalogue(socket);
            assert!(!paths.is_empty());
            assert_eq!(paths.with_length(1).len(), 1);
            for len in 1..=SOCKET_SIDE_MAX {
                assert!(!paths.with_length(len).is_empty(), "socket {socket:?} len {len}");
                for path in paths.with_length(len) {
                    assert_eq!(path.len(), len);
                    assert_eq!(usize::from(path[0]), socket.anchor_index());
                    let mut sorted = path.to_vec();
                    sorted.sort_unstable();
                    sorted.dedup();
                    assert_eq!(sorted.len(), len);
                    for pair in path.windows(2) {
                        let step = local_offset(usize::from(pair[1])) - local_offset(usize::from(pair[0]));
                        assert_eq!(step.hex_len(), 1);
                    }
                }
            }
        }
    }

    #[test]
    fn test_paths_avoid_other_anchors() {
        for socket in Socket::ALL {
            for other in Socket::ALL.into_iter().filter(|&o| o != socket) {
                let anchor = other.anchor_index() as u8;
                for len in 1..=SOCKET_SIDE_MAX {
                    assert!(catalogue(socket).with_length(len).iter().all(|p| !p.contains(&anchor)));
                }
            }
        }
    }

    #[test]
    fn test_bends_bounded() {
        let paths = catalogue(Socket::ALL[0]);
        for path in paths.with_length(SOCKET_SIDE_MAX) {
            let dirs: Vec<_> = path
                .windows(2)
                .map(|p| {
                    (local_offset(usize::from(p[1])) - local_offset(usize::from(p[0])))
                        .as_direction()
                })
                .collect();
            let bends = dirs.windows(2).filter(|d| d[0] != d[1]).count();
            assert!(bends <= MAX_BENDS);
        }
    }

    #[test]
    fn test_select_avoids_occupied() {
        let socket = Socket::ALL[4];
        let paths = catalogue(socket);
        let mut occupied = [false; SUPERTILE_CELLS];
        let full = paths.select(6, &occupied, 3).unwrap();
        assert_eq!(full.len(), 6);

        // Block every neighbor of the anchor: only the anchor itself is left.
        let anchor = socket.anchor_index();
        for dir in 0..6 {
            if let Some(n) = local_neighbor(anchor, dir) {
                occupied[n] = true;
            }
        }
        assert_eq!(paths.select(6, &occupied, 3).unwrap(), &[anchor as u8][..]);

        occupied[anchor] = true;
        assert!(paths.select(6, &occupied, 3).is_none());
    }
}
