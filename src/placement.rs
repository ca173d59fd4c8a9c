//! Polyomino geometry: rigid-motion orientations and placement enumeration.
//!
//! A [`Shape`] is a piece's cell offsets in its canonical orientation. Given
//! a board's extent, [`enumerate_placements`] walks every translation and
//! orientation, keeping only those that land entirely on the board and
//! deduplicating by occupied-cell set so that symmetric pieces don't yield
//! the same physical placement twice under different orientation labels.

use std::collections::HashSet;
use std::fmt;

/// One of the eight rigid motions available to a polyomino placement: the
/// four rotations, and the same four composed with a flip across the
/// *i*-axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Orientation {
    U,
    R,
    D,
    L,
    FU,
    FR,
    FD,
    FL,
}

impl Orientation {
    pub const ALL: [Orientation; 8] = [
        Orientation::U,
        Orientation::R,
        Orientation::D,
        Orientation::L,
        Orientation::FU,
        Orientation::FR,
        Orientation::FD,
        Orientation::FL,
    ];

    /// Applies this orientation's transform to a shape-local `(i, j)` pair.
    fn apply(self, (i, j): (i64, i64)) -> (i64, i64) {
        let (i, j) = match self {
            Orientation::U | Orientation::R | Orientation::D | Orientation::L => (i, j),
            Orientation::FU | Orientation::FR | Orientation::FD | Orientation::FL => (-i, j),
        };
        match self {
            Orientation::U | Orientation::FU => (i, j),
            Orientation::R | Orientation::FR => (j, -i),
            Orientation::D | Orientation::FD => (-i, -j),
            Orientation::L | Orientation::FL => (-j, i),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Orientation::U => "U",
            Orientation::R => "R",
            Orientation::D => "D",
            Orientation::L => "L",
            Orientation::FU => "FU",
            Orientation::FR => "FR",
            Orientation::FD => "FD",
            Orientation::FL => "FL",
        };
        f.write_str(s)
    }
}

/// A piece's shape: its cell offsets relative to a local origin, in the
/// canonical (unrotated, unflipped) orientation.
#[derive(Clone, Debug)]
pub struct Shape {
    offsets: Vec<(i64, i64)>,
}

impl Shape {
    pub fn new(offsets: Vec<(i64, i64)>) -> Self {
        Shape { offsets }
    }

    pub fn offsets(&self) -> &[(i64, i64)] {
        &self.offsets
    }

    /// The largest absolute coordinate magnitude across all offsets; used
    /// to bound the placement search window so that rotated/flipped copies
    /// of the shape can never be clipped by the window itself.
    fn radius(&self) -> i64 {
        self.offsets
            .iter()
            .flat_map(|&(i, j)| [i.abs(), j.abs()])
            .max()
            .unwrap_or(0)
    }
}

/// One legal placement of a piece: an anchor translation plus an
/// orientation, together with the board cells it occupies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub i: i64,
    pub j: i64,
    pub orientation: Orientation,
    pub cells: Vec<(i64, i64)>,
    pub atoms: Vec<String>,
}

impl Placement {
    /// A stable name for this placement, suitable as a suffix in a
    /// compiled exact-cover row name.
    pub fn name(&self) -> String {
        format!("{}_{}_{}", self.i, self.j, self.orientation)
    }
}

/// Enumerates every legal, deduplicated placement of `shape` against a
/// board whose cells are named by `lookup` and whose extent is `n` by `m`.
///
/// `lookup(i, j)` returns the atom name occupying board cell `(i, j)` if
/// that cell exists and is a primary atom; `None` otherwise (off-board or
/// not part of the primary coverage universe), which rejects the
/// placement. Deduplication is keyed on the sorted tuple of occupied atom
/// names, so two orientations that happen to cover the same cells under a
/// symmetric piece collapse to a single placement (the first-seen one, in
/// `(i, j, orientation)` lexicographic order).
pub fn enumerate_placements<F>(shape: &Shape, n: usize, m: usize, lookup: F) -> Vec<Placement>
where
    F: Fn(i64, i64) -> Option<String>,
{
    let bound = n.max(m) as i64;
    let r = shape.radius();

    let mut placements = Vec::new();
    let mut seen = HashSet::new();

    for i in -r..(bound + r) {
        for j in -r..(bound + r) {
            for orientation in Orientation::ALL {
                let mut cells = Vec::with_capacity(shape.offsets().len());
                let mut names = Vec::with_capacity(shape.offsets().len());
                let mut valid = true;

                for &offset in shape.offsets() {
                    let (di, dj) = orientation.apply(offset);
                    let (ci, cj) = (i + di, j + dj);
                    match lookup(ci, cj) {
                        Some(name) => {
                            names.push(name);
                            cells.push((ci, cj));
                        }
                        None => {
                            valid = false;
                            break;
                        }
                    }
                }

                if !valid {
                    continue;
                }

                let mut key = names.clone();
                key.sort();
                if !seen.insert(key) {
                    continue;
                }

                placements.push(Placement {
                    i,
                    j,
                    orientation,
                    cells,
                    atoms: names,
                });
            }
        }
    }

    placements
}
