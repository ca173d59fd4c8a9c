//! Demo and Kanoodle board fixtures.
//!
//! These exist to exercise [`crate::puzzle`] and [`crate::dlx`] end to end
//! without inventing a piece catalogue at every call site; they are not
//! part of the public solving surface. Shapes and board layouts mirror
//! `original_source/data_structures/{grid_puzzle,demo_puzzle,kanoodle}.py`.

use crate::placement::{enumerate_placements, Placement, Shape};
use crate::puzzle::{Board, Piece};

/// A polyomino piece on a rectangular grid board, identified by name and a
/// canonical-orientation offset list.
#[derive(Debug)]
pub struct GridPiece {
    name: String,
    shape: Shape,
}

impl GridPiece {
    pub fn new(name: impl Into<String>, offsets: Vec<(i64, i64)>) -> Self {
        GridPiece {
            name: name.into(),
            shape: Shape::new(offsets),
        }
    }

    fn small_l(name: impl Into<String>) -> Self {
        GridPiece::new(name, vec![(0, 0), (1, 0), (1, 1)])
    }

    fn big_l(name: impl Into<String>) -> Self {
        GridPiece::new(name, vec![(0, 0), (1, 0), (2, 0), (2, 1)])
    }

    fn t(name: impl Into<String>) -> Self {
        GridPiece::new(name, vec![(0, 0), (0, 1), (0, 2), (1, 1)])
    }

    fn two(name: impl Into<String>) -> Self {
        GridPiece::new(name, vec![(0, 0), (0, 1)])
    }

    fn three(name: impl Into<String>) -> Self {
        GridPiece::new(name, vec![(0, 0), (0, 1), (0, 2)])
    }

    fn four(name: impl Into<String>) -> Self {
        GridPiece::new(name, vec![(0, 0), (0, 1), (0, 2), (0, 3)])
    }
}

impl Piece for GridPiece {
    fn name(&self) -> &str {
        &self.name
    }

    fn placements(&self, board: &dyn Board) -> Vec<Placement> {
        let (n, m) = board.dims();
        enumerate_placements(&self.shape, n, m, |i, j| board.primary_atom_at(i, j))
    }
}

/// A rectangular board whose entire cell grid is the primary atom
/// universe, with pieces partitioned into primary, secondary, and
/// tertiary classes.
pub struct GridBoard {
    n: usize,
    m: usize,
    primary_pieces: Vec<Box<dyn Piece>>,
    secondary_pieces: Vec<Box<dyn Piece>>,
    tertiary_pieces: Vec<Box<dyn Piece>>,
    primary_atoms: Vec<String>,
}

impl GridBoard {
    fn new(
        n: usize,
        m: usize,
        primary_pieces: Vec<Box<dyn Piece>>,
        secondary_pieces: Vec<Box<dyn Piece>>,
        tertiary_pieces: Vec<Box<dyn Piece>>,
    ) -> Self {
        let mut primary_atoms = Vec::with_capacity(n * m);
        for i in 0..n {
            for j in 0..m {
                primary_atoms.push(format!("{i},{j}"));
            }
        }
        GridBoard {
            n,
            m,
            primary_pieces,
            secondary_pieces,
            tertiary_pieces,
            primary_atoms,
        }
    }
}

impl Board for GridBoard {
    fn primary_pieces(&self) -> &[Box<dyn Piece>] {
        &self.primary_pieces
    }

    fn secondary_pieces(&self) -> &[Box<dyn Piece>] {
        &self.secondary_pieces
    }

    fn tertiary_pieces(&self) -> &[Box<dyn Piece>] {
        &self.tertiary_pieces
    }

    fn primary_atoms(&self) -> &[String] {
        &self.primary_atoms
    }

    fn secondary_atoms(&self) -> &[String] {
        &[]
    }

    fn dims(&self) -> (usize, usize) {
        (self.n, self.m)
    }

    fn primary_atom_at(&self, i: i64, j: i64) -> Option<String> {
        if i >= 0 && j >= 0 && (i as usize) < self.n && (j as usize) < self.m {
            Some(format!("{i},{j}"))
        } else {
            None
        }
    }
}

/// 3x3 board, small-L + T + domino, all primary. Exactly tiles the board.
pub fn demo_board_1() -> GridBoard {
    GridBoard::new(
        3,
        3,
        vec![
            Box::new(GridPiece::small_l("small_l")),
            Box::new(GridPiece::t("t")),
            Box::new(GridPiece::two("domino")),
        ],
        vec![],
        vec![],
    )
}

/// 3x3 board, small-L + T + tromino, all primary: 10 cells of piece area
/// over a 9-cell board, so no exact cover exists.
pub fn demo_board_2() -> GridBoard {
    GridBoard::new(
        3,
        3,
        vec![
            Box::new(GridPiece::small_l("small_l")),
            Box::new(GridPiece::t("t")),
            Box::new(GridPiece::three("tromino")),
        ],
        vec![],
        vec![],
    )
}

/// 4x3 board, small-L + T + domino + tromino, all primary. Exactly tiles
/// the board (3 + 4 + 2 + 3 = 12 cells).
pub fn demo_board_3() -> GridBoard {
    GridBoard::new(
        4,
        3,
        vec![
            Box::new(GridPiece::small_l("small_l")),
            Box::new(GridPiece::t("t")),
            Box::new(GridPiece::two("domino")),
            Box::new(GridPiece::three("tromino")),
        ],
        vec![],
        vec![],
    )
}

/// 3x2 board, 7 secondary pieces: each may be placed at most once, and a
/// solution is any selection of non-overlapping placements that exactly
/// tiles the 6-cell board.
pub fn demo_board_4() -> GridBoard {
    GridBoard::new(
        3,
        2,
        vec![],
        vec![
            Box::new(GridPiece::small_l("small_l")),
            Box::new(GridPiece::big_l("big_l")),
            Box::new(GridPiece::t("t")),
            Box::new(GridPiece::two("domino_a")),
            Box::new(GridPiece::two("domino_b")),
            Box::new(GridPiece::three("tromino")),
            Box::new(GridPiece::four("tetromino")),
        ],
        vec![],
    )
}

/// 3x2 board, one tertiary domino: the domino may be placed any number of
/// times, so a solution is any exact domino tiling of the 6-cell board.
pub fn demo_board_5() -> GridBoard {
    GridBoard::new(3, 2, vec![], vec![], vec![Box::new(GridPiece::two("domino"))])
}

fn kanoodle_pieces() -> Vec<Box<dyn Piece>> {
    vec![
        Box::new(GridPiece::new("A", vec![(0, 0), (1, 0), (1, 1), (1, 2)])),
        Box::new(GridPiece::new("B", vec![(0, 0), (0, 1), (1, 0), (1, 1), (1, 2)])),
        Box::new(GridPiece::new("C", vec![(0, 0), (1, 0), (1, 1), (1, 2), (1, 3)])),
        Box::new(GridPiece::new("D", vec![(0, 1), (1, 0), (1, 1), (1, 2), (1, 3)])),
        Box::new(GridPiece::new("E", vec![(0, 0), (0, 1), (1, 1), (1, 2), (1, 3)])),
        Box::new(GridPiece::new("F", vec![(0, 0), (1, 0), (1, 1)])),
        Box::new(GridPiece::new("G", vec![(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)])),
        Box::new(GridPiece::new("H", vec![(0, 0), (1, 0), (1, 1), (2, 1), (2, 2)])),
        Box::new(GridPiece::new("I", vec![(0, 0), (0, 1), (1, 0), (2, 0), (2, 1)])),
        Box::new(GridPiece::new("J", vec![(0, 0), (0, 1), (0, 2), (0, 3)])),
        Box::new(GridPiece::new("K", vec![(0, 0), (0, 1), (1, 0), (1, 1)])),
        Box::new(GridPiece::new("L", vec![(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)])),
    ]
}

/// The 11x5 Kanoodle board: 12 primary pieces (A..L; 3 tetrominoes, 1
/// tromino, 8 pentominoes, 12 + 3 + 40 = 55 cells) exactly tiling the
/// 55-cell board.
pub fn kanoodle_board() -> GridBoard {
    GridBoard::new(11, 5, kanoodle_pieces(), vec![], vec![])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::PuzzleSolver;

    #[test]
    fn demo_board_1_has_eight_solutions() {
        let board = demo_board_1();
        let mut solver = PuzzleSolver::compile(&board).unwrap();
        assert_eq!(solver.solutions().count(), 8);
    }

    #[test]
    fn demo_board_2_is_overconstrained() {
        let board = demo_board_2();
        let mut solver = PuzzleSolver::compile(&board).unwrap();
        assert_eq!(solver.solutions().count(), 0);
    }

    #[test]
    fn demo_board_3_has_twenty_eight_solutions() {
        let board = demo_board_3();
        let mut solver = PuzzleSolver::compile(&board).unwrap();
        assert_eq!(solver.solutions().count(), 28);
    }

    #[test]
    fn demo_board_4_has_ten_solutions() {
        let board = demo_board_4();
        let mut solver = PuzzleSolver::compile(&board).unwrap();
        assert_eq!(solver.solutions().count(), 10);
    }

    #[test]
    fn demo_board_5_has_three_domino_tilings() {
        let board = demo_board_5();
        let mut solver = PuzzleSolver::compile(&board).unwrap();
        assert_eq!(solver.solutions().count(), 3);
    }

    #[test]
    fn kanoodle_board_has_at_least_one_solution() {
        let board = kanoodle_board();
        let mut solver = PuzzleSolver::compile(&board).unwrap();
        let first = solver.solutions().next();
        assert!(first.is_some());
        let solution = first.unwrap().unwrap();
        assert_eq!(solution.placed.len(), 12);
    }
}
