//! Puzzle compiler and decoder: turns a board/piece description into an
//! exact cover schema (using [`crate::placement`]) and maps solver output
//! back into piece placements.

use std::collections::HashMap;
use std::fmt;

use log::{info, warn};

use crate::dlx::{self, DancingLinks};
use crate::error::{InternalError, InternalResult, SchemaResult};
use crate::placement::Placement;
use crate::util::{check_disjoint, check_distinct, check_subset};

/// A placeable shape that knows how to generate its own legal placements
/// against a board.
pub trait Piece: fmt::Debug {
    fn name(&self) -> &str;
    fn placements(&self, board: &dyn Board) -> Vec<Placement>;
}

/// A board's atom and piece inventories, and its coordinate-to-atom-name
/// mapping used during placement enumeration.
pub trait Board {
    /// Pieces that must be placed exactly once.
    fn primary_pieces(&self) -> &[Box<dyn Piece>];
    /// Pieces that may be placed at most once.
    fn secondary_pieces(&self) -> &[Box<dyn Piece>];
    /// Pieces that may be placed any number of times, including zero.
    fn tertiary_pieces(&self) -> &[Box<dyn Piece>];
    /// Atoms that must be covered exactly once across the whole solution.
    fn primary_atoms(&self) -> &[String];
    /// Atoms that may be covered at most once across the whole solution.
    fn secondary_atoms(&self) -> &[String];
    /// The board's extent, used to bound placement enumeration.
    fn dims(&self) -> (usize, usize);
    /// The primary atom name occupying cell `(i, j)`, or `None` if that
    /// cell is off-board or not part of the primary coverage universe.
    fn primary_atom_at(&self, i: i64, j: i64) -> Option<String>;
}

/// One piece placed on the board, as decoded from a solver solution.
#[derive(Clone, Debug)]
pub struct PlacedPiece {
    pub piece_name: String,
    pub placement: Placement,
}

/// A complete solution: every primary piece placed exactly once, secondary
/// pieces at most once, tertiary pieces zero or more times, covering every
/// primary atom exactly once and every secondary atom at most once.
#[derive(Clone, Debug)]
pub struct Solution {
    pub placed: Vec<PlacedPiece>,
}

fn row_name(piece_name: &str, placement: &Placement) -> String {
    format!("{}_{}", piece_name, placement.name())
}

/// A compiled exact cover instance for a puzzle, ready to search.
pub struct PuzzleSolver {
    dlx: DancingLinks<String, String>,
    side_table: HashMap<String, (String, Placement)>,
    primary_piece_names: Vec<String>,
    secondary_piece_names: Vec<String>,
    primary_atoms: Vec<String>,
    secondary_atoms: Vec<String>,
}

impl PuzzleSolver {
    /// Compiles `board` into an exact cover schema: one primary column per
    /// primary atom, one secondary column per secondary atom, one primary
    /// key column per primary piece (forcing exactly-once placement), one
    /// secondary key column per secondary piece (allowing zero-or-one), and
    /// no key column for tertiary pieces. One row per legal placement of
    /// every piece, of any class.
    pub fn compile(board: &dyn Board) -> SchemaResult<Self> {
        Self::compile_inner(board).inspect_err(|e| warn!("PuzzleSolver::compile rejected board: {e}"))
    }

    fn compile_inner(board: &dyn Board) -> SchemaResult<Self> {
        let primary_piece_names: Vec<String> =
            board.primary_pieces().iter().map(|p| p.name().to_string()).collect();
        let secondary_piece_names: Vec<String> =
            board.secondary_pieces().iter().map(|p| p.name().to_string()).collect();
        let tertiary_piece_names: Vec<String> =
            board.tertiary_pieces().iter().map(|p| p.name().to_string()).collect();

        let all_piece_names: Vec<String> = primary_piece_names
            .iter()
            .chain(secondary_piece_names.iter())
            .chain(tertiary_piece_names.iter())
            .cloned()
            .collect();
        check_distinct(&all_piece_names)?;

        let primary_atoms: Vec<String> = board.primary_atoms().to_vec();
        let secondary_atoms: Vec<String> = board.secondary_atoms().to_vec();
        check_distinct(&primary_atoms)?;
        check_distinct(&secondary_atoms)?;
        check_disjoint(&primary_atoms, &secondary_atoms)?;

        let all_atoms: Vec<String> =
            primary_atoms.iter().chain(secondary_atoms.iter()).cloned().collect();

        let mut primary_cols = primary_atoms.clone();
        primary_cols.extend(primary_piece_names.iter().cloned());

        let mut secondary_cols = secondary_atoms.clone();
        secondary_cols.extend(secondary_piece_names.iter().cloned());

        let mut row_names = Vec::new();
        let mut entries: HashMap<String, Vec<String>> = HashMap::new();
        let mut side_table = HashMap::new();

        let all_pieces = board
            .primary_pieces()
            .iter()
            .map(|p| (p.as_ref(), true))
            .chain(board.secondary_pieces().iter().map(|p| (p.as_ref(), true)))
            .chain(board.tertiary_pieces().iter().map(|p| (p.as_ref(), false)));

        for (piece, has_key_column) in all_pieces {
            for placement in piece.placements(board) {
                check_subset(&placement.atoms, &all_atoms)?;

                let name = row_name(piece.name(), &placement);
                let mut cols = placement.atoms.clone();
                if has_key_column {
                    cols.push(piece.name().to_string());
                }

                row_names.push(name.clone());
                entries.insert(name.clone(), cols);
                side_table.insert(name, (piece.name().to_string(), placement));
            }
        }

        info!(
            "compiled puzzle: {} primary pieces, {} secondary pieces, {} tertiary pieces, \
             {} primary atoms, {} secondary atoms -> {} rows, {} columns",
            primary_piece_names.len(),
            secondary_piece_names.len(),
            tertiary_piece_names.len(),
            primary_atoms.len(),
            secondary_atoms.len(),
            row_names.len(),
            primary_cols.len() + secondary_cols.len(),
        );

        let dlx = DancingLinks::new(row_names, primary_cols, secondary_cols, entries)?;

        Ok(PuzzleSolver {
            dlx,
            side_table,
            primary_piece_names,
            secondary_piece_names,
            primary_atoms,
            secondary_atoms,
        })
    }

    /// Returns a lazy iterator over all solutions, each validated against
    /// the puzzle's structural contract before being yielded.
    pub fn solutions(&mut self) -> PuzzleSolutions<'_> {
        PuzzleSolutions {
            inner: self.dlx.solutions(),
            side_table: &self.side_table,
            primary_piece_names: &self.primary_piece_names,
            secondary_piece_names: &self.secondary_piece_names,
            primary_atoms: &self.primary_atoms,
            secondary_atoms: &self.secondary_atoms,
        }
    }
}

/// Lazy enumeration of a [`PuzzleSolver`]'s solutions.
pub struct PuzzleSolutions<'a> {
    inner: dlx::Solutions<'a, String, String>,
    side_table: &'a HashMap<String, (String, Placement)>,
    primary_piece_names: &'a [String],
    secondary_piece_names: &'a [String],
    primary_atoms: &'a [String],
    secondary_atoms: &'a [String],
}

impl<'a> Iterator for PuzzleSolutions<'a> {
    type Item = InternalResult<Solution>;

    fn next(&mut self) -> Option<Self::Item> {
        let rows = self.inner.next()?;
        let placed: Vec<PlacedPiece> = rows
            .into_iter()
            .map(|row| {
                let (piece_name, placement) = self
                    .side_table
                    .get(&row)
                    .expect("row name produced by solver must be present in side table")
                    .clone();
                PlacedPiece { piece_name, placement }
            })
            .collect();

        let solution = Solution { placed };
        Some(validate(
            solution,
            self.primary_piece_names,
            self.secondary_piece_names,
            self.primary_atoms,
            self.secondary_atoms,
        ))
    }
}

fn validate(
    solution: Solution,
    primary_piece_names: &[String],
    secondary_piece_names: &[String],
    primary_atoms: &[String],
    secondary_atoms: &[String],
) -> InternalResult<Solution> {
    let mut piece_counts: HashMap<&str, usize> = HashMap::new();
    let mut atom_counts: HashMap<&str, usize> = HashMap::new();

    for placed in &solution.placed {
        *piece_counts.entry(placed.piece_name.as_str()).or_insert(0) += 1;
        for atom in &placed.placement.atoms {
            *atom_counts.entry(atom.as_str()).or_insert(0) += 1;
        }
    }

    for name in primary_piece_names {
        if piece_counts.get(name.as_str()).copied().unwrap_or(0) != 1 {
            return Err(InternalError::InvalidSolution(format!(
                "primary piece '{name}' was not placed exactly once"
            )));
        }
    }
    for name in secondary_piece_names {
        if piece_counts.get(name.as_str()).copied().unwrap_or(0) > 1 {
            return Err(InternalError::InvalidSolution(format!(
                "secondary piece '{name}' was placed more than once"
            )));
        }
    }
    for atom in primary_atoms {
        if atom_counts.get(atom.as_str()).copied().unwrap_or(0) != 1 {
            return Err(InternalError::InvalidSolution(format!(
                "primary atom '{atom}' was not covered exactly once"
            )));
        }
    }
    for atom in secondary_atoms {
        if atom_counts.get(atom.as_str()).copied().unwrap_or(0) > 1 {
            return Err(InternalError::InvalidSolution(format!(
                "secondary atom '{atom}' was covered more than once"
            )));
        }
    }

    Ok(solution)
}
