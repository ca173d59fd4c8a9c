//! A generalized exact cover solver (dancing links / Algorithm X) and a
//! geometric reduction layer for polyomino placement puzzles.
//!
//! [`dlx`] is the reusable kernel: a sparse-matrix cover structure with
//! primary ("exactly once") and secondary ("at most once") columns, and a
//! lazy solver over it. [`placement`] and [`puzzle`] build on top of it to
//! turn a board-and-pieces description into an exact cover instance and
//! decode solver output back into placements. [`fixtures`] supplies demo
//! and Kanoodle boards used by this crate's own tests and benchmarks.

pub mod dlx;
pub mod error;
pub mod placement;
pub mod puzzle;
mod util;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

pub use dlx::DancingLinks;
pub use error::{InternalError, SchemaError};
pub use puzzle::{Board, Piece, PuzzleSolver, Solution};
