//! Error types for the exact cover solver and puzzle reduction layer.
//!
//! `SchemaError` is the caller's fault: bad names or a malformed schema,
//! caught during construction or puzzle compilation. `InternalError` should
//! never surface from a correct implementation; it marks a decoded solution
//! that failed its own structural postcheck.

use thiserror::Error;

/// A schema problem detected while constructing a [`crate::dlx::DancingLinks`]
/// instance or compiling a [`crate::puzzle::Board`] into one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A name that was required to be unique within its set appeared more
    /// than once.
    #[error("Expected 1 count for '{name}', found {count}")]
    DuplicateName { name: String, count: usize },

    /// A name appeared in two sets that were required to be disjoint.
    #[error("Overlapping elements found such as '{name}'")]
    Overlap { name: String },

    /// A name referenced somewhere was not declared in the set it should
    /// belong to.
    #[error("Extra elements found such as '{name}'")]
    UnknownElement { name: String },
}

/// An invariant violation inside the solver itself. Surfacing one of these
/// means the kernel produced a cover that doesn't satisfy its own exact
/// cover contract, which is a bug in this crate rather than in caller input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InternalError {
    #[error("decoded solution failed its structural check: {0}")]
    InvalidSolution(String),
}

pub type SchemaResult<T> = Result<T, SchemaError>;
pub type InternalResult<T> = Result<T, InternalError>;
