use thiserror::Error;

use crate::geometry::Cell;

/// Returned when a sequence of values is not a permutation of `1..=n`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermutationError {
    /// Some value is zero, larger than the length, or repeated.
    #[error("{values:?} is not a permutation of 1..={}", .values.len())]
    NotAPermutation {
        /// The rejected values.
        values: Vec<usize>,
    },
}

/// Returned when a shading does not fit the grid of its permutation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A shaded box lies outside `[0, n] x [0, n]`.
    #[error("box {cell:?} is outside the grid of a pattern of length {n}")]
    CellOutOfRange {
        /// The offending box.
        cell: Cell,
        /// Length of the pattern's permutation.
        n: usize,
    },
}

/// Reasons a containment search stopped before reaching an answer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The caller's cancellation flag was raised.
    #[error("containment search was cancelled")]
    Cancelled,
    /// The configured time limit ran out.
    #[error("containment search exceeded its time limit")]
    DeadlineExceeded,
}
