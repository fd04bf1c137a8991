//! Error types for relaxation construction.

use thiserror::Error;

/// Errors raised while assembling relaxation data.
#[derive(Error, Debug)]
pub enum ProblemError {
    /// A vector's length disagrees with the matrix dimensions
    #[error("{context} has length {found}, expected {expected}")]
    DimensionMismatch {
        /// Which input vector is wrong
        context: &'static str,
        /// Length implied by the matrix dimensions
        expected: usize,
        /// Length actually supplied
        found: usize,
    },

    /// A triplet refers to a row or column outside the matrix
    #[error("entry ({row}, {col}) is out of bounds for a {num_rows}x{num_cols} matrix")]
    EntryOutOfBounds {
        /// Row index of the offending entry
        row: usize,
        /// Column index of the offending entry
        col: usize,
        /// Number of matrix rows
        num_rows: usize,
        /// Number of matrix columns
        num_cols: usize,
    },

    /// A coefficient is NaN or infinite
    #[error("non-finite coefficient {value} at ({row}, {col})")]
    NonFiniteCoefficient {
        /// Row index of the offending entry
        row: usize,
        /// Column index of the offending entry
        col: usize,
        /// The coefficient value
        value: f64,
    },

    /// A bound pair is inverted or NaN
    #[error("invalid {context} bounds [{lower}, {upper}] at index {index}")]
    InvalidBounds {
        /// "row" or "column"
        context: &'static str,
        /// Index of the offending row or column
        index: usize,
        /// Lower bound
        lower: f64,
        /// Upper bound
        upper: f64,
    },
}

/// Result type for relaxation construction.
pub type ProblemResult<T> = Result<T, ProblemError>;
