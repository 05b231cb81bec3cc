//! Error types raised by the grid and the engine

use thiserror::Error;

/// Recoverable errors reported by grid operations.
///
/// Whenever one of these is returned the grid it concerns is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("invalid grid dimensions {rows}x{columns}: both must be positive")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("cell ({row}, {col}) is out of bounds for a {rows}x{columns} grid")]
    OutOfBounds {
        row: isize,
        col: isize,
        rows: usize,
        columns: usize,
    },
}

pub type GridResult<T> = Result<T, GridError>;
