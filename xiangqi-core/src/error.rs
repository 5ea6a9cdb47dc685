//! Core error types

/// Errors raised when converting outside values into core types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Coordinates fall outside the 10x9 grid.
    #[error("square ({row}, {col}) is off the board")]
    OutOfBounds { row: i32, col: i32 },

    /// A difficulty label that is not normal, hard or hell.
    #[error("unknown tier: {0}")]
    UnknownTier(String),

    /// A snapshot whose shape is not 10 rows of 9 cells.
    #[error("snapshot has wrong shape: {rows} rows, widest row {cols}")]
    BadSnapshot { rows: usize, cols: usize },
}
