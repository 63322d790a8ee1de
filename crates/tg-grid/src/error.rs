//! Grid-subsystem error type.

use thiserror::Error;

use tg_core::GridPos;

/// Errors produced by `tg-grid`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("{what} is {got_rows}x{got_cols}, expected {rows}x{cols}")]
    DimensionMismatch {
        what:     &'static str,
        rows:     usize,
        cols:     usize,
        got_rows: usize,
        got_cols: usize,
    },

    #[error("row {row} has {got} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, got: usize },

    #[error("requested {requested} cells but only {available} are eligible")]
    InsufficientRoadCells { requested: usize, available: usize },

    #[error("position {0} is outside the grid")]
    OutOfBounds(GridPos),

    #[error("row {0} is outside the grid")]
    RowOutOfRange(usize),

    #[error("column {0} is outside the grid")]
    ColOutOfRange(usize),
}

pub type GridResult<T> = Result<T, GridError>;
