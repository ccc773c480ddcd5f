//! Error types for the Connect-Four engine.
//!
//! A full column is not an error: drops report it as `Ok(None)`.
//! Only caller mistakes (bad indices, impossible dimensions) surface here.

use derive_more::{Display, Error, From};

/// Error raised by board construction or board queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// The requested column does not exist.
    #[display("Column {} is out of range (board width {})", column, width)]
    ColumnOutOfRange {
        /// Column that was requested.
        column: usize,
        /// Board width.
        width: usize,
    },

    /// The requested row does not exist.
    #[display("Row {} is out of range (board height {})", row, height)]
    RowOutOfRange {
        /// Row that was requested.
        row: usize,
        /// Board height.
        height: usize,
    },

    /// The dimensions can never produce a winnable game.
    #[display(
        "Invalid dimensions {}x{} for win length {}",
        width,
        height,
        win_length
    )]
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
        /// Requested run length.
        win_length: usize,
    },

    /// Stored squares do not match the board dimensions.
    #[display("Board has wrong size: expected {} squares, found {}", expected, found)]
    SquareCountMismatch {
        /// Cells implied by the dimensions.
        expected: usize,
        /// Squares actually supplied.
        found: usize,
    },
}

/// Error raised by engine commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From)]
pub enum EngineError {
    /// The underlying board rejected the request.
    #[display("Board error: {}", _0)]
    Board(BoardError),
}
