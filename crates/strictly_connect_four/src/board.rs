//! Gravity-based Connect-Four grid.

use super::error::BoardError;
use super::rules;
use super::types::{Piece, Player, Square};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, instrument};

/// Default board width in cells.
pub const DEFAULT_WIDTH: usize = 8;
/// Default board height in cells.
pub const DEFAULT_HEIGHT: usize = 7;
/// Default number of pieces in a row needed to win.
pub const DEFAULT_WIN_LENGTH: usize = 4;

/// Validated board dimensions.
///
/// Construction rejects zero-sized parameters and shapes where a run of
/// `win_length` cannot fit along any axis. A board that is too short in
/// one axis only is accepted, since runs along the other axis still fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BoardDimensions {
    width: usize,
    height: usize,
    win_length: usize,
}

impl BoardDimensions {
    /// Validates and creates board dimensions.
    #[instrument]
    pub fn new(width: usize, height: usize, win_length: usize) -> Result<Self, BoardError> {
        let invalid = BoardError::InvalidDimensions {
            width,
            height,
            win_length,
        };

        if width == 0 || height == 0 || win_length == 0 {
            return Err(invalid);
        }

        if width < win_length && height < win_length {
            return Err(invalid);
        }

        Ok(Self {
            width,
            height,
            win_length,
        })
    }

    /// Board width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Board height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pieces in a row required to win.
    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}

impl<'de> Deserialize<'de> for BoardDimensions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            width: usize,
            height: usize,
            win_length: usize,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.width, raw.height, raw.win_length).map_err(serde::de::Error::custom)
    }
}

impl Default for BoardDimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            win_length: DEFAULT_WIN_LENGTH,
        }
    }
}

/// A `width x height` grid of squares with gravity-drop placement.
///
/// Row 0 is the top; pieces settle at the lowest empty row of a column.
/// Squares only ever change from `Empty` to `Occupied`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    dimensions: BoardDimensions,
    /// Squares in row-major order, top row first.
    squares: Vec<Square>,
}

impl Board {
    /// Creates an empty board with the given dimensions.
    #[instrument]
    pub fn new(dimensions: BoardDimensions) -> Self {
        Self {
            dimensions,
            squares: vec![Square::Empty; dimensions.cell_count()],
        }
    }

    /// Creates an empty board, validating the raw dimensions first.
    #[instrument]
    pub fn with_size(width: usize, height: usize, win_length: usize) -> Result<Self, BoardError> {
        Ok(Self::new(BoardDimensions::new(width, height, win_length)?))
    }

    /// Returns the board dimensions.
    pub fn dimensions(&self) -> BoardDimensions {
        self.dimensions
    }

    /// Board width in cells.
    pub fn width(&self) -> usize {
        self.dimensions.width
    }

    /// Board height in cells.
    pub fn height(&self) -> usize {
        self.dimensions.height
    }

    /// Pieces in a row required to win.
    pub fn win_length(&self) -> usize {
        self.dimensions.win_length
    }

    /// Returns all squares in row-major order, top row first.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    #[cfg(test)]
    pub(crate) fn squares_mut(&mut self) -> &mut [Square] {
        &mut self.squares
    }

    /// Returns the square at `(column, row)`.
    pub fn cell_at(&self, column: usize, row: usize) -> Result<Square, BoardError> {
        self.check_column(column)?;
        if row >= self.height() {
            return Err(BoardError::RowOutOfRange {
                row,
                height: self.height(),
            });
        }
        Ok(self.squares[self.index(column, row)])
    }

    /// Drops a piece for `player` into `column`.
    ///
    /// Returns `Ok(None)` without touching the board when the column is full.
    #[instrument(skip(self))]
    pub fn drop_piece(&mut self, column: usize, player: Player) -> Result<Option<Piece>, BoardError> {
        self.check_column(column)?;

        for row in (0..self.height()).rev() {
            let idx = self.index(column, row);
            if self.squares[idx].is_empty() {
                self.squares[idx] = Square::Occupied(player);
                debug!(row, "Piece landed");
                return Ok(Some(Piece::new(player, column, row)));
            }
        }

        debug!("Column full, drop rejected");
        Ok(None)
    }

    /// Returns the owner of the first winning run found, scanning the whole board.
    #[instrument(skip(self))]
    pub fn winner(&self) -> Option<Player> {
        rules::check_winner(self)
    }

    /// Returns true if every square is occupied.
    ///
    /// Callers must check [`Board::winner`] first: a full board with a run is a win.
    #[instrument(skip(self))]
    pub fn has_draw(&self) -> bool {
        rules::is_full(self)
    }

    /// Counts the empty squares in `column`.
    pub fn column_empty_count(&self, column: usize) -> Result<usize, BoardError> {
        self.check_column(column)?;
        Ok((0..self.height())
            .filter(|&row| self.squares[self.index(column, row)].is_empty())
            .count())
    }

    /// Returns true if no more pieces fit in `column`.
    pub fn is_column_full(&self, column: usize) -> Result<bool, BoardError> {
        self.check_column(column)?;
        // Gravity keeps the top square the last one to fill.
        Ok(!self.squares[self.index(column, 0)].is_empty())
    }

    /// Columns that can still accept a piece, in ascending order.
    pub fn available_columns(&self) -> Vec<usize> {
        (0..self.width())
            .filter(|&column| self.squares[self.index(column, 0)].is_empty())
            .collect()
    }

    /// Number of occupied squares.
    pub fn occupied_count(&self) -> usize {
        self.squares.iter().filter(|s| !s.is_empty()).count()
    }

    fn check_column(&self, column: usize) -> Result<(), BoardError> {
        if column >= self.width() {
            return Err(BoardError::ColumnOutOfRange {
                column,
                width: self.width(),
            });
        }
        Ok(())
    }

    fn index(&self, column: usize, row: usize) -> usize {
        row * self.width() + column
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            dimensions: BoardDimensions,
            squares: Vec<Square>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let expected = raw.dimensions.cell_count();
        if raw.squares.len() != expected {
            return Err(serde::de::Error::custom(BoardError::SquareCountMismatch {
                expected,
                found: raw.squares.len(),
            }));
        }
        Ok(Self {
            dimensions: raw.dimensions,
            squares: raw.squares,
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardDimensions::default())
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.squares.chunks(self.width()) {
            let line: Vec<String> = row.iter().map(|s| s.token().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        let footer: Vec<String> = (1..=self.width()).map(|c| (c % 10).to_string()).collect();
        write!(f, "{}", footer.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::default();
        assert_eq!(board.width(), 8);
        assert_eq!(board.height(), 7);
        assert_eq!(board.win_length(), 4);
        assert!(board.squares().iter().all(|s| s.is_empty()));
    }

    #[test]
    fn test_drop_lands_on_bottom_row() {
        let mut board = Board::default();
        let piece = board.drop_piece(3, Player::One).unwrap().unwrap();
        assert_eq!(piece.row(), 6);
        assert_eq!(piece.column(), 3);
        assert_eq!(board.cell_at(3, 6).unwrap(), Square::Occupied(Player::One));
    }

    #[test]
    fn test_drops_stack_upward() {
        let mut board = Board::default();
        let rows: Vec<usize> = (0..7)
            .map(|_| board.drop_piece(0, Player::Two).unwrap().unwrap().row())
            .collect();
        assert_eq!(rows, vec![6, 5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_full_column_rejects_without_mutation() {
        let mut board = Board::with_size(4, 2, 2).unwrap();
        board.drop_piece(1, Player::One).unwrap();
        board.drop_piece(1, Player::Two).unwrap();
        let before = board.clone();

        assert_eq!(board.drop_piece(1, Player::One).unwrap(), None);
        assert_eq!(board, before);
        assert!(board.is_column_full(1).unwrap());
    }

    #[test]
    fn test_out_of_range_column() {
        let mut board = Board::default();
        assert_eq!(
            board.drop_piece(8, Player::One),
            Err(BoardError::ColumnOutOfRange { column: 8, width: 8 })
        );
        assert!(board.column_empty_count(9).is_err());
        assert!(board.cell_at(8, 0).is_err());
    }

    #[test]
    fn test_out_of_range_row() {
        let board = Board::default();
        assert_eq!(
            board.cell_at(0, 7),
            Err(BoardError::RowOutOfRange { row: 7, height: 7 })
        );
    }

    #[test]
    fn test_column_empty_count() {
        let mut board = Board::default();
        assert_eq!(board.column_empty_count(2).unwrap(), 7);
        board.drop_piece(2, Player::One).unwrap();
        board.drop_piece(2, Player::Two).unwrap();
        assert_eq!(board.column_empty_count(2).unwrap(), 5);
        assert_eq!(board.column_empty_count(3).unwrap(), 7);
    }

    #[test]
    fn test_available_columns_skip_full() {
        let mut board = Board::with_size(3, 1, 1).unwrap();
        board.drop_piece(1, Player::One).unwrap();
        assert_eq!(board.available_columns(), vec![0, 2]);
    }

    #[test]
    fn test_dimensions_validation() {
        assert!(BoardDimensions::new(0, 7, 4).is_err());
        assert!(BoardDimensions::new(8, 0, 4).is_err());
        assert!(BoardDimensions::new(8, 7, 0).is_err());
        assert!(BoardDimensions::new(3, 3, 4).is_err());
        // One long axis is enough for a horizontal run.
        assert!(BoardDimensions::new(5, 2, 4).is_ok());
        assert!(BoardDimensions::new(1, 1, 1).is_ok());
    }

    #[test]
    fn test_display() {
        let mut board = Board::with_size(3, 2, 2).unwrap();
        board.drop_piece(0, Player::One).unwrap();
        board.drop_piece(0, Player::Two).unwrap();
        board.drop_piece(2, Player::One).unwrap();
        assert_eq!(board.to_string(), "2 . .\n1 . 1\n1 2 3");
    }

    #[test]
    fn test_board_serde_round_trip() {
        let mut board = Board::with_size(5, 4, 3).unwrap();
        board.drop_piece(2, Player::One).unwrap();
        board.drop_piece(2, Player::Two).unwrap();

        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, board);
        assert_eq!(restored.cell_at(2, 2).unwrap(), Square::Occupied(Player::Two));
    }

    #[test]
    fn test_deserialize_rejects_invalid_dimensions() {
        for json in [
            r#"{"width":0,"height":7,"win_length":4}"#,
            r#"{"width":8,"height":0,"win_length":4}"#,
            r#"{"width":8,"height":7,"win_length":0}"#,
            r#"{"width":3,"height":3,"win_length":4}"#,
        ] {
            let err = serde_json::from_str::<BoardDimensions>(json).unwrap_err();
            assert!(err.to_string().contains("Invalid dimensions"), "{}", err);
        }

        let dims: BoardDimensions =
            serde_json::from_str(r#"{"width":8,"height":7,"win_length":4}"#).unwrap();
        assert_eq!(dims, BoardDimensions::default());
    }

    #[test]
    fn test_deserialize_rejects_wrong_square_count() {
        let json = r#"{"dimensions":{"width":8,"height":7,"win_length":4},"squares":[]}"#;
        let err = serde_json::from_str::<Board>(json).unwrap_err();
        assert!(err.to_string().contains("expected 56 squares, found 0"), "{}", err);

        let json = r#"{"dimensions":{"width":0,"height":7,"win_length":4},"squares":[]}"#;
        assert!(serde_json::from_str::<Board>(json).is_err());
    }
}
