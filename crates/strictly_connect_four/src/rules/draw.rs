//! Draw detection logic for Connect-Four.

use super::super::{Board, Square};
use super::win::check_winner;
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
///
/// A full board with no winner is a draw.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

/// Checks for a draw, giving a completed run precedence over a full board.
#[instrument(skip(board))]
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && check_winner(board).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Player;

    #[test]
    fn test_empty_board_not_full() {
        let board = Board::default();
        assert!(!is_full(&board));
    }

    #[test]
    fn test_partial_board_not_full() {
        let mut board = Board::default();
        board.drop_piece(4, Player::One).unwrap();
        assert!(!is_full(&board));
    }

    #[test]
    fn test_full_board_without_run_is_draw() {
        // A 3x1 strip filled 1-2-1 has no pair in a row.
        let mut board = Board::with_size(3, 1, 2).unwrap();
        board.drop_piece(0, Player::One).unwrap();
        board.drop_piece(1, Player::Two).unwrap();
        board.drop_piece(2, Player::One).unwrap();
        assert!(is_full(&board));
        assert!(is_draw(&board));
    }

    #[test]
    fn test_full_board_with_run_is_not_draw() {
        let mut board = Board::with_size(3, 1, 2).unwrap();
        board.drop_piece(0, Player::One).unwrap();
        board.drop_piece(1, Player::One).unwrap();
        board.drop_piece(2, Player::Two).unwrap();
        assert!(is_full(&board));
        assert!(!is_draw(&board));
    }
}
