//! Gravity invariant: no piece floats above an empty square.

use super::super::{Board, GameEngine};
use super::Invariant;

/// Invariant: every column is filled contiguously from the bottom.
pub struct GravityInvariant;

impl Invariant<Board> for GravityInvariant {
    fn holds(board: &Board) -> bool {
        (0..board.width()).all(|column| {
            // Scanning top-down, once a piece is seen every square below must be occupied.
            let mut seen_piece = false;
            (0..board.height()).all(|row| {
                let occupied = matches!(board.cell_at(column, row), Ok(s) if !s.is_empty());
                if occupied {
                    seen_piece = true;
                }
                occupied || !seen_piece
            })
        })
    }

    fn description() -> &'static str {
        "Pieces rest on the bottom or on another piece"
    }
}

impl Invariant<GameEngine> for GravityInvariant {
    fn holds(engine: &GameEngine) -> bool {
        <Self as Invariant<Board>>::holds(engine.board())
    }

    fn description() -> &'static str {
        <Self as Invariant<Board>>::description()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Square};

    #[test]
    fn test_empty_board_holds() {
        assert!(<GravityInvariant as Invariant<Board>>::holds(&Board::default()));
    }

    #[test]
    fn test_stacked_pieces_hold() {
        let mut board = Board::default();
        for _ in 0..3 {
            board.drop_piece(6, Player::One).unwrap();
        }
        board.drop_piece(1, Player::Two).unwrap();
        assert!(<GravityInvariant as Invariant<Board>>::holds(&board));
    }

    #[test]
    fn test_floating_piece_violates() {
        let mut board = Board::default();
        let idx = 3 * board.width() + 2;
        board.squares_mut()[idx] = Square::Occupied(Player::One);
        assert!(!<GravityInvariant as Invariant<Board>>::holds(&board));
    }
}
