//! Monotonic fill invariant: squares never change once set.

use super::super::{Board, GameEngine};
use super::Invariant;

/// Invariant: the board is exactly the result of replaying the move history.
///
/// Each recorded piece must land where it was recorded, so no square was
/// overwritten or cleared along the way.
pub struct MonotonicFillInvariant;

impl Invariant<GameEngine> for MonotonicFillInvariant {
    fn holds(engine: &GameEngine) -> bool {
        let mut reconstructed = Board::new(engine.dimensions());

        for piece in engine.history() {
            match reconstructed.drop_piece(piece.column(), piece.player()) {
                Ok(Some(landed)) if landed == *piece => {}
                _ => return false,
            }
        }

        reconstructed == *engine.board()
    }

    fn description() -> &'static str {
        "Board squares are monotonic (never overwritten)"
    }
}
