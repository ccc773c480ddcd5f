//! Win detection logic for Connect-Four.

use super::super::{Board, Player, Square};
use strum::IntoEnumIterator;
use tracing::{instrument, trace};

/// Axis along which a run of pieces can be formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Direction {
    /// Left to right along a row.
    Horizontal,
    /// Top to bottom along a column.
    Vertical,
    /// Towards the bottom-right corner.
    DiagonalDownRight,
    /// Towards the bottom-left corner.
    DiagonalDownLeft,
}

impl Direction {
    /// Column and row step for one cell along this axis.
    pub fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (1, 0),
            Direction::Vertical => (0, 1),
            Direction::DiagonalDownRight => (1, 1),
            Direction::DiagonalDownLeft => (-1, 1),
        }
    }
}

/// Checks if there is a winner anywhere on the board.
///
/// Every cell is tried as the start of a run in each direction, so the
/// result does not depend on which piece was placed last.
/// Returns the owner of the first complete run found.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Player> {
    for row in 0..board.height() {
        for column in 0..board.width() {
            let Ok(Square::Occupied(player)) = board.cell_at(column, row) else {
                continue;
            };

            for direction in Direction::iter() {
                if run_from(board, column, row, direction, player) {
                    trace!(column, row, ?direction, ?player, "Winning run found");
                    return Some(player);
                }
            }
        }
    }

    None
}

/// Returns true if `win_length` cells starting at `(column, row)` along
/// `direction` all belong to `player`.
fn run_from(board: &Board, column: usize, row: usize, direction: Direction, player: Player) -> bool {
    let (dc, dr) = direction.step();

    (0..board.win_length()).all(|offset| {
        let offset = offset as isize;
        let c = column as isize + dc * offset;
        let r = row as isize + dr * offset;
        if c < 0 || r < 0 {
            return false;
        }
        matches!(
            board.cell_at(c as usize, r as usize),
            Ok(Square::Occupied(p)) if p == player
        )
    })
}
