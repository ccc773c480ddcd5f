//! Shared fixtures for integration tests.

#![allow(dead_code)]

use strictly_connect_four::Player;

/// Owner of `(column, row)` in a full board with no run of four.
///
/// Columns come in pairs and rows alternate, so rows hold runs of two,
/// columns runs of one, and both diagonals runs of two.
pub fn draw_pattern(column: usize, row: usize) -> Player {
    if (column / 2 + row) % 2 == 0 {
        Player::One
    } else {
        Player::Two
    }
}

/// Column order filling an 8x7 board with `draw_pattern` while players
/// strictly alternate, starting with player one.
pub fn draw_order(width: usize, height: usize) -> Vec<usize> {
    let mut order = Vec::with_capacity(width * height);
    for row in (0..height).rev() {
        for block in (0..width).step_by(4) {
            let (first, second) = if draw_pattern(block, row) == Player::One {
                (block, block + 2)
            } else {
                (block + 2, block)
            };
            order.extend([first, second, first + 1, second + 1]);
        }
    }
    order
}
