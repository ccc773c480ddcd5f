//! Game rules for Connect-Four.
//!
//! Pure functions evaluating a board. Rules are kept apart from board
//! storage so the engine and the invariant checks can share them.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{check_winner, Direction};
