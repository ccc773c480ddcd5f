//! Core domain types for Connect-Four.

use serde::{Deserialize, Serialize};

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Player {
    /// First player (always opens the game).
    #[display("Player #1")]
    One,
    /// Second player.
    #[display("Player #2")]
    Two,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Human-readable label shown by shells.
    pub fn label(self) -> &'static str {
        match self {
            Player::One => "Player #1",
            Player::Two => "Player #2",
        }
    }

    /// Single-character token used in text renderings.
    pub fn token(self) -> char {
        match self {
            Player::One => '1',
            Player::Two => '2',
        }
    }
}

/// Content of one cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Unoccupied cell.
    #[default]
    Empty,
    /// Cell holding a player's piece.
    Occupied(Player),
}

impl Square {
    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }

    /// Returns true if no piece occupies this cell.
    pub fn is_empty(self) -> bool {
        matches!(self, Square::Empty)
    }

    /// Single-character token used in text renderings.
    pub fn token(self) -> char {
        match self {
            Square::Empty => '.',
            Square::Occupied(player) => player.token(),
        }
    }
}

/// A piece that landed on the board after a successful drop.
///
/// Carries the landing coordinate so observers never have to
/// re-derive it from the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_new::new,
)]
pub struct Piece {
    /// The player owning the piece.
    player: Player,
    /// Column the piece was dropped into.
    column: usize,
    /// Row the piece came to rest in (0 = top).
    row: usize,
}

impl Piece {
    /// Returns the player owning the piece.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Returns the column the piece was dropped into.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Returns the landing row (0 = top).
    pub fn row(&self) -> usize {
        self.row
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at column {}, row {}", self.player, self.column, self.row)
    }
}
