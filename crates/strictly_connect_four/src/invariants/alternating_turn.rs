//! Alternating turn invariant: players alternate One, Two, One, ...

use super::super::{GameEngine, GameState, Player};
use super::Invariant;

/// Invariant: players alternate turns, starting with player one.
///
/// While the game is running, the player to move must also match the
/// length of the history.
pub struct AlternatingTurnInvariant;

impl Invariant<GameEngine> for AlternatingTurnInvariant {
    fn holds(engine: &GameEngine) -> bool {
        let history = engine.history();

        if let Some(first) = history.first() {
            if first.player() != Player::One {
                return false;
            }
        }

        if history
            .windows(2)
            .any(|pair| pair[0].player() == pair[1].player())
        {
            return false;
        }

        match engine.state() {
            GameState::InProgress(to_move) => {
                let expected = if history.len() % 2 == 0 {
                    Player::One
                } else {
                    Player::Two
                };
                to_move == expected
            }
            GameState::NotStarted => history.is_empty(),
            GameState::Won(_) | GameState::Draw => true,
        }
    }

    fn description() -> &'static str {
        "Players alternate turns (One, Two, One, ...)"
    }
}
