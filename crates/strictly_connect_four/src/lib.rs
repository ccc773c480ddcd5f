//! Strictly Connect Four - board and turn engine
//!
//! A gravity-drop grid with whole-board win and draw detection, wrapped in
//! a turn state machine that broadcasts every transition to observers.
//!
//! # Architecture
//!
//! - **Board**: cell store, placement, win/draw queries
//! - **Rules**: pure win and draw functions over a board
//! - **Engine**: `NotStarted -> InProgress -> Won | Draw` with restart
//! - **Observers**: weakly held callbacks notified in registration order
//! - **Invariants**: gravity, monotonic fill, turn alternation
//!
//! # Example
//!
//! ```
//! use strictly_connect_four::{EventLog, GameEngine, GameState, Player};
//!
//! let mut engine = GameEngine::default();
//! let log = EventLog::shared();
//! engine.subscribe(&log);
//!
//! engine.start();
//! let piece = engine.drop_piece(3).unwrap().unwrap();
//! assert_eq!(piece.row(), 6);
//! assert_eq!(engine.state(), GameState::InProgress(Player::Two));
//! assert_eq!(log.borrow().turns(), vec![Player::One, Player::Two]);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod engine;
mod error;
pub mod invariants;
mod observer;
pub mod rules;
mod types;

pub use board::{Board, BoardDimensions, DEFAULT_HEIGHT, DEFAULT_WIDTH, DEFAULT_WIN_LENGTH};
pub use engine::{GameEngine, GameState};
pub use error::{BoardError, EngineError};
pub use observer::{EventLog, GameEvent, GameObserver, ObserverId};
pub use types::{Piece, Player, Square};
