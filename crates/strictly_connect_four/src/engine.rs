//! Turn state machine wrapping a [`Board`].
//!
//! The engine owns the board, decides whose turn it is, and broadcasts
//! every transition to its observers before a command returns.

use super::board::{Board, BoardDimensions};
use super::error::EngineError;
use super::observer::{GameEvent, GameObserver, ObserverId, ObserverRegistry};
use super::types::{Piece, Player};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, instrument};

/// Phase of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameState {
    /// Waiting for `start`.
    #[default]
    NotStarted,
    /// Running; the player holds the turn.
    InProgress(Player),
    /// Finished with a winner.
    Won(Player),
    /// Finished with a full board and no winner.
    Draw,
}

impl GameState {
    /// Returns the player to move, if the game is running.
    pub fn current_player(&self) -> Option<Player> {
        match self {
            GameState::InProgress(player) => Some(*player),
            _ => None,
        }
    }

    /// Returns the winner, if the game was won.
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameState::Won(player) => Some(*player),
            _ => None,
        }
    }

    /// Returns true once the game has concluded.
    pub fn is_over(&self) -> bool {
        matches!(self, GameState::Won(_) | GameState::Draw)
    }

    /// Status line for display.
    pub fn describe(&self) -> String {
        match self {
            GameState::NotStarted => "Press start".to_string(),
            GameState::InProgress(player) => format!("{} to move", player),
            GameState::Won(player) => format!("{} won!!!", player),
            GameState::Draw => "Draw".to_string(),
        }
    }
}

/// Connect-Four turn engine.
///
/// Commands:
/// - [`GameEngine::start`]: `NotStarted` to `InProgress(One)`
/// - [`GameEngine::drop_piece`]: places for the current player and resolves
///   win, then draw, then alternation
/// - [`GameEngine::restart`]: fresh board and `InProgress(One)` from any state
///
/// Drops outside a running game are ignored without notification.
#[derive(Debug)]
pub struct GameEngine {
    pub(crate) dimensions: BoardDimensions,
    pub(crate) board: Board,
    pub(crate) state: GameState,
    pub(crate) history: Vec<Piece>,
    observers: ObserverRegistry,
}

impl GameEngine {
    /// Creates an engine in `NotStarted` with an empty board.
    #[instrument]
    pub fn new(dimensions: BoardDimensions) -> Self {
        Self {
            dimensions,
            board: Board::new(dimensions),
            state: GameState::NotStarted,
            history: Vec::new(),
            observers: ObserverRegistry::default(),
        }
    }

    /// Creates an engine, validating the raw dimensions first.
    #[instrument]
    pub fn with_size(width: usize, height: usize, win_length: usize) -> Result<Self, EngineError> {
        Ok(Self::new(BoardDimensions::new(width, height, win_length)?))
    }

    /// Registers an observer. It is held weakly and notified in registration order.
    ///
    /// Registering the same observer twice delivers every event to it twice.
    pub fn subscribe<O>(&mut self, observer: &Rc<RefCell<O>>) -> ObserverId
    where
        O: GameObserver + 'static,
    {
        let id = self.observers.subscribe(observer);
        debug!(?id, "Observer registered");
        id
    }

    /// Removes a registration. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Number of registered observers that are still alive.
    pub fn observer_count(&self) -> usize {
        self.observers.live_count()
    }

    /// Starts the game with player one to move.
    ///
    /// Only valid from `NotStarted`; otherwise ignored.
    #[instrument(skip(self), fields(state = ?self.state))]
    pub fn start(&mut self) {
        if self.state != GameState::NotStarted {
            debug!("Ignoring start, game already started");
            return;
        }
        self.begin();
    }

    /// Discards the board and starts a new game with player one to move.
    #[instrument(skip(self), fields(state = ?self.state))]
    pub fn restart(&mut self) {
        self.board = Board::new(self.dimensions);
        self.history.clear();
        self.begin();
    }

    /// Drops a piece for the current player into `column`.
    ///
    /// Returns the placed piece, or `Ok(None)` when the column is full or the
    /// game is not running. Only a bad column index is an error.
    #[instrument(skip(self), fields(state = ?self.state))]
    pub fn drop_piece(&mut self, column: usize) -> Result<Option<Piece>, EngineError> {
        let GameState::InProgress(player) = self.state else {
            debug!("Ignoring drop outside a running game");
            return Ok(None);
        };

        let placed = self.board.drop_piece(column, player)?;
        self.emit(GameEvent::PieceDropped(placed));

        let Some(piece) = placed else {
            debug!(column, "Drop rejected, column full");
            return Ok(None);
        };
        self.history.push(piece);

        if let Some(winner) = self.board.winner() {
            info!(?winner, moves = self.history.len(), "Game won");
            self.state = GameState::Won(winner);
            self.emit(GameEvent::GameWon(winner));
        } else if self.board.has_draw() {
            info!(moves = self.history.len(), "Game drawn");
            self.state = GameState::Draw;
            self.emit(GameEvent::GameDraw);
        } else {
            let next = self.next_turn();
            self.state = GameState::InProgress(next);
            self.emit(GameEvent::TurnChanged(next));
        }

        #[cfg(debug_assertions)]
        self.assert_invariants();

        Ok(Some(piece))
    }

    /// Row of the topmost piece in `column` (0 = top), `None` if the column is empty.
    ///
    /// Immediately after a successful drop this is that piece's landing row.
    /// Prefer [`Piece::row`] on the drop result.
    pub fn landing_row(&self, column: usize) -> Result<Option<usize>, EngineError> {
        let empty = self.board.column_empty_count(column)?;
        Ok((empty < self.board.height()).then_some(empty))
    }

    /// Returns the current phase.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Returns the player to move, if the game is running.
    pub fn current_player(&self) -> Option<Player> {
        self.state.current_player()
    }

    /// Returns true once the game has concluded.
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the board dimensions used for every new board.
    pub fn dimensions(&self) -> BoardDimensions {
        self.dimensions
    }

    /// Pieces placed since the last start, in order.
    pub fn history(&self) -> &[Piece] {
        &self.history
    }

    fn begin(&mut self) {
        self.state = GameState::InProgress(Player::One);
        info!("Game started");
        self.emit(GameEvent::GameStarted);
        self.emit(GameEvent::TurnChanged(Player::One));
    }

    fn next_turn(&self) -> Player {
        match self.state {
            GameState::InProgress(player) => player.opponent(),
            other => unreachable!("turn alternation requested while game is {:?}", other),
        }
    }

    fn emit(&mut self, event: GameEvent) {
        self.observers.broadcast(event);
    }

    #[cfg(debug_assertions)]
    fn assert_invariants(&self) {
        use super::invariants::{ConnectFourInvariants, InvariantSet};

        if let Err(violations) = ConnectFourInvariants::check_all(self) {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            panic!("Engine invariant violated: {}", descriptions);
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(BoardDimensions::default())
    }
}
