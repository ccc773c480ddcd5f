//! Observer notifications emitted by the game engine.
//!
//! Observers are registered as `Rc<RefCell<_>>` handles and held weakly:
//! the engine never keeps an observer alive. Dropped observers are pruned
//! before the next broadcast.

use super::types::{Piece, Player};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{instrument, trace};

/// A state transition broadcast to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new game began (after `start` or `restart`).
    GameStarted,
    /// It is now this player's turn.
    TurnChanged(Player),
    /// A drop was attempted; `None` means the column was full.
    PieceDropped(Option<Piece>),
    /// The game ended with a winner.
    GameWon(Player),
    /// The game ended with a full board and no winner.
    GameDraw,
}

/// Receiver of engine notifications.
///
/// Implement [`GameObserver::on_event`] to see every event, or override only
/// the per-event hooks of interest. Callbacks run synchronously inside the
/// engine command that produced them.
///
/// Calling back into the same engine from a callback through a shared
/// `RefCell` handle panics with a borrow error.
pub trait GameObserver {
    /// Receives an event. Dispatches to the per-event hooks by default.
    fn on_event(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::GameStarted => self.game_started(),
            GameEvent::TurnChanged(player) => self.turn_changed(player),
            GameEvent::PieceDropped(piece) => self.piece_dropped(piece),
            GameEvent::GameWon(player) => self.game_won(player),
            GameEvent::GameDraw => self.game_draw(),
        }
    }

    /// A new game began.
    fn game_started(&mut self) {}

    /// The turn passed to `player`.
    fn turn_changed(&mut self, _player: Player) {}

    /// A drop was attempted; `None` signals a full column.
    fn piece_dropped(&mut self, _piece: Option<Piece>) {}

    /// `player` completed a run.
    fn game_won(&mut self, _player: Player) {}

    /// The board filled up without a run.
    fn game_draw(&mut self) {}
}

/// Handle identifying a registration, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

/// Ordered list of weakly held observers.
#[derive(Default)]
pub(crate) struct ObserverRegistry {
    next_id: u64,
    entries: Vec<(ObserverId, Weak<RefCell<dyn GameObserver>>)>,
}

impl ObserverRegistry {
    /// Appends an observer. The same observer may be registered more than once.
    pub(crate) fn subscribe<O>(&mut self, observer: &Rc<RefCell<O>>) -> ObserverId
    where
        O: GameObserver + 'static,
    {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        let weak: Weak<RefCell<O>> = Rc::downgrade(observer);
        let weak: Weak<RefCell<dyn GameObserver>> = weak;
        self.entries.push((id, weak));
        id
    }

    /// Removes a registration. Returns false if the id is unknown.
    pub(crate) fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Number of registrations whose observer is still alive.
    pub(crate) fn live_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, weak)| weak.strong_count() > 0)
            .count()
    }

    /// Delivers `event` to every live observer in registration order.
    ///
    /// Dead entries are pruned up front; delivery walks a copy of the list.
    #[instrument(skip(self))]
    pub(crate) fn broadcast(&mut self, event: GameEvent) {
        self.entries.retain(|(_, weak)| weak.strong_count() > 0);

        let snapshot: Vec<Weak<RefCell<dyn GameObserver>>> =
            self.entries.iter().map(|(_, weak)| weak.clone()).collect();

        trace!(observers = snapshot.len(), "Broadcasting event");
        for weak in snapshot {
            if let Some(observer) = weak.upgrade() {
                observer.borrow_mut().on_event(&event);
            }
        }
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("registrations", &self.entries.len())
            .field("live", &self.live_count())
            .finish()
    }
}

/// Observer that records every event it receives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty log wrapped for registration.
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Events received so far, oldest first.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Removes and returns the recorded events.
    pub fn take(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Players announced by `TurnChanged`, in order.
    pub fn turns(&self) -> Vec<Player> {
        self.events
            .iter()
            .filter_map(|event| match event {
                GameEvent::TurnChanged(player) => Some(*player),
                _ => None,
            })
            .collect()
    }
}

impl GameObserver for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.push(*event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        started: usize,
        dropped: Vec<Option<Piece>>,
    }

    impl GameObserver for Counter {
        fn game_started(&mut self) {
            self.started += 1;
        }

        fn piece_dropped(&mut self, piece: Option<Piece>) {
            self.dropped.push(piece);
        }
    }

    #[test]
    fn test_default_dispatch_reaches_hooks() {
        let mut counter = Counter::default();
        counter.on_event(&GameEvent::GameStarted);
        counter.on_event(&GameEvent::PieceDropped(None));
        counter.on_event(&GameEvent::GameDraw);
        assert_eq!(counter.started, 1);
        assert_eq!(counter.dropped, vec![None]);
    }

    #[test]
    fn test_broadcast_in_registration_order() {
        let mut registry = ObserverRegistry::default();
        let first = EventLog::shared();
        let second = EventLog::shared();
        registry.subscribe(&first);
        registry.subscribe(&second);

        registry.broadcast(GameEvent::GameStarted);

        assert_eq!(first.borrow().events(), &[GameEvent::GameStarted]);
        assert_eq!(second.borrow().events(), &[GameEvent::GameStarted]);
    }

    #[test]
    fn test_duplicate_registration_duplicates_delivery() {
        let mut registry = ObserverRegistry::default();
        let log = EventLog::shared();
        registry.subscribe(&log);
        registry.subscribe(&log);

        registry.broadcast(GameEvent::GameDraw);

        assert_eq!(log.borrow().events().len(), 2);
    }

    #[test]
    fn test_dropped_observer_is_pruned() {
        let mut registry = ObserverRegistry::default();
        let kept = EventLog::shared();
        registry.subscribe(&kept);
        {
            let transient = EventLog::shared();
            registry.subscribe(&transient);
            assert_eq!(registry.live_count(), 2);
        }
        assert_eq!(registry.live_count(), 1);

        registry.broadcast(GameEvent::GameStarted);
        assert_eq!(registry.entries.len(), 1);
        assert_eq!(kept.borrow().events().len(), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let mut registry = ObserverRegistry::default();
        let log = EventLog::shared();
        let id = registry.subscribe(&log);

        assert!(registry.unsubscribe(id));
        assert!(!registry.unsubscribe(id));

        registry.broadcast(GameEvent::GameStarted);
        assert!(log.borrow().events().is_empty());
    }

    #[test]
    fn test_hook_only_observer_through_registry() {
        let mut registry = ObserverRegistry::default();
        let counter = Rc::new(RefCell::new(Counter::default()));
        let log = EventLog::shared();
        registry.subscribe(&counter);
        registry.subscribe(&log);

        registry.broadcast(GameEvent::GameStarted);
        registry.broadcast(GameEvent::PieceDropped(None));

        assert_eq!(counter.borrow().started, 1);
        assert_eq!(counter.borrow().dropped, vec![None]);
        assert_eq!(log.borrow().events().len(), 2);
    }

    #[test]
    fn test_event_json() {
        let event = GameEvent::PieceDropped(Some(Piece::new(Player::One, 0, 6)));
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"PieceDropped":{"player":"One","column":0,"row":6}}"#
        );
        assert_eq!(serde_json::from_str::<GameEvent>(&json).unwrap(), event);
        assert_eq!(
            serde_json::to_string(&GameEvent::PieceDropped(None)).unwrap(),
            r#"{"PieceDropped":null}"#
        );
    }
}
