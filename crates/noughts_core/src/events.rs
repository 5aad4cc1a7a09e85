//! Notifications from the game to whatever renders it.

use crate::{Cell, GameResult, Mark, Position, Statistics};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::warn;

/// Receives state changes as they happen.
///
/// Every method defaults to doing nothing, so renderers only implement
/// what they draw.
pub trait GameObserver {
    /// A cell's content changed, including cells cleared by undo or rematch.
    fn on_cell_updated(&mut self, _position: Position, _cell: Cell) {}

    /// It is now `mark`'s turn.
    fn on_turn_changed(&mut self, _mark: Mark) {}

    /// The game was won or drawn.
    fn on_game_ended(&mut self, _result: &GameResult) {}

    /// Win, draw or streak counters changed.
    fn on_statistics_changed(&mut self, _stats: &Statistics) {}
}

impl GameObserver for () {}

impl<T: GameObserver + ?Sized> GameObserver for Box<T> {
    fn on_cell_updated(&mut self, position: Position, cell: Cell) {
        (**self).on_cell_updated(position, cell);
    }

    fn on_turn_changed(&mut self, mark: Mark) {
        (**self).on_turn_changed(mark);
    }

    fn on_game_ended(&mut self, result: &GameResult) {
        (**self).on_game_ended(result);
    }

    fn on_statistics_changed(&mut self, stats: &Statistics) {
        (**self).on_statistics_changed(stats);
    }
}

/// A notification as a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// See [`GameObserver::on_cell_updated`].
    CellUpdated {
        /// Which cell.
        position: Position,
        /// Its new content.
        cell: Cell,
    },
    /// See [`GameObserver::on_turn_changed`].
    TurnChanged {
        /// Whose turn it is.
        mark: Mark,
    },
    /// See [`GameObserver::on_game_ended`].
    GameEnded {
        /// How it ended.
        result: GameResult,
    },
    /// See [`GameObserver::on_statistics_changed`].
    StatisticsChanged {
        /// Counters after the change.
        stats: Statistics,
    },
}

/// Records every event in order.
impl GameObserver for Vec<GameEvent> {
    fn on_cell_updated(&mut self, position: Position, cell: Cell) {
        self.push(GameEvent::CellUpdated { position, cell });
    }

    fn on_turn_changed(&mut self, mark: Mark) {
        self.push(GameEvent::TurnChanged { mark });
    }

    fn on_game_ended(&mut self, result: &GameResult) {
        self.push(GameEvent::GameEnded { result: *result });
    }

    fn on_statistics_changed(&mut self, stats: &Statistics) {
        self.push(GameEvent::StatisticsChanged { stats: *stats });
    }
}

/// Forwards events to a channel, for renderers on another task.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<GameEvent>,
}

impl ChannelObserver {
    /// Creates an observer and the receiving end of its channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<GameEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, event: GameEvent) {
        if let Err(e) = self.tx.send(event) {
            warn!(event = ?e.0, "Event receiver dropped");
        }
    }
}

impl GameObserver for ChannelObserver {
    fn on_cell_updated(&mut self, position: Position, cell: Cell) {
        self.send(GameEvent::CellUpdated { position, cell });
    }

    fn on_turn_changed(&mut self, mark: Mark) {
        self.send(GameEvent::TurnChanged { mark });
    }

    fn on_game_ended(&mut self, result: &GameResult) {
        self.send(GameEvent::GameEnded { result: *result });
    }

    fn on_statistics_changed(&mut self, stats: &Statistics) {
        self.send(GameEvent::StatisticsChanged { stats: *stats });
    }
}
