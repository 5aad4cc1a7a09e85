//! Wires session, statistics, AI and observer together.
//!
//! The controller is the single owner of mutable game state. Every inbound
//! call runs to completion before the next. The AI's reply is deferred:
//! the controller issues an [`AiTicket`], the runtime waits out its delay,
//! then hands it back through [`GameController::run_ai_move`]. Anything that
//! replaces the position (undo, rematch, reset, a new start) revokes the
//! outstanding ticket, so a late timer cannot move on a fresh board.

use crate::{
    AiEngine, Board, Cell, Difficulty, GameError, GameObserver, GameResult, GameSession,
    GameStatus, Mark, Mode, Position, Statistics,
};
use derive_getters::Getters;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Pause before the AI answers, so a renderer can show the human's move first.
pub const DEFAULT_AI_DELAY: Duration = Duration::from_millis(600);

/// Controller knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, derive_new::new)]
pub struct ControllerSettings {
    /// Delay stamped on each [`AiTicket`].
    ai_delay: Duration,
    /// The human's mark in AI games.
    human_mark: Mark,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self::new(DEFAULT_AI_DELAY, Mark::X)
    }
}

/// Permission for one pending AI move.
///
/// Only the most recently issued ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Getters)]
pub struct AiTicket {
    /// Serial number, unique per controller.
    id: u64,
    /// How long to wait before redeeming.
    delay: Duration,
}

/// What an inbound move request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Input arrived when no move was expected and was dropped.
    Ignored,
    /// Mark placed, game goes on.
    Placed {
        /// Where.
        position: Position,
        /// Who.
        mark: Mark,
        /// Set when the AI moves next.
        ai_move: Option<AiTicket>,
    },
    /// Mark placed and the game ended.
    Finished(GameResult),
}

/// Game controller for one table.
#[derive(Debug, Getters)]
pub struct GameController<O: GameObserver> {
    /// The current session.
    session: GameSession,
    /// Lifetime statistics, kept across rematches.
    statistics: Statistics,
    #[getter(skip)]
    engine: AiEngine,
    /// The observer receiving notifications.
    observer: O,
    /// Delay and human mark in use.
    settings: ControllerSettings,
    /// The AI move waiting to be run, if any.
    #[getter(copy)]
    pending_ai: Option<AiTicket>,
    #[getter(skip)]
    tickets_issued: u64,
}

impl<O: GameObserver> GameController<O> {
    /// Creates a controller with an entropy-seeded AI.
    pub fn new(observer: O, settings: ControllerSettings) -> Self {
        Self::with_engine(observer, settings, AiEngine::new())
    }

    /// Creates a controller around a given AI engine.
    #[instrument(skip(observer, engine))]
    pub fn with_engine(observer: O, settings: ControllerSettings, engine: AiEngine) -> Self {
        Self {
            session: GameSession::new(*settings.human_mark()),
            statistics: Statistics::new(),
            engine,
            observer,
            settings,
            pending_ai: None,
            tickets_issued: 0,
        }
    }

    /// Returns the observer mutably.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Starts a session in `mode`.
    ///
    /// An AI game without `difficulty` waits for
    /// [`GameController::select_difficulty`]. Returns a ticket when the AI
    /// opens.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidModeTransition`] once a game is under way or over.
    #[instrument(skip(self))]
    pub fn start_session(
        &mut self,
        mode: Mode,
        difficulty: Option<Difficulty>,
    ) -> Result<Option<AiTicket>, GameError> {
        let before = *self.session.board();
        self.session.start(mode, difficulty)?;
        self.cancel_pending_ai();
        self.after_begin(&before)
    }

    /// Sets the AI difficulty and begins play.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidModeTransition`] unless an AI game is waiting for it.
    #[instrument(skip(self))]
    pub fn select_difficulty(&mut self, difficulty: Difficulty) -> Result<Option<AiTicket>, GameError> {
        let before = *self.session.board();
        self.session.select_difficulty(difficulty)?;
        self.cancel_pending_ai();
        self.after_begin(&before)
    }

    fn after_begin(&mut self, before: &Board) -> Result<Option<AiTicket>, GameError> {
        if self.session.status() != &GameStatus::InProgress {
            return Ok(None);
        }
        self.sync_board(before);
        self.observer.on_turn_changed(self.session.turn());
        Ok(self.schedule_ai())
    }

    /// A human picks cell `index` (0-8).
    ///
    /// Dropped as [`MoveOutcome::Ignored`] before play begins, after it has
    /// ended, or while the AI is due to move.
    ///
    /// # Errors
    ///
    /// [`GameError::CellOccupied`] or [`GameError::OutOfBounds`]. State is
    /// left untouched.
    #[instrument(skip(self), fields(status = self.session.status().name()))]
    pub fn select_cell(&mut self, index: usize) -> Result<MoveOutcome, GameError> {
        match self.session.status() {
            GameStatus::NotStarted | GameStatus::AwaitingDifficulty => {
                debug!("Cell selected before play began");
                return Ok(MoveOutcome::Ignored);
            }
            GameStatus::Won(_) | GameStatus::Draw => {
                debug!("Cell selected after the game ended");
                return Ok(MoveOutcome::Ignored);
            }
            GameStatus::InProgress => {}
        }
        if self.session.is_ai_turn() {
            debug!("Cell selected during the AI's turn");
            return Ok(MoveOutcome::Ignored);
        }
        self.apply(index)
    }

    /// A human presses a key. `'1'..='9'` pick cells in reading order.
    ///
    /// Anything that cannot be played right now is ignored.
    #[instrument(skip(self))]
    pub fn press_key(&mut self, key: char) -> MoveOutcome {
        if self.session.status() != &GameStatus::InProgress || self.session.is_ai_turn() {
            return MoveOutcome::Ignored;
        }
        let Some(position) = Position::from_key(key) else {
            return MoveOutcome::Ignored;
        };
        self.select_cell(position.to_index()).unwrap_or_else(|e| {
            debug!(error = %e, "Key press dropped");
            MoveOutcome::Ignored
        })
    }

    /// Plays the AI's move for `ticket`.
    ///
    /// A revoked or already used ticket is ignored.
    ///
    /// # Errors
    ///
    /// Only if the engine picks an illegal cell, which leaves state untouched.
    #[instrument(skip(self))]
    pub fn run_ai_move(&mut self, ticket: AiTicket) -> Result<MoveOutcome, GameError> {
        if self.pending_ai != Some(ticket) {
            debug!("Stale AI ticket ignored");
            return Ok(MoveOutcome::Ignored);
        }
        self.pending_ai = None;

        let Some(ai) = self.session.ai_mark().filter(|_| self.session.is_ai_turn()) else {
            return Ok(MoveOutcome::Ignored);
        };
        let Some(position) =
            self.engine
                .select_move(self.session.board(), ai, self.session.difficulty())
        else {
            warn!("AI found no empty cell");
            return Ok(MoveOutcome::Ignored);
        };
        self.apply(position.to_index())
    }

    /// Takes back the last move.
    ///
    /// In AI games this rewinds to the human's turn, popping the AI's reply
    /// as well when there is one. Returns a ticket if the AI is left to move,
    /// which happens when it opened the game.
    ///
    /// # Errors
    ///
    /// [`GameError::NoHistory`] with nothing to undo or once the game is over.
    #[instrument(skip(self))]
    pub fn request_undo(&mut self) -> Result<Option<AiTicket>, GameError> {
        let before = *self.session.board();
        self.session.undo()?;
        self.cancel_pending_ai();
        if self.session.is_ai_turn() && !self.session.history().is_empty() {
            self.session.undo()?;
        }

        self.sync_board(&before);
        self.observer.on_turn_changed(self.session.turn());
        Ok(self.schedule_ai())
    }

    /// Clears the board back to mode selection, keeping statistics.
    #[instrument(skip(self))]
    pub fn rematch(&mut self) {
        let before = *self.session.board();
        self.cancel_pending_ai();
        self.session.reset();
        self.sync_board(&before);
        info!(games_played = self.statistics.games_played(), "Rematch");
    }

    /// Like [`GameController::rematch`], and zeroes statistics too.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.rematch();
        self.statistics.reset();
        self.observer.on_statistics_changed(&self.statistics);
        info!("Statistics cleared");
    }

    /// Revokes the outstanding AI ticket.
    pub fn cancel_pending_ai(&mut self) {
        if let Some(ticket) = self.pending_ai.take() {
            debug!(ticket = ticket.id, "Pending AI move cancelled");
        }
    }

    fn apply(&mut self, index: usize) -> Result<MoveOutcome, GameError> {
        let placement = self.session.place(index)?;
        self.observer
            .on_cell_updated(placement.position, Cell::Marked(placement.mark));

        match placement.result {
            Some(result) => {
                match result.winner() {
                    Some(winner) => self.statistics.record_win(winner),
                    None => self.statistics.record_draw(),
                }
                self.observer.on_game_ended(&result);
                self.observer.on_statistics_changed(&self.statistics);
                Ok(MoveOutcome::Finished(result))
            }
            None => {
                self.observer.on_turn_changed(self.session.turn());
                Ok(MoveOutcome::Placed {
                    position: placement.position,
                    mark: placement.mark,
                    ai_move: self.schedule_ai(),
                })
            }
        }
    }

    fn schedule_ai(&mut self) -> Option<AiTicket> {
        if !self.session.is_ai_turn() {
            return None;
        }
        self.tickets_issued += 1;
        let ticket = AiTicket {
            id: self.tickets_issued,
            delay: self.settings.ai_delay,
        };
        debug!(ticket = ticket.id, "AI move scheduled");
        self.pending_ai = Some(ticket);
        Some(ticket)
    }

    /// Reports every cell that differs from `before`.
    fn sync_board(&mut self, before: &Board) {
        let after = *self.session.board();
        for position in Position::ALL {
            if before.get(position) != after.get(position) {
                self.observer.on_cell_updated(position, after.get(position));
            }
        }
    }
}
