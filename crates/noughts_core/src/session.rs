//! The game session state machine.
//!
//! ```text
//! NotStarted --start(PvP)--------------------------------> InProgress
//! NotStarted --start(PvAi)--> AwaitingDifficulty --pick--> InProgress
//! InProgress --place--> InProgress | Won | Draw
//! any state  --reset--> NotStarted
//! ```

use crate::{Board, Difficulty, GameError, Mark, Mode, MoveHistory, Position, WinLine};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    /// A mark completed a line.
    Won(WinLine),
    /// Board filled with no line.
    Draw,
}

impl GameResult {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            GameResult::Won(line) => Some(line.mark),
            GameResult::Draw => None,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Won(line) => write!(f, "Player {} wins", line.mark),
            GameResult::Draw => write!(f, "Draw"),
        }
    }
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// No mode chosen yet.
    #[default]
    NotStarted,
    /// AI game chosen, difficulty not yet.
    AwaitingDifficulty,
    /// Moves are being played.
    InProgress,
    /// A line was completed.
    Won(WinLine),
    /// Board filled with no line.
    Draw,
}

impl GameStatus {
    /// Checks if the game has concluded.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Won(_) | GameStatus::Draw)
    }

    /// Short lowercase name, for messages.
    pub fn name(&self) -> &'static str {
        match self {
            GameStatus::NotStarted => "not started",
            GameStatus::AwaitingDifficulty => "awaiting difficulty",
            GameStatus::InProgress => "in progress",
            GameStatus::Won(_) => "won",
            GameStatus::Draw => "drawn",
        }
    }

    /// The result, once the game has concluded.
    pub fn result(&self) -> Option<GameResult> {
        match self {
            GameStatus::Won(line) => Some(GameResult::Won(*line)),
            GameStatus::Draw => Some(GameResult::Draw),
            _ => None,
        }
    }
}

/// An accepted move and what it led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Where the mark went.
    pub position: Position,
    /// Who played it.
    pub mark: Mark,
    /// Set when the move ended the game.
    pub result: Option<GameResult>,
}

/// One game: board, turn, mode, difficulty, status and undo history.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GameSession {
    /// The board.
    board: Board,
    /// Whose turn it is. After a win this stays on the winner.
    #[getter(copy)]
    turn: Mark,
    /// The chosen mode, once a session has been started.
    #[getter(copy)]
    mode: Option<Mode>,
    /// AI difficulty. Only meaningful in [`Mode::PvAi`].
    #[getter(copy)]
    difficulty: Difficulty,
    /// Lifecycle status.
    status: GameStatus,
    /// Undo history.
    history: MoveHistory,
    /// The human's mark in AI games.
    #[getter(copy)]
    human_mark: Mark,
}

impl GameSession {
    /// Creates a session where the human (in AI games) plays `human_mark`.
    #[instrument]
    pub fn new(human_mark: Mark) -> Self {
        Self {
            board: Board::new(),
            turn: Mark::X,
            mode: None,
            difficulty: Difficulty::default(),
            status: GameStatus::NotStarted,
            history: MoveHistory::new(),
            human_mark,
        }
    }

    /// The AI's mark, in AI games.
    pub fn ai_mark(&self) -> Option<Mark> {
        (self.mode == Some(Mode::PvAi)).then(|| self.human_mark.opponent())
    }

    /// Checks if the AI is due to move.
    pub fn is_ai_turn(&self) -> bool {
        self.status == GameStatus::InProgress && self.ai_mark() == Some(self.turn)
    }

    /// Chooses a mode.
    ///
    /// PvP begins at once. PvAi begins at once when `difficulty` is given,
    /// and waits for [`GameSession::select_difficulty`] otherwise. Switching
    /// mode is allowed until the first move is played.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidModeTransition`] once a game is under way or over.
    #[instrument(skip(self), fields(status = self.status.name()))]
    pub fn start(&mut self, mode: Mode, difficulty: Option<Difficulty>) -> Result<(), GameError> {
        if !matches!(
            self.status,
            GameStatus::NotStarted | GameStatus::AwaitingDifficulty
        ) {
            warn!("Mode change rejected");
            return Err(GameError::InvalidModeTransition {
                state: self.status.name(),
                action: "choose a mode",
            });
        }

        self.mode = Some(mode);
        match (mode, difficulty) {
            (Mode::PvAi, None) => {
                info!("Waiting for AI difficulty");
                self.status = GameStatus::AwaitingDifficulty;
            }
            (Mode::PvAi, Some(difficulty)) => {
                self.difficulty = difficulty;
                self.begin();
            }
            (Mode::PvP, _) => self.begin(),
        }
        Ok(())
    }

    /// Picks the AI difficulty and begins play.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidModeTransition`] unless an AI game is waiting for it.
    #[instrument(skip(self), fields(status = self.status.name()))]
    pub fn select_difficulty(&mut self, difficulty: Difficulty) -> Result<(), GameError> {
        if self.status != GameStatus::AwaitingDifficulty {
            warn!("Difficulty selected outside of AI setup");
            return Err(GameError::InvalidModeTransition {
                state: self.status.name(),
                action: "select difficulty",
            });
        }
        self.difficulty = difficulty;
        self.begin();
        Ok(())
    }

    fn begin(&mut self) {
        self.board = Board::new();
        self.history.clear();
        self.turn = Mark::X;
        self.status = GameStatus::InProgress;
        info!(mode = ?self.mode, difficulty = %self.difficulty, "Game started");
    }

    /// Plays the current mark at `index` (0-8).
    ///
    /// Snapshots the board, places the mark, then checks for a line and a
    /// full board. The turn passes only when the game goes on.
    ///
    /// # Errors
    ///
    /// Fails without touching anything on an out-of-range index, a session
    /// that has not begun, a finished game or an occupied cell.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn place(&mut self, index: usize) -> Result<Placement, GameError> {
        let position = Position::from_index(index).ok_or(GameError::OutOfBounds(index))?;
        match self.status {
            GameStatus::InProgress => {}
            GameStatus::Won(_) | GameStatus::Draw => return Err(GameError::GameAlreadyOver),
            GameStatus::NotStarted | GameStatus::AwaitingDifficulty => {
                return Err(GameError::NotStarted);
            }
        }
        if !self.board.is_empty(position) {
            return Err(GameError::CellOccupied(position));
        }

        let mark = self.turn;
        self.history.snapshot(&self.board);
        self.board.place(position, mark)?;

        if let Some(line) = self.board.check_win() {
            self.status = GameStatus::Won(line);
        } else if self.board.is_full() {
            self.status = GameStatus::Draw;
        } else {
            self.turn = mark.opponent();
        }
        let result = self.status.result();

        match &result {
            Some(result) => info!(%position, %result, "Game over"),
            None => debug!(%position, next = %self.turn, "Move accepted"),
        }

        Ok(Placement {
            position,
            mark,
            result,
        })
    }

    /// Takes back the last move and hands the turn back.
    ///
    /// Returns the restored board.
    ///
    /// # Errors
    ///
    /// [`GameError::NoHistory`] with nothing to undo or once the game is over.
    #[instrument(skip(self), fields(depth = self.history.len()))]
    pub fn undo(&mut self) -> Result<Board, GameError> {
        if self.status != GameStatus::InProgress {
            return Err(GameError::NoHistory);
        }
        let previous = self.history.pop().ok_or(GameError::NoHistory)?;
        self.board = previous;
        self.turn = self.turn.opponent();
        debug!(turn = %self.turn, "Move undone");
        Ok(previous)
    }

    /// Clears board, history and mode, back to [`GameStatus::NotStarted`].
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::new(self.human_mark);
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(Mark::X)
    }
}
