//! Error types for game operations.

use crate::Position;

/// Recoverable failure reported back to the caller.
///
/// No error path mutates the game. Callers may ignore the input that
/// produced the error and carry on.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GameError {
    /// The target cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(#[error(not(source))] Position),

    /// Index outside the 3x3 board.
    #[display("Position {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(#[error(not(source))] usize),

    /// The game has already been won or drawn.
    #[display("Game is already over")]
    GameAlreadyOver,

    /// No session is being played yet.
    #[display("Game has not started")]
    NotStarted,

    /// Nothing to undo, or the game has concluded.
    #[display("No move to undo")]
    NoHistory,

    /// The requested lifecycle change is not allowed from the current state.
    #[display("Cannot {} while {}", action, state)]
    InvalidModeTransition {
        /// Lifecycle state the session was in.
        state: &'static str,
        /// What the caller tried to do.
        action: &'static str,
    },
}
