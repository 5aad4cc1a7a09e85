//! Tic-tac-toe core: board, session state machine, statistics and AI.
//!
//! # Architecture
//!
//! - **Board**: 3x3 grid with win and draw detection
//! - **History**: board snapshots for undo
//! - **Session**: mode, difficulty, turn and lifecycle of one game
//! - **AI**: random, strategic and minimax move selection
//! - **Statistics**: wins, draws and streaks kept across rematches
//! - **Controller**: the inbound API a renderer drives, reporting back
//!   through [`GameObserver`]
//!
//! # Example
//!
//! ```
//! use noughts_core::{ControllerSettings, GameController, Mark, Mode};
//!
//! let mut game = GameController::new((), ControllerSettings::default());
//! game.start_session(Mode::PvP, None).unwrap();
//! for index in [0, 4, 1, 7, 2] {
//!     game.select_cell(index).unwrap();
//! }
//! assert_eq!(game.statistics().wins(Mark::X), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod ai;
mod board;
mod controller;
mod error;
mod events;
mod history;
mod position;
mod session;
mod stats;
mod types;

pub use ai::{AiEngine, MoveStrategy, select_move};
pub use board::{Board, WIN_LINES, WinLine};
pub use controller::{AiTicket, ControllerSettings, DEFAULT_AI_DELAY, GameController, MoveOutcome};
pub use error::GameError;
pub use events::{ChannelObserver, GameEvent, GameObserver};
pub use history::MoveHistory;
pub use position::Position;
pub use session::{GameResult, GameSession, GameStatus, Placement};
pub use stats::Statistics;
pub use types::{Cell, Difficulty, Mark, Mode};
