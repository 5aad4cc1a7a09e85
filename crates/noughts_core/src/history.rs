//! Board snapshots for undo.

use crate::Board;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Stack of boards as they were before each accepted move.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveHistory {
    snapshots: Vec<Board>,
}

impl MoveHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the board as it stands before a move.
    #[instrument(skip_all, fields(depth = self.snapshots.len()))]
    pub fn snapshot(&mut self, board: &Board) {
        self.snapshots.push(*board);
    }

    /// Pops the most recent snapshot.
    pub fn pop(&mut self) -> Option<Board> {
        self.snapshots.pop()
    }

    /// Number of snapshots held.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Checks if there is nothing to undo.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Drops every snapshot.
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
