//! The 3x3 board and its win/draw rules.

use crate::{Cell, GameError, Mark, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// The eight winning lines, in scan order.
///
/// [`Board::check_win`] reports the first complete line in this order.
pub const WIN_LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// A completed line of three identical marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinLine {
    /// Mark that owns the line.
    pub mark: Mark,
    /// The three cells, in line order.
    pub cells: [Position; 3],
}

impl WinLine {
    /// The line as board indices.
    pub fn indices(&self) -> [usize; 3] {
        self.cells.map(Position::to_index)
    }

    /// Checks if the line passes through `pos`.
    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }
}

impl std::fmt::Display for WinLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.indices();
        write!(f, "{} [{}, {}, {}]", self.mark, a, b, c)
    }
}

/// 3x3 tic-tac-toe board.
///
/// Cells only go from empty to marked through [`Board::place`]. Undo
/// restores an earlier snapshot rather than clearing cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from raw cells.
    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Self { cells }
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_empty()
    }

    /// Places `mark` at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::CellOccupied`] if the cell already holds a mark.
    #[instrument(skip(self))]
    pub fn place(&mut self, pos: Position, mark: Mark) -> Result<(), GameError> {
        if !self.is_empty(pos) {
            return Err(GameError::CellOccupied(pos));
        }
        self.cells[pos.to_index()] = Cell::Marked(mark);
        Ok(())
    }

    /// Overwrites a cell with no checks. Search uses this to try a move and take it back.
    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.to_index()] = cell;
    }

    /// Returns the first complete line in [`WIN_LINES`] order.
    pub fn check_win(&self) -> Option<WinLine> {
        WIN_LINES.iter().find_map(|&[a, b, c]| {
            let mark = self.get(a).mark()?;
            (self.get(b) == Cell::Marked(mark) && self.get(c) == Cell::Marked(mark))
                .then_some(WinLine {
                    mark,
                    cells: [a, b, c],
                })
        })
    }

    /// Checks if no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Number of marks on the board, which equals moves played.
    pub fn move_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Empty positions in scan order.
    pub fn empty_cells(&self) -> Vec<Position> {
        Position::ALL
            .into_iter()
            .filter(|&pos| self.is_empty(pos))
            .collect()
    }

    /// Checks if placing `mark` at the empty cell `pos` would complete a line for it.
    pub fn wins_with(&self, pos: Position, mark: Mark) -> bool {
        if !self.is_empty(pos) {
            return false;
        }
        let mut probe = *self;
        probe.cells[pos.to_index()] = Cell::Marked(mark);
        probe.check_win().is_some_and(|line| line.mark == mark)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let pos = Position::ALL[row * 3 + col];
                match self.get(pos) {
                    Cell::Empty => write!(f, "{}", pos.key())?,
                    Cell::Marked(mark) => write!(f, "{}", mark)?,
                }
                if col < 2 {
                    write!(f, "|")?;
                }
            }
            if row < 2 {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}
