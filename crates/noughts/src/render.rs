//! Terminal renderers for game events.

use noughts_core::{
    Board, Cell, GameEvent, GameObserver, GameResult, Mark, Position, Statistics, WinLine,
};
use std::io::Write;
use tracing::warn;

/// Draws the board and status lines as plain text.
#[derive(Debug, Default)]
pub struct TextRenderer {
    cells: [Cell; 9],
}

impl TextRenderer {
    /// Creates a renderer showing an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// The board as this renderer has been told about it.
    pub fn board(&self) -> Board {
        Board::from_cells(self.cells)
    }

    fn draw_board(&self) {
        println!("\n{}\n", self.board());
    }
}

impl GameObserver for TextRenderer {
    fn on_cell_updated(&mut self, position: Position, cell: Cell) {
        self.cells[position.to_index()] = cell;
    }

    fn on_turn_changed(&mut self, mark: Mark) {
        self.draw_board();
        println!(
            "Current turn: {} | Moves: {}",
            mark,
            self.board().move_count()
        );
    }

    fn on_game_ended(&mut self, result: &GameResult) {
        self.draw_board();
        match result {
            GameResult::Won(line) => {
                println!("Player {} wins! Line {}", line.mark, line_keys(line))
            }
            GameResult::Draw => println!("It's a draw!"),
        }
        println!("Type `rematch` to play again or `reset` to clear the score.");
    }

    fn on_statistics_changed(&mut self, stats: &Statistics) {
        println!("{}", stats_line(stats));
    }
}

/// The keys of a winning line's cells, e.g. `1-5-9`.
pub fn line_keys(line: &WinLine) -> String {
    Position::ALL
        .iter()
        .filter(|&&pos| line.contains(pos))
        .map(|pos| pos.key().to_string())
        .collect::<Vec<_>>()
        .join("-")
}

/// One-line score summary. Streaks show only while running.
pub fn stats_line(stats: &Statistics) -> String {
    let mut line = format!(
        "X wins: {} | O wins: {} | Draws: {}",
        stats.wins_x(),
        stats.wins_o(),
        stats.draws()
    );
    for mark in [Mark::X, Mark::O] {
        if stats.streak(mark) > 0 {
            line.push_str(&format!(" | {} streak: {}", mark, stats.streak(mark)));
        }
    }
    line
}

/// Prints each event as one JSON object per line.
#[derive(Debug, Default)]
pub struct JsonRenderer;

impl JsonRenderer {
    fn emit(&self, event: GameEvent) {
        match serde_json::to_string(&event) {
            Ok(json) => {
                let mut stdout = std::io::stdout().lock();
                if let Err(e) = writeln!(stdout, "{}", json) {
                    warn!(error = %e, "Failed to write event");
                }
            }
            Err(e) => warn!(error = %e, ?event, "Failed to serialize event"),
        }
    }
}

impl GameObserver for JsonRenderer {
    fn on_cell_updated(&mut self, position: Position, cell: Cell) {
        self.emit(GameEvent::CellUpdated { position, cell });
    }

    fn on_turn_changed(&mut self, mark: Mark) {
        self.emit(GameEvent::TurnChanged { mark });
    }

    fn on_game_ended(&mut self, result: &GameResult) {
        self.emit(GameEvent::GameEnded { result: *result });
    }

    fn on_statistics_changed(&mut self, stats: &Statistics) {
        self.emit(GameEvent::StatisticsChanged { stats: *stats });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_mirrors_cells() {
        let mut renderer = TextRenderer::new();
        renderer.on_cell_updated(Position::Center, Cell::Marked(Mark::X));
        renderer.on_cell_updated(Position::TopLeft, Cell::Marked(Mark::O));
        renderer.on_cell_updated(Position::TopLeft, Cell::Empty);
        assert_eq!(renderer.board().move_count(), 1);
        assert_eq!(renderer.board().get(Position::Center), Cell::Marked(Mark::X));
    }

    #[test]
    fn test_line_keys_follow_reading_order() {
        let line = WinLine {
            mark: Mark::O,
            cells: [Position::TopRight, Position::Center, Position::BottomLeft],
        };
        assert_eq!(line_keys(&line), "3-5-7");
    }

    #[test]
    fn test_stats_line_hides_idle_streaks() {
        let mut stats = Statistics::new();
        assert_eq!(stats_line(&stats), "X wins: 0 | O wins: 0 | Draws: 0");
        stats.record_win(Mark::O);
        stats.record_win(Mark::O);
        assert_eq!(stats_line(&stats), "X wins: 0 | O wins: 2 | Draws: 0 | O streak: 2");
    }
}
