//! The eight winning lines of a 3x3 board.
//!
//! The client never decides a winner itself; these are used to check that a
//! winning line reported by the oracle is a real line held by the winner.

use super::{Board, Position, Square, Symbol};

/// Rows, columns and diagonals.
pub const LINES: [[Position; 3]; 8] = [
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

/// Three positions forming a completed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WinningLine([Position; 3]);

impl WinningLine {
    /// Accepts `indices` only if they name one of the eight lines (in any
    /// order) and `symbol` holds all three squares on `board`.
    pub fn verify(indices: [usize; 3], board: &Board, symbol: Symbol) -> Option<Self> {
        let mut positions = [Position::TopLeft; 3];
        for (slot, index) in positions.iter_mut().zip(indices) {
            *slot = Position::from_index(index)?;
        }

        let mut sorted = positions;
        sorted.sort();
        let is_line = LINES.iter().any(|line| {
            let mut candidate = *line;
            candidate.sort();
            candidate == sorted
        });
        let held = positions
            .iter()
            .all(|pos| board.get(*pos) == Square::Occupied(symbol));

        (is_line && held).then_some(Self(positions))
    }

    /// The three positions, in the order the oracle reported them.
    pub fn positions(&self) -> &[Position; 3] {
        &self.0
    }

    /// Whether `pos` lies on this line.
    pub fn contains(&self, pos: Position) -> bool {
        self.0.contains(&pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(symbol: Symbol, cells: &[usize]) -> Board {
        let mut board = Board::new();
        for &i in cells {
            board.place(Position::ALL[i], symbol);
        }
        board
    }

    #[test]
    fn test_accepts_top_row() {
        let board = board_with(Symbol::X, &[0, 1, 2]);
        let line = WinningLine::verify([0, 1, 2], &board, Symbol::X).expect("top row");
        assert!(line.contains(Position::TopCenter));
    }

    #[test]
    fn test_accepts_reordered_diagonal() {
        let board = board_with(Symbol::O, &[2, 4, 6]);
        assert!(WinningLine::verify([6, 2, 4], &board, Symbol::O).is_some());
    }

    #[test]
    fn test_rejects_non_line() {
        let board = board_with(Symbol::X, &[0, 1, 5]);
        assert!(WinningLine::verify([0, 1, 5], &board, Symbol::X).is_none());
    }

    #[test]
    fn test_rejects_line_not_held_by_winner() {
        let board = board_with(Symbol::O, &[3, 4, 5]);
        assert!(WinningLine::verify([3, 4, 5], &board, Symbol::X).is_none());
    }

    #[test]
    fn test_rejects_out_of_range() {
        let board = Board::new();
        assert!(WinningLine::verify([0, 4, 9], &board, Symbol::X).is_none());
    }
}
