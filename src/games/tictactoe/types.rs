//! Core domain types for tic-tac-toe.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use super::Position;

/// Mark placed on the board by the player or the AI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Symbol {
    /// Symbol X (moves first).
    X,
    /// Symbol O (moves second).
    O,
}

impl Symbol {
    /// Returns the opposing symbol.
    pub fn opponent(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }

    /// Returns true if this symbol makes the opening move of a game.
    pub fn moves_first(self) -> bool {
        self == Symbol::X
    }
}

/// A wire value that is not `""`, `"X"` or `"O"`.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("invalid cell value: {:?}", value)]
pub struct InvalidSquare {
    /// The rejected value.
    pub value: String,
}

/// A square on the board.
///
/// On the wire a square is a string: `""` when empty, otherwise the symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square holding a symbol.
    Occupied(Symbol),
}

impl Square {
    /// Returns the symbol on this square, if any.
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Square::Empty => None,
            Square::Occupied(symbol) => Some(symbol),
        }
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        match square {
            Square::Empty => String::new(),
            Square::Occupied(symbol) => symbol.to_string(),
        }
    }
}

impl TryFrom<String> for Square {
    type Error = InvalidSquare;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "" => Ok(Square::Empty),
            "X" => Ok(Square::Occupied(Symbol::X)),
            "O" => Ok(Square::Occupied(Symbol::O)),
            _ => Err(InvalidSquare { value }),
        }
    }
}

/// 3x3 board in row-major order.
///
/// Serializes as a JSON array of exactly nine strings; any other length fails
/// to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    squares: [Square; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from nine squares.
    pub fn from_squares(squares: [Square; 9]) -> Self {
        Self { squares }
    }

    /// Gets the square at a position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Places a symbol on an empty square.
    ///
    /// Returns `false` and leaves the board untouched if the square is taken.
    pub fn place(&mut self, pos: Position, symbol: Symbol) -> bool {
        if !self.is_empty(pos) {
            return false;
        }
        self.squares[pos.to_index()] = Square::Occupied(symbol);
        true
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Number of occupied squares.
    pub fn mark_count(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// True when no square is occupied.
    pub fn is_blank(&self) -> bool {
        self.mark_count() == 0
    }

    /// Checks that `self` can follow `previous` in a game.
    ///
    /// Every occupied square of `previous` must hold the same symbol here;
    /// squares only ever go from empty to occupied.
    pub fn is_successor_of(&self, previous: &Board) -> bool {
        previous
            .squares
            .iter()
            .zip(self.squares.iter())
            .all(|(before, after)| *before == Square::Empty || before == after)
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(symbol) => symbol.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}
