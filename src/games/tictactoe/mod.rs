mod lines;
mod position;
mod types;

pub use lines::{LINES, WinningLine};
pub use position::Position;
pub use types::{Board, InvalidSquare, Square, Symbol};
