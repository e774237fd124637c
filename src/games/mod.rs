//! Game rules and board types.

pub mod tictactoe;
