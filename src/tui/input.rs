//! Key bindings and cursor movement.

use crossterm::event::KeyCode;

use crate::games::tictactoe::{Position, Symbol};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pick X or O.
    Choose(Symbol),
    /// Play a square by keypad number.
    Play(Position),
    /// Play the square under the cursor.
    PlayAtCursor,
    /// Move the cursor.
    Cursor(KeyCode),
    /// Abandon the game and reset the server board.
    Restart,
    /// Start the next game after one finished.
    PlayAgain,
    /// Switch between dark and light.
    ToggleTheme,
    /// Leave the client.
    Quit,
}

/// Maps a key to a command.
pub fn command_for(key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Char('x') | KeyCode::Char('X') => Some(Command::Choose(Symbol::X)),
        KeyCode::Char('o') | KeyCode::Char('O') => Some(Command::Choose(Symbol::O)),
        KeyCode::Char(c) if c.is_ascii_digit() => c
            .to_digit(10)
            .and_then(Position::from_keypad)
            .map(Command::Play),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Command::PlayAtCursor),
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => Some(Command::Cursor(key)),
        KeyCode::Char('r') => Some(Command::Restart),
        KeyCode::Char('p') | KeyCode::Char('n') => Some(Command::PlayAgain),
        KeyCode::Char('t') => Some(Command::ToggleTheme),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Moves the cursor one cell; stops at the board edge.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let index = cursor.to_index();
    let (row, col) = (index / 3, index % 3);
    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => (row, col),
    };
    Position::from_index(row * 3 + col).unwrap_or(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_stops_at_edges() {
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Up), Position::TopLeft);
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Left), Position::TopLeft);
        assert_eq!(
            move_cursor(Position::BottomRight, KeyCode::Right),
            Position::BottomRight
        );
    }

    #[test]
    fn test_cursor_moves_one_cell() {
        assert_eq!(move_cursor(Position::Center, KeyCode::Up), Position::TopCenter);
        assert_eq!(move_cursor(Position::Center, KeyCode::Down), Position::BottomCenter);
        assert_eq!(move_cursor(Position::Center, KeyCode::Left), Position::MiddleLeft);
        assert_eq!(move_cursor(Position::TopRight, KeyCode::Down), Position::MiddleRight);
    }

    #[test]
    fn test_keypad_digits() {
        assert_eq!(
            command_for(KeyCode::Char('1')),
            Some(Command::Play(Position::TopLeft))
        );
        assert_eq!(
            command_for(KeyCode::Char('9')),
            Some(Command::Play(Position::BottomRight))
        );
        assert_eq!(command_for(KeyCode::Char('0')), None);
    }

    #[test]
    fn test_symbol_keys() {
        assert_eq!(
            command_for(KeyCode::Char('O')),
            Some(Command::Choose(Symbol::O))
        );
        assert_eq!(command_for(KeyCode::Esc), Some(Command::Quit));
    }
}
