//! Terminal implementation of [`BoardView`].

use crossterm::event::KeyCode;
use ratatui::{Terminal, backend::Backend};
use tracing::{debug, instrument};

use super::input::move_cursor;
use super::ui::{self, Screen};
use crate::client::{BoardView, ViewError};
use crate::games::tictactoe::Position;
use crate::prefs::{Scoreboard, Theme};
use crate::session::RenderFrame;

/// Draws frames onto a ratatui terminal and tracks the keyboard cursor.
pub struct TerminalView<B: Backend> {
    terminal: Terminal<B>,
    cursor: Position,
    scores: Scoreboard,
    theme: Theme,
    last_frame: Option<RenderFrame>,
}

impl<B: Backend> std::fmt::Debug for TerminalView<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalView")
            .field("cursor", &self.cursor)
            .field("scores", &self.scores)
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}

impl<B: Backend> TerminalView<B> {
    /// Wraps a terminal. Nothing is drawn until the first frame arrives.
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            cursor: Position::Center,
            scores: Scoreboard::default(),
            theme: Theme::default(),
            last_frame: None,
        }
    }

    /// The underlying terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Mutable access to the underlying terminal.
    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    /// Square under the cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Active theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Moves the cursor with an arrow key and redraws.
    pub fn move_cursor(&mut self, key: KeyCode) -> Result<(), ViewError> {
        self.cursor = move_cursor(self.cursor, key);
        self.redraw()
    }

    /// Draws the last frame again.
    #[instrument(skip(self))]
    pub fn redraw(&mut self) -> Result<(), ViewError> {
        let Some(frame) = &self.last_frame else {
            debug!("No frame yet, nothing to draw");
            return Ok(());
        };
        let screen = Screen {
            frame,
            cursor: self.cursor,
            scores: self.scores,
            theme: self.theme,
        };
        self.terminal
            .draw(|f| ui::draw(f, &screen))
            .map_err(|e| ViewError::new(e.to_string()))?;
        Ok(())
    }
}

impl<B: Backend> BoardView for TerminalView<B> {
    fn render(&mut self, frame: &RenderFrame) -> Result<(), ViewError> {
        self.last_frame = Some(frame.clone());
        self.redraw()
    }

    fn show_preferences(&mut self, scores: Scoreboard, theme: Theme) -> Result<(), ViewError> {
        self.scores = scores;
        self.theme = theme;
        Ok(())
    }
}
