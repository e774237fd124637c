//! NexToe library - tic-tac-toe against a remote AI oracle
//!
//! The server decides everything: it validates the player's move, plays the
//! AI's reply and reports when the game is over. This crate is the client.
//!
//! # Architecture
//!
//! - **Session**: pure state machine ([`GameSession`]) enforcing turn order
//!   and single-flight; emits [`RenderFrame`]s
//! - **Oracle**: the remote authority behind [`MoveOracle`], reached over
//!   HTTP by [`HttpOracle`]
//! - **Client**: async driver ([`GameClient`]) tying a session to an oracle,
//!   a [`BoardView`] and the persisted [`Scoreboard`]
//! - **Chat**: single-shot request/response [`ChatClient`]
//! - **TUI**: ratatui [`TerminalView`]
//!
//! # Example
//!
//! ```no_run
//! use nextoe::{GameClient, HttpOracle, MemoryStore, Position, Preferences,
//!     RenderFrame, SharedPreferences, Symbol, BoardView, ViewError};
//! use std::time::Duration;
//!
//! struct Stdout;
//!
//! impl BoardView for Stdout {
//!     fn render(&mut self, frame: &RenderFrame) -> Result<(), ViewError> {
//!         println!("{}\n{}", frame.board().display(), frame.status());
//!         Ok(())
//!     }
//! }
//!
//! # async fn example() -> anyhow::Result<()> {
//! let prefs = SharedPreferences::new(Preferences::load(MemoryStore::new()));
//! let oracle = HttpOracle::new("http://127.0.0.1:5000");
//! let mut client = GameClient::new(oracle, Stdout, prefs, Duration::from_secs(10));
//!
//! client.choose_symbol(Symbol::X).await?;
//! client.submit_move(Position::Center).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod chat;
mod client;
mod config;
mod games;
mod oracle;
mod prefs;
mod protocol;
mod session;
mod tui;

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{Board, InvalidSquare, LINES, Position, Square, Symbol, WinningLine};

// Crate-level exports - Wire protocol
pub use protocol::{AI_FIRST_SENTINEL, MoveReply, MoveRequest, Placement, Winner};

// Crate-level exports - Oracle
pub use oracle::{HttpOracle, MoveOracle, OracleError};

// Crate-level exports - Session state machine
pub use session::{GameResult, GameSession, Outcome, Phase, RenderFrame, Resolution, SessionError};

// Crate-level exports - Driver
pub use client::{BoardView, GameClient, NOTICE_LIFETIME, RESET_FAILED, ViewError};

// Crate-level exports - Preferences
pub use prefs::{
    FileStore, MemoryStore, PreferenceStore, Preferences, SCORES_KEY, Scoreboard,
    SharedPreferences, StoreError, THEME_KEY, Theme,
};

// Crate-level exports - Chat
pub use chat::{CONNECTION_FALLBACK, ChatClient, ChatMessage, Speaker, TRANSCRIPT_LIMIT};

// Crate-level exports - Configuration
pub use config::{ClientConfig, ConfigError};

// Crate-level exports - Terminal UI
pub use tui::{Command as TuiCommand, TUI_LOG_FILE, TerminalView, command_for, move_cursor, run_tui};
