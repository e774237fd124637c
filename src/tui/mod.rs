//! Terminal UI for NexToe.

mod input;
mod ui;
mod view;

pub use input::{Command, command_for, move_cursor};
pub use view::TerminalView;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use tracing::{debug, error, info, instrument, warn};

use crate::client::GameClient;
use crate::config::ClientConfig;
use crate::oracle::{HttpOracle, MoveOracle};
use crate::prefs::SharedPreferences;

/// Log file for the interactive client; stderr belongs to the terminal.
pub const TUI_LOG_FILE: &str = "nextoe_tui.log";

/// Runs the interactive game until the player quits.
pub async fn run_tui(config: &ClientConfig, preferences: SharedPreferences) -> Result<()> {
    let log_file = std::fs::File::create(TUI_LOG_FILE)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(server_url = %config.server_url(), "Starting NexToe TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let oracle = HttpOracle::new(config.server_url());
    let view = TerminalView::new(terminal);
    let mut client = GameClient::new(oracle, view, preferences, config.request_timeout());
    client.refresh();

    let res = run_game(&mut client).await;

    disable_raw_mode()?;
    let terminal = client.view_mut().terminal_mut();
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

#[instrument(skip_all)]
async fn run_game<O, B>(client: &mut GameClient<O, TerminalView<B>>) -> Result<()>
where
    O: MoveOracle,
    B: Backend,
{
    loop {
        client.expire_notice();
        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let Some(command) = command_for(key.code) else {
            continue;
        };
        if command == Command::Quit {
            info!("User quit");
            return Ok(());
        }

        let dispatched = apply(client, command).await;
        if dispatched {
            drain_input()?;
        }
    }
}

/// Runs one command. Returns true if an oracle round trip happened.
async fn apply<O, B>(client: &mut GameClient<O, TerminalView<B>>, command: Command) -> bool
where
    O: MoveOracle,
    B: Backend,
{
    let outcome = match command {
        Command::Choose(symbol) => client.choose_symbol(symbol).await.map(|r| r.is_some()),
        Command::Play(position) => client.submit_move(position).await.map(|_| true),
        Command::PlayAtCursor => {
            let position = client.view().cursor();
            client.submit_move(position).await.map(|_| true)
        }
        Command::Cursor(key) => {
            if let Err(e) = client.view_mut().move_cursor(key) {
                warn!(error = %e, "Cursor redraw failed");
            }
            Ok(false)
        }
        Command::Restart => client.restart().await.map(|_| true),
        Command::PlayAgain => client.play_again().map(|_| false),
        Command::ToggleTheme => {
            client.toggle_theme();
            Ok(false)
        }
        Command::Quit => Ok(false),
    };

    outcome.unwrap_or_else(|e| {
        debug!(error = %e, "Command ignored");
        false
    })
}

/// Discards keys pressed while a request was outstanding.
fn drain_input() -> Result<()> {
    while event::poll(Duration::ZERO)? {
        let _ = event::read()?;
    }
    Ok(())
}
