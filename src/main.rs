//! NexToe - unified CLI
//!
//! Terminal tic-tac-toe client, chat REPL and preference management.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use nextoe::{ChatClient, ClientConfig, FileStore, MemoryStore, Preferences, SharedPreferences};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the configured server URL.
const SERVER_URL_ENV: &str = "NEXTOE_SERVER_URL";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ClientConfig::load_or_default(&cli.config)?.with_preferences_path(cli.prefs);

    match cli.command {
        Command::Play { server_url } => {
            let config = config.with_server_url(server_url_override(server_url));
            let preferences = open_preferences(&config).unwrap_or_else(|e| {
                warn!(error = %e, "Playing without saved preferences");
                SharedPreferences::new(Preferences::load(MemoryStore::new()))
            });
            nextoe::run_tui(&config, preferences).await
        }
        Command::Chat { server_url } => {
            init_stderr_logging();
            let config = config.with_server_url(server_url_override(server_url));
            run_chat(&config).await
        }
        Command::Scores { reset } => {
            init_stderr_logging();
            show_scores(&config, reset)
        }
        Command::Theme { toggle } => {
            init_stderr_logging();
            show_theme(&config, toggle)
        }
    }
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn server_url_override(flag: Option<String>) -> Option<String> {
    flag.or_else(|| std::env::var(SERVER_URL_ENV).ok())
}

fn open_preferences(config: &ClientConfig) -> Result<SharedPreferences> {
    let store = FileStore::open(config.preferences_path()).with_context(|| {
        format!(
            "Failed to open preferences at {}",
            config.preferences_path().display()
        )
    })?;
    Ok(SharedPreferences::new(Preferences::load(store)))
}

/// Line-based chat: one request per line, `/clear` forgets the transcript.
#[instrument(skip_all, fields(server_url = %config.server_url()))]
async fn run_chat(config: &ClientConfig) -> Result<()> {
    info!("Starting chat");
    let mut chat = ChatClient::new(config.server_url(), config.request_timeout());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Chatting with {} (Ctrl-D to quit)", config.server_url());
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "/clear" {
            chat.clear();
            println!("(transcript cleared)");
            continue;
        }
        if let Some(reply) = chat.send(&line).await {
            println!("bot> {}", reply);
        }
    }
    Ok(())
}

fn show_scores(config: &ClientConfig, reset: bool) -> Result<()> {
    let preferences = open_preferences(config)?;
    if reset {
        preferences.reset_scores()?;
    }
    let scores = preferences.scores();
    println!(
        "You: {}  AI: {}  Draws: {}",
        scores.player_wins(),
        scores.ai_wins(),
        scores.draws()
    );
    Ok(())
}

fn show_theme(config: &ClientConfig, toggle: bool) -> Result<()> {
    let preferences = open_preferences(config)?;
    let theme = if toggle {
        preferences.toggle_theme()?
    } else {
        preferences.theme()
    };
    println!("Theme: {}", theme);
    Ok(())
}
