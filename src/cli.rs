//! Command-line interface for nextoe.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// NexToe - tic-tac-toe against a server-side AI, plus a chat client
#[derive(Parser, Debug)]
#[command(name = "nextoe")]
#[command(about = "Tic-tac-toe client for a remote AI opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (missing file means defaults)
    #[arg(short, long, global = true, default_value = "nextoe.toml")]
    pub config: PathBuf,

    /// Override the preferences file from the config
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Game server URL (overrides config and NEXTOE_SERVER_URL)
        #[arg(long)]
        server_url: Option<String>,
    },

    /// Chat with the server's bot on stdin/stdout
    Chat {
        /// Chat server URL (overrides config and NEXTOE_SERVER_URL)
        #[arg(long)]
        server_url: Option<String>,
    },

    /// Show the scoreboard
    Scores {
        /// Zero all counters
        #[arg(long)]
        reset: bool,
    },

    /// Show the display theme
    Theme {
        /// Switch between dark and light
        #[arg(long)]
        toggle: bool,
    },
}
