//! Command-line interface for strictly_four.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Strictly Four - Connect-Four with a strictly checked turn engine
#[derive(Parser, Debug)]
#[command(name = "strictly_four")]
#[command(about = "Play Connect-Four in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Board options shared by subcommands
#[derive(clap::Args, Debug)]
pub struct BoardArgs {
    /// Path to a TOML game config
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Board width (overrides config)
    #[arg(long)]
    pub width: Option<usize>,

    /// Board height (overrides config)
    #[arg(long)]
    pub height: Option<usize>,

    /// Pieces in a row needed to win (overrides config)
    #[arg(long)]
    pub win_length: Option<usize>,
}

/// Extra event output
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventFormat {
    /// One JSON object per engine event on stderr
    Json,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a two-player game on stdin/stdout
    Play {
        /// Board options
        #[command(flatten)]
        board: BoardArgs,

        /// Also stream engine events
        #[arg(long, value_enum)]
        events: Option<EventFormat>,
    },

    /// Print the effective configuration as TOML
    RenderConfig {
        /// Board options
        #[command(flatten)]
        board: BoardArgs,
    },
}
