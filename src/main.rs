//! Strictly Four - terminal Connect-Four
//!
//! Reads commands from stdin and prints the board after every move.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{BoardArgs, Cli, Command, EventFormat};
use strictly_four::{GameConfig, JsonEventWriter, Shell, TextView};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { board, events } => run_play(board, events),
        Command::RenderConfig { board } => render_config(board),
    }
}

/// Resolve config file plus command-line overrides
#[instrument]
fn load_config(args: BoardArgs) -> Result<GameConfig> {
    let config = match &args.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    let config = config.with_overrides(args.width, args.height, args.win_length);
    config.dimensions()?;
    Ok(config)
}

/// Run an interactive game on stdin/stdout
fn run_play(args: BoardArgs, events: Option<EventFormat>) -> Result<()> {
    let config = load_config(args)?;
    let mut shell = Shell::new(&config)?;

    let view = TextView::shared(&config, std::io::stdout())?;
    shell.subscribe(&view);

    let json = match events {
        Some(EventFormat::Json) => Some(JsonEventWriter::shared(std::io::stderr())),
        None => None,
    };
    if let Some(json) = &json {
        shell.subscribe(json);
    }

    info!(
        width = config.width(),
        height = config.height(),
        win_length = config.win_length(),
        "Starting game"
    );

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    shell.run(stdin.lock(), &mut stdout)?;

    info!(moves = shell.engine().history().len(), state = ?shell.engine().state(), "Session ended");
    Ok(())
}

/// Print the effective configuration
fn render_config(args: BoardArgs) -> Result<()> {
    let config = load_config(args)?;
    print!("{}", config.to_toml()?);
    Ok(())
}
