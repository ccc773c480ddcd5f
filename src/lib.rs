//! Strictly Four - Connect-Four in the terminal
//!
//! Wraps the `strictly_connect_four` engine with TOML configuration and a
//! line-oriented text shell.
//!
//! # Architecture
//!
//! - **Config**: board size and player labels from TOML plus CLI overrides
//! - **Shell**: parses input lines into engine commands
//! - **Views**: observers printing the board or a JSON event stream
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use strictly_four::{GameConfig, Shell, TextView};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = GameConfig::default();
//! let mut shell = Shell::new(&config)?;
//! let view = TextView::shared(&config, Vec::new())?;
//! shell.subscribe(&view);
//!
//! let mut out = Vec::new();
//! shell.run(Cursor::new("4\nq\n"), &mut out)?;
//! assert_eq!(shell.engine().history().len(), 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod shell;

pub use config::{ConfigError, GameConfig, PlayerLabels};
pub use shell::{JsonEventWriter, Shell, ShellCommand, ShellError, TextView};
