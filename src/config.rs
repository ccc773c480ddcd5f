//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_connect_four::{
    BoardDimensions, DEFAULT_HEIGHT, DEFAULT_WIDTH, DEFAULT_WIN_LENGTH, Player,
};
use tracing::{debug, info, instrument};

/// Construction parameters for a game plus display labels.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board width in cells.
    #[serde(default = "default_width")]
    width: usize,

    /// Board height in cells.
    #[serde(default = "default_height")]
    height: usize,

    /// Pieces in a row needed to win.
    #[serde(default = "default_win_length")]
    win_length: usize,

    /// Names shown for each player.
    #[serde(default)]
    labels: PlayerLabels,
}

/// Display names for the two players.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PlayerLabels {
    /// Label for the opening player.
    #[serde(default = "default_label_one")]
    one: String,

    /// Label for the second player.
    #[serde(default = "default_label_two")]
    two: String,
}

fn default_width() -> usize {
    DEFAULT_WIDTH
}

fn default_height() -> usize {
    DEFAULT_HEIGHT
}

fn default_win_length() -> usize {
    DEFAULT_WIN_LENGTH
}

fn default_label_one() -> String {
    Player::One.label().to_string()
}

fn default_label_two() -> String {
    Player::Two.label().to_string()
}

impl Default for PlayerLabels {
    fn default() -> Self {
        Self {
            one: default_label_one(),
            two: default_label_two(),
        }
    }
}

impl PlayerLabels {
    /// Returns the label for `player`.
    pub fn for_player(&self, player: Player) -> &str {
        match player {
            Player::One => &self.one,
            Player::Two => &self.two,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            win_length: default_win_length(),
            labels: PlayerLabels::default(),
        }
    }
}

impl GameConfig {
    /// Creates a configuration with explicit dimensions and default labels.
    pub fn new(width: usize, height: usize, win_length: usize) -> Self {
        Self {
            width,
            height,
            win_length,
            labels: PlayerLabels::default(),
        }
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        info!(
            width = config.width,
            height = config.height,
            win_length = config.win_length,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text. Missing keys take defaults.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Renders the configuration as TOML.
    #[instrument(skip(self))]
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::new(format!("Failed to render config: {}", e)))
    }

    /// Applies command-line overrides on top of this configuration.
    #[instrument(skip(self))]
    pub fn with_overrides(
        mut self,
        width: Option<usize>,
        height: Option<usize>,
        win_length: Option<usize>,
    ) -> Self {
        if let Some(width) = width {
            self.width = width;
        }
        if let Some(height) = height {
            self.height = height;
        }
        if let Some(win_length) = win_length {
            self.win_length = win_length;
        }
        self
    }

    /// Validates the dimensions for board construction.
    #[instrument(skip(self))]
    pub fn dimensions(&self) -> Result<BoardDimensions, ConfigError> {
        BoardDimensions::new(self.width, self.height, self.win_length)
            .map_err(|e| ConfigError::new(e.to_string()))
    }
}

/// Failure to read or validate a [`GameConfig`], tagged with the call site.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// What went wrong.
    pub message: String,
    /// Line of the call that raised it.
    pub line: u32,
    /// File of the call that raised it.
    pub file: &'static str,
}

impl ConfigError {
    /// Builds an error located at the caller.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
