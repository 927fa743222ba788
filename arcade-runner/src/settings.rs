//! Per-game settings file
//!
//! ```toml
//! [snake]
//! width = 20
//!
//! [tetris]
//! tick_interval_ms = 500
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use games_snake::SnakeConfig;
use games_tetris::TetrisConfig;
use games_tictactoe::TicTacToeConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub snake: SnakeConfig,
    pub tetris: TetrisConfig,
    pub tictactoe: TicTacToeConfig,
}

impl Settings {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid settings")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }
}
