use anyhow::{anyhow, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "arcade")]
#[command(about = "Headless arcade session runner")]
#[command(long_about = "Runs Snake, Tetris or TicTacToe episodes without a screen.

Inputs come from a seeded random policy or a fixed script, time is simulated
frame by frame (or follows the wall clock with --realtime), and a score
summary is logged at the end of the session.")]
pub struct Config {
    /// Game to run (snake, tetris, tictactoe)
    #[arg(long, env = "ARCADE_GAME", default_value = "snake")]
    pub game: String,

    /// Number of episodes to play
    #[arg(long, env = "ARCADE_EPISODES", default_value = "1")]
    pub episodes: u32,

    /// Frame budget per episode
    #[arg(long, env = "ARCADE_MAX_FRAMES", default_value = "20000")]
    pub max_frames: u64,

    /// Length of one frame in milliseconds
    #[arg(long, env = "ARCADE_FRAME_MS", default_value = "16")]
    pub frame_ms: u64,

    /// RNG seed for games and the random policy; entropy when absent
    #[arg(long, env = "ARCADE_SEED")]
    pub seed: Option<u64>,

    /// TOML file with per-game settings
    #[arg(long, env = "ARCADE_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Comma-separated inputs to replay instead of random play
    /// (key names such as ArrowLeft, or x:y cells)
    #[arg(long, env = "ARCADE_SCRIPT")]
    pub script: Option<String>,

    /// Sleep for each frame instead of simulating time
    #[arg(long, env = "ARCADE_REALTIME")]
    pub realtime: bool,

    /// Print the board after every episode
    #[arg(long, env = "ARCADE_RENDER")]
    pub render: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "ARCADE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.game.is_empty() {
            return Err(anyhow!("game cannot be empty"));
        }

        if self.episodes == 0 {
            return Err(anyhow!("episodes must be greater than 0"));
        }

        if self.max_frames == 0 {
            return Err(anyhow!("max_frames must be greater than 0"));
        }

        if self.frame_ms == 0 {
            return Err(anyhow!("frame_ms must be greater than 0"));
        }

        Ok(())
    }

    pub fn frame(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}
