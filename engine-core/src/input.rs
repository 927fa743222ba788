//! Abstract input vocabulary
//!
//! Raw key and pointer events are reduced to `Input` values before they reach
//! an engine. Each game then maps the inputs it understands to its own typed
//! actions and ignores the rest.

use serde::{Deserialize, Serialize};

use crate::grid::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Input {
    Up,
    Down,
    Left,
    Right,
    Rotate,
    Pause,
    /// Acknowledge a finished round and start over
    Restart,
    /// A board cell chosen directly, already in grid coordinates
    Cell(Coordinate),
    /// A pointer click in surface pixels
    Pointer { x: f32, y: f32 },
}

impl Input {
    /// Map a raw key name to an input; unknown keys are ignored
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Input::Up),
            "ArrowDown" => Some(Input::Down),
            "ArrowLeft" => Some(Input::Left),
            "ArrowRight" => Some(Input::Right),
            "k" => Some(Input::Rotate),
            "p" => Some(Input::Pause),
            "r" | "Enter" => Some(Input::Restart),
            _ => None,
        }
    }

    /// Inputs that steer the session rather than play the game
    pub fn is_control(&self) -> bool {
        matches!(self, Input::Pause | Input::Restart)
    }
}
