//! Core traits and types for the arcade game engines
//!
//! This crate provides the fundamental abstractions shared by every game:
//! - `Coordinate` and `Grid<T>`: the common board convention
//! - `Game`: Typed trait for ergonomic game development
//! - `ErasedGame`: Runtime interface that speaks abstract inputs
//! - `GameAdapter`: Automatic conversion from typed to erased interface
//! - `TickClock`: Fixed-step gate fed by a monotonic timestamp
//! - `Registry`: Lookup of games by env_id

pub mod adapter;
pub mod clock;
pub mod erased;
pub mod error;
pub mod grid;
pub mod input;
pub mod registry;
pub mod typed;

// Re-export main types for convenience
pub use adapter::GameAdapter;
pub use clock::TickClock;
pub use erased::ErasedGame;
pub use error::{ConfigError, GridError};
pub use grid::{Coordinate, Grid};
pub use input::Input;
pub use registry::{create_game, register_game, GameFactory, Registry};
pub use typed::{BoardSize, Capabilities, EngineId, Game, Phase};
