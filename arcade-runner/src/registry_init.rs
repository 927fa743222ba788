//! Game registry initialization
//!
//! Registers every available game with the global registry, using the
//! configuration loaded from the settings file.

use std::sync::Arc;

use engine_core::registry::list_registered_games;
use engine_core::{register_game, ConfigError, ErasedGame, GameAdapter, GameFactory};
use games_snake::Snake;
use games_tetris::Tetris;
use games_tictactoe::TicTacToe;
use tracing::info;

use crate::settings::Settings;

/// One factory per game, keyed by env_id
///
/// Factories validate their configuration on every call, so a bad settings
/// file surfaces as a `ConfigError` when the first episode is created.
pub fn game_factories(settings: &Settings) -> Vec<(&'static str, GameFactory)> {
    let snake = settings.snake.clone();
    let tetris = settings.tetris.clone();
    let tictactoe = settings.tictactoe.clone();

    vec![
        (
            games_snake::ENV_ID,
            Arc::new(move |seed: u64| -> Result<Box<dyn ErasedGame>, ConfigError> {
                let game = Snake::new(snake.clone(), seed)?;
                Ok(Box::new(GameAdapter::new(game)) as Box<dyn ErasedGame>)
            }) as GameFactory,
        ),
        (
            games_tetris::ENV_ID,
            Arc::new(move |seed: u64| -> Result<Box<dyn ErasedGame>, ConfigError> {
                let game = Tetris::new(tetris.clone(), seed)?;
                Ok(Box::new(GameAdapter::new(game)) as Box<dyn ErasedGame>)
            }) as GameFactory,
        ),
        (
            games_tictactoe::ENV_ID,
            Arc::new(move |_seed: u64| -> Result<Box<dyn ErasedGame>, ConfigError> {
                let game = TicTacToe::new(tictactoe.clone());
                Ok(Box::new(GameAdapter::new(game)) as Box<dyn ErasedGame>)
            }) as GameFactory,
        ),
    ]
}

/// Initialize the global game registry with all available games
pub fn initialize_registry(settings: &Settings) {
    for (env_id, factory) in game_factories(settings) {
        register_game(env_id, factory);
    }

    let games = list_registered_games();
    info!(count = games.len(), ?games, "initialized game registry");
}
