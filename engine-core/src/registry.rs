//! Game registry keyed by env_id
//!
//! Hosts register one factory per game and create fresh instances by name.
//! A process-wide registry is available through the free functions; tests
//! and embedders can also hold their own `Registry`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use once_cell::sync::Lazy;
use tracing::{debug, warn};

use crate::erased::ErasedGame;
use crate::error::ConfigError;

/// Factory function type for creating game instances from an RNG seed
pub type GameFactory =
    Arc<dyn Fn(u64) -> Result<Box<dyn ErasedGame>, ConfigError> + Send + Sync>;

/// Mapping from env_id to game factory
#[derive(Default, Clone)]
pub struct Registry {
    factories: HashMap<String, GameFactory>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory, replacing any previous one under the same id
    pub fn register(&mut self, env_id: impl Into<String>, factory: GameFactory) {
        let env_id = env_id.into();
        if self.factories.contains_key(&env_id) {
            warn!(%env_id, "overriding existing game registration");
        }
        debug!(%env_id, "registered game");
        self.factories.insert(env_id, factory);
    }

    /// Create a new game instance by env_id
    ///
    /// Returns `None` if the env_id is not registered, otherwise the
    /// factory's result.
    pub fn create(&self, env_id: &str, seed: u64) -> Option<Result<Box<dyn ErasedGame>, ConfigError>> {
        self.factories.get(env_id).map(|factory| factory(seed))
    }

    /// All registered env_ids, sorted
    pub fn list(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.factories.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn is_registered(&self, env_id: &str) -> bool {
        self.factories.contains_key(env_id)
    }

    pub fn clear(&mut self) {
        self.factories.clear();
    }
}

/// Process-wide registry backing the free functions below
static REGISTRY: Lazy<Mutex<Registry>> = Lazy::new(|| Mutex::new(Registry::new()));

fn global() -> MutexGuard<'static, Registry> {
    // Registration never panics mid-update, so a poisoned lock still holds a
    // consistent map.
    REGISTRY.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Register a game with the global registry
pub fn register_game(env_id: impl Into<String>, factory: GameFactory) {
    global().register(env_id, factory);
}

/// Create a new game instance from the global registry
pub fn create_game(env_id: &str, seed: u64) -> Option<Result<Box<dyn ErasedGame>, ConfigError>> {
    global().create(env_id, seed)
}

/// Get list of all registered environment IDs
pub fn list_registered_games() -> Vec<String> {
    global().list()
}

/// Check if a game is registered globally
pub fn is_registered(env_id: &str) -> bool {
    global().is_registered(env_id)
}

/// Clear all registered games (mainly for testing)
pub fn clear_registry() {
    global().clear();
}
