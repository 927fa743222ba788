//! Adapter layer converting typed games to erased interface
//!
//! `GameAdapter` wraps any typed `Game` and provides `ErasedGame` by running
//! each abstract input through the game's own translation first.

use tracing::trace;

use crate::erased::ErasedGame;
use crate::input::Input;
use crate::typed::{Capabilities, EngineId, Game, Phase};

/// Adapter that converts typed games to erased interface
///
/// # Example
///
/// ```rust
/// # use engine_core::adapter::GameAdapter;
/// # use engine_core::erased::ErasedGame;
/// # use engine_core::typed::*;
/// # use engine_core::Input;
/// # #[derive(Default)]
/// # struct MyGame;
/// # #[derive(Clone, Debug)]
/// # struct View;
/// # impl std::fmt::Display for View {
/// #     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "view") }
/// # }
/// # impl Game for MyGame {
/// #     type Action = ();
/// #     type Snapshot = View;
/// #     fn engine_id(&self) -> EngineId { EngineId { env_id: "my_game".into(), build_id: "0".into() } }
/// #     fn capabilities(&self) -> Capabilities { todo!() }
/// #     fn reset(&mut self) {}
/// #     fn tick(&mut self) {}
/// #     fn apply(&mut self, _action: ()) {}
/// #     fn translate(&self, _input: Input) -> Option<()> { None }
/// #     fn snapshot(&self) -> View { View }
/// #     fn phase(&self) -> Phase { Phase::Running }
/// #     fn score(&self) -> u32 { 0 }
/// # }
///
/// let typed_game = MyGame::default();
/// let erased_game: Box<dyn ErasedGame> = Box::new(GameAdapter::new(typed_game));
///
/// // Now you can use the erased interface
/// let engine_id = erased_game.engine_id();
/// println!("Game: {}", engine_id.env_id);
/// ```
pub struct GameAdapter<T: Game> {
    game: T,
}

impl<T: Game> GameAdapter<T> {
    /// Create a new adapter wrapping the given game
    pub fn new(game: T) -> Self {
        Self { game }
    }

    /// Get a reference to the underlying game
    pub fn game(&self) -> &T {
        &self.game
    }

    /// Get a mutable reference to the underlying game
    pub fn game_mut(&mut self) -> &mut T {
        &mut self.game
    }

    /// Consume the adapter and return the underlying game
    pub fn into_inner(self) -> T {
        self.game
    }
}

impl<T: Game> ErasedGame for GameAdapter<T> {
    fn engine_id(&self) -> EngineId {
        self.game.engine_id()
    }

    fn capabilities(&self) -> Capabilities {
        self.game.capabilities()
    }

    fn reset(&mut self) {
        self.game.reset();
    }

    fn tick(&mut self) {
        self.game.tick();
    }

    fn handle_input(&mut self, input: Input) -> bool {
        match self.game.translate(input) {
            Some(action) => {
                trace!(?input, ?action, "applying action");
                self.game.apply(action);
                true
            }
            None => false,
        }
    }

    fn phase(&self) -> Phase {
        self.game.phase()
    }

    fn score(&self) -> u32 {
        self.game.score()
    }

    fn render_text(&self) -> String {
        self.game.snapshot().to_string()
    }
}
