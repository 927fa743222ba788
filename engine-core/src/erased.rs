//! Erased Game interface for runtime polymorphism
//!
//! A host loop that can run any registered game only speaks abstract inputs
//! and coarse status. Typed games are converted to this interface via the
//! adapter layer.

use crate::input::Input;
use crate::typed::{Capabilities, EngineId, Phase};

/// Erased game trait without associated types
///
/// Suitable for `Box<dyn ErasedGame>` and for storing factories in the
/// registry.
///
/// # Example Usage
///
/// ```rust
/// # use engine_core::erased::*;
/// # use engine_core::{Input, Phase};
///
/// fn press_until_done(game: &mut dyn ErasedGame, input: Input, budget: u32) -> u32 {
///     for _ in 0..budget {
///         if game.phase() == Phase::Finished {
///             break;
///         }
///         game.handle_input(input);
///         game.tick();
///     }
///     game.score()
/// }
/// ```
pub trait ErasedGame: Send + 'static {
    /// Get engine identification information
    fn engine_id(&self) -> EngineId;

    /// Get game capabilities and configuration
    fn capabilities(&self) -> Capabilities;

    fn reset(&mut self);

    fn tick(&mut self);

    /// Feed one input to the game
    ///
    /// Returns `false` when the game does not recognise the input; it is then
    /// ignored.
    fn handle_input(&mut self, input: Input) -> bool;

    fn phase(&self) -> Phase;

    fn score(&self) -> u32;

    /// Plain-text rendering of the current snapshot
    fn render_text(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typed::BoardSize;

    // Mock implementation for testing
    struct MockErasedGame {
        presses: u32,
    }

    impl ErasedGame for MockErasedGame {
        fn engine_id(&self) -> EngineId {
            EngineId {
                env_id: "mock".to_string(),
                build_id: "0.1.0".to_string(),
            }
        }

        fn capabilities(&self) -> Capabilities {
            Capabilities {
                id: self.engine_id(),
                board: BoardSize { width: 1, height: 1 },
                cell_size: 1,
                tick_interval: None,
                inputs: vec![Input::Up],
            }
        }

        fn reset(&mut self) {
            self.presses = 0;
        }

        fn tick(&mut self) {}

        fn handle_input(&mut self, input: Input) -> bool {
            if input != Input::Up {
                return false;
            }
            self.presses += 1;
            true
        }

        fn phase(&self) -> Phase {
            if self.presses >= 3 {
                Phase::Finished
            } else {
                Phase::Running
            }
        }

        fn score(&self) -> u32 {
            self.presses
        }

        fn render_text(&self) -> String {
            format!("presses={}", self.presses)
        }
    }

    #[test]
    fn test_erased_game_through_trait_object() {
        let mut game: Box<dyn ErasedGame> = Box::new(MockErasedGame { presses: 0 });

        assert!(game.handle_input(Input::Up));
        assert!(!game.handle_input(Input::Left));
        assert_eq!(game.score(), 1);
        assert_eq!(game.render_text(), "presses=1");

        game.handle_input(Input::Up);
        game.handle_input(Input::Up);
        assert_eq!(game.phase(), Phase::Finished);

        game.reset();
        assert_eq!(game.phase(), Phase::Running);
    }
}
