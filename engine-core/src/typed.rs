//! Typed Game trait providing ergonomic interface for game developers
//!
//! Each engine owns its whole state and exposes it through a strongly-typed
//! action vocabulary and a read-only snapshot. Rendering and raw input handling
//! live outside the engine.

use std::fmt::{Debug, Display};
use std::time::Duration;

use crate::input::Input;

/// Engine identification information
#[derive(Debug, Clone, PartialEq)]
pub struct EngineId {
    pub env_id: String,
    pub build_id: String,
}

/// Board dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSize {
    pub width: usize,
    pub height: usize,
}

/// Game capabilities and configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Capabilities {
    pub id: EngineId,
    pub board: BoardSize,
    /// Edge length of one cell on the drawing surface, in pixels
    pub cell_size: u32,
    /// Fixed simulation step, `None` for purely event-driven games
    pub tick_interval: Option<Duration>,
    /// Every input the engine reacts to
    pub inputs: Vec<Input>,
}

/// Coarse status shared by all engines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    /// Terminal until the engine is reset
    Finished,
}

/// Main trait for game implementations
///
/// `tick` advances time-driven rules and `apply` resolves player intent.
/// Neither ever fails: an action that is illegal in the current state is a
/// no-op.
///
/// # Example
///
/// ```rust
/// # use engine_core::typed::*;
/// # use engine_core::Input;
/// # use std::fmt;
/// struct Counter { value: u32 }
///
/// #[derive(Clone, Copy, Debug)]
/// enum CounterAction { Bump }
///
/// #[derive(Clone, Debug)]
/// struct CounterView(u32);
///
/// impl fmt::Display for CounterView {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "{}", self.0)
///     }
/// }
///
/// impl Game for Counter {
///     type Action = CounterAction;
///     type Snapshot = CounterView;
///
///     fn engine_id(&self) -> EngineId {
///         EngineId { env_id: "counter".into(), build_id: "0.1.0".into() }
///     }
///     fn capabilities(&self) -> Capabilities {
///         Capabilities {
///             id: self.engine_id(),
///             board: BoardSize { width: 1, height: 1 },
///             cell_size: 10,
///             tick_interval: None,
///             inputs: vec![Input::Up],
///         }
///     }
///     fn reset(&mut self) { self.value = 0; }
///     fn tick(&mut self) {}
///     fn apply(&mut self, action: CounterAction) {
///         match action {
///             CounterAction::Bump => self.value += 1,
///         }
///     }
///     fn translate(&self, input: Input) -> Option<CounterAction> {
///         (input == Input::Up).then_some(CounterAction::Bump)
///     }
///     fn snapshot(&self) -> CounterView { CounterView(self.value) }
///     fn phase(&self) -> Phase { Phase::Running }
///     fn score(&self) -> u32 { self.value }
/// }
///
/// let mut counter = Counter { value: 0 };
/// counter.apply(CounterAction::Bump);
/// assert_eq!(counter.snapshot().to_string(), "1");
/// ```
pub trait Game: Send + 'static {
    /// Discrete player intent
    type Action: Copy + Debug + Send + 'static;

    /// Read-only view handed to a renderer once per frame
    type Snapshot: Clone + Debug + Display + Send + 'static;

    /// Get engine identification information
    fn engine_id(&self) -> EngineId;

    /// Get game capabilities and configuration
    fn capabilities(&self) -> Capabilities;

    /// Return to the initial lifecycle state
    fn reset(&mut self);

    /// Advance one fixed simulation step
    fn tick(&mut self);

    /// Resolve one player action into new state
    fn apply(&mut self, action: Self::Action);

    /// Map an abstract input to this game's action vocabulary
    fn translate(&self, input: Input) -> Option<Self::Action>;

    fn snapshot(&self) -> Self::Snapshot;

    fn phase(&self) -> Phase;

    fn score(&self) -> u32;
}
