//! Tetris game implementation for the arcade engine
//!
//! One piece falls at a time. When gravity or a soft drop cannot move it any
//! further it is merged into the board, complete rows are cleared in a single
//! pass and a new random piece appears at the spawn origin.

pub mod palette;

use std::fmt;
use std::time::Duration;

use engine_core::typed::{BoardSize, Capabilities, EngineId, Game, Phase};
use engine_core::{ConfigError, Coordinate, Grid, Input};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

pub const ENV_ID: &str = "tetris";

/// Construction-time constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TetrisConfig {
    pub width: usize,
    pub height: usize,
    pub cell_size: u32,
    pub tick_interval_ms: u64,
    /// Points per cleared row
    pub row_reward: u32,
    /// Top-left corner of every new piece
    pub spawn: Coordinate,
    /// Each shape as rows of 0 (empty) / non-zero (filled)
    pub shapes: Vec<Vec<Vec<u8>>>,
    /// Colour names; index 0 is the background
    pub colors: Vec<String>,
}

impl Default for TetrisConfig {
    fn default() -> Self {
        Self {
            width: 15,
            height: 30,
            cell_size: 23,
            tick_interval_ms: 1000,
            row_reward: 10,
            spawn: Coordinate::new(5, 0),
            shapes: palette::default_shapes(),
            colors: palette::default_colors(),
        }
    }
}

impl TetrisConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build_shapes().map(|_| ())
    }

    /// Validate and convert the shape palette into 0/1 grids
    fn build_shapes(&self) -> Result<Vec<Grid<u8>>, ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyBoard { width: self.width, height: self.height });
        }
        if self.colors.len() < 2 {
            return Err(ConfigError::invalid("colors", "needs a background and at least one piece colour"));
        }
        if self.colors.len() > u8::MAX as usize {
            return Err(ConfigError::invalid("colors", format!("at most {} colours", u8::MAX)));
        }
        if self.shapes.is_empty() {
            return Err(ConfigError::invalid("shapes", "palette is empty"));
        }

        let mut shapes = Vec::with_capacity(self.shapes.len());
        for (i, rows) in self.shapes.iter().enumerate() {
            let shape = Grid::from_rows(rows.clone())?.map(|&v| u8::from(v != 0));
            if shape.iter().all(|(_, &v)| v == 0) {
                return Err(ConfigError::invalid("shapes", format!("shape {} has no filled cell", i)));
            }
            let fits = self.spawn.x >= 0
                && self.spawn.y >= 0
                && self.spawn.x as usize + shape.width() <= self.width
                && self.spawn.y as usize + shape.height() <= self.height;
            if !fits {
                return Err(ConfigError::invalid(
                    "spawn",
                    format!(
                        "shape {} ({}x{}) does not fit at ({}, {}) on the {}x{} board",
                        i,
                        shape.width(),
                        shape.height(),
                        self.spawn.x,
                        self.spawn.y,
                        self.width,
                        self.height
                    ),
                ));
            }
            shapes.push(shape);
        }
        Ok(shapes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Running,
    /// Gravity is suspended; explicit moves still apply
    Paused,
    /// A fresh piece collided on spawn
    BoardFull,
}

/// Falling piece in board coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Piece {
    /// Local cells: 0 empty, otherwise the palette index
    pub shape: Grid<u8>,
    pub origin: Coordinate,
}

impl Piece {
    /// Board coordinates of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (Coordinate, u8)> + '_ {
        self.shape
            .iter()
            .filter(|&(_, &v)| v != 0)
            .map(move |(local, &v)| (self.origin.offset(local.x, local.y), v))
    }
}

/// Tetris action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move { dx: i32 },
    Rotate,
    SoftDrop,
    TogglePause,
    Reset,
}

/// Read-only view for a renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub board: Grid<u8>,
    pub active: Option<Piece>,
    pub score: u32,
    pub status: Status,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.status {
            Status::Running => "running",
            Status::Paused => "paused",
            Status::BoardFull => "board full",
        };
        writeln!(f, "score: {} [{}]", self.score, state)?;

        let mut cells = self.board.map(|&v| if v == 0 { '.' } else { '#' });
        if let Some(piece) = &self.active {
            for (at, _) in piece.cells() {
                cells.set(at, '@');
            }
        }
        for row in cells.rows() {
            writeln!(f, "{}", row.iter().collect::<String>())?;
        }
        Ok(())
    }
}

/// Tetris engine owning the board, the falling piece and the score
#[derive(Debug, Clone)]
pub struct Tetris {
    config: TetrisConfig,
    shapes: Vec<Grid<u8>>,
    rng: ChaCha20Rng,
    board: Grid<u8>,
    active: Option<Piece>,
    score: u32,
    status: Status,
}

impl Tetris {
    /// Create a new game; the seed drives shape and colour selection
    pub fn new(config: TetrisConfig, seed: u64) -> Result<Self, ConfigError> {
        let shapes = config.build_shapes()?;

        let mut tetris = Self {
            board: Grid::new(config.width, config.height, 0),
            shapes,
            rng: ChaCha20Rng::seed_from_u64(seed),
            active: None,
            score: 0,
            status: Status::Running,
            config,
        };
        tetris.spawn_piece();
        Ok(tetris)
    }

    pub fn config(&self) -> &TetrisConfig {
        &self.config
    }

    pub fn board(&self) -> &Grid<u8> {
        &self.board
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Colour name for a palette index
    pub fn color_name(&self, index: u8) -> Option<&str> {
        self.config.colors.get(index as usize).map(String::as_str)
    }

    /// Gravity step; skipped while paused
    pub fn tick(&mut self) {
        if self.status != Status::Running {
            return;
        }
        self.step_down();
    }

    /// Explicit downward step, effective even while paused
    pub fn soft_drop(&mut self) {
        if self.status == Status::BoardFull {
            return;
        }
        self.step_down();
    }

    pub fn move_horizontal(&mut self, dx: i32) {
        if self.status == Status::BoardFull {
            return;
        }
        let Some(piece) = &self.active else { return };

        let origin = piece.origin.offset(dx, 0);
        if !self.collides(&piece.shape, origin) {
            if let Some(piece) = self.active.as_mut() {
                piece.origin = origin;
            }
        }
    }

    /// Rotate 90 degrees clockwise in place, no wall kicks
    pub fn rotate(&mut self) {
        if self.status == Status::BoardFull {
            return;
        }
        let Some(piece) = &self.active else { return };

        let rotated = piece.shape.rotate_clockwise();
        if !self.collides(&rotated, piece.origin) {
            if let Some(piece) = self.active.as_mut() {
                piece.shape = rotated;
            }
        }
    }

    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            Status::Running => Status::Paused,
            Status::Paused => Status::Running,
            Status::BoardFull => Status::BoardFull,
        };
    }

    pub fn reset(&mut self) {
        self.board = Grid::new(self.config.width, self.config.height, 0);
        self.score = 0;
        self.status = Status::Running;
        self.spawn_piece();
        debug!("tetris reset");
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            active: self.active.clone(),
            score: self.score,
            status: self.status,
        }
    }

    /// True when any filled cell lands off the board or on a settled cell
    fn collides(&self, shape: &Grid<u8>, origin: Coordinate) -> bool {
        shape
            .iter()
            .filter(|&(_, &v)| v != 0)
            .any(|(local, _)| self.board.get(origin.offset(local.x, local.y)) != Some(&0))
    }

    fn step_down(&mut self) {
        let Some(piece) = &self.active else { return };

        let origin = piece.origin.offset(0, 1);
        if self.collides(&piece.shape, origin) {
            self.lock_piece();
            self.clear_rows();
            self.spawn_piece();
        } else if let Some(piece) = self.active.as_mut() {
            piece.origin = origin;
        }
    }

    fn lock_piece(&mut self) {
        if let Some(piece) = self.active.take() {
            trace!(origin = ?piece.origin, "locking piece");
            for (at, color) in piece.cells() {
                self.board.set(at, color);
            }
        }
    }

    fn clear_rows(&mut self) {
        let cleared = self.board.clear_rows_where(|row| row.iter().all(|&v| v != 0), 0);
        if cleared > 0 {
            self.score = self
                .score
                .saturating_add((cleared as u32).saturating_mul(self.config.row_reward));
            debug!(cleared, score = self.score, "cleared rows");
        }
    }

    fn spawn_piece(&mut self) {
        let index = self.rng.gen_range(0..self.shapes.len());
        let color = self.rng.gen_range(1..self.config.colors.len()) as u8;
        let shape = self.shapes[index].map(|&v| if v != 0 { color } else { 0 });
        let origin = self.config.spawn;

        if self.collides(&shape, origin) {
            info!(score = self.score, "no room for a new piece, board full");
            self.status = Status::BoardFull;
        }
        self.active = Some(Piece { shape, origin });
    }
}

impl Game for Tetris {
    type Action = Action;
    type Snapshot = Snapshot;

    fn engine_id(&self) -> EngineId {
        EngineId {
            env_id: ENV_ID.to_string(),
            build_id: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            id: self.engine_id(),
            board: BoardSize { width: self.config.width, height: self.config.height },
            cell_size: self.config.cell_size,
            tick_interval: Some(self.config.tick_interval()),
            inputs: vec![
                Input::Left,
                Input::Right,
                Input::Down,
                Input::Up,
                Input::Rotate,
                Input::Pause,
                Input::Restart,
            ],
        }
    }

    fn reset(&mut self) {
        Tetris::reset(self);
    }

    fn tick(&mut self) {
        Tetris::tick(self);
    }

    fn apply(&mut self, action: Self::Action) {
        match action {
            Action::Move { dx } => self.move_horizontal(dx),
            Action::Rotate => self.rotate(),
            Action::SoftDrop => self.soft_drop(),
            Action::TogglePause => self.toggle_pause(),
            Action::Reset => Tetris::reset(self),
        }
    }

    fn translate(&self, input: Input) -> Option<Self::Action> {
        match input {
            Input::Left => Some(Action::Move { dx: -1 }),
            Input::Right => Some(Action::Move { dx: 1 }),
            Input::Down => Some(Action::SoftDrop),
            Input::Up | Input::Rotate => Some(Action::Rotate),
            Input::Pause => Some(Action::TogglePause),
            Input::Restart => Some(Action::Reset),
            Input::Cell(_) | Input::Pointer { .. } => None,
        }
    }

    fn snapshot(&self) -> Self::Snapshot {
        Tetris::snapshot(self)
    }

    fn phase(&self) -> Phase {
        match self.status {
            Status::Running => Phase::Running,
            Status::Paused => Phase::Paused,
            Status::BoardFull => Phase::Finished,
        }
    }

    fn score(&self) -> u32 {
        self.score
    }
}
