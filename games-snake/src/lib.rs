//! Snake game implementation for the arcade engine
//!
//! The snake moves one cell per tick on a toroidal board, grows when it
//! reaches the food and ends the round when its head lands on its own body.

use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::time::Duration;

use engine_core::typed::{BoardSize, Capabilities, EngineId, Game, Phase};
use engine_core::{ConfigError, Coordinate, Input};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const ENV_ID: &str = "snake";

/// Heading on the board; `Down` is +y
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit step as `(dx, dy)`
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Construction-time constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    pub width: usize,
    pub height: usize,
    pub cell_size: u32,
    pub tick_interval_ms: u64,
    pub food_reward: u32,
    /// Tail first, head last
    pub initial_body: Vec<Coordinate>,
    pub initial_direction: Direction,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            width: 14,
            height: 30,
            cell_size: 23,
            tick_interval_ms: 300,
            food_reward: 10,
            initial_body: vec![Coordinate::new(0, 1), Coordinate::new(1, 1)],
            initial_direction: Direction::Down,
        }
    }
}

impl SnakeConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyBoard { width: self.width, height: self.height });
        }

        if self.initial_body.len() < 2 {
            return Err(ConfigError::invalid(
                "initial_body",
                format!("needs at least 2 cells, got {}", self.initial_body.len()),
            ));
        }

        let mut seen = HashSet::new();
        for cell in &self.initial_body {
            let in_bounds = cell.x >= 0
                && cell.y >= 0
                && (cell.x as usize) < self.width
                && (cell.y as usize) < self.height;
            if !in_bounds {
                return Err(ConfigError::invalid(
                    "initial_body",
                    format!("cell ({}, {}) is off the {}x{} board", cell.x, cell.y, self.width, self.height),
                ));
            }
            if !seen.insert(*cell) {
                return Err(ConfigError::invalid(
                    "initial_body",
                    format!("cell ({}, {}) appears twice", cell.x, cell.y),
                ));
            }
        }

        if self.initial_body.len() >= self.width * self.height {
            return Err(ConfigError::invalid("initial_body", "leaves no free cell for food"));
        }

        let head = self.initial_body[self.initial_body.len() - 1];
        let neck = self.initial_body[self.initial_body.len() - 2];
        let (dx, dy) = self.initial_direction.delta();
        if head.offset(dx, dy).wrapped(self.width, self.height) == neck {
            return Err(ConfigError::invalid(
                "initial_direction",
                format!("{:?} points from the head into the neck", self.initial_direction),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Running,
    /// The head ran into the body
    GameOver,
    /// The body covers every cell, no food can be placed
    Won,
}

/// Snake action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Turn(Direction),
    TogglePause,
    Reset,
}

/// Read-only view for a renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Tail first, head last
    pub body: Vec<Coordinate>,
    pub food: Option<Coordinate>,
    pub width: usize,
    pub height: usize,
    pub score: u32,
    pub status: Status,
    pub paused: bool,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match (self.status, self.paused) {
            (Status::GameOver, _) => "game over",
            (Status::Won, _) => "board filled",
            (Status::Running, true) => "paused",
            (Status::Running, false) => "running",
        };
        writeln!(f, "score: {} [{}]", self.score, state)?;

        let head = self.body.last().copied();
        let body: HashSet<Coordinate> = self.body.iter().copied().collect();
        for y in 0..self.height as i32 {
            let line: String = (0..self.width as i32)
                .map(|x| {
                    let cell = Coordinate::new(x, y);
                    if Some(cell) == head {
                        '@'
                    } else if body.contains(&cell) {
                        'o'
                    } else if Some(cell) == self.food {
                        '*'
                    } else {
                        '.'
                    }
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Snake engine owning body, food, heading and score
#[derive(Debug, Clone)]
pub struct Snake {
    config: SnakeConfig,
    rng: ChaCha20Rng,
    body: VecDeque<Coordinate>,
    /// Direction used by the next tick
    direction: Direction,
    /// Direction of the last committed step
    heading: Direction,
    food: Option<Coordinate>,
    score: u32,
    status: Status,
    paused: bool,
}

impl Snake {
    /// Create a new snake game; the seed drives food placement
    pub fn new(config: SnakeConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut snake = Self {
            body: config.initial_body.iter().copied().collect(),
            direction: config.initial_direction,
            heading: config.initial_direction,
            rng: ChaCha20Rng::seed_from_u64(seed),
            food: None,
            score: 0,
            status: Status::Running,
            paused: false,
            config,
        };
        snake.food = snake.spawn_food();
        Ok(snake)
    }

    pub fn config(&self) -> &SnakeConfig {
        &self.config
    }

    /// Tail first, head last
    pub fn body(&self) -> impl Iterator<Item = &Coordinate> {
        self.body.iter()
    }

    pub fn head(&self) -> Coordinate {
        // The body never drops below two cells
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn food(&self) -> Option<Coordinate> {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advance one step
    pub fn tick(&mut self) {
        if self.paused || self.status != Status::Running {
            return;
        }

        let (dx, dy) = self.direction.delta();
        let candidate = self.head().offset(dx, dy).wrapped(self.config.width, self.config.height);
        self.heading = self.direction;

        if self.body.contains(&candidate) {
            info!(score = self.score, length = self.body.len(), "snake ran into itself");
            self.status = Status::GameOver;
            return;
        }

        if self.food == Some(candidate) {
            self.body.push_back(candidate);
            self.score = self.score.saturating_add(self.config.food_reward);
            self.food = self.spawn_food();
            debug!(score = self.score, length = self.body.len(), "snake ate food");
            if self.food.is_none() {
                info!(score = self.score, "snake filled the board");
                self.status = Status::Won;
            }
        } else {
            self.body.pop_front();
            self.body.push_back(candidate);
        }
    }

    /// Queue a new direction for the next tick
    ///
    /// Reversing is ignored, both against the queued direction and against
    /// the heading of the last step.
    pub fn set_direction(&mut self, direction: Direction) {
        if direction == self.direction.opposite() || direction == self.heading.opposite() {
            return;
        }
        self.direction = direction;
    }

    pub fn toggle_pause(&mut self) {
        if self.status == Status::Running {
            self.paused = !self.paused;
        }
    }

    pub fn reset(&mut self) {
        self.body = self.config.initial_body.iter().copied().collect();
        self.direction = self.config.initial_direction;
        self.heading = self.config.initial_direction;
        self.score = 0;
        self.status = Status::Running;
        self.paused = false;
        self.food = self.spawn_food();
        debug!("snake reset");
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            body: self.body.iter().copied().collect(),
            food: self.food,
            width: self.config.width,
            height: self.config.height,
            score: self.score,
            status: self.status,
            paused: self.paused,
        }
    }

    /// Pick a uniformly random cell not covered by the body
    fn spawn_food(&mut self) -> Option<Coordinate> {
        let occupied: HashSet<Coordinate> = self.body.iter().copied().collect();
        let free: Vec<Coordinate> = (0..self.config.height as i32)
            .flat_map(|y| (0..self.config.width as i32).map(move |x| Coordinate::new(x, y)))
            .filter(|cell| !occupied.contains(cell))
            .collect();
        free.choose(&mut self.rng).copied()
    }
}

impl Game for Snake {
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
            inputs: vec![Input::Up, Input::Down, Input::Left, Input::Right, Input::Pause, Input::Restart],
        }
    }

    fn reset(&mut self) {
        Snake::reset(self);
    }

    fn tick(&mut self) {
        Snake::tick(self);
    }

    fn apply(&mut self, action: Self::Action) {
        match action {
            Action::Turn(direction) => self.set_direction(direction),
            Action::TogglePause => self.toggle_pause(),
            Action::Reset => Snake::reset(self),
        }
    }

    fn translate(&self, input: Input) -> Option<Self::Action> {
        match input {
            Input::Up => Some(Action::Turn(Direction::Up)),
            Input::Down => Some(Action::Turn(Direction::Down)),
            Input::Left => Some(Action::Turn(Direction::Left)),
            Input::Right => Some(Action::Turn(Direction::Right)),
            Input::Pause => Some(Action::TogglePause),
            Input::Restart => Some(Action::Reset),
            Input::Rotate | Input::Cell(_) | Input::Pointer { .. } => None,
        }
    }

    fn snapshot(&self) -> Self::Snapshot {
        Snake::snapshot(self)
    }

    fn phase(&self) -> Phase {
        match self.status {
            Status::GameOver | Status::Won => Phase::Finished,
            Status::Running if self.paused => Phase::Paused,
            Status::Running => Phase::Running,
        }
    }

    fn score(&self) -> u32 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32, y: i32) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn line_config(width: usize, height: usize) -> SnakeConfig {
        SnakeConfig {
            width,
            height,
            initial_body: vec![c(0, 0), c(1, 0), c(2, 0)],
            initial_direction: Direction::Right,
            ..SnakeConfig::default()
        }
    }

    fn body(snake: &Snake) -> Vec<Coordinate> {
        snake.body().copied().collect()
    }

    #[test]
    fn test_initial_state() {
        let snake = Snake::new(SnakeConfig::default(), 42).unwrap();

        assert_eq!(body(&snake), vec![c(0, 1), c(1, 1)]);
        assert_eq!(snake.direction(), Direction::Down);
        assert_eq!(snake.status(), Status::Running);
        assert_eq!(snake.score(), 0);

        let food = snake.food().unwrap();
        assert!(!body(&snake).contains(&food));
    }

    #[test]
    fn test_tick_moves_forward() {
        let mut snake = Snake::new(line_config(10, 10), 1).unwrap();
        snake.food = Some(c(9, 9));

        snake.tick();

        assert_eq!(body(&snake), vec![c(1, 0), c(2, 0), c(3, 0)]);
        assert_eq!(snake.score(), 0);
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut snake = Snake::new(line_config(5, 3), 1).unwrap();
        snake.food = Some(c(3, 0));

        snake.tick();

        assert_eq!(body(&snake), vec![c(0, 0), c(1, 0), c(2, 0), c(3, 0)]);
        assert_eq!(snake.score(), 10);
        let food = snake.food().unwrap();
        assert!(!body(&snake).contains(&food));
    }

    #[test]
    fn test_wraps_around_edges() {
        let mut snake = Snake::new(line_config(4, 4), 1).unwrap();
        snake.food = Some(c(0, 3));

        snake.tick(); // head (3, 0)
        snake.tick(); // head wraps to (0, 0)

        assert_eq!(snake.head(), c(0, 0));
        assert_eq!(snake.status(), Status::Running);

        snake.set_direction(Direction::Up);
        snake.tick();
        assert_eq!(snake.head(), c(0, 3));
        assert_eq!(snake.score(), 10);
    }

    #[test]
    fn test_self_collision_ends_game() {
        let config = SnakeConfig {
            width: 5,
            height: 5,
            initial_body: vec![c(2, 0), c(1, 0), c(1, 1), c(2, 1), c(2, 2), c(1, 2), c(0, 2)],
            initial_direction: Direction::Left,
            ..SnakeConfig::default()
        };
        let mut snake = Snake::new(config, 3).unwrap();
        snake.food = Some(c(4, 4));

        // head (0, 2) turns up into (0, 1), then right into (1, 1) mid-body
        snake.set_direction(Direction::Up);
        snake.tick();
        assert_eq!(snake.status(), Status::Running);
        snake.set_direction(Direction::Right);
        let before = body(&snake);
        snake.tick();

        assert_eq!(snake.status(), Status::GameOver);
        assert_eq!(body(&snake), before);
        assert_eq!(snake.phase(), Phase::Finished);

        // Terminal: further ticks change nothing
        snake.tick();
        assert_eq!(body(&snake), before);
    }

    #[test]
    fn test_opposite_direction_rejected() {
        let mut snake = Snake::new(line_config(10, 10), 1).unwrap();

        snake.set_direction(Direction::Left);
        assert_eq!(snake.direction(), Direction::Right);

        snake.set_direction(Direction::Right);
        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn test_two_quick_turns_cannot_reverse() {
        let mut snake = Snake::new(line_config(10, 10), 1).unwrap();

        // Heading right: up is accepted, then left would fold onto the neck
        snake.set_direction(Direction::Up);
        snake.set_direction(Direction::Left);
        assert_eq!(snake.direction(), Direction::Up);

        snake.tick();
        snake.set_direction(Direction::Left);
        assert_eq!(snake.direction(), Direction::Left);
    }

    #[test]
    fn test_set_direction_does_not_step() {
        let mut snake = Snake::new(line_config(10, 10), 1).unwrap();
        let before = body(&snake);
        snake.set_direction(Direction::Down);
        assert_eq!(body(&snake), before);
    }

    #[test]
    fn test_pause_freezes_ticks() {
        let mut snake = Snake::new(line_config(10, 10), 1).unwrap();
        snake.toggle_pause();
        assert_eq!(snake.phase(), Phase::Paused);

        let before = body(&snake);
        snake.tick();
        assert_eq!(body(&snake), before);

        snake.toggle_pause();
        snake.tick();
        assert_ne!(body(&snake), before);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut snake = Snake::new(line_config(5, 3), 1).unwrap();
        snake.food = Some(c(3, 0));
        snake.tick();
        snake.set_direction(Direction::Down);
        snake.toggle_pause();

        snake.reset();

        assert_eq!(body(&snake), vec![c(0, 0), c(1, 0), c(2, 0)]);
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.score(), 0);
        assert!(!snake.is_paused());
        assert_eq!(snake.status(), Status::Running);
    }

    #[test]
    fn test_filling_board_wins() {
        let config = SnakeConfig {
            width: 3,
            height: 1,
            initial_body: vec![c(0, 0), c(1, 0)],
            initial_direction: Direction::Right,
            ..SnakeConfig::default()
        };
        let mut snake = Snake::new(config, 9).unwrap();
        assert_eq!(snake.food(), Some(c(2, 0)));

        snake.tick();

        assert_eq!(snake.status(), Status::Won);
        assert_eq!(snake.food(), None);
        assert_eq!(snake.phase(), Phase::Finished);
    }

    #[test]
    fn test_same_seed_same_food() {
        let a = Snake::new(SnakeConfig::default(), 1234).unwrap();
        let b = Snake::new(SnakeConfig::default(), 1234).unwrap();
        assert_eq!(a.food(), b.food());
    }

    #[test]
    fn test_invalid_configs() {
        let empty = SnakeConfig { width: 0, ..SnakeConfig::default() };
        assert!(matches!(Snake::new(empty, 0), Err(ConfigError::EmptyBoard { .. })));

        let short = SnakeConfig { initial_body: vec![c(0, 0)], ..SnakeConfig::default() };
        assert!(Snake::new(short, 0).is_err());

        let off_board = SnakeConfig { initial_body: vec![c(0, 0), c(0, 30)], ..SnakeConfig::default() };
        assert!(Snake::new(off_board, 0).is_err());

        let duplicate = SnakeConfig { initial_body: vec![c(0, 0), c(0, 0)], ..SnakeConfig::default() };
        assert!(Snake::new(duplicate, 0).is_err());

        let full = SnakeConfig {
            width: 2,
            height: 1,
            initial_body: vec![c(0, 0), c(1, 0)],
            ..SnakeConfig::default()
        };
        assert!(Snake::new(full, 0).is_err());

        let into_neck = SnakeConfig {
            initial_body: vec![c(0, 0), c(1, 0)],
            initial_direction: Direction::Left,
            ..SnakeConfig::default()
        };
        assert!(matches!(
            Snake::new(into_neck, 0),
            Err(ConfigError::Invalid { field: "initial_direction", .. })
        ));
    }

    #[test]
    fn test_score_saturates() {
        let mut snake = Snake::new(SnakeConfig { food_reward: u32::MAX, ..line_config(5, 3) }, 1).unwrap();

        snake.food = Some(c(3, 0));
        snake.tick();
        snake.food = Some(c(4, 0));
        snake.tick();

        assert_eq!(snake.score(), u32::MAX);
        assert_eq!(snake.len(), 5);
    }

    #[test]
    fn test_translate_inputs() {
        let snake = Snake::new(SnakeConfig::default(), 0).unwrap();
        assert_eq!(snake.translate(Input::Left), Some(Action::Turn(Direction::Left)));
        assert_eq!(snake.translate(Input::Pause), Some(Action::TogglePause));
        assert_eq!(snake.translate(Input::Restart), Some(Action::Reset));
        assert_eq!(snake.translate(Input::Rotate), None);
        assert_eq!(snake.translate(Input::Cell(c(0, 0))), None);
    }

    #[test]
    fn test_engine_capabilities() {
        let snake = Snake::new(SnakeConfig::default(), 0).unwrap();
        let caps = snake.capabilities();

        assert_eq!(caps.id.env_id, "snake");
        assert_eq!(caps.board, BoardSize { width: 14, height: 30 });
        assert_eq!(caps.tick_interval, Some(Duration::from_millis(300)));
    }

    #[test]
    fn test_snapshot_display() {
        let mut snake = Snake::new(line_config(5, 2), 1).unwrap();
        snake.food = Some(c(4, 1));

        let text = snake.snapshot().to_string();
        assert_eq!(text, "score: 0 [running]\noo@..\n....*\n");
    }
}
