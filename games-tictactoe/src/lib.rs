//! TicTacToe game implementation for the arcade engine
//!
//! Purely event-driven: the board only changes when a player claims a cell.
//! A scoreboard of wins and draws survives `reset` for the whole session.

use std::fmt;

use engine_core::typed::{BoardSize, Capabilities, EngineId, Game, Phase};
use engine_core::{Coordinate, Grid, Input};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const ENV_ID: &str = "tictactoe";

/// Board edge length in cells
pub const SIZE: usize = 3;

/// Winning triples, rows then columns then diagonals
const LINES: [[(i32, i32); 3]; 8] = [
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(2, 0), (1, 1), (0, 2)],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Player {
    O,
    X,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::O => Player::X,
            Player::X => Player::O,
        }
    }
}

/// Content of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    Empty,
    Player(Player),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won(Player),
    Draw,
}

/// Round tallies, kept across resets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub o: u32,
    pub x: u32,
    pub draw: u32,
}

impl Scoreboard {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Won(Player::O) => self.o += 1,
            Outcome::Won(Player::X) => self.x += 1,
            Outcome::Draw => self.draw += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicTacToeConfig {
    /// Pixel edge of one cell, used to map pointer input
    pub cell_size: u32,
    pub first_player: Player,
}

impl Default for TicTacToeConfig {
    fn default() -> Self {
        Self { cell_size: 150, first_player: Player::O }
    }
}

/// TicTacToe action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Play(Coordinate),
    Reset,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub cells: Grid<Mark>,
    pub current_player: Player,
    pub winner: Option<Outcome>,
    pub scoreboard: Scoreboard,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self.winner {
            None => format!("{:?} to play", self.current_player),
            Some(Outcome::Won(player)) => format!("{:?} wins", player),
            Some(Outcome::Draw) => "draw".to_string(),
        };
        writeln!(
            f,
            "O {} / X {} / draw {} [{}]",
            self.scoreboard.o, self.scoreboard.x, self.scoreboard.draw, status
        )?;
        for row in self.cells.rows() {
            let line: String = row
                .iter()
                .map(|mark| match mark {
                    Mark::Empty => '.',
                    Mark::Player(Player::O) => 'O',
                    Mark::Player(Player::X) => 'X',
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// TicTacToe game state
#[derive(Debug, Clone)]
pub struct TicTacToe {
    config: TicTacToeConfig,
    cells: Grid<Mark>,
    current_player: Player,
    winner: Option<Outcome>,
    scoreboard: Scoreboard,
}

impl TicTacToe {
    pub fn new(config: TicTacToeConfig) -> Self {
        Self {
            cells: Grid::new(SIZE, SIZE, Mark::Empty),
            current_player: config.first_player,
            winner: None,
            scoreboard: Scoreboard::default(),
            config,
        }
    }

    /// Begin a round with the chosen opening player
    pub fn start(&mut self, first: Player) {
        self.reset();
        self.current_player = first;
    }

    pub fn cells(&self) -> &Grid<Mark> {
        &self.cells
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn winner(&self) -> Option<Outcome> {
        self.winner
    }

    pub fn scoreboard(&self) -> Scoreboard {
        self.scoreboard
    }

    /// Empty cells, row by row; nothing once the round is decided
    pub fn legal_moves(&self) -> Vec<Coordinate> {
        if self.winner.is_some() {
            return Vec::new();
        }
        self.cells
            .iter()
            .filter(|&(_, &mark)| mark == Mark::Empty)
            .map(|(at, _)| at)
            .collect()
    }

    /// Claim a cell for the current player
    ///
    /// Ignored after the round is decided, off the board, or on an occupied
    /// cell.
    pub fn play(&mut self, at: Coordinate) {
        if self.winner.is_some() || self.cells.get(at) != Some(&Mark::Empty) {
            return;
        }
        self.cells.set(at, Mark::Player(self.current_player));

        match self.evaluate() {
            Some(outcome) => {
                self.winner = Some(outcome);
                self.scoreboard.record(outcome);
                info!(?outcome, "round finished");
            }
            None => self.current_player = self.current_player.other(),
        }
    }

    /// Clear the board for another round; the scoreboard and the player to
    /// move are kept
    pub fn reset(&mut self) {
        self.cells = Grid::new(SIZE, SIZE, Mark::Empty);
        self.winner = None;
        debug!("tictactoe reset");
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cells: self.cells.clone(),
            current_player: self.current_player,
            winner: self.winner,
            scoreboard: self.scoreboard,
        }
    }

    fn evaluate(&self) -> Option<Outcome> {
        let mark = |(x, y): (i32, i32)| self.cells.get(Coordinate::new(x, y)).copied();

        for line in &LINES {
            let [a, b, c] = *line;
            if let Some(Mark::Player(player)) = mark(a) {
                if mark(b) == mark(a) && mark(c) == mark(a) {
                    return Some(Outcome::Won(player));
                }
            }
        }

        if self.cells.iter().all(|(_, &m)| m != Mark::Empty) {
            return Some(Outcome::Draw);
        }
        None
    }

    fn cell_at_pixel(&self, x: f32, y: f32) -> Option<Coordinate> {
        let size = self.config.cell_size as f32;
        if size <= 0.0 || !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
            return None;
        }
        let at = Coordinate::new((x / size).floor() as i32, (y / size).floor() as i32);
        self.cells.contains(at).then_some(at)
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new(TicTacToeConfig::default())
    }
}

impl Game for TicTacToe {
    type Action = Action;
    type Snapshot = Snapshot;

    fn engine_id(&self) -> EngineId {
        EngineId {
            env_id: ENV_ID.to_string(),
            build_id: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    fn capabilities(&self) -> Capabilities {
        let mut inputs: Vec<Input> = self.cells.iter().map(|(at, _)| Input::Cell(at)).collect();
        inputs.push(Input::Restart);

        Capabilities {
            id: self.engine_id(),
            board: BoardSize { width: SIZE, height: SIZE },
            cell_size: self.config.cell_size,
            tick_interval: None,
            inputs,
        }
    }

    fn reset(&mut self) {
        TicTacToe::reset(self);
    }

    fn tick(&mut self) {}

    fn apply(&mut self, action: Self::Action) {
        match action {
            Action::Play(at) => self.play(at),
            Action::Reset => TicTacToe::reset(self),
        }
    }

    fn translate(&self, input: Input) -> Option<Self::Action> {
        match input {
            Input::Cell(at) => Some(Action::Play(at)),
            Input::Pointer { x, y } => self.cell_at_pixel(x, y).map(Action::Play),
            Input::Restart => Some(Action::Reset),
            _ => None,
        }
    }

    fn snapshot(&self) -> Self::Snapshot {
        TicTacToe::snapshot(self)
    }

    fn phase(&self) -> Phase {
        if self.winner.is_some() {
            Phase::Finished
        } else {
            Phase::Running
        }
    }

    /// Rounds won by either player
    fn score(&self) -> u32 {
        self.scoreboard.o + self.scoreboard.x
    }
}
