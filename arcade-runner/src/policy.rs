use anyhow::{anyhow, Result};
use engine_core::{Capabilities, Coordinate, Input};
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;
use std::collections::VecDeque;

/// Chance that the random policy stays idle for a frame
const IDLE_PROBABILITY: f64 = 0.9;

/// Trait for input selection policies
pub trait Policy: Send {
    /// Pick at most one input for the coming frame
    fn select_input(&mut self, capabilities: &Capabilities) -> Option<Input>;
}

/// Random policy that presses a game input now and then
///
/// Pause and restart are never pressed, so an episode always runs to its
/// end or to the frame budget.
pub struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl RandomPolicy {
    pub fn new() -> Self {
        Self { rng: ChaCha20Rng::from_entropy() }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { rng: ChaCha20Rng::seed_from_u64(seed) }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for RandomPolicy {
    fn select_input(&mut self, capabilities: &Capabilities) -> Option<Input> {
        if self.rng.gen_bool(IDLE_PROBABILITY) {
            return None;
        }

        let candidates: Vec<Input> = capabilities
            .inputs
            .iter()
            .copied()
            .filter(|input| !input.is_control())
            .collect();
        candidates.choose(&mut self.rng).copied()
    }
}

/// Replays a fixed list of inputs, one per frame, then idles
#[derive(Debug, Clone)]
pub struct ScriptedPolicy {
    script: VecDeque<Input>,
}

impl ScriptedPolicy {
    pub fn new(inputs: Vec<Input>) -> Self {
        Self { script: inputs.into() }
    }

    /// Parse a comma-separated script of key names and `x:y` cells
    pub fn parse(script: &str) -> Result<Self> {
        let inputs = script
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(parse_token)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(inputs))
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Policy for ScriptedPolicy {
    fn select_input(&mut self, _capabilities: &Capabilities) -> Option<Input> {
        self.script.pop_front()
    }
}

fn parse_token(token: &str) -> Result<Input> {
    if let Some((x, y)) = token.split_once(':') {
        let x = x.trim().parse().map_err(|e| anyhow!("invalid cell {:?}: {}", token, e))?;
        let y = y.trim().parse().map_err(|e| anyhow!("invalid cell {:?}: {}", token, e))?;
        return Ok(Input::Cell(Coordinate::new(x, y)));
    }
    Input::from_key(token).ok_or_else(|| anyhow!("unknown key {:?} in script", token))
}
