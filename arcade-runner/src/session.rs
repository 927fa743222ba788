use anyhow::{anyhow, Context, Result};
use engine_core::{create_game, ErasedGame, Phase, TickClock};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::Config;
use crate::policy::Policy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub game: String,
    pub episodes: u32,
    pub max_frames: u64,
    pub frame: Duration,
    /// Episode `n` is seeded with `seed + n`
    pub seed: u64,
    pub realtime: bool,
    pub render: bool,
}

impl SessionOptions {
    pub fn from_config(config: &Config, seed: u64) -> Self {
        Self {
            game: config.game.clone(),
            episodes: config.episodes,
            max_frames: config.max_frames,
            frame: config.frame(),
            seed,
            realtime: config.realtime,
            render: config.render,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeReport {
    pub episode: u32,
    pub score: u32,
    pub frames: u64,
    pub ticks: u64,
    /// The game reached a terminal state before the frame budget ran out
    pub finished: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub episodes: u32,
    pub best_score: u32,
    pub total_score: u64,
    pub reports: Vec<EpisodeReport>,
}

impl SessionSummary {
    fn record(&mut self, report: EpisodeReport) {
        self.episodes += 1;
        self.best_score = self.best_score.max(report.score);
        self.total_score += u64::from(report.score);
        self.reports.push(report);
    }

    pub fn mean_score(&self) -> f64 {
        if self.episodes == 0 {
            return 0.0;
        }
        self.total_score as f64 / f64::from(self.episodes)
    }
}

/// Drives episodes of one registered game with a policy
pub struct Session {
    id: Uuid,
    options: SessionOptions,
    policy: Box<dyn Policy>,
    shutdown_signal: Arc<AtomicBool>,
}

impl Session {
    pub fn new(options: SessionOptions, policy: Box<dyn Policy>) -> Self {
        Self {
            id: Uuid::new_v4(),
            options,
            policy,
            shutdown_signal: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Flag checked between frames; setting it ends the session early
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown_signal)
    }

    fn stopping(&self) -> bool {
        self.shutdown_signal.load(Ordering::SeqCst)
    }

    pub async fn run(&mut self) -> Result<SessionSummary> {
        if self.options.frame.is_zero() {
            return Err(anyhow!("frame length must be greater than 0"));
        }
        info!(session = %self.id, game = %self.options.game, episodes = self.options.episodes, "session starting");

        let mut summary = SessionSummary::default();
        for episode in 0..self.options.episodes {
            if self.stopping() {
                info!(session = %self.id, "shutdown signal received, stopping session");
                break;
            }

            let seed = self.options.seed.wrapping_add(u64::from(episode));
            let mut game = create_game(&self.options.game, seed)
                .ok_or_else(|| anyhow!("unknown game: {}", self.options.game))?
                .with_context(|| format!("failed to create {}", self.options.game))?;

            let report = self.run_episode(episode, game.as_mut()).await;
            debug!(
                session = %self.id,
                episode,
                score = report.score,
                frames = report.frames,
                ticks = report.ticks,
                finished = report.finished,
                "episode completed"
            );
            if self.options.render {
                println!("episode {}\n{}", episode, game.render_text());
            }
            summary.record(report);
        }

        info!(
            session = %self.id,
            episodes = summary.episodes,
            best_score = summary.best_score,
            mean_score = summary.mean_score(),
            "session finished"
        );
        Ok(summary)
    }

    async fn run_episode(&mut self, episode: u32, game: &mut dyn ErasedGame) -> EpisodeReport {
        let capabilities = game.capabilities();
        let mut clock = capabilities.tick_interval.map(TickClock::new);

        let start = Instant::now();
        let mut pacer = self.options.realtime.then(|| {
            let mut pacer = interval(self.options.frame);
            pacer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            pacer
        });

        let mut now = Duration::ZERO;
        let mut frames = 0;
        let mut ticks = 0;

        while frames < self.options.max_frames {
            if self.stopping() || game.phase() == Phase::Finished {
                break;
            }

            if let Some(input) = self.policy.select_input(&capabilities) {
                game.handle_input(input);
            }

            match pacer.as_mut() {
                Some(pacer) => {
                    pacer.tick().await;
                    now = start.elapsed();
                }
                None => now += self.options.frame,
            }

            if let Some(clock) = clock.as_mut() {
                if clock.poll(now) {
                    game.tick();
                    ticks += 1;
                }
            }
            frames += 1;
        }

        EpisodeReport {
            episode,
            score: game.score(),
            frames,
            ticks,
            finished: game.phase() == Phase::Finished,
        }
    }
}
