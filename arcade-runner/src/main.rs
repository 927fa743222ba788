use anyhow::{Context, Result};
use clap::Parser;
use std::sync::atomic::Ordering;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod policy;
mod registry_init;
mod session;
mod settings;

use crate::config::Config;
use crate::policy::{Policy, RandomPolicy, ScriptedPolicy};
use crate::session::{Session, SessionOptions};
use crate::settings::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Validate configuration
    config.validate()?;

    let settings = match &config.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    registry_init::initialize_registry(&settings);

    let seed = config.seed.unwrap_or_else(rand::random);
    let policy: Box<dyn Policy> = match &config.script {
        Some(script) => Box::new(ScriptedPolicy::parse(script).context("invalid --script")?),
        None => Box::new(RandomPolicy::with_seed(seed)),
    };

    let mut session = Session::new(SessionOptions::from_config(&config, seed), policy);
    info!(session = %session.id(), game = %config.game, seed, "starting arcade session");

    // Setup graceful shutdown
    let shutdown = session.shutdown_handle();
    let shutdown_handle = tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received, stopping session...");
                shutdown.store(true, Ordering::SeqCst);
            }
            Err(e) => warn!("failed to listen for ctrl+c: {}", e),
        }
    });

    let run_result = session.run().await;
    shutdown_handle.abort();

    match run_result {
        Ok(summary) => {
            info!(
                episodes = summary.episodes,
                best_score = summary.best_score,
                total_score = summary.total_score,
                "Session completed successfully"
            );
            Ok(())
        }
        Err(e) => {
            error!("Session failed: {:#}", e);
            Err(e)
        }
    }
}
