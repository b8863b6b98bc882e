//! Terminal client entry point.
mod config;
mod input;
mod terminal;

use anyhow::Result;
use config::CliConfig;
use runtime::oracle::demo;
use runtime::{FileSnapshotRepository, Session, SessionEnd, SnapshotRepository};
use terminal::{RawModeGuard, TerminalInput};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _log_guard = setup_logging(&config)?;

    let oracles = demo::oracles();
    let mut session = Session::builder()
        .config(config.runtime_config())
        .session_id(config.session_id.clone())
        .initial_state(demo::initial_state(config.seed_or_clock()))
        .oracles(oracles.clone())
        .repository(FileSnapshotRepository::new(&config.save_dir)?)
        .build()?;

    if session.resume()? {
        info!(session_id = %config.session_id, "resumed saved game");
    }

    let end = {
        let _raw = RawModeGuard::enable()?;
        let mut input = TerminalInput::new(oracles);
        session.run(&mut input)?
    };

    if end == SessionEnd::PlayerDied {
        // A finished run leaves nothing to resume.
        FileSnapshotRepository::new(&config.save_dir)?.delete(&config.session_id)?;
    }

    info!(?end, elapsed = session.orchestrator().elapsed().0, "session finished");
    println!("Session ended: {end:?}");
    Ok(())
}

/// Logs go to a daily-rotated file; the terminal belongs to the game.
fn setup_logging(config: &CliConfig) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&config.log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    info!(log_dir = %config.log_dir.display(), "logging initialized");
    Ok(guard)
}
