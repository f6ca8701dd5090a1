//! Headless match runner.
//!
//! Loads a content directory, plays a full match with autonomous teams and
//! prints the JSON summary to stdout. Logs go to stderr.
mod config;
mod session;

use anyhow::Result;
use config::CliConfig;
use tactics_runtime::MatchRunner;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();
    let config = CliConfig::from_env();
    tracing::info!(
        content = %config.content_dir.display(),
        map = %config.map,
        seed = config.matches.seed,
        rounds = config.matches.rounds,
        "starting match"
    );

    let world = session::build_world(&config)?;
    let mut runner = MatchRunner::builder().config(config.matches.clone()).build(world)?;
    let summary = runner.run();

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
