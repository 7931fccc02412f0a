use anyhow::Context;
use rusty_library_lending::{
    adapters::json_file::JsonSnapshotStore,
    application::lending::LendingService,
    config::{AppConfig, DEFAULT_LOG_FILTER},
    console,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing (stderr, so it does not interleave with the menu)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env();
    tracing::info!("Data directory: {}", config.data_dir.display());

    // Initialize adapters
    let store = Arc::new(JsonSnapshotStore::new(&config.data_dir));

    // Load (or seed) the library
    let mut service = LendingService::start(store).context("Failed to load library snapshot")?;

    // Run the interactive menu
    let stdin = std::io::stdin();
    console::run(&mut service, stdin.lock(), std::io::stdout())
        .context("Console I/O failed")?;

    Ok(())
}
