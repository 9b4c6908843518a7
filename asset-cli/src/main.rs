use anyhow::Context;
use chrono::Local;
use clap::Parser;
use tracing::debug;

use asset_cli::cli::Cli;
use asset_cli::config::load_config;
use asset_cli::{app, logging};

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?.apply(cli.overrides());
    logging::init_logging(&config.log_level, config.log_file.as_deref())?;

    debug!("connecting to {} backend", config.database.backend);
    let registry = app::build_registry();
    let store = registry
        .create(&config.database)
        .await
        .with_context(|| format!("Failed to open the {} backend", config.database.backend))?;

    let output = app::run(&*store, &config, cli.command, Local::now().date_naive()).await?;
    print!("{output}");

    Ok(())
}
