mod args;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yifi_core::{
    load_config, validate_config, CatalogApi, ContinuePrompt, Scraper, StdinPrompt, YtsClient,
};

use args::Args;

/// Failures are reported but still exit with status 0.
#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Some(path) = &args.config {
        info!("Loading configuration from {:?}", path);
    }
    let config = load_config(args.config.as_deref(), &args.overrides())
        .context("Failed to load configuration")?;
    validate_config(&config).context("Configuration validation failed")?;

    let catalog: Arc<dyn CatalogApi> =
        Arc::new(YtsClient::new(&config.api).context("Failed to create catalog client")?);
    let prompt: Arc<dyn ContinuePrompt> = Arc::new(StdinPrompt);
    let scraper = Scraper::new(config.scraper, catalog, prompt);

    tokio::select! {
        result = scraper.run() => match result {
            Ok(_) => Ok(()),
            Err(e) if e.is_user_abort() => {
                info!("{}", e);
                Ok(())
            }
            Err(e) => Err(e).context("Download failed"),
        },
        interrupted = signal::ctrl_c() => {
            interrupted.context("Failed to listen for Ctrl+C")?;
            warn!("Interrupted, stopping download");
            Ok(())
        }
    }
}
