mod cli;
mod config;
mod export;
mod normalize;
mod pipeline;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Opts;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let opts = Opts::parse();
    let settings = config::read_config().context("Failed to load export settings")?;

    let summary = pipeline::run(&opts, &settings).await?;
    tracing::info!("Done. Exported {} rows", summary.exported);

    Ok(())
}
