//! Revcast CLI entrypoint.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod handlers;

use crate::commands::Commands;
use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "revcast")]
#[command(author, version, about = "Revcast revenue forecast service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    match cli.command {
        Commands::Serve => handlers::serve(config).await?,
        Commands::Worker => handlers::worker(config).await?,
        Commands::Migrate => handlers::migrate(config).await?,
    }

    Ok(())
}
