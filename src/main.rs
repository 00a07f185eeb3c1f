//! Main entry point for the translation relay

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quechua_relay::cli::commands::{self, Commands};
use quechua_relay::RelayConfig;

/// Spanish ↔ Bolivian Quechua translation relay over the Groq API
#[derive(Parser, Debug)]
#[command(name = "quechua-relay", version, about, long_about = None)]
struct Args {
    /// API key for Groq (optional, defaults to GROQ_API_KEY env var)
    #[arg(long)]
    api_key: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("quechua_relay={},tower_http={}", log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let load_config = || -> anyhow::Result<RelayConfig> {
        let config = RelayConfig::from_env()?;
        Ok(match args.api_key.clone() {
            Some(api_key) => config.with_api_key(api_key),
            None => config,
        })
    };

    commands::run(args.command, load_config).await
}
