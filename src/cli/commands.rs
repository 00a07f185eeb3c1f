//! CLI command definitions and handlers

use clap::Subcommand;
use std::path::PathBuf;
use tracing::info;

use crate::core::client::Relay;
use crate::core::config::{RelayConfig, ServerConfig};
use crate::core::models::TranslationRequest;
use crate::core::presets::{StyleContract, StylePreset};

/// Commands for the translation relay
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP API server
    Serve {
        /// Bind address (default: HOST or 0.0.0.0)
        #[arg(long)]
        host: Option<String>,

        /// Listen port (default: PORT or 3000)
        #[arg(short, long)]
        port: Option<u16>,

        /// Style preset: corpus or literal
        #[arg(long)]
        preset: Option<StylePreset>,

        /// Text file with a custom style contract (overrides --preset)
        #[arg(long)]
        style_file: Option<PathBuf>,

        /// Directory served for non-API paths
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Translate a single text and print the result
    Translate {
        /// Text in Spanish or castellanised Quechua
        text: String,

        /// Style preset: corpus or literal
        #[arg(long)]
        preset: Option<StylePreset>,

        /// Text file with a custom style contract (overrides --preset)
        #[arg(long)]
        style_file: Option<PathBuf>,
    },

    /// List available style presets
    Presets,
}

/// Apply CLI style overrides on top of the environment configuration
pub fn resolve_style(
    mut config: RelayConfig,
    preset: Option<StylePreset>,
    style_file: Option<PathBuf>,
) -> anyhow::Result<RelayConfig> {
    if let Some(path) = style_file {
        config.style = StyleContract::from_file(&path)?;
    } else if let Some(preset) = preset {
        config.style = StyleContract::preset(preset);
    }

    Ok(config)
}

/// Execute a command; configuration is loaded only by commands that use it
pub async fn run<F>(command: Option<Commands>, load_config: F) -> anyhow::Result<()>
where
    F: FnOnce() -> anyhow::Result<RelayConfig>,
{
    match command {
        Some(Commands::Serve {
            host,
            port,
            preset,
            style_file,
            static_dir,
        }) => handle_serve(load_config()?, host, port, preset, style_file, static_dir).await,
        Some(Commands::Translate {
            text,
            preset,
            style_file,
        }) => handle_translate(load_config()?, text, preset, style_file).await,
        Some(Commands::Presets) => {
            handle_presets();
            Ok(())
        }
        None => handle_serve(load_config()?, None, None, None, None, None).await,
    }
}

/// Handle server command
pub async fn handle_serve(
    config: RelayConfig,
    host: Option<String>,
    port: Option<u16>,
    preset: Option<StylePreset>,
    style_file: Option<PathBuf>,
    static_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    use crate::server::api::run_server;

    let config = resolve_style(config, preset, style_file)?;

    let mut server = ServerConfig::from_env()?;
    if let Some(host) = host {
        server.host = host;
    }
    if let Some(port) = port {
        server.port = port;
    }
    if static_dir.is_some() {
        server.static_dir = static_dir;
    }

    info!("Starting translation relay");
    info!("Style contract: {}", config.style.name());

    let relay = Relay::with_groq(config)?;
    run_server(relay, server).await
}

/// Handle one-shot translation command
pub async fn handle_translate(
    config: RelayConfig,
    text: String,
    preset: Option<StylePreset>,
    style_file: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = resolve_style(config, preset, style_file)?;
    let relay = Relay::with_groq(config)?;

    let result = relay.translate(&TranslationRequest::new(text)).await?;
    println!("{}", result.translation);

    Ok(())
}

/// Handle preset listing command
pub fn handle_presets() {
    for preset in StylePreset::ALL {
        println!("{:<10} {}", preset.to_string(), preset.description());
    }
}
