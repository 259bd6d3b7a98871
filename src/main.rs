// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use clap::Parser;
use fabstir_campaign_node::{api::start_server, config::NodeSettings};
use std::{env, path::PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "fabstir-campaign-node",
    about = "Marketing campaign node: strategy + social post generation over hosted models"
)]
struct Args {
    /// Path to the YAML settings file
    #[arg(long, env = "NODE_CONFIG", default_value = "config/node_config.yml")]
    config: PathBuf,

    /// Override the configured listen address (e.g. 0.0.0.0:8080)
    #[arg(long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up API keys / token from a local .env before reading settings
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mut settings = NodeSettings::load(&args.config)
        .with_context(|| format!("failed to load settings from {}", args.config.display()))?;
    if let Some(listen) = args.listen {
        settings.server.listen_addr = listen;
    }
    settings.validate()?;

    info!("🚀 Starting Fabstir Campaign Node");
    info!(
        "Models: text={}, image={} ({})",
        settings.llm.model, settings.images.model, settings.images.size
    );

    start_server(settings).await
}
