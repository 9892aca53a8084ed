//! number-window: sliding-window number aggregation service.
//!
//! Single-binary Tokio application that:
//! 1. Loads config (defaults, config.toml, env)
//! 2. Builds the provider client and the shared window
//! 3. Serves `/numbers/{id}` plus the price statistics endpoints

mod config;
mod server;
mod stats;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use aggregator::{Aggregator, WindowStore};
use anyhow::{Context, Result};
use clap::Parser;
use numbers_client::NumbersClient;
use tracing::info;

use crate::server::AppState;

/// Sliding-window number aggregator
#[derive(Debug, Parser)]
#[command(name = "number-window", about = "Sliding-window number aggregation service")]
struct Cli {
    /// Path to the TOML config file (optional).
    #[arg(long, env = "NUMBER_WINDOW_CONFIG", default_value = "config.toml")]
    config: PathBuf,

    /// Override the listen address.
    #[arg(long)]
    bind: Option<String>,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "number_window=info,aggregator=info,numbers_client=info".into()
            }),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();

    let mut cfg = config::load_config(&cli.config).context("configuration error")?;
    if let Some(bind) = cli.bind {
        cfg.bind_addr = bind;
    }

    if cli.print_config {
        println!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
        return Ok(());
    }

    info!(
        "Window size: {}, fetch timeout: {}ms",
        cfg.window_size, cfg.fetch_timeout_ms
    );
    info!(
        "Providers: p={} f={} e={} r={}",
        cfg.upstream.primes_url,
        cfg.upstream.fibonacci_url,
        cfg.upstream.even_url,
        cfg.upstream.random_url
    );

    let client = NumbersClient::new(
        cfg.upstream.clone(),
        Duration::from_millis(cfg.fetch_timeout_ms),
    )?;
    let store = Arc::new(WindowStore::new(cfg.window_size));
    let aggregator = Aggregator::new(store, Arc::new(client));
    let app = server::router(AppState { aggregator });

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.bind_addr))?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
