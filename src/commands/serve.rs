use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use crate::api::{self, AppState};
use crate::cli::Cli;
use crate::config::Config;
use crate::workdir;

pub async fn run(cli: &Cli, listen: Option<String>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("iconsmith=info")),
        )
        .init();

    let mut config = Config::load(&cli.config)?;
    if let Some(listen) = listen {
        config.server.listen = listen;
    }
    let addr: SocketAddr = config
        .server
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.server.listen))?;

    std::fs::create_dir_all(&config.server.temp_dir)
        .with_context(|| format!("Failed to create {}", config.server.temp_dir.display()))?;

    let state = AppState {
        config: Arc::new(config),
    };

    spawn_sweep(&state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    println!("{} iconsmith listening on http://{addr}", "✓".green());
    println!(
        "  temp root: {}",
        state.config.server.temp_dir.display().to_string().dimmed()
    );

    axum::serve(listener, api::router(state))
        .await
        .context("Server error")?;
    Ok(())
}

/// Periodic sweep of working directories and archives past the configured
/// age, so nothing survives a crashed request or a client that never calls
/// cleanup.
fn spawn_sweep(state: &AppState) {
    let temp_root = state.config.server.temp_dir.clone();
    let interval = Duration::from_secs(state.config.server.sweep_interval_secs);
    let stale_after = Duration::from_secs(state.config.server.stale_after_secs);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately; consume it so sweeps start
        // one interval in.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match workdir::sweep_stale(&temp_root, stale_after) {
                Ok(0) => {}
                Ok(removed) => tracing::info!(removed, "swept stale artifacts"),
                Err(err) => tracing::warn!(%err, "stale sweep failed"),
            }
        }
    });
}
