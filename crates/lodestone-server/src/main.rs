//! lodestone-server: serve hybrid regulatory retrieval over HTTP.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use lodestone_core::LodestoneConfig;
use lodestone_observability::tracing_setup::init_from_config;
use lodestone_server::{build_state, router};
use tokio::net::TcpListener;

#[derive(Parser, Debug)]
#[command(name = "lodestone-server", about = "Hybrid regulatory retrieval HTTP server", version)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: PathBuf,

    /// Override `server.port`.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = LodestoneConfig::from_file(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    init_from_config(&config.observability);

    let state = build_state(&config).context("assembling pipeline")?;
    let app = router(state);

    let addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "lodestone-server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("lodestone-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
