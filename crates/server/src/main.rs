//! Blood report analyzer HTTP server.
//!
//! Loads the model artifacts once, then serves the analysis API and the
//! HTML views until interrupted.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use server::logging::init_logging;
use server::{build_router, AppState, ReportOrchestrator, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "blood-report-server")]
#[command(about = "Serve the blood report analyzer", long_about = None)]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides the config
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Model artifacts directory, overrides the config
    #[arg(short, long)]
    artifacts: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ServerConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    if let Some(artifacts) = args.artifacts {
        config.artifacts_dir = artifacts;
    }

    init_logging(&config.log_filter);
    info!("Starting blood report server");

    info!("Loading model artifacts from {}", config.artifacts_dir.display());
    let orchestrator = ReportOrchestrator::from_config(&config);
    if !orchestrator.model_loaded() {
        warn!("Serving without a model; predictions will report an error");
    }

    let app = build_router(AppState::new(orchestrator));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!("Listening on http://{}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
