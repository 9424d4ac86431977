//! modelserve inference service
//!
//! Resolves a named, versioned classifier from the local model registry and
//! serves it behind a single `classify` route. Startup fails fatally if the
//! model or version cannot be resolved.

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

use modelserve_inference::routes;
use modelserve_inference::InferenceService;
use modelserve_model::{ModelRegistry, LATEST_TAG};

#[derive(Parser, Debug)]
#[command(name = "modelserve-inference")]
#[command(about = "Inference service for a registered classifier", long_about = None)]
struct Cli {
    /// Model registry root directory
    #[arg(short, long, default_value = "./models")]
    registry: PathBuf,

    /// Registered model name
    #[arg(short, long, default_value = "iris_clf")]
    model: String,

    /// Model version tag
    #[arg(short, long, default_value = LATEST_TAG)]
    tag: String,

    /// Listen address
    #[arg(short = 'l', long, default_value = "0.0.0.0")]
    listen: String,

    /// Listen port
    #[arg(short = 'P', long, default_value = "3000")]
    port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    info!("Starting modelserve inference service");
    info!("Registry: {}", cli.registry.display());
    info!("Model: {}:{}", cli.model, cli.tag);

    // Resolve the runner; a missing name or version aborts startup here
    let registry = ModelRegistry::new(&cli.registry);
    let service = InferenceService::new(&registry, &cli.model, &cli.tag)?;

    let addr: SocketAddr = format!("{}:{}", cli.listen, cli.port).parse()?;
    let app = routes::create_router(Arc::new(service));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Inference service listening on http://{}", addr);

    let shutdown = async {
        shutdown_signal().await;
        warn!("Shutdown signal received, stopping server...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("modelserve=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("modelserve=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
