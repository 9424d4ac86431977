//! modelserve prediction endpoint
//!
//! Loads the regression model and feature scaler artifacts at startup and
//! serves the landing page, form page, and data-submission route over HTTP.
//! Startup fails fatally if either artifact cannot be deserialized.

use anyhow::Result;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::signal;
use tracing::{info, warn};

use modelserve_web::config::{ConfigOverrides, ServerConfig};
use modelserve_web::routes;
use modelserve_web::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "modelserve-web")]
#[command(about = "Prediction endpoint serving a pre-trained regression model", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Regression model artifact path
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Scaler artifact path
    #[arg(short, long)]
    scaler: Option<PathBuf>,

    /// Listen address
    #[arg(short = 'l', long, default_value = "0.0.0.0")]
    listen: String,

    /// Listen port
    #[arg(short = 'P', long, default_value = "5000")]
    port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    info!("Starting modelserve prediction endpoint");

    // Load configuration
    let overrides = ConfigOverrides {
        model: cli.model.clone(),
        scaler: cli.scaler.clone(),
    };
    let config = ServerConfig::load(&cli.config, &overrides)?;
    info!("Configuration loaded successfully");
    info!("Model artifact: {}", config.model_path.display());
    info!("Scaler artifact: {}", config.scaler_path.display());

    // Initialize metrics
    let metrics_handle = init_metrics()?;

    // Load artifacts; a missing or corrupt file aborts startup here
    info!("Loading artifacts...");
    let state = AppState::from_config(config, metrics_handle)?;
    info!("Artifacts loaded successfully");

    let addr: SocketAddr = format!("{}:{}", cli.listen, cli.port).parse()?;
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Endpoint listening on http://{}", addr);

    // Graceful shutdown handler
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

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "modelserve_requests_total",
        "Total number of requests on the prediction route"
    );
    metrics::describe_counter!(
        "modelserve_predictions_total",
        "Total number of completed predictions"
    );
    metrics::describe_histogram!(
        "modelserve_predict_latency_us",
        metrics::Unit::Microseconds,
        "Scale-and-predict latency in microseconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
