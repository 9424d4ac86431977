//! Application state shared across all requests

use metrics_exporter_prometheus::PrometheusHandle;
use modelserve_core::Result;
use modelserve_model::{LinearModel, Predictor, StandardScaler};
use std::sync::Arc;
use tracing::info;

use crate::config::ServerConfig;

/// Application state shared across all requests.
///
/// Artifacts are loaded exactly once, before the server binds, and never
/// mutated afterwards; handlers receive them through this state rather than
/// through globals so they can be exercised with substitute artifacts in
/// tests.
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,

    /// Pre-trained regression model
    pub model: Arc<dyn Predictor>,

    /// Feature scaler applied before inference
    pub scaler: Arc<StandardScaler>,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    /// Deserialize both artifacts and build the state.
    ///
    /// Fails if either artifact file is missing or corrupt; the caller
    /// treats that as fatal and never reaches a serving state.
    pub fn from_config(config: ServerConfig, metrics_handle: PrometheusHandle) -> Result<Self> {
        info!(model = %config.model_path.display(), "loading regression model artifact");
        let model = LinearModel::from_safetensors(&config.model_path)?;

        info!(scaler = %config.scaler_path.display(), "loading scaler artifact");
        let scaler = StandardScaler::from_file(&config.scaler_path)?;

        Ok(Self::with_artifacts(
            config,
            Arc::new(model),
            Arc::new(scaler),
            metrics_handle,
        ))
    }

    /// Build the state from already-loaded artifacts.
    pub fn with_artifacts(
        config: ServerConfig,
        model: Arc<dyn Predictor>,
        scaler: Arc<StandardScaler>,
        metrics_handle: PrometheusHandle,
    ) -> Self {
        Self {
            config: Arc::new(config),
            model,
            scaler,
            metrics_handle,
        }
    }
}
