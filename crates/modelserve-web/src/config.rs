//! Endpoint configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prediction endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Regression model artifact (safetensors)
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Feature scaler artifact (JSON)
    #[serde(default = "default_scaler_path")]
    pub scaler_path: PathBuf,

    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// CLI overrides applied on top of the loaded file.
#[derive(Debug, Default)]
pub struct ConfigOverrides {
    /// Override for the model artifact path
    pub model: Option<PathBuf>,

    /// Override for the scaler artifact path
    pub scaler: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, overrides: &ConfigOverrides) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        if let Some(model) = &overrides.model {
            config.model_path = model.clone();
        }

        if let Some(scaler) = &overrides.scaler {
            config.scaler_path = scaler.clone();
        }

        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            scaler_path: default_scaler_path(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Enable metrics collection
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from("./artifacts/elasticnet.safetensors")
}

fn default_scaler_path() -> PathBuf {
    PathBuf::from("./artifacts/scaler.json")
}

fn default_true() -> bool {
    true
}
