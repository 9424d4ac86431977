//! Local model registry
//!
//! A registry is a read-only directory tree mapping name and version to a
//! model manifest plus its weights file:
//!
//! ```text
//! <root>/<name>/<version>/model.json
//! <root>/<name>/<version>/model.safetensors
//! ```
//!
//! Entries are resolved once at startup; resolution of a missing name or
//! version is fatal to the caller.

use modelserve_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::classifier::LinearClassifier;
use crate::linear::LinearModel;
use crate::predictor::Predictor;
use crate::runner::Runner;

/// Tag resolving to the greatest version directory of a model.
pub const LATEST_TAG: &str = "latest";

const MANIFEST_FILE: &str = "model.json";

/// Manifest describing one registered model version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelManifest {
    /// Model name
    #[serde(default)]
    pub name: String,

    /// Model description
    #[serde(default)]
    pub description: String,

    /// Model kind (selects the predictor implementation)
    pub kind: ModelKind,

    /// Weights file name relative to the version directory
    #[serde(default = "default_weights_file")]
    pub weights: String,
}

/// Supported model kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    /// Linear regression head
    LinearRegression,
    /// Multi-class linear classifier (argmax output)
    LinearClassifier,
}

fn default_weights_file() -> String {
    "model.safetensors".to_string()
}

/// Read-only registry rooted at a local directory.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    root: PathBuf,
}

impl ModelRegistry {
    /// Create a registry over a local directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Registry root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True if the registry contains at least one version of `name`.
    pub fn has_model(&self, name: &str) -> bool {
        self.root.join(name).is_dir()
    }

    /// Resolve a name and tag to a concrete model version.
    ///
    /// `tag` is either an explicit version directory name or [`LATEST_TAG`].
    pub fn resolve(&self, name: &str, tag: &str) -> Result<ResolvedModel> {
        let model_dir = self.root.join(name);
        if !model_dir.is_dir() {
            return Err(Error::registry(format!(
                "model '{}' not found in registry at {}",
                name,
                self.root.display()
            )));
        }

        let version = if tag == LATEST_TAG {
            self.latest_version(&model_dir, name)?
        } else {
            tag.to_string()
        };

        let version_dir = model_dir.join(&version);
        if !version_dir.is_dir() {
            return Err(Error::registry(format!(
                "model '{}:{}' not found in registry",
                name, version
            )));
        }

        let manifest_path = version_dir.join(MANIFEST_FILE);
        let content = std::fs::read_to_string(&manifest_path).map_err(|e| {
            Error::registry(format!(
                "failed to read manifest {}: {}",
                manifest_path.display(),
                e
            ))
        })?;
        let manifest: ModelManifest = serde_json::from_str(&content).map_err(|e| {
            Error::registry(format!(
                "corrupt manifest {}: {}",
                manifest_path.display(),
                e
            ))
        })?;

        info!(model = name, version = %version, "resolved registry entry");

        Ok(ResolvedModel {
            name: name.to_string(),
            version,
            dir: version_dir,
            manifest,
        })
    }

    /// Greatest version directory by lexicographic order.
    fn latest_version(&self, model_dir: &Path, name: &str) -> Result<String> {
        let mut versions: Vec<String> = std::fs::read_dir(model_dir)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        versions.sort();

        versions
            .pop()
            .ok_or_else(|| Error::registry(format!("model '{}' has no versions", name)))
    }
}

/// A resolved name+version registry entry, ready to construct a runner.
#[derive(Debug, Clone)]
pub struct ResolvedModel {
    name: String,
    version: String,
    dir: PathBuf,
    manifest: ModelManifest,
}

impl ResolvedModel {
    /// Model name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved version (never [`LATEST_TAG`])
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Manifest of this entry
    pub fn manifest(&self) -> &ModelManifest {
        &self.manifest
    }

    /// Load the weights and wrap the model in a [`Runner`] handle.
    pub fn to_runner(&self) -> Result<Runner> {
        let weights = self.dir.join(&self.manifest.weights);

        let predictor: Arc<dyn Predictor> = match self.manifest.kind {
            ModelKind::LinearRegression => Arc::new(LinearModel::from_safetensors(&weights)?),
            ModelKind::LinearClassifier => Arc::new(LinearClassifier::from_safetensors(&weights)?),
        };

        info!(model = %self.name, version = %self.version, "constructed runner");
        Ok(Runner::new(self.name.clone(), self.version.clone(), predictor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::{Device, Tensor};
    use std::collections::HashMap;

    fn write_classifier_version(root: &Path, name: &str, version: &str) {
        let dir = root.join(name).join(version);
        std::fs::create_dir_all(&dir).unwrap();

        let device = Device::Cpu;
        let mut tensors = HashMap::new();
        tensors.insert(
            "weight".to_string(),
            Tensor::from_vec(vec![1.0f64, 0.0, 0.0, 1.0], (2, 2), &device).unwrap(),
        );
        tensors.insert(
            "bias".to_string(),
            Tensor::from_vec(vec![0.0f64, 0.0], (2,), &device).unwrap(),
        );
        candle_core::safetensors::save(&tensors, dir.join("model.safetensors")).unwrap();

        let manifest = serde_json::json!({
            "name": name,
            "kind": "linear-classifier",
        });
        std::fs::write(dir.join("model.json"), manifest.to_string()).unwrap();
    }

    #[test]
    fn test_resolve_explicit_version() {
        let tmp = tempfile::tempdir().unwrap();
        write_classifier_version(tmp.path(), "iris_clf", "v1");

        let registry = ModelRegistry::new(tmp.path());
        let resolved = registry.resolve("iris_clf", "v1").unwrap();
        assert_eq!(resolved.version(), "v1");
        assert_eq!(resolved.manifest().kind, ModelKind::LinearClassifier);
    }

    #[test]
    fn test_resolve_latest_picks_greatest_version() {
        let tmp = tempfile::tempdir().unwrap();
        write_classifier_version(tmp.path(), "iris_clf", "v1");
        write_classifier_version(tmp.path(), "iris_clf", "v2");

        let registry = ModelRegistry::new(tmp.path());
        let resolved = registry.resolve("iris_clf", LATEST_TAG).unwrap();
        assert_eq!(resolved.version(), "v2");
    }

    #[test]
    fn test_resolve_unknown_name_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let registry = ModelRegistry::new(tmp.path());

        let err = registry.resolve("missing", LATEST_TAG).unwrap_err();
        assert!(matches!(err, Error::Registry(_)));
        assert!(!registry.has_model("missing"));
    }

    #[test]
    fn test_resolve_unknown_version_fails() {
        let tmp = tempfile::tempdir().unwrap();
        write_classifier_version(tmp.path(), "iris_clf", "v1");

        let registry = ModelRegistry::new(tmp.path());
        let err = registry.resolve("iris_clf", "v9").unwrap_err();
        assert!(matches!(err, Error::Registry(_)));
    }

    #[test]
    fn test_to_runner_from_registry() {
        let tmp = tempfile::tempdir().unwrap();
        write_classifier_version(tmp.path(), "iris_clf", "v1");

        let registry = ModelRegistry::new(tmp.path());
        let runner = registry
            .resolve("iris_clf", LATEST_TAG)
            .unwrap()
            .to_runner()
            .unwrap();

        assert_eq!(runner.name(), "iris_clf");
        assert_eq!(runner.version(), "v1");

        let out = runner
            .predict(&modelserve_core::NumericArray::from_rows(vec![vec![
                2.0, 1.0,
            ]]))
            .unwrap();
        assert_eq!(out.rows(), &[vec![0.0]]);
    }

    #[test]
    fn test_corrupt_manifest_fails() {
        let tmp = tempfile::tempdir().unwrap();
        write_classifier_version(tmp.path(), "iris_clf", "v1");
        std::fs::write(
            tmp.path().join("iris_clf").join("v1").join("model.json"),
            "not json",
        )
        .unwrap();

        let registry = ModelRegistry::new(tmp.path());
        let err = registry.resolve("iris_clf", "v1").unwrap_err();
        assert!(matches!(err, Error::Registry(_)));
    }
}
