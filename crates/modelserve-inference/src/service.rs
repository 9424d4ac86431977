//! Inference service over a registry-resolved runner

use modelserve_core::{NumericArray, Result};
use modelserve_model::{ModelRegistry, Runner};
use tracing::info;

/// Service wrapping one pre-trained classifier behind a single call.
///
/// The runner is resolved once at construction; an unresolvable name or
/// version is fatal to the caller. The service holds no other state.
#[derive(Clone)]
pub struct InferenceService {
    runner: Runner,
}

impl std::fmt::Debug for InferenceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceService")
            .field("model", &self.runner.name())
            .field("version", &self.runner.version())
            .finish()
    }
}

impl InferenceService {
    /// Resolve `name:tag` from the registry and wrap it in a runner.
    pub fn new(registry: &ModelRegistry, name: &str, tag: &str) -> Result<Self> {
        let runner = registry.resolve(name, tag)?.to_runner()?;
        info!(
            model = runner.name(),
            version = runner.version(),
            "inference service ready"
        );
        Ok(Self { runner })
    }

    /// Wrap an already-constructed runner.
    pub fn from_runner(runner: Runner) -> Self {
        Self { runner }
    }

    /// Forward the input array to the runner's predict call and return its
    /// result unchanged. No validation, no error translation.
    pub fn classify(&self, input: &NumericArray) -> Result<NumericArray> {
        self.runner.predict(input)
    }

    /// Name of the served model
    pub fn model_name(&self) -> &str {
        self.runner.name()
    }

    /// Resolved version of the served model
    pub fn model_version(&self) -> &str {
        self.runner.version()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::{Device, Tensor};
    use modelserve_model::LATEST_TAG;
    use std::collections::HashMap;
    use std::path::Path;

    /// Iris-shaped fixture: four features, three classes. Class scores are
    /// driven by one feature pair each so expected labels are unambiguous.
    fn write_iris_registry(root: &Path, version: &str) {
        let dir = root.join("iris_clf").join(version);
        std::fs::create_dir_all(&dir).unwrap();

        let device = Device::Cpu;
        let mut tensors = HashMap::new();
        tensors.insert(
            "weight".to_string(),
            Tensor::from_vec(
                vec![
                    1.0f64, 1.0, 0.0, 0.0, //
                    0.0, 0.0, 1.0, 0.0, //
                    0.0, 0.0, 0.0, 1.0,
                ],
                (3, 4),
                &device,
            )
            .unwrap(),
        );
        tensors.insert(
            "bias".to_string(),
            Tensor::from_vec(vec![0.0f64, 0.0, 0.0], (3,), &device).unwrap(),
        );
        candle_core::safetensors::save(&tensors, dir.join("model.safetensors")).unwrap();

        std::fs::write(
            dir.join("model.json"),
            r#"{"name": "iris_clf", "kind": "linear-classifier"}"#,
        )
        .unwrap();
    }

    #[test]
    fn test_classify_single_sample_is_pass_through() {
        let tmp = tempfile::tempdir().unwrap();
        write_iris_registry(tmp.path(), "v1");

        let registry = ModelRegistry::new(tmp.path());
        let service = InferenceService::new(&registry, "iris_clf", LATEST_TAG).unwrap();

        let input = NumericArray::from_rows(vec![vec![5.1, 3.5, 1.4, 0.2]]);
        let output = service.classify(&input).unwrap();

        // One sample in, one label out
        assert_eq!(output.num_rows(), 1);

        // Equal to calling the underlying runner directly
        let direct = registry
            .resolve("iris_clf", "v1")
            .unwrap()
            .to_runner()
            .unwrap()
            .predict(&input)
            .unwrap();
        assert_eq!(output, direct);
    }

    #[test]
    fn test_classify_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        write_iris_registry(tmp.path(), "v1");

        let registry = ModelRegistry::new(tmp.path());
        let service = InferenceService::new(&registry, "iris_clf", LATEST_TAG).unwrap();

        let input = NumericArray::from_rows(vec![vec![0.1, 0.1, 3.0, 0.5]]);
        let first = service.classify(&input).unwrap();
        let second = service.classify(&input).unwrap();
        let third = service.classify(&input).unwrap();

        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    #[test]
    fn test_unresolvable_model_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let registry = ModelRegistry::new(tmp.path());

        let err = InferenceService::new(&registry, "iris_clf", LATEST_TAG).unwrap_err();
        assert!(matches!(err, modelserve_core::Error::Registry(_)));
    }

    #[test]
    fn test_classify_surfaces_runner_failure_untranslated() {
        let tmp = tempfile::tempdir().unwrap();
        write_iris_registry(tmp.path(), "v1");

        let registry = ModelRegistry::new(tmp.path());
        let service = InferenceService::new(&registry, "iris_clf", "v1").unwrap();

        // Wrong feature count: the runner's inference error comes back as-is.
        let err = service
            .classify(&NumericArray::from_rows(vec![vec![1.0, 2.0]]))
            .unwrap_err();
        assert!(matches!(err, modelserve_core::Error::Inference(_)));
    }
}
