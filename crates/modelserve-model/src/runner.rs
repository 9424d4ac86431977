//! Runner handle over a resolved registry model

use modelserve_core::{NumericArray, Result};
use std::sync::Arc;

use crate::predictor::Predictor;

/// Immutable handle wrapping a named, versioned model from the registry.
///
/// `predict` forwards input to the underlying model unchanged and returns
/// its output unchanged; failures propagate untranslated.
#[derive(Clone)]
pub struct Runner {
    name: String,
    version: String,
    predictor: Arc<dyn Predictor>,
}

impl Runner {
    /// Create a runner over a loaded predictor.
    pub fn new(name: String, version: String, predictor: Arc<dyn Predictor>) -> Self {
        Self {
            name,
            version,
            predictor,
        }
    }

    /// Registered model name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved model version
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Forward a batch of samples to the model.
    pub fn predict(&self, input: &NumericArray) -> Result<NumericArray> {
        self.predictor.predict(input)
    }
}
