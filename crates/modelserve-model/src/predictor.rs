//! Predictor trait: the seam between serving surfaces and model formats

use modelserve_core::{NumericArray, Result};

/// Minimal capability interface over an opaque pre-trained model.
///
/// Concrete artifact formats (safetensors weights, registry entries) stay
/// behind this trait; the serving layers hold a `dyn Predictor` and nothing
/// else. Implementations are immutable after construction and safe to share
/// across request handlers.
pub trait Predictor: Send + Sync {
    /// Run inference on a batch of samples, one row per sample.
    ///
    /// Shape constraints are owned by the model; mismatched input surfaces
    /// as an inference error, untranslated.
    fn predict(&self, input: &NumericArray) -> Result<NumericArray>;

    /// Get the model name
    fn name(&self) -> &str;
}
