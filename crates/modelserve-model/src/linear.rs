//! Linear regression predictor backed by candle
//!
//! Weights come from a safetensors artifact holding a `weight` tensor of
//! shape `(outputs, features)` and a `bias` tensor of shape `(outputs)`.

use candle_core::{Device, Tensor};
use candle_nn::{Linear, Module};
use modelserve_core::{Error, NumericArray, Result};
use std::path::Path;

use crate::artifact::{self, array_from_tensor, tensor_from_array};
use crate::predictor::Predictor;

/// Pre-trained linear regression model.
#[derive(Debug)]
pub struct LinearModel {
    name: String,
    inner: Linear,
    device: Device,
}

impl LinearModel {
    /// Load model weights from a safetensors artifact file.
    ///
    /// Fails if the file is missing, unreadable, or does not contain the
    /// expected `weight` and `bias` tensors.
    pub fn from_safetensors(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let device = Device::Cpu;

        let mut tensors = artifact::load_tensors(path, &device)?;
        let weight = artifact::take_tensor(&mut tensors, "weight", path)?;
        let bias = artifact::take_tensor(&mut tensors, "bias", path)?;

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("linear")
            .to_string();

        tracing::info!(model = %name, path = %path.display(), "loaded regression model");
        Self::from_tensors(name, weight, bias)
    }

    /// Build a model directly from weight and bias tensors.
    pub fn from_tensors(name: impl Into<String>, weight: Tensor, bias: Tensor) -> Result<Self> {
        let device = weight.device().clone();
        Ok(Self {
            name: name.into(),
            inner: Linear::new(weight, Some(bias)),
            device,
        })
    }
}

impl Predictor for LinearModel {
    fn predict(&self, input: &NumericArray) -> Result<NumericArray> {
        if input.is_empty() {
            return Ok(NumericArray::empty());
        }

        let x = tensor_from_array(input, &self.device)?;
        let y = self
            .inner
            .forward(&x)
            .map_err(|e| Error::inference(format!("regression forward failed: {}", e)))?;

        array_from_tensor(&y)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
