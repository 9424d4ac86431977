//! Multi-class linear classifier backed by candle
//!
//! A single linear head over the input features: logits `(n, classes)`,
//! prediction = argmax per row, returned as one numeric class label per
//! sample. Weights use the same safetensors layout as [`crate::LinearModel`]
//! with `weight` shaped `(classes, features)`.

use candle_core::{Device, Tensor, D};
use candle_nn::{Linear, Module};
use modelserve_core::{Error, NumericArray, Result};
use std::path::Path;

use crate::artifact::{self, tensor_from_array};
use crate::predictor::Predictor;

/// Pre-trained linear classifier.
#[derive(Debug)]
pub struct LinearClassifier {
    name: String,
    inner: Linear,
    device: Device,
}

impl LinearClassifier {
    /// Load classifier weights from a safetensors artifact file.
    pub fn from_safetensors(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let device = Device::Cpu;

        let mut tensors = artifact::load_tensors(path, &device)?;
        let weight = artifact::take_tensor(&mut tensors, "weight", path)?;
        let bias = artifact::take_tensor(&mut tensors, "bias", path)?;

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("classifier")
            .to_string();

        tracing::info!(model = %name, path = %path.display(), "loaded classifier");
        Self::from_tensors(name, weight, bias)
    }

    /// Build a classifier directly from weight and bias tensors.
    pub fn from_tensors(name: impl Into<String>, weight: Tensor, bias: Tensor) -> Result<Self> {
        let device = weight.device().clone();
        Ok(Self {
            name: name.into(),
            inner: Linear::new(weight, Some(bias)),
            device,
        })
    }
}

impl Predictor for LinearClassifier {
    fn predict(&self, input: &NumericArray) -> Result<NumericArray> {
        if input.is_empty() {
            return Ok(NumericArray::empty());
        }

        let x = tensor_from_array(input, &self.device)?;
        let logits = self
            .inner
            .forward(&x)
            .map_err(|e| Error::inference(format!("classifier forward failed: {}", e)))?;

        let labels = logits
            .argmax(D::Minus1)
            .map_err(|e| Error::inference(format!("argmax failed: {}", e)))?
            .to_vec1::<u32>()
            .map_err(|e| Error::inference(format!("failed to read class labels: {}", e)))?;

        Ok(NumericArray::from_rows(
            labels.into_iter().map(|c| vec![c as f64]).collect(),
        ))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_classifier() -> LinearClassifier {
        // Three classes; class scores are dominated by one feature each.
        let device = Device::Cpu;
        let weight = Tensor::from_vec(
            vec![
                1.0f64, 0.0, 0.0, //
                0.0, 1.0, 0.0, //
                0.0, 0.0, 1.0,
            ],
            (3, 3),
            &device,
        )
        .unwrap();
        let bias = Tensor::from_vec(vec![0.0f64, 0.0, 0.0], (3,), &device).unwrap();
        LinearClassifier::from_tensors("test", weight, bias).unwrap()
    }

    #[test]
    fn test_argmax_labels() {
        let clf = fixture_classifier();
        let out = clf
            .predict(&NumericArray::from_rows(vec![
                vec![5.0, 1.0, 1.0],
                vec![0.0, 2.0, 1.0],
                vec![0.0, 0.0, 9.0],
            ]))
            .unwrap();
        assert_eq!(out.rows(), &[vec![0.0], vec![1.0], vec![2.0]]);
    }

    #[test]
    fn test_single_sample_returns_single_label() {
        let clf = fixture_classifier();
        let out = clf
            .predict(&NumericArray::from_rows(vec![vec![0.1, 0.9, 0.2]]))
            .unwrap();
        assert_eq!(out.num_rows(), 1);
        assert_eq!(out.rows()[0], vec![1.0]);
    }
}
