//! Artifact loading helpers shared by the candle-backed predictors

use candle_core::{Device, Tensor};
use modelserve_core::{Error, NumericArray, Result};
use std::collections::HashMap;
use std::path::Path;

/// Load all tensors from a safetensors weights file.
pub(crate) fn load_tensors(path: &Path, device: &Device) -> Result<HashMap<String, Tensor>> {
    if !path.exists() {
        return Err(Error::artifact(format!(
            "weights file not found: {}",
            path.display()
        )));
    }

    candle_core::safetensors::load(path, device).map_err(|e| {
        Error::artifact(format!(
            "failed to load weights from {}: {}",
            path.display(),
            e
        ))
    })
}

/// Take a named tensor out of a loaded weights map.
pub(crate) fn take_tensor(
    tensors: &mut HashMap<String, Tensor>,
    name: &str,
    path: &Path,
) -> Result<Tensor> {
    tensors.remove(name).ok_or_else(|| {
        Error::artifact(format!(
            "tensor '{}' missing from {}",
            name,
            path.display()
        ))
    })
}

/// Convert a rectangular [`NumericArray`] into a 2-D f64 tensor.
pub fn tensor_from_array(input: &NumericArray, device: &Device) -> Result<Tensor> {
    let width = input.width().unwrap_or(0);
    if input.rows().iter().any(|r| r.len() != width) {
        return Err(Error::inference("input rows have differing lengths"));
    }

    Tensor::from_vec(input.flatten(), (input.num_rows(), width), device)
        .map_err(|e| Error::inference(format!("failed to build input tensor: {}", e)))
}

/// Convert a 2-D tensor back into a [`NumericArray`].
pub fn array_from_tensor(tensor: &Tensor) -> Result<NumericArray> {
    let rows = tensor
        .to_vec2::<f64>()
        .map_err(|e| Error::inference(format!("failed to read output tensor: {}", e)))?;
    Ok(NumericArray::from_rows(rows))
}
