//! Standard scaler preprocessing transform
//!
//! Deserialized once at startup from a JSON parameter file exported by the
//! training side; immutable for the lifetime of the process.

use modelserve_core::{Error, NumericArray, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Column-wise standardization: `(x - mean) / std`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-feature means
    pub mean: Vec<f64>,

    /// Per-feature standard deviations
    pub std: Vec<f64>,
}

impl StandardScaler {
    /// Create a scaler from fitted parameters.
    pub fn new(mean: Vec<f64>, std: Vec<f64>) -> Result<Self> {
        if mean.len() != std.len() {
            return Err(Error::artifact(format!(
                "scaler mean/std length mismatch: {} vs {}",
                mean.len(),
                std.len()
            )));
        }
        Ok(Self { mean, std })
    }

    /// Load scaler parameters from a JSON artifact file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::artifact(format!(
                "failed to read scaler file {}: {}",
                path.display(),
                e
            ))
        })?;

        let scaler: Self = serde_json::from_str(&content).map_err(|e| {
            Error::artifact(format!("corrupt scaler file {}: {}", path.display(), e))
        })?;

        if scaler.mean.len() != scaler.std.len() {
            return Err(Error::artifact(format!(
                "scaler mean/std length mismatch in {}",
                path.display()
            )));
        }

        tracing::info!(path = %path.display(), features = scaler.mean.len(), "loaded scaler");
        Ok(scaler)
    }

    /// Number of features the scaler was fitted on
    pub fn num_features(&self) -> usize {
        self.mean.len()
    }

    /// Apply `(x - mean) / std` to each row.
    ///
    /// Zero-variance columns pass through unscaled.
    pub fn transform(&self, input: &NumericArray) -> Result<NumericArray> {
        let mut out = Vec::with_capacity(input.num_rows());

        for row in input.rows() {
            if row.len() != self.mean.len() {
                return Err(Error::inference(format!(
                    "scaler expects {} features, got {}",
                    self.mean.len(),
                    row.len()
                )));
            }

            let scaled = row
                .iter()
                .zip(self.mean.iter().zip(self.std.iter()))
                .map(|(x, (m, s))| if *s == 0.0 { x - m } else { (x - m) / s })
                .collect();
            out.push(scaled);
        }

        Ok(NumericArray::from_rows(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform() {
        let scaler = StandardScaler::new(vec![1.0, 10.0], vec![2.0, 5.0]).unwrap();
        let input = NumericArray::from_rows(vec![vec![3.0, 20.0], vec![1.0, 10.0]]);

        let out = scaler.transform(&input).unwrap();
        assert_eq!(out.rows(), &[vec![1.0, 2.0], vec![0.0, 0.0]]);
    }

    #[test]
    fn test_zero_variance_column() {
        let scaler = StandardScaler::new(vec![5.0], vec![0.0]).unwrap();
        let out = scaler
            .transform(&NumericArray::from_rows(vec![vec![7.0]]))
            .unwrap();
        assert_eq!(out.rows(), &[vec![2.0]]);
    }

    #[test]
    fn test_width_mismatch() {
        let scaler = StandardScaler::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap();
        let err = scaler
            .transform(&NumericArray::from_rows(vec![vec![1.0]]))
            .unwrap_err();
        assert!(matches!(err, Error::Inference(_)));
    }

    #[test]
    fn test_from_file_missing_and_corrupt() {
        let err = StandardScaler::from_file("/nonexistent/scaler.json").unwrap_err();
        assert!(matches!(err, Error::Artifact(_)));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scaler.json");
        std::fs::write(&path, "not json").unwrap();
        let err = StandardScaler::from_file(&path).unwrap_err();
        assert!(matches!(err, Error::Artifact(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scaler.json");
        std::fs::write(&path, r#"{"mean": [1.0, 2.0], "std": [1.0, 4.0]}"#).unwrap();

        let scaler = StandardScaler::from_file(&path).unwrap();
        assert_eq!(scaler.num_features(), 2);

        let out = scaler
            .transform(&NumericArray::from_rows(vec![vec![2.0, 10.0]]))
            .unwrap();
        assert_eq!(out.rows(), &[vec![1.0, 2.0]]);
    }
}
