//! Numeric payload types exchanged with models

use serde::{Deserialize, Serialize};

/// A 2-D numeric array: one row per sample, one column per feature.
///
/// This is the wire payload for both serving surfaces. Shape and width
/// constraints are not checked here; they are delegated to the model that
/// consumes the array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NumericArray(pub Vec<Vec<f64>>);

impl NumericArray {
    /// Create an array from rows of samples
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        Self(rows)
    }

    /// Create an empty array (zero samples)
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Rows of the array
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.0
    }

    /// Number of samples
    pub fn num_rows(&self) -> usize {
        self.0.len()
    }

    /// Width of the first row, if any.
    ///
    /// Rows are not required to be uniform at this layer; consumers that
    /// need a rectangular array check for themselves.
    pub fn width(&self) -> Option<usize> {
        self.0.first().map(|r| r.len())
    }

    /// True if the array holds no samples
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the array, returning its rows
    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.0
    }

    /// Flatten the array row-major into a single vector
    pub fn flatten(&self) -> Vec<f64> {
        self.0.iter().flatten().copied().collect()
    }
}

impl From<Vec<Vec<f64>>> for NumericArray {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        Self(rows)
    }
}
