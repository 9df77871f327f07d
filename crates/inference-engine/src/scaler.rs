//! Feature Standardization

use std::path::Path;

use feature_engine::FeatureMatrix;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::InferenceError;

/// Fitted per-column standardization parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-column means
    pub mean: Vec<f64>,
    /// Per-column scale divisors
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Load fitted parameters from a JSON file
    pub fn from_path(path: &Path) -> Result<Self, InferenceError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| InferenceError::ModelLoadError(e.to_string()))?;
        let scaler = Self::from_json(&text)?;
        info!("Loaded scaler for {} features", scaler.mean.len());
        Ok(scaler)
    }

    /// Parse fitted parameters from JSON text
    pub fn from_json(text: &str) -> Result<Self, InferenceError> {
        let scaler: Self =
            serde_json::from_str(text).map_err(|e| InferenceError::ModelLoadError(e.to_string()))?;
        if scaler.mean.len() != scaler.scale.len() {
            return Err(InferenceError::ModelLoadError(
                "mean and scale lengths differ".to_string(),
            ));
        }
        Ok(scaler)
    }

    /// Apply `(x - mean) / scale` per column. A zero scale divisor leaves
    /// the centered value unscaled.
    pub fn transform(&self, matrix: &FeatureMatrix) -> Result<FeatureMatrix, InferenceError> {
        if matrix.cols() != self.mean.len() {
            return Err(InferenceError::InvalidInputShape {
                expected: self.mean.len(),
                actual: matrix.cols(),
            });
        }

        let cols = matrix.cols();
        let data = matrix
            .as_slice()
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let c = i % cols;
                let centered = v - self.mean[c];
                if self.scale[c] != 0.0 {
                    centered / self.scale[c]
                } else {
                    centered
                }
            })
            .collect();

        Ok(FeatureMatrix::from_vec(data, matrix.rows(), cols))
    }
}
