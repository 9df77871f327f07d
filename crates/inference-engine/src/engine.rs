//! Pain-Intensity Classifier
//!
//! Applies a trained dense scoring layer to each feature row. Training and
//! model selection happen outside this crate; the weights arrive fitted.

use std::path::Path;

use feature_engine::FeatureMatrix;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::InferenceError;

/// Fitted classifier parameters: one weight row and bias per pain class
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ModelParams {
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
}

/// Trained pain-intensity classifier
pub struct PainClassifier {
    /// None runs the classifier in mock mode
    params: Option<ModelParams>,
    num_classes: usize,
}

impl PainClassifier {
    /// Load trained weights from a JSON file
    pub fn from_path(path: &Path) -> Result<Self, InferenceError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| InferenceError::ModelLoadError(e.to_string()))?;
        Self::from_json(&text)
    }

    /// Parse trained weights from JSON text
    pub fn from_json(text: &str) -> Result<Self, InferenceError> {
        let params: ModelParams =
            serde_json::from_str(text).map_err(|e| InferenceError::ModelLoadError(e.to_string()))?;

        if params.weights.is_empty() || params.weights.len() != params.bias.len() {
            return Err(InferenceError::ModelLoadError(
                "weights and bias shapes differ".to_string(),
            ));
        }
        let features = params.weights[0].len();
        if params.weights.iter().any(|w| w.len() != features) {
            return Err(InferenceError::ModelLoadError(
                "ragged weight matrix".to_string(),
            ));
        }

        info!(
            "Loaded classifier: {} classes x {} features",
            params.weights.len(),
            features
        );
        Ok(Self {
            num_classes: params.weights.len(),
            params: Some(params),
        })
    }

    /// Mock classifier for development and tests: every row scores as
    /// class 0
    pub fn mock(num_classes: usize) -> Self {
        info!("Using mock classifier ({num_classes} classes)");
        Self {
            params: None,
            num_classes,
        }
    }

    /// Number of output classes
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Predict one class index per feature row, row order preserved
    pub fn predict(&self, features: &FeatureMatrix) -> Result<Vec<usize>, InferenceError> {
        let Some(params) = &self.params else {
            return Ok(vec![0; features.rows()]);
        };

        let expected = params.weights[0].len();
        if features.cols() != expected {
            return Err(InferenceError::InvalidInputShape {
                expected,
                actual: features.cols(),
            });
        }

        let classes = (0..features.rows())
            .map(|r| {
                let row = features.row(r);
                let scores: Vec<f64> = params
                    .weights
                    .iter()
                    .zip(&params.bias)
                    .map(|(w, &b)| b + w.iter().zip(row).map(|(wi, xi)| wi * xi).sum::<f64>())
                    .collect();
                argmax(&scores)
            })
            .collect();

        debug!("Classified {} windows", features.rows());
        Ok(classes)
    }
}

/// Index of the first maximal score
fn argmax(scores: &[f64]) -> usize {
    let mut best = 0;
    for (i, &s) in scores.iter().enumerate() {
        if s > scores[best] {
            best = i;
        }
    }
    best
}
