//! Inference Collaborators
//!
//! Imputation, standardization and the trained pain-intensity classifier.
//! The classifier applies fitted parameters as-is; training and model
//! selection happen elsewhere.

mod engine;
mod imputer;
mod scaler;

pub use engine::PainClassifier;
pub use imputer::MeanImputer;
pub use scaler::StandardScaler;

use thiserror::Error;

/// Errors during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Invalid input shape: expected {expected} columns, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },
}
