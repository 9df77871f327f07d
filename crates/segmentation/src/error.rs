//! Segmentation Error Types

use thiserror::Error;

/// Errors during window segmentation
#[derive(Debug, Clone, Error)]
pub enum SegmentError {
    /// A configured column is absent from the recording
    #[error("Recording is missing column '{0}'")]
    MissingColumn(String),

    /// Label derivation failed after segmentation
    #[error(transparent)]
    Label(#[from] LabelError),
}

/// Errors during label derivation
#[derive(Debug, Clone, Error)]
pub enum LabelError {
    /// Segmentation produced no windows to label
    #[error("No windows were segmented from the recording")]
    NoWindows,

    /// Every rating sum is zero or negative; percentage binning would
    /// divide by zero
    #[error("All rating sums are zero; cannot derive rating classes")]
    DegenerateRatings,

    /// A window temperature is absent from the conversion table
    #[error("Temperature {0} is not in the class table")]
    UnmappedTemperature(f64),
}
