//! Physiological Recording Model
//!
//! In-memory column store for one recording session, plus the tabular
//! loaders that produce it.

mod loader;
mod model;

pub use loader::load_recording;
pub use model::Recording;

use thiserror::Error;

/// Errors while reading or assembling a recording
#[derive(Debug, Error)]
pub enum RecordingError {
    /// Unrecognized file extension
    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    /// A cell could not be parsed as a number
    #[error("Row {row}, column '{column}': '{value}' is not a number")]
    Parse {
        row: usize,
        column: String,
        value: String,
    },

    /// Columns of unequal length cannot form a recording
    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Underlying CSV or I/O failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
