//! In-Memory Column Store for One Recording

use crate::RecordingError;

/// One uniformly sampled multi-channel recording.
///
/// Rows are ordered by time; there is no timestamp column, sample position
/// is time. The sampling rate is supplied by configuration, never inferred
/// from the data.
#[derive(Debug, Clone, Default)]
pub struct Recording {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl Recording {
    /// Build a recording from named columns, validating equal lengths
    pub fn from_columns(columns: Vec<(String, Vec<f64>)>) -> Result<Self, RecordingError> {
        let expected = columns.first().map(|(_, c)| c.len()).unwrap_or(0);
        let mut names = Vec::with_capacity(columns.len());
        let mut series = Vec::with_capacity(columns.len());

        for (name, column) in columns {
            if column.len() != expected {
                return Err(RecordingError::ColumnLengthMismatch {
                    column: name,
                    expected,
                    actual: column.len(),
                });
            }
            names.push(name);
            series.push(column);
        }

        Ok(Self {
            names,
            columns: series,
        })
    }

    /// Number of samples (rows)
    pub fn len(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }

    /// Check if the recording has no samples
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column names in file order
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].as_slice())
    }
}
