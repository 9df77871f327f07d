//! Tabular Recording Loaders
//!
//! Dispatch by file extension. The synchronised-session CSV dialect is
//! semicolon-delimited with decimal-comma floats; empty cells are missing
//! samples and load as NaN.

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::{Recording, RecordingError};

/// Load a recording from a file, dispatching on the extension.
pub fn load_recording(path: &Path) -> Result<Recording, RecordingError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        other => Err(RecordingError::UnsupportedFormat(other.to_string())),
    }
}

fn load_csv(path: &Path) -> Result<Recording, RecordingError> {
    let reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .from_path(path)?;
    let rec = read_csv(reader)?;
    debug!(
        "Loaded {} columns x {} rows from {}",
        rec.column_names().len(),
        rec.len(),
        path.display()
    );
    Ok(rec)
}

fn read_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Recording, RecordingError> {
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];

    for (row, result) in reader.records().enumerate() {
        let record = result?;
        for (col, field) in record.iter().enumerate().take(headers.len()) {
            let value = parse_decimal_comma(field).ok_or_else(|| RecordingError::Parse {
                row,
                column: headers[col].clone(),
                value: field.to_string(),
            })?;
            columns[col].push(value);
        }
    }

    Recording::from_columns(headers.into_iter().zip(columns).collect())
}

/// Parse a float written with a decimal comma. Empty cells are NaN.
fn parse_decimal_comma(field: &str) -> Option<f64> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Some(f64::NAN);
    }
    trimmed.replace(',', ".").parse::<f64>().ok()
}
