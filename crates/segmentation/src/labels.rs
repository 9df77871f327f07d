//! Label Derivation
//!
//! Maps raw window temperatures to dense class indices and raw rating sums
//! to five ordinal bins. The two transforms are independent; rating bins are
//! relative to the recording's own maximum sum (per-recording
//! normalization).

use tracing::debug;

use crate::error::LabelError;
use crate::segmenter::Window;

/// Number of ordinal rating classes
pub const RATING_CLASSES: usize = 5;

/// Class labels for one set of windows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    /// Dense temperature class per window, `0..K-1` over the K distinct
    /// raw temperatures (baseline sentinel included)
    pub heater_classes: Vec<usize>,
    /// Ordinal pain-rating class per window, 0..=4
    pub rating_classes: Vec<usize>,
}

/// Derive both label arrays from segmented windows.
pub fn derive_labels(windows: &[Window]) -> Result<Labels, LabelError> {
    if windows.is_empty() {
        return Err(LabelError::NoWindows);
    }

    Ok(Labels {
        heater_classes: heater_classes(windows)?,
        rating_classes: rating_classes(windows)?,
    })
}

/// Dense class index per window over the sorted distinct raw temperatures.
fn heater_classes(windows: &[Window]) -> Result<Vec<usize>, LabelError> {
    let mut temps: Vec<f64> = windows.iter().map(|w| w.raw_temperature).collect();
    temps.sort_by(f64::total_cmp);
    temps.dedup();
    debug!("{} distinct stimulus temperatures", temps.len());

    windows
        .iter()
        .map(|w| {
            temps
                .iter()
                .position(|&t| t == w.raw_temperature)
                .ok_or(LabelError::UnmappedTemperature(w.raw_temperature))
        })
        .collect()
}

/// Percentage-of-maximum rating sum, binned into five ordinal classes.
fn rating_classes(windows: &[Window]) -> Result<Vec<usize>, LabelError> {
    let max = windows
        .iter()
        .map(|w| w.raw_rating_sum)
        .fold(f64::NEG_INFINITY, f64::max);
    if max <= 0.0 {
        return Err(LabelError::DegenerateRatings);
    }

    Ok(windows
        .iter()
        .map(|w| {
            let pct = w.raw_rating_sum / max * 100.0;
            if pct > 0.0 {
                // floor(pct / 25) + 1, with the 100 % bin folded into 4
                (((pct / 25.0).floor() as usize) + 1).min(RATING_CLASSES - 1)
            } else {
                0
            }
        })
        .collect())
}
