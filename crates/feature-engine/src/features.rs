//! Feature Matrix Assembly

use segmentation::Window;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fft::{SpectralAnalyzer, FREQ_FEATURES_PER_CHANNEL};
use crate::statistics::{TimeDomainFeatures, TIME_FEATURES_PER_CHANNEL};

/// Features per channel across both domains
pub const FEATURES_PER_CHANNEL: usize = TIME_FEATURES_PER_CHANNEL + FREQ_FEATURES_PER_CHANNEL;

/// Row-major feature matrix, one row per window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureMatrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl FeatureMatrix {
    /// Build from a flat row-major buffer
    pub fn from_vec(data: Vec<f64>, rows: usize, cols: usize) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { data, rows, cols }
    }

    /// Number of rows (windows)
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (features per window)
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// One feature row
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Flat row-major view of the whole matrix
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// Extracts time- and frequency-domain features from segmented windows
pub struct FeatureExtractor {
    analyzer: SpectralAnalyzer,
}

impl FeatureExtractor {
    /// Create an extractor. `fft_sample_rate` of 1.0 keeps the spectral
    /// frequency axis in cycles per sample.
    pub fn new(fft_sample_rate: f64) -> Self {
        Self {
            analyzer: SpectralAnalyzer::new(fft_sample_rate),
        }
    }

    /// Assemble the feature matrix: per window, the time-domain block for
    /// every channel followed by the frequency-domain block for every
    /// channel, channel-major within each block. Window order is preserved.
    pub fn extract(&mut self, windows: &[Window]) -> FeatureMatrix {
        let channel_count = windows.first().map(|w| w.samples.len()).unwrap_or(0);
        let cols = FEATURES_PER_CHANNEL * channel_count;
        let mut data = Vec::with_capacity(windows.len() * cols);

        for window in windows {
            // The pipeline's one sanitization point: non-finite samples
            // become 0.0 before any statistic sees them
            let channels: Vec<Vec<f64>> =
                window.samples.iter().map(|c| sanitize(c)).collect();

            for channel in &channels {
                data.extend(TimeDomainFeatures::compute(channel).to_array());
            }
            for channel in &channels {
                data.extend(self.analyzer.analyze(channel).to_array());
            }
        }

        debug!(
            "Assembled {}x{} feature matrix from {} windows",
            windows.len(),
            cols,
            windows.len()
        );
        FeatureMatrix {
            data,
            rows: windows.len(),
            cols,
        }
    }
}

/// Replace non-finite samples with 0.0
fn sanitize(channel: &[f64]) -> Vec<f64> {
    channel
        .iter()
        .map(|&v| if v.is_finite() { v } else { 0.0 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_of(channels: Vec<Vec<f64>>) -> Window {
        Window {
            start: 0,
            samples: channels,
            raw_temperature: 45.0,
            raw_rating_sum: 1.0,
        }
    }

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64 * 0.5).collect()
    }

    #[test]
    fn test_matrix_shape() {
        let windows = vec![
            window_of(vec![ramp(16), ramp(16), ramp(16)]),
            window_of(vec![ramp(16), ramp(16), ramp(16)]),
        ];
        let matrix = FeatureExtractor::new(1.0).extract(&windows);

        assert_eq!(matrix.rows(), 2);
        assert_eq!(matrix.cols(), FEATURES_PER_CHANNEL * 3);
        assert_eq!(matrix.row(1).len(), 27 * 3);
    }

    #[test]
    fn test_block_layout() {
        // Two distinguishable channels
        let windows = vec![window_of(vec![vec![1.0; 8], ramp(8)])];
        let matrix = FeatureExtractor::new(1.0).extract(&windows);
        let row = matrix.row(0);

        // Time block: channel 0 mean then channel 1 mean at its offset
        assert_eq!(row[0], 1.0);
        assert_eq!(row[TIME_FEATURES_PER_CHANNEL], 1.75);

        // Frequency block starts after both time blocks; first value is the
        // magnitude sum of channel 0, whose DC bin holds 8.0
        let freq_offset = 2 * TIME_FEATURES_PER_CHANNEL;
        assert!((row[freq_offset] - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_samples_sanitized() {
        let windows = vec![window_of(vec![vec![
            1.0,
            f64::NAN,
            f64::INFINITY,
            2.0,
            f64::NEG_INFINITY,
            3.0,
            0.0,
            1.0,
        ]])];
        let matrix = FeatureExtractor::new(1.0).extract(&windows);

        assert!(matrix.row(0).iter().all(|v| v.is_finite()));
        // Sum sees the degenerate samples as zeros
        let sum_idx = 12;
        assert!((matrix.row(0)[sum_idx] - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_all_zero_channel_row_is_finite() {
        let windows = vec![window_of(vec![vec![0.0; 32]])];
        let matrix = FeatureExtractor::new(1.0).extract(&windows);
        assert!(matrix.row(0).iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let windows = vec![window_of(vec![ramp(64), ramp(64)])];
        let a = FeatureExtractor::new(1.0).extract(&windows);
        let b = FeatureExtractor::new(1.0).extract(&windows);
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_windows_empty_matrix() {
        let matrix = FeatureExtractor::new(1.0).extract(&[]);
        assert_eq!(matrix.rows(), 0);
        assert_eq!(matrix.cols(), 0);
    }
}
