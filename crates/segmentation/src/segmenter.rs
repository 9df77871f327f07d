//! Window Segmenter
//!
//! Slices a recording into fixed-length windows around stimulus onsets,
//! following the baseline look-back and heater-uniformity rules of the
//! pain-induction protocol.

use recording::Recording;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::edges::rising_edges;
use crate::error::SegmentError;
use crate::labels::derive_labels;

/// Segmentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentConfig {
    /// Samples per second of the recording
    pub sampling_rate: usize,
    /// Heater temperature during rest (°C)
    pub baseline_temp: f64,
    /// Window length in seconds
    pub window_secs: usize,
    /// Maximum number of baseline windows per recording
    pub num_repetitions: usize,
    /// Look-back from an onset to the end of its baseline window (seconds)
    pub baseline_shift_secs: usize,
    /// Sensor channels, in feature order
    pub sensor_channels: Vec<String>,
    /// Stimulus-temperature column
    pub heater_channel: String,
    /// Cumulative pain-rating column
    pub rating_channel: String,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            sampling_rate: 250,
            baseline_temp: 32.0,
            window_secs: 10,
            num_repetitions: 8,
            baseline_shift_secs: 5,
            sensor_channels: ["Bvp", "Eda_E4", "Resp", "Ecg", "Eda_RB", "Emg"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            heater_channel: "Heater_cleaned".to_string(),
            rating_channel: "COVAS".to_string(),
        }
    }
}

impl SegmentConfig {
    /// Window length in samples
    pub fn window_len(&self) -> usize {
        self.window_secs * self.sampling_rate
    }
}

/// One fixed-length slice of the sensor channels
#[derive(Debug, Clone)]
pub struct Window {
    /// Sample index of the first row in the window
    pub start: usize,
    /// Channel-major samples: `samples[c][t]`, channels in config order
    pub samples: Vec<Vec<f64>>,
    /// Stimulus temperature held throughout the window; 0.0 marks baseline
    pub raw_temperature: f64,
    /// Sum of the rating channel over the window; 0.0 for baseline windows
    pub raw_rating_sum: f64,
}

impl Window {
    /// Number of samples per channel
    pub fn len(&self) -> usize {
        self.samples.first().map(|c| c.len()).unwrap_or(0)
    }

    /// Check if the window holds no samples
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this is a baseline (rest) window
    pub fn is_baseline(&self) -> bool {
        self.raw_temperature == 0.0
    }
}

/// Output of one segmentation pass
#[derive(Debug, Clone)]
pub struct Segmentation {
    /// Windows in onset order
    pub windows: Vec<Window>,
    /// Onsets dropped by the uniformity or bounds checks
    pub skipped_onsets: usize,
}

/// Windows plus their derived class labels
#[derive(Debug, Clone)]
pub struct LabeledDataset {
    /// Windows in onset order
    pub windows: Vec<Window>,
    /// Dense temperature class per window
    pub heater_classes: Vec<usize>,
    /// Ordinal pain-rating class per window, 0..=4
    pub rating_classes: Vec<usize>,
    /// Onsets dropped by the uniformity or bounds checks
    pub skipped_onsets: usize,
}

/// Slice a recording into stimulus-aligned windows.
///
/// For each stimulus onset, a baseline window ending `baseline_shift_secs`
/// before the onset is attempted first (at most `num_repetitions` per
/// recording, and only over a heater-stable rest period), then the stimulus
/// window starting one sample after the onset. A stimulus window is only
/// emitted when the heater holds a single temperature for its whole length
/// and the window fits inside the recording.
pub fn segment(rec: &Recording, config: &SegmentConfig) -> Result<Segmentation, SegmentError> {
    let heater = rec
        .column(&config.heater_channel)
        .ok_or_else(|| SegmentError::MissingColumn(config.heater_channel.clone()))?;
    let rating = rec
        .column(&config.rating_channel)
        .ok_or_else(|| SegmentError::MissingColumn(config.rating_channel.clone()))?;
    let mut channels = Vec::with_capacity(config.sensor_channels.len());
    for name in &config.sensor_channels {
        channels.push(
            rec.column(name)
                .ok_or_else(|| SegmentError::MissingColumn(name.clone()))?,
        );
    }

    // +1 while the stimulus is applied, -1 at rest
    let stim: Vec<i8> = heater
        .iter()
        .map(|&t| if t != config.baseline_temp { 1 } else { -1 })
        .collect();
    let onsets = rising_edges(&stim);
    debug!("{} stimulus onsets detected", onsets.len());

    let window = config.window_len();
    let shift = config.baseline_shift_secs * config.sampling_rate;
    let mut windows = Vec::new();
    let mut baseline_windows = 0usize;
    let mut skipped_onsets = 0usize;

    for start in onsets {
        let baseline_start = start as i64 - shift as i64;
        if baseline_windows < config.num_repetitions && baseline_start > window as i64 {
            let end = baseline_start as usize;
            let begin = end - window;
            if heater[begin..end].iter().all(|&t| t == config.baseline_temp) {
                windows.push(Window {
                    start: begin,
                    samples: slice_channels(&channels, begin, end),
                    raw_temperature: 0.0,
                    raw_rating_sum: 0.0,
                });
                baseline_windows += 1;
            }
        }

        let s = start + 1;
        let e = s + window;
        if e > heater.len() {
            // Truncated tail; the fixed-length invariant wins
            skipped_onsets += 1;
            debug!("Onset at {start} dropped: window runs past the recording");
            continue;
        }
        let temp = heater[s];
        if heater[s..e].iter().all(|&t| t == temp) {
            windows.push(Window {
                start: s,
                samples: slice_channels(&channels, s, e),
                raw_temperature: temp,
                raw_rating_sum: rating[s..e].iter().sum(),
            });
        } else {
            // Heater changed mid-window; skip this onset, not an error
            skipped_onsets += 1;
            debug!("Onset at {start} dropped: heater not constant over the window");
        }
    }

    debug!(
        "{} windows emitted ({} baseline), {} onsets skipped",
        windows.len(),
        baseline_windows,
        skipped_onsets
    );

    Ok(Segmentation {
        windows,
        skipped_onsets,
    })
}

/// Segment a recording and derive both label arrays in one call.
pub fn segment_and_label(
    rec: &Recording,
    config: &SegmentConfig,
) -> Result<LabeledDataset, SegmentError> {
    let segmentation = segment(rec, config)?;
    let labels = derive_labels(&segmentation.windows)?;

    Ok(LabeledDataset {
        windows: segmentation.windows,
        heater_classes: labels.heater_classes,
        rating_classes: labels.rating_classes,
        skipped_onsets: segmentation.skipped_onsets,
    })
}

fn slice_channels(channels: &[&[f64]], begin: usize, end: usize) -> Vec<Vec<f64>> {
    channels.iter().map(|c| c[begin..end].to_vec()).collect()
}
