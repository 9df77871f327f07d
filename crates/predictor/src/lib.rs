//! Pain Prediction Pipeline
//!
//! Thin orchestration over the pipeline crates: segment a recording into
//! stimulus-aligned windows, extract features, and classify each window.
//! One call processes one in-memory recording to completion; nothing is
//! shared across invocations.

use anyhow::{Context, Result};
use feature_engine::FeatureExtractor;
use inference_engine::{MeanImputer, PainClassifier, StandardScaler};
use recording::Recording;
use segmentation::{segment_and_label, SegmentConfig};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Full pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Segmentation parameters
    pub segment: SegmentConfig,
    /// Sample rate for the spectral frequency axis; 1.0 keeps it in cycles
    /// per sample
    pub fft_sample_rate: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            segment: SegmentConfig::default(),
            fft_sample_rate: 1.0,
        }
    }
}

/// Result of one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Predicted pain class per window, in window order
    pub predicted_classes: Vec<usize>,
    /// Dense stimulus-temperature class per window
    pub heater_classes: Vec<usize>,
    /// Ordinal pain-rating class per window
    pub rating_classes: Vec<usize>,
    /// Onsets dropped by the segmenter's uniformity and bounds checks
    pub skipped_onsets: usize,
}

/// Run the whole pipeline over one recording: segment, label, extract
/// features, impute, scale, classify.
pub fn run_pipeline(
    rec: &Recording,
    config: &PipelineConfig,
    classifier: &PainClassifier,
    scaler: Option<&StandardScaler>,
) -> Result<PipelineOutput> {
    let dataset = segment_and_label(rec, &config.segment).context("segmenting recording")?;
    info!(
        "{} windows segmented ({} onsets skipped)",
        dataset.windows.len(),
        dataset.skipped_onsets
    );

    let mut extractor = FeatureExtractor::new(config.fft_sample_rate);
    let features = extractor.extract(&dataset.windows);

    let features = MeanImputer::new().fit_transform(&features);

    let features = match scaler {
        Some(scaler) => scaler.transform(&features).context("applying scaler")?,
        None => features,
    };

    let predicted_classes = classifier.predict(&features).context("running classifier")?;

    Ok(PipelineOutput {
        predicted_classes,
        heater_classes: dataset.heater_classes,
        rating_classes: dataset.rating_classes,
        skipped_onsets: dataset.skipped_onsets,
    })
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_engine::FEATURES_PER_CHANNEL;

    /// One 4 s rest / 3 s stimulus protocol at 10 Hz with two channels
    fn test_recording_and_config() -> (Recording, PipelineConfig) {
        let mut heater = vec![32.0; 40];
        heater.extend(vec![45.0; 30]);
        heater.resize(100, 32.0);

        let mut rating = vec![0.0; 100];
        for r in rating.iter_mut().take(70).skip(40) {
            *r = 2.0;
        }

        let n = heater.len();
        let rec = Recording::from_columns(vec![
            ("a".to_string(), (0..n).map(|i| (i as f64 * 0.3).sin()).collect()),
            ("b".to_string(), (0..n).map(|i| i as f64).collect()),
            ("Heater_cleaned".to_string(), heater),
            ("COVAS".to_string(), rating),
        ])
        .unwrap();

        let config = PipelineConfig {
            segment: SegmentConfig {
                sampling_rate: 10,
                window_secs: 1,
                baseline_shift_secs: 1,
                sensor_channels: vec!["a".to_string(), "b".to_string()],
                ..SegmentConfig::default()
            },
            fft_sample_rate: 1.0,
        };
        (rec, config)
    }

    #[test]
    fn test_end_to_end_with_mock_classifier() {
        let (rec, config) = test_recording_and_config();
        let classifier = PainClassifier::mock(5);

        let output = run_pipeline(&rec, &config, &classifier, None).unwrap();

        // One baseline and one stimulus window
        assert_eq!(output.predicted_classes.len(), 2);
        assert_eq!(output.heater_classes, vec![0, 1]);
        assert_eq!(output.rating_classes, vec![0, 4]);
        assert_eq!(output.skipped_onsets, 0);
    }

    #[test]
    fn test_pipeline_is_deterministic() {
        let (rec, config) = test_recording_and_config();

        let dataset = segment_and_label(&rec, &config.segment).unwrap();
        let a = FeatureExtractor::new(config.fft_sample_rate).extract(&dataset.windows);
        let b = FeatureExtractor::new(config.fft_sample_rate).extract(&dataset.windows);

        assert_eq!(a, b);
        assert_eq!(a.cols(), FEATURES_PER_CHANNEL * 2);
    }

    #[test]
    fn test_scaled_features_reach_classifier() {
        let (rec, config) = test_recording_and_config();
        let cols = FEATURES_PER_CHANNEL * 2;

        let scaler = StandardScaler {
            mean: vec![0.0; cols],
            scale: vec![1.0; cols],
        };
        let classifier = PainClassifier::mock(5);

        let output = run_pipeline(&rec, &config, &classifier, Some(&scaler)).unwrap();
        assert_eq!(output.predicted_classes, vec![0, 0]);
    }

    #[test]
    fn test_degenerate_ratings_surface_as_error() {
        let (rec, config) = test_recording_and_config();

        // Zero out the rating channel: binning has no maximum to divide by
        let mut columns: Vec<(String, Vec<f64>)> = rec
            .column_names()
            .iter()
            .map(|name| (name.clone(), rec.column(name).unwrap().to_vec()))
            .collect();
        for (name, column) in columns.iter_mut() {
            if name == "COVAS" {
                column.iter_mut().for_each(|v| *v = 0.0);
            }
        }
        let rec = Recording::from_columns(columns).unwrap();

        let classifier = PainClassifier::mock(5);
        assert!(run_pipeline(&rec, &config, &classifier, None).is_err());
    }
}
