//! Pain Prediction Pipeline - Main Entry Point

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use inference_engine::{PainClassifier, StandardScaler};
use predictor::{init_logging, run_pipeline, PipelineConfig};
use serde_json::json;
use tracing::{info, warn};

fn main() -> Result<()> {
    init_logging();
    info!("=== Pain Prediction Pipeline v{} ===", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let Some(recording_path) = args.next() else {
        bail!("Usage: predictor <recording.csv> [model.json] [scaler.json]");
    };
    let model_path = PathBuf::from(args.next().unwrap_or_else(|| "pain_model.json".to_string()));
    let scaler_path = PathBuf::from(args.next().unwrap_or_else(|| "scaler.json".to_string()));

    let rec = recording::load_recording(Path::new(&recording_path))
        .with_context(|| format!("loading {recording_path}"))?;
    info!("Recording: {} samples", rec.len());

    let classifier = if model_path.exists() {
        PainClassifier::from_path(&model_path).context("loading classifier")?
    } else {
        warn!("Model file {} not found; using mock classifier", model_path.display());
        PainClassifier::mock(5)
    };

    let scaler = if scaler_path.exists() {
        Some(StandardScaler::from_path(&scaler_path).context("loading scaler")?)
    } else {
        warn!("Scaler file {} not found; skipping standardization", scaler_path.display());
        None
    };

    let config = PipelineConfig::default();
    let output = run_pipeline(&rec, &config, &classifier, scaler.as_ref())?;

    println!(
        "{}",
        json!({ "predicted_classes": output.predicted_classes })
    );

    Ok(())
}
