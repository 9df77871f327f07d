//! Feature Engineering Engine
//!
//! Statistical and frequency domain feature extraction over segmented
//! windows.

mod features;
mod fft;
mod statistics;

pub use features::{FeatureExtractor, FeatureMatrix, FEATURES_PER_CHANNEL};
pub use fft::{SpectralAnalyzer, SpectralFeatures, FREQ_FEATURES_PER_CHANNEL};
pub use statistics::{TimeDomainFeatures, TIME_FEATURES_PER_CHANNEL};
