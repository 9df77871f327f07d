//! FFT-Based Spectral Features

use rustfft::{num_complex::Complex, FftPlanner};

/// Number of frequency-domain features per channel
pub const FREQ_FEATURES_PER_CHANNEL: usize = 7;

/// Spectral descriptors of one windowed channel
#[derive(Debug, Clone, Default)]
pub struct SpectralFeatures {
    /// Sum of spectrum magnitudes
    pub magnitude_sum: f64,
    /// Mean magnitude
    pub magnitude_mean: f64,
    /// Standard deviation of magnitudes
    pub magnitude_std: f64,
    /// Maximum magnitude
    pub magnitude_max: f64,
    /// Frequency of the strongest bin
    pub peak_frequency: f64,
    /// Magnitude-weighted mean frequency
    pub spectral_centroid: f64,
    /// Magnitude-weighted mean squared frequency
    pub spectral_moment2: f64,
}

impl SpectralFeatures {
    /// Feature values in canonical order
    pub fn to_array(&self) -> [f64; FREQ_FEATURES_PER_CHANNEL] {
        [
            self.magnitude_sum,
            self.magnitude_mean,
            self.magnitude_std,
            self.magnitude_max,
            self.peak_frequency,
            self.spectral_centroid,
            self.spectral_moment2,
        ]
    }
}

/// Spectral analyzer over full-length DFT magnitude spectra
pub struct SpectralAnalyzer {
    /// FFT planner for efficient computation
    planner: FftPlanner<f64>,
    /// Frequency-axis sample rate; 1.0 keeps the axis in cycles per sample
    sample_rate: f64,
}

impl SpectralAnalyzer {
    /// Create a new analyzer
    pub fn new(sample_rate: f64) -> Self {
        Self {
            planner: FftPlanner::new(),
            sample_rate,
        }
    }

    /// Compute spectral features for one channel
    pub fn analyze(&mut self, signal: &[f64]) -> SpectralFeatures {
        if signal.is_empty() {
            return SpectralFeatures::default();
        }

        let n = signal.len();
        let mut buffer: Vec<Complex<f64>> =
            signal.iter().map(|&v| Complex::new(v, 0.0)).collect();

        let fft = self.planner.plan_fft_forward(n);
        fft.process(&mut buffer);

        // Unnormalized magnitudes over all N bins, aliased half included
        let magnitudes: Vec<f64> = buffer.iter().map(|c| c.norm()).collect();

        let sum: f64 = magnitudes.iter().sum();
        let mean = sum / n as f64;
        let std = (magnitudes.iter().map(|&m| (m - mean).powi(2)).sum::<f64>() / n as f64).sqrt();

        let mut max = f64::MIN;
        let mut peak_idx = 0;
        for (i, &m) in magnitudes.iter().enumerate() {
            if m > max {
                max = m;
                peak_idx = i;
            }
        }

        let mut weighted = 0.0;
        let mut weighted_sq = 0.0;
        for (i, &m) in magnitudes.iter().enumerate() {
            let f = sample_frequency(i, n, self.sample_rate);
            weighted += f * m;
            weighted_sq += f * f * m;
        }

        // A zero-energy spectrum has no centroid; report 0 instead of 0/0
        let (spectral_centroid, spectral_moment2) = if sum > 0.0 {
            (weighted / sum, weighted_sq / sum)
        } else {
            (0.0, 0.0)
        };

        SpectralFeatures {
            magnitude_sum: sum,
            magnitude_mean: mean,
            magnitude_std: std,
            magnitude_max: max,
            peak_frequency: sample_frequency(peak_idx, n, self.sample_rate),
            spectral_centroid,
            spectral_moment2,
        }
    }
}

/// DFT sample frequency of bin `k`: non-negative over the first half of the
/// spectrum, negative over the aliased second half
fn sample_frequency(k: usize, n: usize, sample_rate: f64) -> f64 {
    let signed = if k < n.div_ceil(2) {
        k as f64
    } else {
        k as f64 - n as f64
    };
    signed * sample_rate / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_axis_layout() {
        // Even length: [0, 1, 2, 3, -4, -3, -2, -1] / 8 at unit rate
        assert_eq!(sample_frequency(0, 8, 1.0), 0.0);
        assert_eq!(sample_frequency(3, 8, 1.0), 0.375);
        assert_eq!(sample_frequency(4, 8, 1.0), -0.5);
        assert_eq!(sample_frequency(7, 8, 1.0), -0.125);

        // Odd length: [0, 1, 2, -2, -1] / 5
        assert_eq!(sample_frequency(2, 5, 1.0), 0.4);
        assert_eq!(sample_frequency(3, 5, 1.0), -0.4);
    }

    #[test]
    fn test_sine_peak_frequency() {
        let mut analyzer = SpectralAnalyzer::new(100.0);

        // 2 Hz sine sampled at 100 Hz
        let signal: Vec<f64> = (0..500)
            .map(|i| (2.0 * std::f64::consts::PI * 2.0 * i as f64 / 100.0).sin())
            .collect();
        let features = analyzer.analyze(&signal);

        // Zero-mean sine: the strongest bin sits at the tone, not at DC
        assert!((features.peak_frequency.abs() - 2.0).abs() < 0.5);
        assert!(features.magnitude_max > 0.0);
    }

    #[test]
    fn test_dc_signal_peaks_at_zero() {
        let mut analyzer = SpectralAnalyzer::new(1.0);
        let features = analyzer.analyze(&vec![5.0; 64]);

        assert_eq!(features.peak_frequency, 0.0);
        // All energy in the DC bin: |X_0| = N * 5
        assert!((features.magnitude_max - 320.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_signal_has_defined_moments() {
        let mut analyzer = SpectralAnalyzer::new(1.0);
        let features = analyzer.analyze(&vec![0.0; 128]);

        assert_eq!(features.magnitude_sum, 0.0);
        assert_eq!(features.spectral_centroid, 0.0);
        assert_eq!(features.spectral_moment2, 0.0);
        assert!(features.to_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_empty_signal() {
        let mut analyzer = SpectralAnalyzer::new(1.0);
        let features = analyzer.analyze(&[]);
        assert_eq!(features.magnitude_sum, 0.0);
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let mut analyzer = SpectralAnalyzer::new(1.0);
        let signal: Vec<f64> = (0..250).map(|i| (i as f64 * 0.37).cos()).collect();

        let a = analyzer.analyze(&signal).to_array();
        let b = analyzer.analyze(&signal).to_array();
        assert_eq!(a, b);
    }
}
