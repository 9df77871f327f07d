//! Time-Domain Statistical Features

/// Number of time-domain features per channel
pub const TIME_FEATURES_PER_CHANNEL: usize = 20;

/// Histogram bins for the entropy feature
const ENTROPY_BINS: usize = 10;

/// Time-domain descriptors of one windowed channel
#[derive(Debug, Clone, Default)]
pub struct TimeDomainFeatures {
    /// Mean value
    pub mean: f64,
    /// Standard deviation (population)
    pub std_dev: f64,
    /// Variance (population)
    pub variance: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Peak-to-peak range
    pub peak_to_peak: f64,
    /// 25th percentile
    pub p25: f64,
    /// Median
    pub p50: f64,
    /// 75th percentile
    pub p75: f64,
    /// Skewness (asymmetry)
    pub skewness: f64,
    /// Excess kurtosis (tailedness)
    pub kurtosis: f64,
    /// Shannon entropy of a 10-bin histogram, in nats
    pub entropy: f64,
    /// Sum of all samples
    pub sum: f64,
    /// Root mean square
    pub rms: f64,
    /// Mean absolute value
    pub mean_abs: f64,
    /// Mean of first differences
    pub diff_mean: f64,
    /// Standard deviation of first differences
    pub diff_std: f64,
    /// Minimum first difference
    pub diff_min: f64,
    /// Maximum first difference
    pub diff_max: f64,
    /// Mean absolute first difference
    pub diff_mean_abs: f64,
}

impl TimeDomainFeatures {
    /// Compute the descriptors for one channel of a window
    pub fn compute(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let min = values.iter().cloned().fold(f64::MAX, f64::min);
        let max = values.iter().cloned().fold(f64::MIN, f64::max);
        let variance = values.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / n;

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        // Skew and kurtosis ignore non-finite samples
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let (skewness, kurtosis) = skew_and_kurtosis(&finite);

        let diffs: Vec<f64> = values.windows(2).map(|p| p[1] - p[0]).collect();
        let (diff_mean, diff_std) = mean_and_std(&diffs);
        let (diff_min, diff_max, diff_mean_abs) = if diffs.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            (
                diffs.iter().cloned().fold(f64::MAX, f64::min),
                diffs.iter().cloned().fold(f64::MIN, f64::max),
                diffs.iter().map(|d| d.abs()).sum::<f64>() / diffs.len() as f64,
            )
        };

        Self {
            mean,
            std_dev: variance.sqrt(),
            variance,
            min,
            max,
            peak_to_peak: max - min,
            p25: percentile(&sorted, 25.0),
            p50: percentile(&sorted, 50.0),
            p75: percentile(&sorted, 75.0),
            skewness,
            kurtosis,
            entropy: histogram_entropy(values, ENTROPY_BINS),
            sum: values.iter().sum(),
            rms: (values.iter().map(|&v| v * v).sum::<f64>() / n).sqrt(),
            mean_abs: values.iter().map(|v| v.abs()).sum::<f64>() / n,
            diff_mean,
            diff_std,
            diff_min,
            diff_max,
            diff_mean_abs,
        }
    }

    /// Feature values in canonical order
    pub fn to_array(&self) -> [f64; TIME_FEATURES_PER_CHANNEL] {
        [
            self.mean,
            self.std_dev,
            self.variance,
            self.min,
            self.max,
            self.peak_to_peak,
            self.p25,
            self.p50,
            self.p75,
            self.skewness,
            self.kurtosis,
            self.entropy,
            self.sum,
            self.rms,
            self.mean_abs,
            self.diff_mean,
            self.diff_std,
            self.diff_min,
            self.diff_max,
            self.diff_mean_abs,
        ]
    }
}

/// Biased third and fourth standardized moments; 0.0 on a constant channel
fn skew_and_kurtosis(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;

    let mut m2 = 0.0;
    let mut m3 = 0.0;
    let mut m4 = 0.0;
    for &v in values {
        let d = v - mean;
        m2 += d * d;
        m3 += d * d * d;
        m4 += d * d * d * d;
    }
    m2 /= n;
    m3 /= n;
    m4 /= n;

    if m2 > 0.0 {
        (m3 / m2.powf(1.5), m4 / (m2 * m2) - 3.0)
    } else {
        (0.0, 0.0)
    }
}

/// Population mean and standard deviation; (0, 0) for an empty slice
fn mean_and_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Linear-interpolated percentile over a pre-sorted slice
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}

/// Shannon entropy (nats) of an equal-width histogram with add-one counts,
/// so every bin keeps positive mass and the logarithm stays defined
fn histogram_entropy(values: &[f64], bins: usize) -> f64 {
    let mut lo = values.iter().cloned().fold(f64::MAX, f64::min);
    let mut hi = values.iter().cloned().fold(f64::MIN, f64::max);
    if lo == hi {
        // Degenerate range: unit-wide range centered on the value
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![1.0f64; bins];
    for &v in values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1.0;
    }

    let total: f64 = counts.iter().sum();
    -counts
        .iter()
        .map(|&c| {
            let p = c / total;
            p * p.ln()
        })
        .sum::<f64>()
}
