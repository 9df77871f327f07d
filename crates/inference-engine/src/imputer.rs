//! Column-Mean Imputation

use feature_engine::FeatureMatrix;

use crate::InferenceError;

/// Replaces non-finite cells with the fitted per-column mean
#[derive(Debug, Clone, Default)]
pub struct MeanImputer {
    means: Vec<f64>,
}

impl MeanImputer {
    /// Create an unfitted imputer
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit per-column means over the finite cells. A column with no finite
    /// cells gets a 0.0 fill value.
    pub fn fit(&mut self, matrix: &FeatureMatrix) {
        let cols = matrix.cols();
        let mut sums = vec![0.0; cols];
        let mut counts = vec![0usize; cols];

        for r in 0..matrix.rows() {
            for (c, &v) in matrix.row(r).iter().enumerate() {
                if v.is_finite() {
                    sums[c] += v;
                    counts[c] += 1;
                }
            }
        }

        self.means = sums
            .iter()
            .zip(&counts)
            .map(|(&s, &n)| if n > 0 { s / n as f64 } else { 0.0 })
            .collect();
    }

    /// Replace non-finite cells with the fitted means
    pub fn transform(&self, matrix: &FeatureMatrix) -> Result<FeatureMatrix, InferenceError> {
        if self.means.len() != matrix.cols() {
            return Err(InferenceError::InvalidInputShape {
                expected: self.means.len(),
                actual: matrix.cols(),
            });
        }
        Ok(apply(&self.means, matrix))
    }

    /// Fit on the matrix and transform it in one pass
    pub fn fit_transform(&mut self, matrix: &FeatureMatrix) -> FeatureMatrix {
        self.fit(matrix);
        apply(&self.means, matrix)
    }
}

fn apply(means: &[f64], matrix: &FeatureMatrix) -> FeatureMatrix {
    let cols = matrix.cols();
    let data = matrix
        .as_slice()
        .iter()
        .enumerate()
        .map(|(i, &v)| if v.is_finite() { v } else { means[i % cols] })
        .collect();
    FeatureMatrix::from_vec(data, matrix.rows(), cols)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_replaced_by_column_mean() {
        let matrix = FeatureMatrix::from_vec(vec![1.0, 10.0, 3.0, f64::NAN], 2, 2);
        let imputed = MeanImputer::new().fit_transform(&matrix);

        assert_eq!(imputed.row(0), &[1.0, 10.0]);
        assert_eq!(imputed.row(1), &[3.0, 10.0]);
    }

    #[test]
    fn test_finite_cells_untouched() {
        let matrix = FeatureMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2, 2);
        let imputed = MeanImputer::new().fit_transform(&matrix);
        assert_eq!(imputed, matrix);
    }

    #[test]
    fn test_all_nan_column_filled_with_zero() {
        let matrix = FeatureMatrix::from_vec(vec![f64::NAN, 1.0, f64::NAN, 2.0], 2, 2);
        let imputed = MeanImputer::new().fit_transform(&matrix);

        assert_eq!(imputed.row(0), &[0.0, 1.0]);
        assert_eq!(imputed.row(1), &[0.0, 2.0]);
    }

    #[test]
    fn test_transform_shape_checked() {
        let mut imputer = MeanImputer::new();
        imputer.fit(&FeatureMatrix::from_vec(vec![1.0, 2.0], 1, 2));

        let other = FeatureMatrix::from_vec(vec![1.0, 2.0, 3.0], 1, 3);
        assert!(matches!(
            imputer.transform(&other),
            Err(InferenceError::InvalidInputShape {
                expected: 2,
                actual: 3
            })
        ));
    }
}
