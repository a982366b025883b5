//! Data transformers (feature normalization).

use crate::error::{AnalizarError, Result};
use crate::primitives::Matrix;
use crate::traits::Transformer;
use serde::{Deserialize, Serialize};

/// Rescales features to [0, 1] using per-dimension min/max observed at fit
/// time.
///
/// Each output value is `(x - min) / (max - min)`. A dimension whose fit-set
/// values are all identical normalizes to exactly 0.0, for fit-set and
/// held-out data alike; held-out values outside the fitted range are left
/// unclamped.
///
/// # Example
///
/// ```
/// use analizar::prelude::*;
/// use analizar::preprocessing::MinMaxNormalizer;
///
/// let data = Matrix::from_vec(3, 2, vec![
///     0.0, 0.0,
///     5.0, 10.0,
///     10.0, 20.0,
/// ]).expect("valid matrix dimensions");
///
/// let mut normalizer = MinMaxNormalizer::new();
/// let scaled = normalizer.fit_transform(&data).expect("fit_transform should succeed");
///
/// assert!((scaled.get(0, 0) - 0.0).abs() < 1e-12);
/// assert!((scaled.get(1, 0) - 0.5).abs() < 1e-12);
/// assert!((scaled.get(2, 1) - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MinMaxNormalizer {
    /// Minimum value of each feature (computed during fit).
    data_min: Option<Vec<f64>>,
    /// Maximum value of each feature (computed during fit).
    data_max: Option<Vec<f64>>,
}

impl MinMaxNormalizer {
    /// Creates a new unfitted normalizer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data_min: None,
            data_max: None,
        }
    }

    /// Returns the minimum value of each feature.
    ///
    /// # Panics
    ///
    /// Panics if the normalizer is not fitted.
    #[must_use]
    pub fn data_min(&self) -> &[f64] {
        self.data_min
            .as_ref()
            .expect("Normalizer not fitted. Call fit() first.")
    }

    /// Returns the maximum value of each feature.
    ///
    /// # Panics
    ///
    /// Panics if the normalizer is not fitted.
    #[must_use]
    pub fn data_max(&self) -> &[f64] {
        self.data_max
            .as_ref()
            .expect("Normalizer not fitted. Call fit() first.")
    }

    /// Returns true if the normalizer has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.data_min.is_some()
    }
}

impl Transformer for MinMaxNormalizer {
    /// Records the min and max of each feature.
    ///
    /// Fitting on zero samples is not an error; it records empty parameters
    /// and `transform` then accepts only zero-row input.
    fn fit(&mut self, x: &Matrix<f64>) -> Result<()> {
        let (n_samples, n_features) = x.shape();

        if n_samples == 0 {
            self.data_min = Some(Vec::new());
            self.data_max = Some(Vec::new());
            return Ok(());
        }

        let mut data_min = vec![f64::INFINITY; n_features];
        let mut data_max = vec![f64::NEG_INFINITY; n_features];

        for i in 0..n_samples {
            for j in 0..n_features {
                let val = x.get(i, j);
                if val < data_min[j] {
                    data_min[j] = val;
                }
                if val > data_max[j] {
                    data_max[j] = val;
                }
            }
        }

        self.data_min = Some(data_min);
        self.data_max = Some(data_max);

        Ok(())
    }

    /// Scales each value to `(x - min) / (max - min)`, or 0.0 for a
    /// constant dimension.
    fn transform(&self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        let data_min = self
            .data_min
            .as_ref()
            .ok_or_else(|| AnalizarError::not_fitted("MinMaxNormalizer"))?;
        let data_max = self
            .data_max
            .as_ref()
            .ok_or_else(|| AnalizarError::not_fitted("MinMaxNormalizer"))?;

        let (n_samples, n_features) = x.shape();
        if n_samples > 0 && n_features != data_min.len() {
            return Err(AnalizarError::dimension_mismatch(
                "n_features",
                data_min.len(),
                n_features,
            ));
        }

        let mut result = vec![0.0; n_samples * n_features];

        for i in 0..n_samples {
            for j in 0..n_features {
                let range = data_max[j] - data_min[j];
                result[i * n_features + j] = if range == 0.0 {
                    0.0
                } else {
                    (x.get(i, j) - data_min[j]) / range
                };
            }
        }

        Matrix::from_vec(n_samples, n_features, result)
    }
}
