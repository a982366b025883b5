//! Classification algorithms.

use crate::error::{AnalizarError, Result};
use crate::primitives::Matrix;

/// Stdev floor applied when a class has fewer than 2 samples or a
/// zero-variance feature. A deliberate smoothing policy, not a bug.
const STDEV_EPSILON: f64 = 1e-6;

/// Likelihood floor inside the log to guard against `ln(0)`.
const PDF_EPSILON: f64 = 1e-10;

/// Gaussian Naive Bayes classifier over named classes.
///
/// Assumes features follow a Gaussian (normal) distribution within each
/// class and are conditionally independent. Class ordering is the first-seen
/// order of labels at `fit` time and is stable thereafter; argmax ties
/// resolve to the earlier class.
///
/// # Example
///
/// ```
/// use analizar::classification::GaussianNB;
/// use analizar::primitives::Matrix;
///
/// let x = Matrix::from_vec(4, 1, vec![1.0, 1.2, 8.0, 8.3]).unwrap();
/// let y = vec!["small".to_string(), "small".to_string(),
///              "large".to_string(), "large".to_string()];
///
/// let mut model = GaussianNB::new();
/// model.fit(&x, &y).unwrap();
/// let predictions = model.predict(&x).unwrap();
/// assert_eq!(predictions[0], "small");
/// assert_eq!(predictions[3], "large");
/// ```
#[derive(Debug, Clone, Default)]
pub struct GaussianNB {
    /// Class labels in first-seen order.
    classes: Option<Vec<String>>,
    /// Class prior probabilities P(y=c), aligned with `classes`.
    class_priors: Option<Vec<f64>>,
    /// Feature means per class: means[class][feature].
    means: Option<Vec<Vec<f64>>>,
    /// Sample standard deviations per class: stdevs[class][feature].
    stdevs: Option<Vec<Vec<f64>>>,
}

impl GaussianNB {
    /// Creates a new unfitted classifier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            classes: None,
            class_priors: None,
            means: None,
            stdevs: None,
        }
    }

    /// Returns the class labels in the stable order fixed at fit time.
    ///
    /// # Panics
    ///
    /// Panics if the model is not fitted.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        self.classes
            .as_ref()
            .expect("Model not fitted. Call fit() first.")
    }

    /// Returns true if the model has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.classes.is_some()
    }

    /// Trains the classifier.
    ///
    /// Computes, per class observed in `y`: the prior `count/N` and the
    /// per-feature mean and sample standard deviation. A class with fewer
    /// than 2 samples, or a zero-variance feature, gets the stdev floor.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is empty or `x`/`y` lengths disagree.
    pub fn fit(&mut self, x: &Matrix<f64>, y: &[String]) -> Result<()> {
        let (n_samples, n_features) = x.shape();

        if n_samples == 0 {
            return Err("Cannot fit with empty data".into());
        }
        if y.len() != n_samples {
            return Err(AnalizarError::dimension_mismatch(
                "n_samples",
                n_samples,
                y.len(),
            ));
        }

        // First-seen order fixes the tie-break for predict.
        let mut classes: Vec<String> = Vec::new();
        for label in y {
            if !classes.contains(label) {
                classes.push(label.clone());
            }
        }

        let n_classes = classes.len();
        let mut class_priors = vec![0.0; n_classes];
        let mut means = vec![vec![0.0; n_features]; n_classes];
        let mut stdevs = vec![vec![0.0; n_features]; n_classes];

        for (class_idx, class_label) in classes.iter().enumerate() {
            let class_samples: Vec<usize> = y
                .iter()
                .enumerate()
                .filter_map(|(i, label)| if label == class_label { Some(i) } else { None })
                .collect();

            let n_class = class_samples.len();
            class_priors[class_idx] = n_class as f64 / n_samples as f64;

            for (feature_idx, mean_val) in means[class_idx].iter_mut().enumerate() {
                let sum: f64 = class_samples
                    .iter()
                    .map(|&sample_idx| x.get(sample_idx, feature_idx))
                    .sum();
                *mean_val = sum / n_class as f64;
            }

            for (feature_idx, stdev_val) in stdevs[class_idx].iter_mut().enumerate() {
                if n_class < 2 {
                    *stdev_val = STDEV_EPSILON;
                    continue;
                }
                let mean = means[class_idx][feature_idx];
                let sum_sq_diff: f64 = class_samples
                    .iter()
                    .map(|&sample_idx| {
                        let diff = x.get(sample_idx, feature_idx) - mean;
                        diff * diff
                    })
                    .sum();
                let stdev = (sum_sq_diff / (n_class - 1) as f64).sqrt();
                *stdev_val = if stdev > 0.0 { stdev } else { STDEV_EPSILON };
            }
        }

        self.classes = Some(classes);
        self.class_priors = Some(class_priors);
        self.means = Some(means);
        self.stdevs = Some(stdevs);

        Ok(())
    }

    /// Returns probability estimates for each class, aligned with
    /// [`classes`](Self::classes).
    ///
    /// Per class: `ln(prior) + Σ ln(gaussian_pdf + ε)`, exponentiated and
    /// normalized across classes. If every class score underflows to zero,
    /// the row stays all-zero and unnormalized; callers can detect the
    /// case by summing the row.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or the feature count
    /// disagrees with the training data.
    pub fn predict_proba(&self, x: &Matrix<f64>) -> Result<Vec<Vec<f64>>> {
        let class_priors = self
            .class_priors
            .as_ref()
            .ok_or_else(|| AnalizarError::not_fitted("GaussianNB"))?;
        let means = self
            .means
            .as_ref()
            .ok_or_else(|| AnalizarError::not_fitted("GaussianNB"))?;
        let stdevs = self
            .stdevs
            .as_ref()
            .ok_or_else(|| AnalizarError::not_fitted("GaussianNB"))?;

        let (n_samples, n_features) = x.shape();
        if n_features != means[0].len() {
            return Err(AnalizarError::dimension_mismatch(
                "n_features",
                means[0].len(),
                n_features,
            ));
        }

        let n_classes = means.len();
        let mut probabilities = Vec::with_capacity(n_samples);

        for sample_idx in 0..n_samples {
            let mut scores = vec![0.0; n_classes];

            for class_idx in 0..n_classes {
                let mut log_prob = class_priors[class_idx].ln();
                for feature_idx in 0..n_features {
                    let pdf = gaussian_pdf(
                        x.get(sample_idx, feature_idx),
                        means[class_idx][feature_idx],
                        stdevs[class_idx][feature_idx],
                    );
                    log_prob += (pdf + PDF_EPSILON).ln();
                }
                scores[class_idx] = log_prob.exp();
            }

            let total: f64 = scores.iter().sum();
            if total > 0.0 {
                for score in &mut scores {
                    *score /= total;
                }
            }
            // total == 0.0: every class underflowed; the row stays all-zero.

            probabilities.push(scores);
        }

        Ok(probabilities)
    }

    /// Predicts class labels for samples.
    ///
    /// Returns the class with highest posterior probability; ties resolve
    /// to the class seen first during `fit`.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or dimensions mismatch.
    pub fn predict(&self, x: &Matrix<f64>) -> Result<Vec<String>> {
        let probabilities = self.predict_proba(x)?;
        let classes = self
            .classes
            .as_ref()
            .ok_or_else(|| AnalizarError::not_fitted("GaussianNB"))?;

        let predictions = probabilities
            .iter()
            .map(|probs| {
                let mut best_idx = 0;
                let mut best_prob = probs[0];
                for (idx, &prob) in probs.iter().enumerate().skip(1) {
                    if prob > best_prob {
                        best_prob = prob;
                        best_idx = idx;
                    }
                }
                classes[best_idx].clone()
            })
            .collect();

        Ok(predictions)
    }

    /// Computes classification accuracy against true labels.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or dimensions mismatch.
    pub fn score(&self, x: &Matrix<f64>, y: &[String]) -> Result<f64> {
        let predictions = self.predict(x)?;
        if predictions.len() != y.len() {
            return Err(AnalizarError::dimension_mismatch(
                "n_samples",
                predictions.len(),
                y.len(),
            ));
        }
        Ok(crate::metrics::accuracy(&predictions, y))
    }
}

/// Gaussian probability density.
fn gaussian_pdf(x: f64, mean: f64, stdev: f64) -> f64 {
    let stdev = if stdev > 0.0 { stdev } else { STDEV_EPSILON };
    let z = (x - mean) / stdev;
    (-0.5 * z * z).exp() / (stdev * (2.0 * std::f64::consts::PI).sqrt())
}
