//! Linear models for regression.

use crate::error::{AnalizarError, Result};
use crate::metrics::{mse, r_squared};
use crate::primitives::{Matrix, Vector};
use crate::traits::Estimator;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// MSE threshold below which training stops early.
const CONVERGENCE_THRESHOLD: f64 = 1e-6;

/// Training loss is evaluated once per this many epochs.
const LOSS_CHECK_INTERVAL: usize = 100;

/// Linear regression fit by full-batch gradient descent on MSE loss.
///
/// Weights initialize uniformly in [-0.1, 0.1] (seedable for bit-for-bit
/// reproducibility) and the bias at 0. Each epoch applies
/// `grad_w_j = (2/N) Σ (pred_i - y_i) x_ij` and
/// `grad_b = (2/N) Σ (pred_i - y_i)`; every 100 epochs the MSE is checked
/// against the early-stop threshold. The epoch bound guarantees
/// termination on any input.
///
/// # Examples
///
/// ```
/// use analizar::prelude::*;
///
/// // y = 2x + 1
/// let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let y = Vector::from_slice(&[3.0, 5.0, 7.0, 9.0]);
///
/// let mut model = LinearRegression::new()
///     .with_random_state(42)
///     .with_epochs(20_000);
/// model.fit(&x, &y).unwrap();
/// assert!(model.score(&x, &y) > 0.99);
/// ```
#[derive(Debug, Clone)]
pub struct LinearRegression {
    /// Learned weights, one per feature.
    weights: Option<Vector<f64>>,
    /// Learned bias term.
    bias: f64,
    /// Gradient descent step size.
    learning_rate: f64,
    /// Maximum number of full-batch epochs.
    epochs: usize,
    /// Seed for weight initialization.
    random_state: Option<u64>,
    /// MSE at the end of training.
    final_mse: f64,
    /// Number of epochs actually run.
    epochs_run: usize,
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearRegression {
    /// Creates a new model with learning rate 0.01 and 1000 epochs.
    #[must_use]
    pub fn new() -> Self {
        Self {
            weights: None,
            bias: 0.0,
            learning_rate: 0.01,
            epochs: 1000,
            random_state: None,
            final_mse: 0.0,
            epochs_run: 0,
        }
    }

    /// Sets the gradient descent step size.
    #[must_use]
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Sets the maximum number of epochs.
    #[must_use]
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Sets the random seed for weight initialization.
    #[must_use]
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Returns the learned weights.
    ///
    /// # Panics
    ///
    /// Panics if the model is not fitted.
    #[must_use]
    pub fn weights(&self) -> &Vector<f64> {
        self.weights
            .as_ref()
            .expect("Model not fitted. Call fit() first.")
    }

    /// Returns the learned bias term.
    #[must_use]
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Returns the MSE observed at the end of training.
    #[must_use]
    pub fn final_mse(&self) -> f64 {
        self.final_mse
    }

    /// Returns the number of epochs actually run.
    #[must_use]
    pub fn epochs_run(&self) -> usize {
        self.epochs_run
    }

    /// Returns true if the model has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.weights.is_some()
    }

    /// Predicts a single sample: `bias + Σ w_i * x_i`.
    ///
    /// # Panics
    ///
    /// Panics if the model is not fitted or the slice length disagrees
    /// with the trained feature count.
    #[must_use]
    pub fn predict_one(&self, x: &[f64]) -> f64 {
        let weights = self
            .weights
            .as_ref()
            .expect("Model not fitted. Call fit() first.");
        assert_eq!(
            x.len(),
            weights.len(),
            "Feature count must match trained weights"
        );
        self.bias
            + weights
                .iter()
                .zip(x.iter())
                .map(|(w, v)| w * v)
                .sum::<f64>()
    }

    /// Ranks features by learned weight magnitude.
    ///
    /// Returns `(feature_index, |weight|)` pairs sorted descending by
    /// magnitude; ties resolve to the lower feature index.
    ///
    /// # Panics
    ///
    /// Panics if the model is not fitted.
    #[must_use]
    pub fn feature_importance(&self) -> Vec<(usize, f64)> {
        let weights = self
            .weights
            .as_ref()
            .expect("Model not fitted. Call fit() first.");

        let mut importance: Vec<(usize, f64)> = weights
            .iter()
            .enumerate()
            .map(|(idx, w)| (idx, w.abs()))
            .collect();
        importance.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        importance
    }
}

impl Estimator for LinearRegression {
    /// Fits the model by full-batch gradient descent.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is empty or `x`/`y` lengths disagree.
    fn fit(&mut self, x: &Matrix<f64>, y: &Vector<f64>) -> Result<()> {
        let (n_samples, n_features) = x.shape();

        if n_samples == 0 {
            return Err("Cannot fit with zero samples".into());
        }
        if n_samples != y.len() {
            return Err(AnalizarError::dimension_mismatch(
                "n_samples",
                n_samples,
                y.len(),
            ));
        }

        let mut rng = match self.random_state {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut weights: Vec<f64> = (0..n_features).map(|_| rng.gen_range(-0.1..0.1)).collect();
        let mut bias = 0.0;

        let n = n_samples as f64;
        let mut epochs_run = 0;

        for epoch in 0..self.epochs {
            // Residuals for the current parameters.
            let errors: Vec<f64> = (0..n_samples)
                .map(|i| {
                    let pred = bias
                        + weights
                            .iter()
                            .enumerate()
                            .map(|(j, w)| w * x.get(i, j))
                            .sum::<f64>();
                    pred - y[i]
                })
                .collect();

            for (j, weight) in weights.iter_mut().enumerate() {
                let grad: f64 = errors
                    .iter()
                    .enumerate()
                    .map(|(i, err)| err * x.get(i, j))
                    .sum::<f64>()
                    * 2.0
                    / n;
                *weight -= self.learning_rate * grad;
            }
            let bias_grad = errors.iter().sum::<f64>() * 2.0 / n;
            bias -= self.learning_rate * bias_grad;

            epochs_run = epoch + 1;

            if epochs_run % LOSS_CHECK_INTERVAL == 0 {
                let loss = batch_mse(x, y, &weights, bias);
                if loss < CONVERGENCE_THRESHOLD {
                    break;
                }
            }
        }

        self.final_mse = batch_mse(x, y, &weights, bias);
        self.epochs_run = epochs_run;
        self.weights = Some(Vector::from_vec(weights));
        self.bias = bias;

        Ok(())
    }

    /// Predicts targets for each row, preserving input order.
    ///
    /// # Panics
    ///
    /// Panics if the model is not fitted.
    fn predict(&self, x: &Matrix<f64>) -> Vector<f64> {
        let predictions: Vec<f64> = (0..x.n_rows())
            .map(|i| self.predict_one(x.row(i).as_slice()))
            .collect();
        Vector::from_vec(predictions)
    }

    /// Computes the R² score.
    fn score(&self, x: &Matrix<f64>, y: &Vector<f64>) -> f64 {
        let y_pred = self.predict(x);
        r_squared(&y_pred, y)
    }
}

/// MSE of the linear model given explicit parameters.
fn batch_mse(x: &Matrix<f64>, y: &Vector<f64>, weights: &[f64], bias: f64) -> f64 {
    let predictions: Vec<f64> = (0..x.n_rows())
        .map(|i| {
            bias + weights
                .iter()
                .enumerate()
                .map(|(j, w)| w * x.get(i, j))
                .sum::<f64>()
        })
        .collect();
    mse(&Vector::from_vec(predictions), y)
}
