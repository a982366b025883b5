//! Clustering algorithms.
//!
//! Includes K-Means clustering via Lloyd's algorithm with uniform
//! range-based centroid initialization.

use crate::error::{AnalizarError, Result};
use crate::metrics::inertia;
use crate::primitives::Matrix;
use crate::stats::{median, sample_std_dev};
use crate::traits::UnsupervisedEstimator;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Per-cluster summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterCharacteristics {
    /// Cluster index.
    pub cluster: usize,
    /// Number of assigned points.
    pub size: usize,
    /// Per-feature mean of assigned points.
    pub mean: Vec<f64>,
    /// Per-feature median of assigned points.
    pub median: Vec<f64>,
    /// Per-feature sample standard deviation (0 for singleton clusters).
    pub std_dev: Vec<f64>,
}

/// K-Means clustering algorithm.
///
/// Uses Lloyd's algorithm. Centroids initialize by sampling each coordinate
/// uniformly within the observed per-dimension min/max of the data (not by
/// picking data points), which affects convergence behavior and is part of
/// the contract. Requesting more clusters than samples silently reduces the
/// effective k to the sample count.
///
/// # Algorithm
///
/// 1. Sample k centroids uniformly within the per-dimension data range
/// 2. Assign each sample to the nearest centroid (ties to the lowest index)
/// 3. Update each centroid as the mean of its assigned samples; an empty
///    cluster keeps its previous centroid
/// 4. Repeat until the assignment vector repeats or `max_iter` is reached
///
/// # Examples
///
/// ```
/// use analizar::prelude::*;
///
/// let data = Matrix::from_vec(6, 2, vec![
///     1.0, 2.0,
///     1.5, 1.8,
///     1.0, 0.6,
///     8.0, 8.0,
///     9.0, 11.0,
///     8.5, 9.0,
/// ]).unwrap();
///
/// let mut kmeans = KMeans::new(2).with_random_state(42);
/// kmeans.fit(&data).unwrap();
///
/// let labels = kmeans.predict(&data);
/// assert_eq!(labels.len(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct KMeans {
    /// Requested number of clusters.
    n_clusters: usize,
    /// Maximum iterations.
    max_iter: usize,
    /// Random seed for initialization.
    random_state: Option<u64>,
    /// Effective cluster count after the min(k, n) reduction.
    effective_k: usize,
    /// Cluster centroids after fitting.
    centroids: Option<Matrix<f64>>,
    /// Labels for training data.
    labels: Option<Vec<usize>>,
    /// Sum of squared distances (inertia).
    inertia: f64,
    /// Number of iterations run.
    n_iter: usize,
}

impl Default for KMeans {
    fn default() -> Self {
        Self::new(8)
    }
}

impl KMeans {
    /// Creates a new K-Means with the specified number of clusters.
    #[must_use]
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            max_iter: 100,
            random_state: None,
            effective_k: n_clusters,
            centroids: None,
            labels: None,
            inertia: 0.0,
            n_iter: 0,
        }
    }

    /// Sets the maximum number of iterations.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Sets the random seed for reproducibility.
    #[must_use]
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Returns the cluster centroids.
    ///
    /// # Panics
    ///
    /// Panics if model is not fitted.
    #[must_use]
    pub fn centroids(&self) -> &Matrix<f64> {
        self.centroids
            .as_ref()
            .expect("Model not fitted. Call fit() first.")
    }

    /// Returns the training-data labels.
    ///
    /// # Panics
    ///
    /// Panics if model is not fitted.
    #[must_use]
    pub fn labels(&self) -> &[usize] {
        self.labels
            .as_ref()
            .expect("Model not fitted. Call fit() first.")
    }

    /// Returns the effective cluster count, `min(k, n_samples)`.
    #[must_use]
    pub fn effective_clusters(&self) -> usize {
        self.effective_k
    }

    /// Returns the inertia (within-cluster sum of squares).
    #[must_use]
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    /// Returns the number of iterations run.
    #[must_use]
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    /// Returns true if the model has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.centroids.is_some()
    }

    /// Summarizes each non-empty cluster over the given data: size and
    /// per-feature mean/median/sample-stdev.
    ///
    /// # Panics
    ///
    /// Panics if the model is not fitted.
    #[must_use]
    pub fn cluster_characteristics(&self, x: &Matrix<f64>) -> Vec<ClusterCharacteristics> {
        let labels = self.assign(x, self.centroids());
        let n_features = x.n_cols();

        let mut characteristics = Vec::new();
        for cluster in 0..self.effective_k {
            let members: Vec<usize> = labels
                .iter()
                .enumerate()
                .filter_map(|(i, &label)| if label == cluster { Some(i) } else { None })
                .collect();
            if members.is_empty() {
                continue;
            }

            let mut mean = Vec::with_capacity(n_features);
            let mut med = Vec::with_capacity(n_features);
            let mut std_dev = Vec::with_capacity(n_features);
            for j in 0..n_features {
                let values: Vec<f64> = members.iter().map(|&i| x.get(i, j)).collect();
                mean.push(values.iter().sum::<f64>() / values.len() as f64);
                med.push(median(&values));
                std_dev.push(sample_std_dev(&values));
            }

            characteristics.push(ClusterCharacteristics {
                cluster,
                size: members.len(),
                mean,
                median: med,
                std_dev,
            });
        }
        characteristics
    }

    /// Samples each centroid coordinate uniformly within the observed
    /// per-dimension data range.
    fn init_centroids(&self, x: &Matrix<f64>, k: usize) -> Matrix<f64> {
        let (n_samples, n_features) = x.shape();

        let mut mins = vec![f64::INFINITY; n_features];
        let mut maxs = vec![f64::NEG_INFINITY; n_features];
        for i in 0..n_samples {
            for j in 0..n_features {
                let val = x.get(i, j);
                if val < mins[j] {
                    mins[j] = val;
                }
                if val > maxs[j] {
                    maxs[j] = val;
                }
            }
        }

        let mut rng = match self.random_state {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut data = Vec::with_capacity(k * n_features);
        for _ in 0..k {
            for j in 0..n_features {
                // A constant dimension pins to its observed value.
                if maxs[j] > mins[j] {
                    data.push(rng.gen_range(mins[j]..maxs[j]));
                } else {
                    data.push(mins[j]);
                }
            }
        }

        Matrix::from_vec(k, n_features, data).expect("centroid dimensions are internal")
    }

    /// Assigns each sample to the nearest centroid by Euclidean distance,
    /// ties to the lowest cluster index.
    fn assign(&self, x: &Matrix<f64>, centroids: &Matrix<f64>) -> Vec<usize> {
        let n_samples = x.n_rows();
        let k = centroids.n_rows();
        let mut labels = vec![0; n_samples];

        for (i, label) in labels.iter_mut().enumerate() {
            let point = x.row(i);
            let mut min_dist = f64::INFINITY;
            let mut min_cluster = 0;

            for c in 0..k {
                let centroid = centroids.row(c);
                let dist = (&point - &centroid).norm_squared();
                // Strict < keeps the lowest index on ties.
                if dist < min_dist {
                    min_dist = dist;
                    min_cluster = c;
                }
            }

            *label = min_cluster;
        }

        labels
    }

    /// Recomputes centroids as coordinate-wise means; a cluster with no
    /// assigned points keeps its previous centroid.
    fn update_centroids(
        &self,
        x: &Matrix<f64>,
        labels: &[usize],
        previous: &Matrix<f64>,
    ) -> Matrix<f64> {
        let (_, n_features) = x.shape();
        let k = previous.n_rows();
        let mut sums = vec![0.0; k * n_features];
        let mut counts = vec![0usize; k];

        for (i, &label) in labels.iter().enumerate() {
            counts[label] += 1;
            for j in 0..n_features {
                sums[label * n_features + j] += x.get(i, j);
            }
        }

        let mut data = Vec::with_capacity(k * n_features);
        for c in 0..k {
            for j in 0..n_features {
                if counts[c] > 0 {
                    data.push(sums[c * n_features + j] / counts[c] as f64);
                } else {
                    data.push(previous.get(c, j));
                }
            }
        }

        Matrix::from_vec(k, n_features, data).expect("centroid dimensions are internal")
    }
}

impl UnsupervisedEstimator for KMeans {
    type Labels = Vec<usize>;

    /// Fits the K-Means model to data.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is empty or `n_clusters` is 0. More
    /// clusters than samples is not an error: the effective k is reduced
    /// to the sample count.
    fn fit(&mut self, x: &Matrix<f64>) -> Result<()> {
        let n_samples = x.n_rows();

        if n_samples == 0 {
            return Err("Cannot fit with zero samples".into());
        }
        if self.n_clusters == 0 {
            return Err(AnalizarError::InvalidHyperparameter {
                param: "n_clusters".to_string(),
                value: "0".to_string(),
                constraint: "n_clusters >= 1".to_string(),
            });
        }

        let k = self.n_clusters.min(n_samples);
        self.effective_k = k;

        let mut centroids = self.init_centroids(x, k);
        let mut labels: Vec<usize> = Vec::new();

        for iter in 0..self.max_iter {
            let new_labels = self.assign(x, &centroids);
            self.n_iter = iter + 1;

            if iter > 0 && new_labels == labels {
                break;
            }

            centroids = self.update_centroids(x, &new_labels, &centroids);
            labels = new_labels;
        }

        self.inertia = inertia(x, &centroids, &labels);
        self.labels = Some(labels);
        self.centroids = Some(centroids);

        Ok(())
    }

    /// Predicts cluster labels for new data with the same tie-break rule
    /// as `fit`.
    ///
    /// # Panics
    ///
    /// Panics if the model is not fitted.
    fn predict(&self, x: &Matrix<f64>) -> Vec<usize> {
        let centroids = self
            .centroids
            .as_ref()
            .expect("Model not fitted. Call fit() first.");
        self.assign(x, centroids)
    }
}
