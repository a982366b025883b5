//! Evaluation metrics for models.
//!
//! Includes regression metrics (R², MSE, MAE, RMSE), classification
//! accuracy, and clustering metrics (inertia, silhouette score, adjusted
//! Rand index).

use crate::primitives::{Matrix, Vector};

/// Computes the coefficient of determination (R²).
///
/// R² = 1 - (`SS_res` / `SS_tot`). Defined as 0.0 when the targets have
/// zero variance.
///
/// # Examples
///
/// ```
/// use analizar::metrics::r_squared;
/// use analizar::primitives::Vector;
///
/// let y_true = Vector::from_slice(&[3.0, -0.5, 2.0, 7.0]);
/// let y_pred = Vector::from_slice(&[2.5, 0.0, 2.0, 8.0]);
/// assert!(r_squared(&y_pred, &y_true) > 0.9);
/// ```
///
/// # Panics
///
/// Panics if vectors have different lengths.
#[must_use]
pub fn r_squared(y_pred: &Vector<f64>, y_true: &Vector<f64>) -> f64 {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");

    let y_mean = y_true.mean();

    let ss_res: f64 = y_true
        .as_slice()
        .iter()
        .zip(y_pred.as_slice().iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();

    let ss_tot: f64 = y_true.as_slice().iter().map(|t| (t - y_mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return 0.0;
    }

    1.0 - (ss_res / ss_tot)
}

/// Computes the Mean Squared Error (MSE).
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
#[must_use]
pub fn mse(y_pred: &Vector<f64>, y_true: &Vector<f64>) -> f64 {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");
    assert!(!y_true.is_empty(), "Vectors cannot be empty");

    let n = y_true.len() as f64;
    let sum_sq_error: f64 = y_true
        .as_slice()
        .iter()
        .zip(y_pred.as_slice().iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();

    sum_sq_error / n
}

/// Computes the Mean Absolute Error (MAE).
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
#[must_use]
pub fn mae(y_pred: &Vector<f64>, y_true: &Vector<f64>) -> f64 {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");
    assert!(!y_true.is_empty(), "Vectors cannot be empty");

    let n = y_true.len() as f64;
    let sum_abs_error: f64 = y_true
        .as_slice()
        .iter()
        .zip(y_pred.as_slice().iter())
        .map(|(t, p)| (t - p).abs())
        .sum();

    sum_abs_error / n
}

/// Computes the Root Mean Squared Error (RMSE).
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
#[must_use]
pub fn rmse(y_pred: &Vector<f64>, y_true: &Vector<f64>) -> f64 {
    mse(y_pred, y_true).sqrt()
}

/// Fraction of predictions equal to the true labels.
///
/// Defined as 0.0 for empty input.
///
/// # Panics
///
/// Panics if the slices have different lengths.
#[must_use]
pub fn accuracy<T: PartialEq>(y_pred: &[T], y_true: &[T]) -> f64 {
    assert_eq!(y_pred.len(), y_true.len(), "Slices must have same length");
    if y_true.is_empty() {
        return 0.0;
    }
    let correct = y_pred
        .iter()
        .zip(y_true.iter())
        .filter(|(p, t)| p == t)
        .count();
    correct as f64 / y_true.len() as f64
}

/// Computes the inertia (within-cluster sum of squares).
///
/// # Panics
///
/// Panics if a label indexes past the centroid rows.
#[must_use]
pub fn inertia(data: &Matrix<f64>, centroids: &Matrix<f64>, labels: &[usize]) -> f64 {
    let mut total = 0.0;

    for (i, &label) in labels.iter().enumerate() {
        let point = data.row(i);
        let centroid = centroids.row(label);
        let diff = &point - &centroid;
        total += diff.norm_squared();
    }

    total
}

/// Computes the mean distance from a point to other points in the same cluster.
fn mean_intra_cluster_distance(
    data: &Matrix<f64>,
    point_idx: usize,
    cluster: usize,
    labels: &[usize],
) -> f64 {
    let point = data.row(point_idx);
    let distances: Vec<f64> = labels
        .iter()
        .enumerate()
        .filter(|&(j, &label)| j != point_idx && label == cluster)
        .map(|(j, _)| {
            let other = data.row(j);
            (&point - &other).norm()
        })
        .collect();

    if distances.is_empty() {
        0.0
    } else {
        distances.iter().sum::<f64>() / distances.len() as f64
    }
}

/// Computes the minimum mean distance from a point to points in other clusters.
fn min_inter_cluster_distance(
    data: &Matrix<f64>,
    point_idx: usize,
    cluster: usize,
    labels: &[usize],
    n_clusters: usize,
) -> f64 {
    let point = data.row(point_idx);
    let mut min_mean = f64::INFINITY;

    for other_cluster in 0..n_clusters {
        if other_cluster == cluster {
            continue;
        }

        let distances: Vec<f64> = labels
            .iter()
            .enumerate()
            .filter(|&(_, &label)| label == other_cluster)
            .map(|(j, _)| {
                let other = data.row(j);
                (&point - &other).norm()
            })
            .collect();

        if !distances.is_empty() {
            let mean_dist = distances.iter().sum::<f64>() / distances.len() as f64;
            min_mean = min_mean.min(mean_dist);
        }
    }

    if min_mean == f64::INFINITY {
        0.0
    } else {
        min_mean
    }
}

/// Computes the silhouette coefficient for a single point.
fn silhouette_coefficient(a_i: f64, b_i: f64) -> f64 {
    let max_ab = a_i.max(b_i);
    if max_ab == 0.0 {
        0.0
    } else {
        (b_i - a_i) / max_ab
    }
}

/// Computes the silhouette score for clustering quality.
///
/// Per point: `s(i) = (b(i) - a(i)) / max(a(i), b(i))` where `a` is the
/// mean distance to other points in the same cluster and `b` the minimum
/// mean distance to any other cluster; the score is the average over all
/// points. Returns 0.0 when there are fewer than 2 points or fewer than 2
/// distinct cluster labels.
///
/// # Examples
///
/// ```
/// use analizar::metrics::silhouette_score;
/// use analizar::primitives::Matrix;
///
/// let data = Matrix::from_vec(4, 2, vec![
///     0.0, 0.0,
///     0.1, 0.1,
///     5.0, 5.0,
///     5.1, 5.1,
/// ]).unwrap();
/// let labels = vec![0, 0, 1, 1];
/// assert!(silhouette_score(&data, &labels) > 0.5);
/// ```
#[must_use]
pub fn silhouette_score(data: &Matrix<f64>, labels: &[usize]) -> f64 {
    let n_samples = data.n_rows();

    if n_samples < 2 {
        return 0.0;
    }

    let n_clusters = labels.iter().max().map_or(0, |&m| m + 1);
    let mut distinct = labels.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    if distinct.len() < 2 {
        return 0.0;
    }

    let silhouettes: Vec<f64> = (0..n_samples)
        .map(|i| {
            let cluster = labels[i];
            let a_i = mean_intra_cluster_distance(data, i, cluster, labels);
            let b_i = min_inter_cluster_distance(data, i, cluster, labels, n_clusters);
            silhouette_coefficient(a_i, b_i)
        })
        .collect();

    silhouettes.iter().sum::<f64>() / silhouettes.len() as f64
}

/// Computes the Adjusted Rand Index between two label assignments.
///
/// Chance-corrected agreement via the standard contingency-table formula:
/// `(Index - Expected) / (Max - Expected)`. 1.0 for identical partitions,
/// around 0.0 for random agreement. A degenerate denominator (both
/// partitions trivial) is defined as 1.0.
///
/// # Examples
///
/// ```
/// use analizar::metrics::adjusted_rand_index;
///
/// let a = vec![0, 0, 1, 1];
/// let b = vec![1, 1, 0, 0];
/// assert!((adjusted_rand_index(&a, &b) - 1.0).abs() < 1e-12);
/// ```
///
/// # Panics
///
/// Panics if the slices have different lengths.
#[must_use]
pub fn adjusted_rand_index(labels_a: &[usize], labels_b: &[usize]) -> f64 {
    assert_eq!(
        labels_a.len(),
        labels_b.len(),
        "Label assignments must have same length"
    );

    let n = labels_a.len();
    if n < 2 {
        return 1.0;
    }

    let k_a = labels_a.iter().max().map_or(0, |&m| m + 1);
    let k_b = labels_b.iter().max().map_or(0, |&m| m + 1);

    // Contingency table and marginals.
    let mut contingency = vec![vec![0usize; k_b]; k_a];
    for (&a, &b) in labels_a.iter().zip(labels_b.iter()) {
        contingency[a][b] += 1;
    }
    let row_sums: Vec<usize> = contingency.iter().map(|row| row.iter().sum()).collect();
    let col_sums: Vec<usize> = (0..k_b)
        .map(|j| contingency.iter().map(|row| row[j]).sum())
        .collect();

    let index: f64 = contingency
        .iter()
        .flat_map(|row| row.iter())
        .map(|&nij| comb2(nij))
        .sum();
    let sum_a: f64 = row_sums.iter().map(|&ni| comb2(ni)).sum();
    let sum_b: f64 = col_sums.iter().map(|&nj| comb2(nj)).sum();
    let total = comb2(n);

    let expected = sum_a * sum_b / total;
    let max_index = 0.5 * (sum_a + sum_b);
    let denominator = max_index - expected;

    if denominator.abs() < 1e-12 {
        return 1.0;
    }

    (index - expected) / denominator
}

/// n choose 2, as f64.
fn comb2(n: usize) -> f64 {
    (n * n.saturating_sub(1)) as f64 / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_r_squared_perfect_fit() {
        let y = Vector::from_slice(&[1.0, 2.0, 3.0]);
        assert!((r_squared(&y, &y) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_r_squared_constant_target() {
        let y_true = Vector::from_slice(&[5.0, 5.0, 5.0]);
        let y_pred = Vector::from_slice(&[4.0, 5.0, 6.0]);
        assert!((r_squared(&y_pred, &y_true) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_mse_mae_rmse() {
        let y_true = Vector::from_slice(&[1.0, 2.0, 3.0]);
        let y_pred = Vector::from_slice(&[2.0, 2.0, 5.0]);
        assert!((mse(&y_pred, &y_true) - 5.0 / 3.0).abs() < 1e-12);
        assert!((mae(&y_pred, &y_true) - 1.0).abs() < 1e-12);
        assert!((rmse(&y_pred, &y_true) - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_accuracy() {
        let y_true = vec!["a", "b", "a", "b"];
        let y_pred = vec!["a", "b", "b", "b"];
        assert!((accuracy(&y_pred, &y_true) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_accuracy_empty() {
        let empty: Vec<&str> = vec![];
        assert!((accuracy(&empty, &empty) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_inertia_zero_for_points_on_centroids() {
        let data = Matrix::from_vec(2, 1, vec![1.0, 5.0]).unwrap();
        let centroids = Matrix::from_vec(2, 1, vec![1.0, 5.0]).unwrap();
        let labels = vec![0, 1];
        assert!(inertia(&data, &centroids, &labels) < 1e-12);
    }

    #[test]
    fn test_silhouette_well_separated() {
        let data = Matrix::from_vec(
            6,
            2,
            vec![0.0, 0.0, 0.5, 0.5, 0.0, 0.5, 100.0, 100.0, 100.5, 100.5, 100.0, 100.5],
        )
        .unwrap();
        let labels = vec![0, 0, 0, 1, 1, 1];
        assert!(silhouette_score(&data, &labels) > 0.9);
    }

    #[test]
    fn test_silhouette_single_cluster_is_zero() {
        let data = Matrix::from_vec(3, 1, vec![1.0, 2.0, 3.0]).unwrap();
        let labels = vec![0, 0, 0];
        assert!((silhouette_score(&data, &labels) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_silhouette_too_few_points_is_zero() {
        let data = Matrix::from_vec(1, 1, vec![1.0]).unwrap();
        assert!((silhouette_score(&data, &[0]) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_ari_identical_partitions() {
        let labels = vec![0, 0, 1, 1, 2];
        assert!((adjusted_rand_index(&labels, &labels) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ari_permuted_labels_still_perfect() {
        let a = vec![0, 0, 1, 1];
        let b = vec![1, 1, 0, 0];
        assert!((adjusted_rand_index(&a, &b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ari_disagreement_below_one() {
        let a = vec![0, 0, 1, 1, 0, 1];
        let b = vec![0, 1, 0, 1, 1, 0];
        let ari = adjusted_rand_index(&a, &b);
        assert!(ari < 0.5);
    }

    #[test]
    fn test_ari_trivial_partitions() {
        let a = vec![0, 0, 0];
        let b = vec![0, 0, 0];
        assert!((adjusted_rand_index(&a, &b) - 1.0).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_ari_length_mismatch_panics() {
        let _ = adjusted_rand_index(&[0, 1], &[0]);
    }
}
