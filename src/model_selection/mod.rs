//! Train/test splitting utilities.

use crate::error::{AnalizarError, Result};
use crate::primitives::{Matrix, Vector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Splits samples and targets into train and test partitions.
///
/// Rows are shuffled with a seeded Fisher-Yates pass (entropy-seeded when
/// no seed is given), preserving the x/y pairing. The test partition gets
/// `round(n * test_ratio)` rows, clamped so both partitions stay
/// non-empty.
///
/// # Examples
///
/// ```
/// use analizar::model_selection::train_test_split;
/// use analizar::primitives::{Matrix, Vector};
///
/// let x = Matrix::from_vec(10, 1, (0..10).map(f64::from).collect()).unwrap();
/// let y = Vector::from_vec((0..10).map(f64::from).collect());
///
/// let (x_train, x_test, y_train, y_test) =
///     train_test_split(&x, &y, 0.3, Some(42)).unwrap();
/// assert_eq!(x_train.n_rows() + x_test.n_rows(), 10);
/// assert_eq!(y_train.len(), x_train.n_rows());
/// assert_eq!(y_test.len(), x_test.n_rows());
/// ```
///
/// # Errors
///
/// Returns an error if `test_ratio` is outside (0, 1), lengths disagree,
/// or there are fewer than 2 samples.
pub fn train_test_split(
    x: &Matrix<f64>,
    y: &Vector<f64>,
    test_ratio: f64,
    seed: Option<u64>,
) -> Result<(Matrix<f64>, Matrix<f64>, Vector<f64>, Vector<f64>)> {
    let n_samples = x.n_rows();

    if n_samples != y.len() {
        return Err(AnalizarError::dimension_mismatch(
            "n_samples",
            n_samples,
            y.len(),
        ));
    }
    if n_samples < 2 {
        return Err("Need at least 2 samples to split".into());
    }
    if !(0.0..=1.0).contains(&test_ratio) || test_ratio == 0.0 || test_ratio == 1.0 {
        return Err(AnalizarError::InvalidHyperparameter {
            param: "test_ratio".to_string(),
            value: format!("{test_ratio}"),
            constraint: "0 < test_ratio < 1".to_string(),
        });
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    for i in (1..n_samples).rev() {
        let j = rng.gen_range(0..=i);
        indices.swap(i, j);
    }

    let n_test = ((n_samples as f64 * test_ratio).round() as usize).clamp(1, n_samples - 1);
    let (test_idx, train_idx) = indices.split_at(n_test);

    let build = |idx: &[usize]| -> (Matrix<f64>, Vector<f64>) {
        let n_features = x.n_cols();
        let mut data = Vec::with_capacity(idx.len() * n_features);
        let mut targets = Vec::with_capacity(idx.len());
        for &i in idx {
            for j in 0..n_features {
                data.push(x.get(i, j));
            }
            targets.push(y[i]);
        }
        (
            Matrix::from_vec(idx.len(), n_features, data).expect("row slices are consistent"),
            Vector::from_vec(targets),
        )
    };

    let (x_test, y_test) = build(test_idx);
    let (x_train, y_train) = build(train_idx);

    Ok((x_train, x_test, y_train, y_test))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data(n: usize) -> (Matrix<f64>, Vector<f64>) {
        let x = Matrix::from_vec(n, 1, (0..n).map(|i| i as f64).collect()).unwrap();
        let y = Vector::from_vec((0..n).map(|i| i as f64 * 2.0).collect());
        (x, y)
    }

    #[test]
    fn test_split_sizes() {
        let (x, y) = sample_data(10);
        let (x_train, x_test, y_train, y_test) = train_test_split(&x, &y, 0.3, Some(42)).unwrap();

        assert_eq!(x_test.n_rows(), 3);
        assert_eq!(x_train.n_rows(), 7);
        assert_eq!(y_train.len(), 7);
        assert_eq!(y_test.len(), 3);
    }

    #[test]
    fn test_pairing_preserved() {
        let (x, y) = sample_data(20);
        let (x_train, x_test, y_train, y_test) = train_test_split(&x, &y, 0.25, Some(7)).unwrap();

        for i in 0..x_train.n_rows() {
            assert!((y_train[i] - x_train.get(i, 0) * 2.0).abs() < 1e-12);
        }
        for i in 0..x_test.n_rows() {
            assert!((y_test[i] - x_test.get(i, 0) * 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_seeded_split_is_reproducible() {
        let (x, y) = sample_data(12);
        let a = train_test_split(&x, &y, 0.25, Some(99)).unwrap();
        let b = train_test_split(&x, &y, 0.25, Some(99)).unwrap();
        assert_eq!(a.0.as_slice(), b.0.as_slice());
        assert_eq!(a.1.as_slice(), b.1.as_slice());
    }

    #[test]
    fn test_partitions_cover_all_samples() {
        let (x, y) = sample_data(9);
        let (x_train, x_test, _, _) = train_test_split(&x, &y, 0.4, Some(1)).unwrap();

        let mut seen: Vec<f64> = x_train
            .as_slice()
            .iter()
            .chain(x_test.as_slice().iter())
            .copied()
            .collect();
        seen.sort_by(f64::total_cmp);
        let expected: Vec<f64> = (0..9).map(f64::from).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_invalid_ratio() {
        let (x, y) = sample_data(4);
        assert!(train_test_split(&x, &y, 0.0, Some(1)).is_err());
        assert!(train_test_split(&x, &y, 1.0, Some(1)).is_err());
        assert!(train_test_split(&x, &y, 1.5, Some(1)).is_err());
    }

    #[test]
    fn test_too_few_samples() {
        let (x, y) = sample_data(1);
        assert!(train_test_split(&x, &y, 0.5, Some(1)).is_err());
    }

    #[test]
    fn test_length_mismatch() {
        let x = Matrix::from_vec(3, 1, vec![1.0, 2.0, 3.0]).unwrap();
        let y = Vector::from_slice(&[1.0, 2.0]);
        assert!(train_test_split(&x, &y, 0.5, Some(1)).is_err());
    }

    #[test]
    fn test_both_partitions_nonempty_with_extreme_ratio() {
        let (x, y) = sample_data(5);
        let (x_train, x_test, _, _) = train_test_split(&x, &y, 0.05, Some(3)).unwrap();
        assert!(x_test.n_rows() >= 1);
        assert!(x_train.n_rows() >= 1);
    }
}
