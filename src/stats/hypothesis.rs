//! Classical hypothesis tests and cluster-quality validations.
//!
//! Non-parametric tests (Mann-Whitney U, Kruskal-Wallis), rank correlation
//! (Spearman), reliability (Cronbach's alpha), and wrappers that lift the
//! clustering metrics into [`ValidationResult`]s.

use super::distributions::{chi_square_critical, chi_square_survival, normal_cdf, normal_quantile};
use super::{sample_variance, ValidationResult, P_VALUE_NOT_APPLICABLE};
use crate::metrics::{adjusted_rand_index, silhouette_score};
use crate::primitives::Matrix;

/// Both groups must exceed this size for the Mann-Whitney normal
/// approximation to apply.
const NORMAL_APPROXIMATION_MIN: usize = 20;

/// Size bound for the exact Mann-Whitney permutation distribution.
const EXACT_TEST_MAX_TOTAL: usize = 20;

/// Assigns 1-based ranks to values, averaging ranks across ties
/// (midranks).
///
/// # Examples
///
/// ```
/// use analizar::stats::average_ranks;
///
/// let ranks = average_ranks(&[10.0, 20.0, 20.0, 30.0]);
/// assert_eq!(ranks, vec![1.0, 2.5, 2.5, 4.0]);
/// ```
#[must_use]
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        // Positions i..=j (0-based) share the midrank.
        let midrank = (i + j + 2) as f64 / 2.0;
        for &idx in &order[i..=j] {
            ranks[idx] = midrank;
        }
        i = j + 1;
    }
    ranks
}

/// Library of classical hypothesis tests over model outputs.
///
/// Every test returns a [`ValidationResult`]; degenerate inputs (empty
/// groups, too few samples, constant values) produce a result flagged
/// `insufficient_data` instead of an error.
///
/// # Examples
///
/// ```
/// use analizar::stats::StatisticalValidator;
///
/// let validator = StatisticalValidator::new();
/// let result = validator.spearman(
///     &[1.0, 2.0, 3.0, 4.0, 5.0],
///     &[2.0, 4.0, 6.0, 8.0, 10.0],
/// );
/// assert!((result.statistic - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct StatisticalValidator {
    /// Significance level for all tests.
    alpha: f64,
    /// Use the exact permutation distribution for small Mann-Whitney
    /// samples instead of the coarse fallback.
    exact_small_samples: bool,
}

impl Default for StatisticalValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatisticalValidator {
    /// Creates a validator with significance level 0.05.
    #[must_use]
    pub fn new() -> Self {
        Self {
            alpha: 0.05,
            exact_small_samples: false,
        }
    }

    /// Sets the significance level.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Enables the exact permutation p-value for small tie-free
    /// Mann-Whitney samples.
    #[must_use]
    pub fn with_exact_small_samples(mut self, exact: bool) -> Self {
        self.exact_small_samples = exact;
        self
    }

    /// Returns the configured significance level.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Mann-Whitney U test for a difference between two independent
    /// samples.
    ///
    /// Ranks are midranks over the pooled data. When both groups exceed
    /// 20 observations the normal approximation
    /// `z = (U - n1 n2 / 2) / sqrt(n1 n2 (n1 + n2 + 1) / 12)` supplies a
    /// two-tailed p-value; smaller samples fall back to a coarse
    /// step approximation (flagged in the interpretation), or to the
    /// exact permutation distribution when enabled and the pooled data
    /// is small and tie-free. Effect size is `r = |z| / sqrt(n1 + n2)`.
    #[must_use]
    pub fn mann_whitney_u(&self, group1: &[f64], group2: &[f64]) -> ValidationResult {
        let test_name = "Mann-Whitney U";
        let n1 = group1.len();
        let n2 = group2.len();

        if n1 == 0 || n2 == 0 {
            return ValidationResult::insufficient(test_name, "both groups must be non-empty");
        }

        let mut pooled = Vec::with_capacity(n1 + n2);
        pooled.extend_from_slice(group1);
        pooled.extend_from_slice(group2);
        let ranks = average_ranks(&pooled);

        let r1: f64 = ranks[..n1].iter().sum();
        let u1 = (n1 * n2) as f64 + (n1 * (n1 + 1)) as f64 / 2.0 - r1;
        let u2 = (n1 * n2) as f64 - u1;
        let u = u1.min(u2);

        let mean_u = (n1 * n2) as f64 / 2.0;
        let sigma_u = ((n1 * n2 * (n1 + n2 + 1)) as f64 / 12.0).sqrt();
        let z = (u - mean_u) / sigma_u;
        let effect_size = z.abs() / ((n1 + n2) as f64).sqrt();

        let large_sample = n1 > NORMAL_APPROXIMATION_MIN && n2 > NORMAL_APPROXIMATION_MIN;
        let (p_value, method) = if large_sample {
            let p = (2.0 * (1.0 - normal_cdf(z.abs()))).clamp(0.0, 1.0);
            (p, "normal approximation")
        } else if self.exact_small_samples && n1 + n2 <= EXACT_TEST_MAX_TOTAL && !has_ties(&pooled)
        {
            (exact_mann_whitney_p(u, n1, n2), "exact permutation test")
        } else {
            // Coarse small-sample step approximation; known to be
            // low-fidelity.
            let p = if u < (n1 * n2) as f64 * 0.3 { 0.05 } else { 0.5 };
            (p, "coarse small-sample approximation")
        };

        let significant = p_value < self.alpha;
        let verdict = if significant {
            "significant difference between groups"
        } else {
            "no significant difference between groups"
        };

        ValidationResult {
            test_name: test_name.to_string(),
            statistic: u,
            p_value,
            critical_value: normal_quantile(1.0 - self.alpha / 2.0),
            significant,
            effect_size: Some(effect_size),
            confidence_interval: None,
            insufficient_data: false,
            interpretation: format!("{verdict} (p = {p_value:.4}, {method})"),
        }
    }

    /// Kruskal-Wallis H test for a difference across two or more groups.
    ///
    /// `H = 12 / (N (N + 1)) * Σ R_i² / n_i - 3 (N + 1)` over midranks of
    /// the pooled data, compared against the chi-square survival function
    /// with `df = groups - 1`.
    #[must_use]
    pub fn kruskal_wallis(&self, groups: &[Vec<f64>]) -> ValidationResult {
        let test_name = "Kruskal-Wallis";

        if groups.len() < 2 {
            return ValidationResult::insufficient(test_name, "need at least 2 groups");
        }
        if groups.iter().any(Vec::is_empty) {
            return ValidationResult::insufficient(test_name, "all groups must be non-empty");
        }

        let n_total: usize = groups.iter().map(Vec::len).sum();
        let pooled: Vec<f64> = groups.iter().flatten().copied().collect();
        let ranks = average_ranks(&pooled);

        let n = n_total as f64;
        let mut offset = 0;
        let mut rank_term = 0.0;
        for group in groups {
            let r_i: f64 = ranks[offset..offset + group.len()].iter().sum();
            rank_term += r_i * r_i / group.len() as f64;
            offset += group.len();
        }
        let h = 12.0 / (n * (n + 1.0)) * rank_term - 3.0 * (n + 1.0);

        let df = groups.len() - 1;
        let p_value = chi_square_survival(h, df);
        let significant = p_value < self.alpha;
        let verdict = if significant {
            "at least one group differs significantly"
        } else {
            "no significant difference across groups"
        };

        ValidationResult {
            test_name: test_name.to_string(),
            statistic: h,
            p_value,
            critical_value: chi_square_critical(df, self.alpha),
            significant,
            effect_size: None,
            confidence_interval: None,
            insufficient_data: false,
            interpretation: format!("{verdict} (H = {h:.3}, df = {df}, p = {p_value:.4})"),
        }
    }

    /// Spearman rank correlation between two paired variables.
    ///
    /// `rho = 1 - 6 Σ d² / (n (n² - 1))` over midranks. Significance via
    /// `t = rho sqrt((n - 2) / (1 - rho²))` with the normal approximation
    /// of the t distribution; a Fisher z-transform confidence interval is
    /// attached when n > 10.
    ///
    /// # Panics
    ///
    /// Panics if the slices have different lengths.
    #[must_use]
    pub fn spearman(&self, x: &[f64], y: &[f64]) -> ValidationResult {
        let test_name = "Spearman correlation";
        assert_eq!(x.len(), y.len(), "Paired samples must have same length");

        let n = x.len();
        if n < 3 {
            return ValidationResult::insufficient(test_name, "need at least 3 pairs");
        }
        if is_constant(x) || is_constant(y) {
            return ValidationResult::insufficient(
                test_name,
                "correlation undefined for constant input",
            );
        }

        let ranks_x = average_ranks(x);
        let ranks_y = average_ranks(y);
        let d_squared: f64 = ranks_x
            .iter()
            .zip(ranks_y.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum();

        let nf = n as f64;
        let rho = (1.0 - 6.0 * d_squared / (nf * (nf * nf - 1.0))).clamp(-1.0, 1.0);

        let confidence_interval = if n > 10 && rho.abs() < 1.0 {
            let z_r = rho.atanh();
            let se = 1.0 / (nf - 3.0).sqrt();
            let z_crit = normal_quantile(1.0 - self.alpha / 2.0);
            Some(((z_r - z_crit * se).tanh(), (z_r + z_crit * se).tanh()))
        } else {
            None
        };

        let (p_value, significant) = if rho.abs() >= 1.0 {
            (0.0, true)
        } else {
            let t = rho * ((nf - 2.0) / (1.0 - rho * rho)).sqrt();
            // Normal approximation of the t distribution.
            let p = (2.0 * (1.0 - normal_cdf(t.abs()))).clamp(0.0, 1.0);
            (p, p < self.alpha)
        };

        let direction = if rho >= 0.0 { "positive" } else { "negative" };
        let strength = if rho.abs() >= 0.7 {
            "strong"
        } else if rho.abs() >= 0.4 {
            "moderate"
        } else {
            "weak"
        };
        let qualifier = if significant {
            "significant"
        } else {
            "not significant"
        };

        ValidationResult {
            test_name: test_name.to_string(),
            statistic: rho,
            p_value,
            critical_value: normal_quantile(1.0 - self.alpha / 2.0),
            significant,
            effect_size: Some(rho.abs()),
            confidence_interval,
            insufficient_data: false,
            interpretation: format!(
                "{strength} {direction} correlation, {qualifier} (rho = {rho:.3}, p = {p_value:.4})"
            ),
        }
    }

    /// Cronbach's alpha reliability coefficient over item score
    /// sequences.
    ///
    /// Sequences are truncated to the shortest length, then
    /// `alpha = k / (k - 1) * (1 - Σ item variances / total variance)`.
    /// Zero total variance yields the documented degenerate alpha of 0.0
    /// with `insufficient_data` set.
    #[must_use]
    pub fn cronbach_alpha(&self, items: &[Vec<f64>]) -> ValidationResult {
        let test_name = "Cronbach's alpha";

        let k = items.len();
        if k < 2 {
            return ValidationResult::insufficient(test_name, "need at least 2 items");
        }
        let n = items.iter().map(Vec::len).min().unwrap_or(0);
        if n < 2 {
            return ValidationResult::insufficient(
                test_name,
                "need at least 2 observations per item",
            );
        }

        let item_variance_sum: f64 = items.iter().map(|item| sample_variance(&item[..n])).sum();
        let totals: Vec<f64> = (0..n)
            .map(|i| items.iter().map(|item| item[i]).sum())
            .collect();
        let total_variance = sample_variance(&totals);

        if total_variance == 0.0 {
            return ValidationResult::insufficient(
                test_name,
                "total score variance is zero; alpha undefined, reported as 0.0",
            );
        }

        let kf = k as f64;
        let alpha_value = kf / (kf - 1.0) * (1.0 - item_variance_sum / total_variance);

        let quality = if alpha_value >= 0.9 {
            "excellent"
        } else if alpha_value >= 0.8 {
            "good"
        } else if alpha_value >= 0.7 {
            "acceptable"
        } else if alpha_value >= 0.6 {
            "questionable"
        } else {
            "poor"
        };

        ValidationResult {
            test_name: test_name.to_string(),
            statistic: alpha_value,
            p_value: P_VALUE_NOT_APPLICABLE,
            critical_value: 0.7,
            significant: alpha_value >= 0.7,
            effect_size: None,
            confidence_interval: None,
            insufficient_data: false,
            interpretation: format!("{quality} internal consistency (alpha = {alpha_value:.3})"),
        }
    }

    /// Lifts the silhouette score into a validation result.
    ///
    /// Requires at least 2 points and 2 distinct cluster labels;
    /// a score above 0.5 is treated as substantial structure.
    #[must_use]
    pub fn silhouette(&self, data: &Matrix<f64>, labels: &[usize]) -> ValidationResult {
        let test_name = "Silhouette score";

        let mut distinct = labels.to_vec();
        distinct.sort_unstable();
        distinct.dedup();
        if data.n_rows() < 2 || distinct.len() < 2 {
            return ValidationResult::insufficient(
                test_name,
                "need at least 2 points in 2 distinct clusters",
            );
        }

        let score = silhouette_score(data, labels);
        let quality = if score > 0.7 {
            "strong cluster structure"
        } else if score > 0.5 {
            "reasonable cluster structure"
        } else if score > 0.25 {
            "weak cluster structure"
        } else {
            "no substantial cluster structure"
        };

        ValidationResult {
            test_name: test_name.to_string(),
            statistic: score,
            p_value: P_VALUE_NOT_APPLICABLE,
            critical_value: 0.5,
            significant: score > 0.5,
            effect_size: None,
            confidence_interval: None,
            insufficient_data: false,
            interpretation: format!("{quality} (score = {score:.3})"),
        }
    }

    /// Lifts the Adjusted Rand Index into a validation result.
    ///
    /// # Panics
    ///
    /// Panics if the label assignments have different lengths.
    #[must_use]
    pub fn adjusted_rand(&self, labels_a: &[usize], labels_b: &[usize]) -> ValidationResult {
        let test_name = "Adjusted Rand Index";
        assert_eq!(
            labels_a.len(),
            labels_b.len(),
            "Label assignments must have same length"
        );

        if labels_a.len() < 2 {
            return ValidationResult::insufficient(test_name, "need at least 2 labeled points");
        }

        let ari = adjusted_rand_index(labels_a, labels_b);
        let quality = if ari > 0.75 {
            "strong agreement between labelings"
        } else if ari > 0.5 {
            "moderate agreement between labelings"
        } else if ari > 0.25 {
            "weak agreement between labelings"
        } else {
            "little to no agreement between labelings"
        };

        ValidationResult {
            test_name: test_name.to_string(),
            statistic: ari,
            p_value: P_VALUE_NOT_APPLICABLE,
            critical_value: 0.5,
            significant: ari > 0.5,
            effect_size: None,
            confidence_interval: None,
            insufficient_data: false,
            interpretation: format!("{quality} (ARI = {ari:.3})"),
        }
    }
}

/// True when any two pooled values are equal.
fn has_ties(values: &[f64]) -> bool {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.windows(2).any(|pair| pair[0] == pair[1])
}

/// True when all values are equal.
fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] == pair[1])
}

/// Two-tailed exact Mann-Whitney p-value for tie-free samples.
///
/// Enumerates the null distribution of the rank sum with a dynamic
/// program over ranks 1..=n, then doubles the lower tail at the observed
/// (smaller) U.
fn exact_mann_whitney_p(u: f64, n1: usize, n2: usize) -> f64 {
    let n = n1 + n2;
    let max_sum = n1 * n;

    // ways[j][s]: subsets of size j of the ranks seen so far summing to s.
    let mut ways = vec![vec![0.0f64; max_sum + 1]; n1 + 1];
    ways[0][0] = 1.0;
    for rank in 1..=n {
        for j in (1..=n1.min(rank)).rev() {
            for s in (rank..=max_sum).rev() {
                let add = ways[j - 1][s - rank];
                if add > 0.0 {
                    ways[j][s] += add;
                }
            }
        }
    }

    let offset = n1 * (n1 + 1) / 2;
    let total: f64 = ways[n1].iter().sum();
    let mut lower_tail = 0.0;
    for (s, &count) in ways[n1].iter().enumerate() {
        if s >= offset && (s - offset) as f64 <= u + 1e-9 {
            lower_tail += count;
        }
    }

    (2.0 * lower_tail / total).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_ranks_no_ties() {
        let ranks = average_ranks(&[30.0, 10.0, 20.0]);
        assert_eq!(ranks, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_average_ranks_with_ties() {
        let ranks = average_ranks(&[5.0, 5.0, 5.0]);
        assert_eq!(ranks, vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_mann_whitney_identical_large_groups() {
        let validator = StatisticalValidator::new();
        let group: Vec<f64> = vec![3.0; 25];
        let result = validator.mann_whitney_u(&group, &group);

        assert!((result.p_value - 1.0).abs() < 1e-6);
        assert!(!result.significant);
        assert!(!result.insufficient_data);
    }

    #[test]
    fn test_mann_whitney_separated_large_groups() {
        let validator = StatisticalValidator::new();
        let low: Vec<f64> = (0..25).map(f64::from).collect();
        let high: Vec<f64> = (100..125).map(f64::from).collect();
        let result = validator.mann_whitney_u(&low, &high);

        assert!(result.p_value < 0.01);
        assert!(result.significant);
        let effect = result.effect_size.expect("normal branch reports effect size");
        assert!(effect > 0.5);
    }

    #[test]
    fn test_mann_whitney_empty_group_is_insufficient() {
        let validator = StatisticalValidator::new();
        let result = validator.mann_whitney_u(&[], &[1.0, 2.0]);
        assert!(result.insufficient_data);
        assert!(!result.significant);
    }

    #[test]
    fn test_mann_whitney_small_sample_heuristic() {
        let validator = StatisticalValidator::new();
        let result = validator.mann_whitney_u(&[1.0, 2.0, 3.0], &[10.0, 11.0, 12.0]);

        // Fully separated small samples hit the 0.05 step of the coarse rule.
        assert!((result.p_value - 0.05).abs() < 1e-12);
        assert!(result.interpretation.contains("coarse"));
    }

    #[test]
    fn test_mann_whitney_exact_small_sample() {
        let validator = StatisticalValidator::new().with_exact_small_samples(true);
        let result = validator.mann_whitney_u(&[1.0, 2.0, 3.0, 4.0], &[10.0, 11.0, 12.0, 13.0]);

        // Complete separation of 4 vs 4: exact two-sided p = 2 / C(8, 4).
        assert!((result.p_value - 2.0 / 70.0).abs() < 1e-9);
        assert!(result.interpretation.contains("exact"));
    }

    #[test]
    fn test_mann_whitney_exact_falls_back_on_ties() {
        let validator = StatisticalValidator::new().with_exact_small_samples(true);
        let result = validator.mann_whitney_u(&[1.0, 1.0, 2.0], &[3.0, 4.0, 5.0]);
        assert!(result.interpretation.contains("coarse"));
    }

    #[test]
    fn test_kruskal_wallis_identical_groups() {
        let validator = StatisticalValidator::new();
        let group = vec![2.0, 2.0, 2.0, 2.0, 2.0];
        let result =
            validator.kruskal_wallis(&[group.clone(), group.clone(), group]);

        assert!(result.statistic.abs() < 1e-9);
        assert!(result.p_value > 0.9);
        assert!(!result.significant);
    }

    #[test]
    fn test_kruskal_wallis_separated_groups() {
        let validator = StatisticalValidator::new();
        let groups = vec![
            (0..10).map(f64::from).collect::<Vec<_>>(),
            (100..110).map(f64::from).collect::<Vec<_>>(),
            (200..210).map(f64::from).collect::<Vec<_>>(),
        ];
        let result = validator.kruskal_wallis(&groups);

        assert!(result.significant, "p = {}", result.p_value);
        assert!(result.statistic > result.critical_value);
    }

    #[test]
    fn test_kruskal_wallis_one_group_is_insufficient() {
        let validator = StatisticalValidator::new();
        let result = validator.kruskal_wallis(&[vec![1.0, 2.0]]);
        assert!(result.insufficient_data);
    }

    #[test]
    fn test_kruskal_wallis_empty_group_is_insufficient() {
        let validator = StatisticalValidator::new();
        let result = validator.kruskal_wallis(&[vec![1.0], vec![]]);
        assert!(result.insufficient_data);
    }

    #[test]
    fn test_spearman_perfect_monotone() {
        let validator = StatisticalValidator::new();
        let result = validator.spearman(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 6.0, 8.0, 10.0]);

        assert!((result.statistic - 1.0).abs() < 1e-12);
        assert!(result.significant);
        assert!((result.p_value - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_spearman_perfect_inverse() {
        let validator = StatisticalValidator::new();
        let result = validator.spearman(&[1.0, 2.0, 3.0, 4.0], &[8.0, 6.0, 4.0, 2.0]);
        assert!((result.statistic - (-1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_spearman_too_few_pairs() {
        let validator = StatisticalValidator::new();
        let result = validator.spearman(&[1.0, 2.0], &[2.0, 1.0]);
        assert!(result.insufficient_data);
    }

    #[test]
    fn test_spearman_constant_input() {
        let validator = StatisticalValidator::new();
        let result = validator.spearman(&[3.0, 3.0, 3.0, 3.0], &[1.0, 2.0, 3.0, 4.0]);
        assert!(result.insufficient_data);
        assert!(!result.significant);
    }

    #[test]
    fn test_spearman_confidence_interval_for_larger_samples() {
        let validator = StatisticalValidator::new();
        let x: Vec<f64> = (0..15).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|v| v * 1.5 + (v % 3.0)).collect();
        let result = validator.spearman(&x, &y);

        let (lo, hi) = result
            .confidence_interval
            .expect("n > 10 attaches a Fisher z interval");
        assert!(lo <= result.statistic);
        assert!(hi >= result.statistic || (result.statistic - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_spearman_uncorrelated_not_significant() {
        let validator = StatisticalValidator::new();
        let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let y = [3.0, 1.0, 4.0, 1.0, 5.0, 2.0];
        let result = validator.spearman(&x, &y);
        assert!(!result.significant);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_spearman_length_mismatch_panics() {
        let validator = StatisticalValidator::new();
        let _ = validator.spearman(&[1.0, 2.0, 3.0], &[1.0, 2.0]);
    }

    #[test]
    fn test_cronbach_identical_items() {
        let validator = StatisticalValidator::new();
        let item = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = validator.cronbach_alpha(&[item.clone(), item]);

        // Two identical items: alpha is exactly 1.
        assert!((result.statistic - 1.0).abs() < 1e-9);
        assert!(result.significant);
        assert!(result.interpretation.contains("excellent"));
    }

    #[test]
    fn test_cronbach_constant_items_degenerate() {
        let validator = StatisticalValidator::new();
        let item = vec![5.0, 5.0, 5.0];
        let result = validator.cronbach_alpha(&[item.clone(), item]);

        assert!(result.insufficient_data);
        assert!((result.statistic - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_cronbach_single_item_insufficient() {
        let validator = StatisticalValidator::new();
        let result = validator.cronbach_alpha(&[vec![1.0, 2.0, 3.0]]);
        assert!(result.insufficient_data);
    }

    #[test]
    fn test_cronbach_truncates_to_shortest() {
        let validator = StatisticalValidator::new();
        let result = validator.cronbach_alpha(&[
            vec![1.0, 2.0, 3.0, 4.0, 99.0],
            vec![1.1, 2.1, 3.1, 4.1],
        ]);
        // The fifth observation of the first item is ignored.
        assert!(!result.insufficient_data);
        assert!(result.statistic > 0.9);
    }

    #[test]
    fn test_silhouette_well_separated() {
        let validator = StatisticalValidator::new();
        let data = Matrix::from_vec(
            6,
            2,
            vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 100.0, 100.0, 101.0, 100.0, 100.0, 101.0],
        )
        .unwrap();
        let labels = vec![0, 0, 0, 1, 1, 1];
        let result = validator.silhouette(&data, &labels);

        assert!(result.statistic > 0.9);
        assert!(result.significant);
    }

    #[test]
    fn test_silhouette_single_cluster_insufficient() {
        let validator = StatisticalValidator::new();
        let data = Matrix::from_vec(3, 1, vec![1.0, 2.0, 3.0]).unwrap();
        let result = validator.silhouette(&data, &[0, 0, 0]);
        assert!(result.insufficient_data);
    }

    #[test]
    fn test_adjusted_rand_perfect_agreement() {
        let validator = StatisticalValidator::new();
        let result = validator.adjusted_rand(&[0, 0, 1, 1], &[1, 1, 0, 0]);
        assert!((result.statistic - 1.0).abs() < 1e-12);
        assert!(result.significant);
    }

    #[test]
    fn test_exact_p_complete_separation() {
        // 3 vs 3, complete separation: U = 0, two-sided p = 2/C(6,3) = 0.1
        let p = exact_mann_whitney_p(0.0, 3, 3);
        assert!((p - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_exact_p_center_is_one() {
        // U at the distribution center: doubling the lower tail caps at 1.
        let p = exact_mann_whitney_p(4.5, 3, 3);
        assert!((p - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_with_alpha_changes_significance() {
        let strict = StatisticalValidator::new().with_alpha(0.01);
        let result = strict.mann_whitney_u(&[1.0, 2.0, 3.0], &[10.0, 11.0, 12.0]);
        // Coarse p of 0.05 is not significant at alpha = 0.01.
        assert!(!result.significant);
    }
}
