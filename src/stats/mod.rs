//! Statistical validation toolkit.
//!
//! Descriptive helpers, closed-form distribution approximations, and a
//! library of classical hypothesis tests (Mann-Whitney U, Kruskal-Wallis,
//! Spearman correlation, Cronbach's alpha) plus cluster-quality
//! validations, each producing a [`ValidationResult`].
//!
//! Every test is fail-soft on degenerate input: empty groups, undersized
//! samples, or constant values yield a result with `significant = false`
//! and `insufficient_data = true` rather than an error, so callers can
//! distinguish "not significant" from "not computable".

pub mod distributions;
pub mod hypothesis;

pub use hypothesis::{average_ranks, StatisticalValidator};

use serde::{Deserialize, Serialize};

/// Sentinel p-value for tests that do not produce one (reliability
/// coefficients, cluster-quality scores). Always paired with an
/// interpretation naming the statistic actually reported.
pub const P_VALUE_NOT_APPLICABLE: f64 = 0.0;

/// Record of one statistical test. Created once per invocation and never
/// mutated; serializable to a simple key-value structure for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Test name, e.g. "Mann-Whitney U".
    pub test_name: String,
    /// The test statistic (U, H, rho, alpha, score).
    pub statistic: f64,
    /// Two-tailed p-value, or [`P_VALUE_NOT_APPLICABLE`].
    pub p_value: f64,
    /// Critical value the statistic (or its z/chi-square transform) is
    /// compared against at the configured significance level.
    pub critical_value: f64,
    /// Whether the test met the significance threshold.
    pub significant: bool,
    /// Effect size, when the test defines one.
    pub effect_size: Option<f64>,
    /// Confidence interval, when the test defines one.
    pub confidence_interval: Option<(f64, f64)>,
    /// True when the input was too degenerate to compute the test;
    /// distinguishes "not computable" from "not significant".
    pub insufficient_data: bool,
    /// Human-readable summary of the outcome.
    pub interpretation: String,
}

impl ValidationResult {
    /// Builds the degenerate-but-valid result returned for inputs the
    /// test cannot be computed on.
    #[must_use]
    pub fn insufficient(test_name: &str, interpretation: impl Into<String>) -> Self {
        Self {
            test_name: test_name.to_string(),
            statistic: 0.0,
            p_value: P_VALUE_NOT_APPLICABLE,
            critical_value: 0.0,
            significant: false,
            effect_size: None,
            confidence_interval: None,
            insufficient_data: true,
            interpretation: interpretation.into(),
        }
    }
}

/// Arithmetic mean; 0.0 for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance (n - 1 divisor); 0.0 for fewer than 2 values.
#[must_use]
pub fn sample_variance(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64
}

/// Sample standard deviation; 0.0 for fewer than 2 values.
#[must_use]
pub fn sample_std_dev(values: &[f64]) -> f64 {
    sample_variance(values).sqrt()
}

/// Median; 0.0 for an empty slice.
#[must_use]
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
