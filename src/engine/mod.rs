//! Analysis orchestration.
//!
//! The [`AnalysisEngine`] wires the full pipeline: feature normalization,
//! model training (classification, regression, clustering), per-sample
//! predictions, and statistical validation of the results, packaged into a
//! serializable [`AnalysisReport`].
//!
//! The engine owns all user-visible failure behavior: an individual stage
//! that cannot run is reported through the injected [`Reporter`] and
//! recorded as a warning on the report; the batch never crashes on
//! degenerate data.

use crate::classification::GaussianNB;
use crate::cluster::{ClusterCharacteristics, KMeans};
use crate::data::Dataset;
use crate::error::Result;
use crate::linear_model::LinearRegression;
use crate::metrics::mse;
use crate::preprocessing::MinMaxNormalizer;
use crate::primitives::{Matrix, Vector};
use crate::stats::{StatisticalValidator, ValidationResult};
use crate::traits::{Estimator, Transformer, UnsupervisedEstimator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Receives progress and warning messages from an analysis run.
///
/// The numerical core never logs; all reporting flows through this
/// injected collaborator, created once per run.
pub trait Reporter {
    /// Reports a progress message.
    fn info(&mut self, message: &str);
    /// Reports a recoverable problem.
    fn warn(&mut self, message: &str);
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn info(&mut self, _message: &str) {}
    fn warn(&mut self, _message: &str) {}
}

/// Severity of a buffered report entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    /// Progress message.
    Info,
    /// Recoverable problem.
    Warn,
}

/// Buffers messages in memory for inspection after the run.
#[derive(Debug, Clone, Default)]
pub struct MemoryReporter {
    entries: Vec<(ReportLevel, String)>,
}

impl MemoryReporter {
    /// Creates an empty reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the buffered entries in arrival order.
    #[must_use]
    pub fn entries(&self) -> &[(ReportLevel, String)] {
        &self.entries
    }

    /// Returns only the warning messages.
    #[must_use]
    pub fn warnings(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(level, _)| *level == ReportLevel::Warn)
            .map(|(_, message)| message.as_str())
            .collect()
    }

    /// Drains and returns all buffered entries.
    pub fn flush(&mut self) -> Vec<(ReportLevel, String)> {
        std::mem::take(&mut self.entries)
    }
}

impl Reporter for MemoryReporter {
    fn info(&mut self, message: &str) {
        self.entries.push((ReportLevel::Info, message.to_string()));
    }

    fn warn(&mut self, message: &str) {
        self.entries.push((ReportLevel::Warn, message.to_string()));
    }
}

/// Classification stage output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationSummary {
    /// Class labels in the stable order fixed at fit time.
    pub classes: Vec<String>,
    /// Argmax label per sample.
    pub predicted: Vec<String>,
    /// Class-name → probability map per sample.
    pub probabilities: Vec<BTreeMap<String, f64>>,
    /// Training accuracy.
    pub accuracy: f64,
}

/// Regression stage output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionSummary {
    /// Predicted target per sample, in input order.
    pub predicted: Vec<f64>,
    /// Coefficient of determination on the training data.
    pub r_squared: f64,
    /// Mean squared error on the training data.
    pub mse: f64,
    /// Feature names ranked by weight magnitude, descending.
    pub feature_importance: Vec<(String, f64)>,
}

/// Clustering stage output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusteringSummary {
    /// Effective cluster count.
    pub n_clusters: usize,
    /// Cluster id per sample, in input order.
    pub labels: Vec<usize>,
    /// Per-cluster summary statistics.
    pub characteristics: Vec<ClusterCharacteristics>,
}

/// Complete output of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Number of samples analyzed.
    pub n_samples: usize,
    /// Number of features per sample.
    pub n_features: usize,
    /// Canonical feature names.
    pub feature_names: Vec<String>,
    /// Present when every sample carried a class label.
    pub classification: Option<ClassificationSummary>,
    /// Present when every sample carried a continuous target.
    pub regression: Option<RegressionSummary>,
    /// Present unless model fitting was skipped.
    pub clustering: Option<ClusteringSummary>,
    /// Statistical validations of the fitted models.
    pub validations: Vec<ValidationResult>,
    /// Problems encountered during the run.
    pub warnings: Vec<String>,
}

/// Orchestrates normalization, model fitting, prediction, and validation
/// over a [`Dataset`].
///
/// # Examples
///
/// ```
/// use analizar::data::{Dataset, Sample};
/// use analizar::engine::{AnalysisEngine, MemoryReporter};
///
/// let mut dataset = Dataset::new(vec!["size".to_string(), "depth".to_string()]).unwrap();
/// for i in 0..6 {
///     let v = f64::from(i);
///     dataset.push(Sample::new(vec![v, 10.0 - v]).with_target(v * 2.0)).unwrap();
/// }
///
/// let engine = AnalysisEngine::new().with_random_state(42);
/// let mut reporter = MemoryReporter::new();
/// let report = engine.run(&dataset, &mut reporter).unwrap();
/// assert!(report.regression.is_some());
/// assert!(report.clustering.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct AnalysisEngine {
    /// Requested cluster count (reduced to the sample count when larger).
    n_clusters: usize,
    /// Below this sample count, model fitting is skipped entirely.
    min_samples: usize,
    /// Seed shared by every seeded initializer in the run.
    random_state: Option<u64>,
    /// Significance level for the validation tests.
    alpha: f64,
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisEngine {
    /// Creates an engine with 3 clusters, a 5-sample minimum, and
    /// significance level 0.05.
    #[must_use]
    pub fn new() -> Self {
        Self {
            n_clusters: 3,
            min_samples: 5,
            random_state: None,
            alpha: 0.05,
        }
    }

    /// Sets the requested cluster count.
    #[must_use]
    pub fn with_clusters(mut self, n_clusters: usize) -> Self {
        self.n_clusters = n_clusters;
        self
    }

    /// Sets the minimum sample count below which fitting is skipped.
    #[must_use]
    pub fn with_min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples;
        self
    }

    /// Sets the seed shared by every seeded initializer.
    #[must_use]
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Sets the significance level for validation tests.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Runs the full pipeline over the dataset.
    ///
    /// # Errors
    ///
    /// Returns an error only for structural problems (normalization of an
    /// inconsistent matrix). Stage-level failures are recorded as report
    /// warnings instead.
    pub fn run(&self, dataset: &Dataset, reporter: &mut dyn Reporter) -> Result<AnalysisReport> {
        let n_samples = dataset.len();
        let mut report = AnalysisReport {
            n_samples,
            n_features: dataset.n_features(),
            feature_names: dataset.feature_names().to_vec(),
            classification: None,
            regression: None,
            clustering: None,
            validations: Vec::new(),
            warnings: Vec::new(),
        };

        if n_samples < self.min_samples {
            let warning = format!(
                "only {n_samples} samples available (minimum {}); skipping model fitting",
                self.min_samples
            );
            reporter.warn(&warning);
            report.warnings.push(warning);
            return Ok(report);
        }

        reporter.info(&format!(
            "analyzing {n_samples} samples with {} features",
            dataset.n_features()
        ));

        let raw = dataset.to_matrix();
        let mut normalizer = MinMaxNormalizer::new();
        let normalized = normalizer.fit_transform(&raw)?;
        reporter.info("features normalized to unit range");

        let validator = StatisticalValidator::new().with_alpha(self.alpha);

        // Classification stage: only when every sample is labeled.
        let class_labels = dataset.labels();
        if let Some(labels) = &class_labels {
            let mut model = GaussianNB::new();
            match model.fit(&normalized, labels) {
                Ok(()) => {
                    let predicted = model.predict(&normalized)?;
                    let probabilities = model
                        .predict_proba(&normalized)?
                        .into_iter()
                        .map(|row| {
                            model
                                .classes()
                                .iter()
                                .cloned()
                                .zip(row)
                                .collect::<BTreeMap<String, f64>>()
                        })
                        .collect();
                    let accuracy = crate::metrics::accuracy(&predicted, labels);
                    reporter.info(&format!(
                        "classifier fitted on {} classes, accuracy {accuracy:.3}",
                        model.classes().len()
                    ));
                    report.classification = Some(ClassificationSummary {
                        classes: model.classes().to_vec(),
                        predicted,
                        probabilities,
                        accuracy,
                    });
                }
                Err(e) => {
                    let warning = format!("classification skipped: {e}");
                    reporter.warn(&warning);
                    report.warnings.push(warning);
                }
            }
        }

        // Regression stage: only when every sample has a target.
        if let Some(targets) = dataset.targets() {
            let y = Vector::from_vec(targets);
            // Step size and epoch budget sized for unit-range features.
            let mut model = LinearRegression::new()
                .with_learning_rate(0.05)
                .with_epochs(10_000);
            if let Some(seed) = self.random_state {
                model = model.with_random_state(seed);
            }
            match model.fit(&normalized, &y) {
                Ok(()) => {
                    let predicted = model.predict(&normalized);
                    let r_squared = model.score(&normalized, &y);
                    let train_mse = mse(&predicted, &y);
                    let feature_importance = model
                        .feature_importance()
                        .into_iter()
                        .map(|(idx, weight)| (report.feature_names[idx].clone(), weight))
                        .collect();
                    reporter.info(&format!("regressor fitted, R² = {r_squared:.3}"));

                    report
                        .validations
                        .push(validator.spearman(predicted.as_slice(), y.as_slice()));
                    report.regression = Some(RegressionSummary {
                        predicted: predicted.as_slice().to_vec(),
                        r_squared,
                        mse: train_mse,
                        feature_importance,
                    });
                }
                Err(e) => {
                    let warning = format!("regression skipped: {e}");
                    reporter.warn(&warning);
                    report.warnings.push(warning);
                }
            }
        }

        // Clustering stage: always runs.
        match self.fit_clusterer(&normalized) {
            Ok(kmeans) => {
                let cluster_labels = kmeans.labels().to_vec();
                reporter.info(&format!(
                    "{} clusters fitted in {} iterations",
                    kmeans.effective_clusters(),
                    kmeans.n_iter()
                ));

                report
                    .validations
                    .push(validator.silhouette(&normalized, &cluster_labels));
                if let Some(labels) = &class_labels {
                    let encoded = encode_labels(labels);
                    report
                        .validations
                        .push(validator.adjusted_rand(&cluster_labels, &encoded));
                }

                report.clustering = Some(ClusteringSummary {
                    n_clusters: kmeans.effective_clusters(),
                    labels: cluster_labels,
                    characteristics: kmeans.cluster_characteristics(&normalized),
                });
            }
            Err(e) => {
                let warning = format!("clustering skipped: {e}");
                reporter.warn(&warning);
                report.warnings.push(warning);
            }
        }

        Ok(report)
    }

    /// Fits k-means several times with derived seeds and keeps the
    /// lowest-inertia fit. Random range-based initialization can strand a
    /// centroid with no points; restarts make the chosen partition
    /// reliable while staying deterministic under a fixed seed.
    fn fit_clusterer(&self, x: &Matrix<f64>) -> Result<KMeans> {
        let mut best: Option<KMeans> = None;
        for restart in 0..KMEANS_RESTARTS {
            let mut kmeans = KMeans::new(self.n_clusters);
            if let Some(seed) = self.random_state {
                kmeans = kmeans.with_random_state(seed.wrapping_add(restart));
            }
            kmeans.fit(x)?;
            let replace = best
                .as_ref()
                .map_or(true, |current| kmeans.inertia() < current.inertia());
            if replace {
                best = Some(kmeans);
            }
        }
        Ok(best.expect("at least one restart runs"))
    }
}

/// Number of seeded k-means restarts per run.
const KMEANS_RESTARTS: u64 = 10;

/// Maps string labels to integer ids in first-seen order.
fn encode_labels(labels: &[String]) -> Vec<usize> {
    let mut seen: Vec<&String> = Vec::new();
    labels
        .iter()
        .map(|label| {
            if let Some(pos) = seen.iter().position(|s| *s == label) {
                pos
            } else {
                seen.push(label);
                seen.len() - 1
            }
        })
        .collect()
}
