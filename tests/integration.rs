//! End-to-end integration tests across the full analysis pipeline.

use analizar::data::{Dataset, Sample};
use analizar::engine::{AnalysisEngine, MemoryReporter, NullReporter, ReportLevel};
use analizar::model_selection::train_test_split;
use analizar::prelude::*;

/// Ten samples with 3 features, perfectly separated into classes "A" and
/// "B" along feature 0.
fn separable_dataset() -> Dataset {
    let mut dataset = Dataset::new(vec![
        "feature_0".to_string(),
        "feature_1".to_string(),
        "feature_2".to_string(),
    ])
    .unwrap();

    let rows: [(f64, f64, f64, &str); 10] = [
        (1.0, 5.0, 2.0, "A"),
        (1.2, 4.8, 2.2, "A"),
        (0.8, 5.2, 1.9, "A"),
        (1.1, 5.1, 2.1, "A"),
        (0.9, 4.9, 2.0, "A"),
        (9.0, 5.0, 2.1, "B"),
        (9.2, 4.9, 2.0, "B"),
        (8.8, 5.1, 1.9, "B"),
        (9.1, 5.2, 2.2, "B"),
        (8.9, 4.8, 2.0, "B"),
    ];
    for (f0, f1, f2, label) in rows {
        dataset
            .push(Sample::new(vec![f0, f1, f2]).with_label(label))
            .unwrap();
    }
    dataset
}

#[test]
fn classifier_separates_extremes_with_high_confidence() {
    let dataset = separable_dataset();
    let labels = dataset.labels().expect("every sample is labeled");

    let mut model = GaussianNB::new();
    model.fit(&dataset.to_matrix(), &labels).unwrap();

    // Held-out points several standard deviations below the "A" cluster
    // mean on feature 0, and as far above the "B" mean.
    let held_out = Matrix::from_vec(2, 3, vec![0.0, 5.0, 2.0, 10.0, 5.0, 2.0]).unwrap();
    let predictions = model.predict(&held_out).unwrap();
    assert_eq!(predictions[0], "A");
    assert_eq!(predictions[1], "B");

    let probabilities = model.predict_proba(&held_out).unwrap();
    let classes = model.classes();
    let idx_a = classes.iter().position(|c| c == "A").unwrap();
    let idx_b = classes.iter().position(|c| c == "B").unwrap();
    assert!(probabilities[0][idx_a] > 0.9);
    assert!(probabilities[1][idx_b] > 0.9);
}

/// Ten samples whose three features all track the class split, plus a
/// target linear in feature 0.
fn aligned_dataset() -> Dataset {
    let mut dataset = Dataset::new(vec![
        "feature_0".to_string(),
        "feature_1".to_string(),
        "feature_2".to_string(),
    ])
    .unwrap();

    let f0_values = [1.0, 1.2, 0.8, 1.1, 0.9, 9.0, 9.2, 8.8, 9.1, 8.9];
    for (i, &f0) in f0_values.iter().enumerate() {
        let label = if i < 5 { "A" } else { "B" };
        dataset
            .push(
                Sample::new(vec![f0, f0 * 0.5, 10.0 - f0])
                    .with_label(label)
                    .with_target(f0 * 2.0 + 1.0),
            )
            .unwrap();
    }
    dataset
}

#[test]
fn full_engine_run_over_separable_dataset() {
    let dataset = aligned_dataset();

    let engine = AnalysisEngine::new().with_random_state(42).with_clusters(2);
    let mut reporter = MemoryReporter::new();
    let report = engine.run(&dataset, &mut reporter).unwrap();

    let classification = report.classification.expect("labels present");
    assert!(classification.accuracy > 0.9);

    let regression = report.regression.expect("targets present");
    assert!(regression.r_squared > 0.9);

    let clustering = report.clustering.expect("clustering always runs");
    assert_eq!(clustering.labels.len(), 10);

    // The two natural clusters match the class labels, so the ARI
    // validation should report strong agreement.
    let ari = report
        .validations
        .iter()
        .find(|v| v.test_name == "Adjusted Rand Index")
        .expect("ARI runs when labels are present");
    assert!(ari.statistic > 0.9, "ARI = {}", ari.statistic);

    let info_count = reporter
        .entries()
        .iter()
        .filter(|(level, _)| *level == ReportLevel::Info)
        .count();
    assert!(info_count >= 3);
}

#[test]
fn normalization_feeds_models_without_distorting_ranks() {
    // One varying dimension plus two constant ones; the constants
    // normalize to 0.0, so raw and normalized data carry the same
    // single-axis structure.
    let mut dataset = Dataset::new(vec![
        "feature_0".to_string(),
        "feature_1".to_string(),
        "feature_2".to_string(),
    ])
    .unwrap();
    for f0 in [1.0, 1.2, 0.8, 1.1, 0.9, 9.0, 9.2, 8.8, 9.1, 8.9] {
        dataset.push(Sample::new(vec![f0, 5.0, 2.0])).unwrap();
    }
    let raw = dataset.to_matrix();

    let mut normalizer = MinMaxNormalizer::new();
    let normalized = normalizer.fit_transform(&raw).unwrap();
    for i in 0..normalized.n_rows() {
        assert!(normalized.get(i, 1).abs() < 1e-12);
        assert!(normalized.get(i, 2).abs() < 1e-12);
    }

    // Min-max normalization is monotone per dimension, so k-means finds
    // the same two groups on raw and normalized data.
    let mut on_raw = KMeans::new(2).with_random_state(42);
    on_raw.fit(&raw).unwrap();
    let mut on_normalized = KMeans::new(2).with_random_state(42);
    on_normalized.fit(&normalized).unwrap();

    let ari = adjusted_rand_index(on_raw.labels(), on_normalized.labels());
    assert!((ari - 1.0).abs() < 1e-12);
}

#[test]
fn holdout_regression_generalizes() {
    // y = 4x + 3 over 20 samples, split 70/30.
    let x = Matrix::from_vec(20, 1, (0..20).map(|i| f64::from(i) / 19.0).collect()).unwrap();
    let y = Vector::from_vec(
        (0..20)
            .map(|i| 4.0 * f64::from(i) / 19.0 + 3.0)
            .collect(),
    );

    let (x_train, x_test, y_train, y_test) = train_test_split(&x, &y, 0.3, Some(42)).unwrap();

    let mut model = LinearRegression::new()
        .with_random_state(42)
        .with_learning_rate(0.1)
        .with_epochs(30_000);
    model.fit(&x_train, &y_train).unwrap();

    let r2 = model.score(&x_test, &y_test);
    assert!(r2 > 0.99, "holdout R² = {r2}");
}

#[test]
fn validation_results_round_trip_through_json() {
    let validator = StatisticalValidator::new();
    let result = validator.spearman(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 6.0, 8.0, 10.0]);

    let json = serde_json::to_string(&result).unwrap();
    let decoded: ValidationResult = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, result);
}

#[test]
fn engine_report_is_fully_serializable() {
    let dataset = separable_dataset();
    let engine = AnalysisEngine::new().with_random_state(7).with_clusters(2);
    let report = engine.run(&dataset, &mut NullReporter).unwrap();

    let json = serde_json::to_string_pretty(&report).unwrap();
    assert!(json.contains("feature_0"));
    assert!(json.contains("Silhouette score"));
}

#[test]
fn validator_pipeline_on_cluster_output() {
    // Two tight blobs; cluster, then validate silhouette and group
    // difference along feature 0.
    let mut data = Vec::new();
    for i in 0..12 {
        if i < 6 {
            data.push(f64::from(i) * 0.01);
        } else {
            data.push(100.0 + f64::from(i) * 0.01);
        }
    }
    let matrix = Matrix::from_vec(12, 1, data).unwrap();

    let mut kmeans = KMeans::new(2).with_random_state(42);
    kmeans.fit(&matrix).unwrap();
    let labels = kmeans.labels().to_vec();

    let validator = StatisticalValidator::new();
    let silhouette = validator.silhouette(&matrix, &labels);
    assert!(silhouette.statistic > 0.9);
    assert!(silhouette.significant);

    // Feature 0 split by cluster: the groups are far apart.
    let group_a: Vec<f64> = (0..12)
        .filter(|&i| labels[i] == labels[0])
        .map(|i| matrix.get(i, 0))
        .collect();
    let group_b: Vec<f64> = (0..12)
        .filter(|&i| labels[i] != labels[0])
        .map(|i| matrix.get(i, 0))
        .collect();
    let mw = validator
        .with_exact_small_samples(true)
        .mann_whitney_u(&group_a, &group_b);
    assert!(mw.significant, "p = {}", mw.p_value);
}

#[test]
fn deterministic_end_to_end_with_fixed_seed() {
    let dataset = separable_dataset();
    let engine = AnalysisEngine::new().with_random_state(123).with_clusters(2);

    let a = engine.run(&dataset, &mut NullReporter).unwrap();
    let b = engine.run(&dataset, &mut NullReporter).unwrap();

    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}
