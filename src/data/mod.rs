//! Sample and Dataset containers for analyzed entities.
//!
//! A `Sample` is one analyzed entity (a template/application) with a
//! fixed-order numeric feature vector, an optional categorical label, and an
//! optional continuous target. A `Dataset` is an ordered collection of
//! samples sharing one canonical feature-name list; every sample's vector
//! has the same length and dimension ordering.

use crate::error::{AnalizarError, Result};
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One analyzed entity: a fixed-order feature vector with optional label
/// and target. Immutable after construction.
///
/// # Examples
///
/// ```
/// use analizar::data::Sample;
///
/// let s = Sample::new(vec![1.0, 2.0, 3.0])
///     .with_label("utility")
///     .with_target(0.7);
/// assert_eq!(s.features().len(), 3);
/// assert_eq!(s.label(), Some("utility"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    features: Vec<f64>,
    label: Option<String>,
    target: Option<f64>,
}

impl Sample {
    /// Creates a sample from an ordered feature vector.
    #[must_use]
    pub fn new(features: Vec<f64>) -> Self {
        Self {
            features,
            label: None,
            target: None,
        }
    }

    /// Sets the categorical label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the continuous target.
    #[must_use]
    pub fn with_target(mut self, target: f64) -> Self {
        self.target = Some(target);
        self
    }

    /// Returns the ordered feature values.
    #[must_use]
    pub fn features(&self) -> &[f64] {
        &self.features
    }

    /// Returns the categorical label, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the continuous target, if any.
    #[must_use]
    pub fn target(&self) -> Option<f64> {
        self.target
    }
}

/// An ordered sequence of samples sharing one feature-name list.
///
/// The canonical feature order is fixed at construction; `push` rejects any
/// sample whose vector length disagrees with it.
///
/// # Examples
///
/// ```
/// use analizar::data::{Dataset, Sample};
///
/// let mut dataset = Dataset::new(vec![
///     "components".to_string(),
///     "integrations".to_string(),
/// ]).unwrap();
/// dataset.push(Sample::new(vec![4.0, 1.0])).unwrap();
/// dataset.push(Sample::new(vec![9.0, 3.0])).unwrap();
/// assert_eq!(dataset.len(), 2);
/// assert_eq!(dataset.to_matrix().shape(), (2, 2));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    feature_names: Vec<String>,
    samples: Vec<Sample>,
}

impl Dataset {
    /// Creates an empty dataset with the given canonical feature names.
    ///
    /// # Errors
    ///
    /// Returns an error if the name list is empty, contains an empty name,
    /// or contains duplicates.
    pub fn new(feature_names: Vec<String>) -> Result<Self> {
        if feature_names.is_empty() {
            return Err("Dataset must have at least one feature".into());
        }
        for name in &feature_names {
            if name.is_empty() {
                return Err("Feature names cannot be empty".into());
            }
        }
        let mut sorted: Vec<&str> = feature_names.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        for pair in sorted.windows(2) {
            if pair[0] == pair[1] {
                return Err(format!("Duplicate feature name: {}", pair[0]).into());
            }
        }
        Ok(Self {
            feature_names,
            samples: Vec::new(),
        })
    }

    /// Appends a sample.
    ///
    /// # Errors
    ///
    /// Returns a dimension mismatch error if the sample's vector length
    /// disagrees with the canonical feature list. Silently truncating or
    /// padding would corrupt downstream statistics.
    pub fn push(&mut self, sample: Sample) -> Result<()> {
        if sample.features.len() != self.feature_names.len() {
            return Err(AnalizarError::dimension_mismatch(
                "n_features",
                self.feature_names.len(),
                sample.features.len(),
            ));
        }
        self.samples.push(sample);
        Ok(())
    }

    /// Builds a dataset from name→value records, validating each record
    /// against the canonical feature list at construction.
    ///
    /// # Errors
    ///
    /// Returns an error if any record lacks one of the canonical features.
    pub fn from_records(
        feature_names: Vec<String>,
        records: &[HashMap<String, f64>],
    ) -> Result<Self> {
        let mut dataset = Self::new(feature_names)?;
        for (i, record) in records.iter().enumerate() {
            let mut features = Vec::with_capacity(dataset.feature_names.len());
            for name in &dataset.feature_names {
                match record.get(name) {
                    Some(&value) => features.push(value),
                    None => {
                        return Err(
                            format!("Record {i} is missing feature \"{name}\"").into()
                        );
                    }
                }
            }
            dataset.samples.push(Sample::new(features));
        }
        Ok(dataset)
    }

    /// Returns the canonical feature names.
    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Returns the number of features.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the dataset has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the samples in insertion order.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Returns the feature vectors as an (`n_samples` x `n_features`) matrix.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix<f64> {
        let mut data = Vec::with_capacity(self.samples.len() * self.feature_names.len());
        for sample in &self.samples {
            data.extend_from_slice(&sample.features);
        }
        Matrix::from_vec(self.samples.len(), self.feature_names.len(), data)
            .expect("sample vectors validated at push time")
    }

    /// Returns all labels, or None unless every sample is labeled.
    #[must_use]
    pub fn labels(&self) -> Option<Vec<String>> {
        self.samples
            .iter()
            .map(|s| s.label.clone())
            .collect::<Option<Vec<_>>>()
    }

    /// Returns all targets, or None unless every sample has a target.
    #[must_use]
    pub fn targets(&self) -> Option<Vec<f64>> {
        self.samples
            .iter()
            .map(|s| s.target)
            .collect::<Option<Vec<_>>>()
    }
}
