//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use analizar::prelude::*;
//! ```

pub use crate::classification::GaussianNB;
pub use crate::cluster::KMeans;
pub use crate::data::{Dataset, Sample};
pub use crate::engine::{AnalysisEngine, MemoryReporter, NullReporter};
pub use crate::linear_model::LinearRegression;
pub use crate::metrics::{
    accuracy, adjusted_rand_index, inertia, mae, mse, r_squared, rmse, silhouette_score,
};
pub use crate::preprocessing::MinMaxNormalizer;
pub use crate::primitives::{Matrix, Vector};
pub use crate::stats::{StatisticalValidator, ValidationResult};
pub use crate::traits::{Estimator, Transformer, UnsupervisedEstimator};
