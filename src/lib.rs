//! Analizar: statistical analysis and machine learning toolkit in pure Rust.
//!
//! Analizar provides the numerical core for batch analysis of
//! application-template metadata: feature containers, min-max
//! normalization, three from-scratch models (Gaussian naive Bayes,
//! gradient-descent linear regression, k-means), a battery of classical
//! hypothesis tests, and an orchestrator that wires them into a single
//! serializable report.
//!
//! # Quick Start
//!
//! ```
//! use analizar::prelude::*;
//!
//! // Training data (y = 2*x + 1)
//! let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
//! let y = Vector::from_slice(&[3.0, 5.0, 7.0, 9.0]);
//!
//! let mut model = LinearRegression::new()
//!     .with_random_state(42)
//!     .with_epochs(20_000);
//! model.fit(&x, &y).unwrap();
//!
//! let r2 = model.score(&x, &y);
//! assert!(r2 > 0.99);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`data`]: Sample and Dataset containers
//! - [`preprocessing`]: Min-max feature normalization
//! - [`classification`]: Gaussian naive Bayes over named classes
//! - [`linear_model`]: Linear regression by batch gradient descent
//! - [`cluster`]: K-Means clustering
//! - [`metrics`]: Evaluation metrics (R², accuracy, silhouette, ARI)
//! - [`stats`]: Hypothesis tests and distribution approximations
//! - [`model_selection`]: Train/test splitting
//! - [`engine`]: End-to-end analysis orchestration
//!
//! # Determinism
//!
//! Every randomized initializer (regression weights, k-means centroids,
//! train/test shuffling) accepts a seed; identical data and seeds produce
//! bit-for-bit identical outputs.

pub mod classification;
pub mod cluster;
pub mod data;
pub mod engine;
pub mod error;
pub mod linear_model;
pub mod metrics;
pub mod model_selection;
pub mod prelude;
pub mod preprocessing;
pub mod primitives;
pub mod stats;
pub mod traits;

pub use error::{AnalizarError, Result};
pub use primitives::{Matrix, Vector};
pub use traits::{Estimator, Transformer, UnsupervisedEstimator};
