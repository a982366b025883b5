//! Error types for analizar operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for analizar operations.
///
/// Dimension mismatches and invalid hyperparameters are programmer errors
/// and surface here; degenerate statistical inputs (too few samples,
/// constant data) do not; those produce degenerate-but-valid results with
/// an explicit flag instead.
///
/// # Examples
///
/// ```
/// use analizar::error::AnalizarError;
///
/// let err = AnalizarError::DimensionMismatch {
///     expected: "3 features".to_string(),
///     actual: "5 features".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug)]
pub enum AnalizarError {
    /// Matrix/vector dimensions don't match for the operation.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Invalid hyperparameter value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// A model method was called before `fit`.
    NotFitted {
        /// What was not fitted
        what: String,
    },

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for AnalizarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalizarError::DimensionMismatch { expected, actual } => {
                write!(f, "dimension mismatch: expected {expected}, got {actual}")
            }
            AnalizarError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            AnalizarError::NotFitted { what } => {
                write!(f, "{what} not fitted. Call fit() first")
            }
            AnalizarError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for AnalizarError {}

impl From<&str> for AnalizarError {
    fn from(msg: &str) -> Self {
        AnalizarError::Other(msg.to_string())
    }
}

impl From<String> for AnalizarError {
    fn from(msg: String) -> Self {
        AnalizarError::Other(msg)
    }
}

impl AnalizarError {
    /// Create a dimension mismatch error with descriptive context.
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create a not-fitted error for the named model or transformer.
    #[must_use]
    pub fn not_fitted(what: &str) -> Self {
        Self::NotFitted {
            what: what.to_string(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, AnalizarError>;
