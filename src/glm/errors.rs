//! Errors for GLM fitting and prediction.
//!
//! [`GLMError`] separates the three failure classes callers act on
//! differently:
//! - **precondition**: [`GLMError::ModelNotFitted`],
//! - **optimizer failure**: [`GLMError::OptimizationFailed`],
//! - **shape / data problems**: [`GLMError::DimensionMismatch`],
//!   [`GLMError::ResponseLengthMismatch`] and the data-validation variants.
//!
//! ## Conventions
//! - **Indices are 0-based** (match Rust/NumPy).
//! - Backend failures that have no model-level meaning are normalized to
//!   [`GLMError::OptimizationFailed`] with a human-readable status.
//! - Non-convergence is *not* an error; see `OptimOutcome::converged`.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};
use statrs::distribution::NormalError;

use crate::optimization::errors::OptError;

/// Result alias for GLM operations that may produce [`GLMError`].
pub type GLMResult<T> = Result<T, GLMError>;

/// Unified error type for GLM modeling.
#[derive(Debug, Clone, PartialEq)]
pub enum GLMError {
    // ---- Input/data validation ----
    /// Design matrix has no rows.
    EmptyDesign,

    /// Design matrix has no columns.
    NoPredictors,

    /// A design-matrix entry is NaN/±inf.
    NonFiniteDesign { row: usize, col: usize, value: f64 },

    /// A response entry is NaN/±inf.
    NonFiniteResponse { index: usize, value: f64 },

    /// Response length differs from the number of design rows.
    ResponseLengthMismatch { rows: usize, len: usize },

    // ---- Shape ----
    /// Column count (or coefficient length) differs from the fitted width.
    DimensionMismatch { expected: usize, found: usize },

    /// A coefficient handed to the likelihood is NaN/±inf.
    NonFiniteCoefficient { index: usize, value: f64 },

    // ---- Family ----
    /// A distribution rejected its parameters while evaluating a likelihood.
    InvalidDistributionParam { text: String },

    /// Family name not recognized.
    UnknownFamily { name: String },

    // ---- Estimation ----
    /// Optimizer failed.
    OptimizationFailed { status: String },

    /// Model hasn't been fitted yet.
    ModelNotFitted,
}

impl std::error::Error for GLMError {}

impl std::fmt::Display for GLMError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            GLMError::EmptyDesign => write!(f, "Design matrix must have at least one row."),
            GLMError::NoPredictors => {
                write!(f, "Design matrix must have at least one predictor column.")
            }
            GLMError::NonFiniteDesign { row, col, value } => {
                write!(f, "Non-finite design value at row {row}, column {col}: {value}")
            }
            GLMError::NonFiniteResponse { index, value } => {
                write!(f, "Non-finite response value at index {index}: {value}")
            }
            GLMError::ResponseLengthMismatch { rows, len } => {
                write!(f, "Response length {len} does not match {rows} design rows.")
            }

            // ---- Shape ----
            GLMError::DimensionMismatch { expected, found } => {
                write!(f, "Dimension mismatch: expected {expected} columns, found {found}")
            }
            GLMError::NonFiniteCoefficient { index, value } => {
                write!(f, "Non-finite coefficient at index {index}: {value}")
            }

            // ---- Family ----
            GLMError::InvalidDistributionParam { text } => {
                write!(f, "Invalid distribution parameter: {text}")
            }
            GLMError::UnknownFamily { name } => write!(
                f,
                "Unknown family '{name}'. Valid options are 'normal', 'bernoulli' or 'poisson'."
            ),

            // ---- Estimation ----
            GLMError::OptimizationFailed { status } => {
                write!(f, "Optimizer failed with status: {status}")
            }
            GLMError::ModelNotFitted => {
                write!(f, "Model hasn't been fitted yet; call fit() before predict().")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<GLMError> for PyErr {
    fn from(err: GLMError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

impl From<NormalError> for GLMError {
    fn from(err: NormalError) -> GLMError {
        GLMError::InvalidDistributionParam { text: err.to_string() }
    }
}

impl From<OptError> for GLMError {
    fn from(err: OptError) -> GLMError {
        match err {
            OptError::ThetaLengthMismatch { expected, actual } => {
                GLMError::DimensionMismatch { expected, found: actual }
            }
            OptError::InvalidThetaInput { index, value } => {
                GLMError::NonFiniteCoefficient { index, value }
            }
            OptError::InvalidLogLikInput { text } => GLMError::InvalidDistributionParam { text },
            other => GLMError::OptimizationFailed { status: other.to_string() },
        }
    }
}
