//! Errors raised while configuring, running and validating the optimizer.
//!
//! [`OptError`] is the one error type of the `optimization` layer. Model
//! code returns it from `LogLikelihood` callbacks; argmin carries it through
//! its own `Error` type, and [`From<argmin::core::Error>`] recovers it on the
//! way out. Errors that argmin raises itself become [`OptError::Solver`].
use argmin::core::{ArgminError, Error};

use crate::glm::errors::GLMError;

/// Result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// The model has no analytic gradient; finite differences take over.
    GradientNotImplemented,

    GradientDimMismatch { expected: usize, found: usize },

    /// A gradient entry is NaN or infinite.
    InvalidGradient { index: usize, value: f64, reason: &'static str },

    // ---- Options ----
    InvalidTolGrad { tol: f64, reason: &'static str },
    InvalidTolCost { tol: f64, reason: &'static str },
    InvalidMaxIter { max_iter: usize, reason: &'static str },

    /// `tol_grad`, `tol_cost` and `max_iter` were all `None`.
    NoTolerancesProvided,

    InvalidLineSearch { name: String, reason: &'static str },
    InvalidMethod { name: String, reason: &'static str },
    InvalidLBFGSMem { mem: usize, reason: &'static str },
    InvalidTimeout { reason: &'static str },

    // ---- Evaluation ----
    /// `-ℓ(θ)` came back NaN or infinite.
    NonFiniteCost { value: f64 },

    /// θ has the wrong number of entries for the model.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// θ has a non-finite entry.
    InvalidThetaInput { index: usize, value: f64 },

    /// A distribution rejected the inputs of a likelihood term.
    InvalidLogLikInput { text: String },

    /// Any other model-side failure, kept as its message.
    Model { text: String },

    // ---- Outcome ----
    /// The solver finished without a best parameter vector.
    MissingThetaHat,

    InvalidThetaHat { index: usize, value: f64, reason: &'static str },

    // ---- Solver ----
    /// An `ArgminError` raised by a solver or line search; `kind` names the
    /// argmin variant.
    Solver { kind: &'static str, text: String },

    /// Anything else that surfaced through argmin's `Error`.
    Backend { text: String },
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptError::GradientNotImplemented => write!(f, "No analytic gradient available"),
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient has {found} entries, expected {expected}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Gradient entry {index} is {value}: {reason}")
            }

            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "tol_grad = {tol} rejected: {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "tol_cost = {tol} rejected: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "max_iter = {max_iter} rejected: {reason}")
            }
            OptError::NoTolerancesProvided => {
                write!(f, "Set at least one of tol_grad, tol_cost or max_iter")
            }
            OptError::InvalidLineSearch { name, reason } => {
                write!(f, "Unknown line search '{name}': {reason}")
            }
            OptError::InvalidMethod { name, reason } => {
                write!(f, "Unknown quasi-Newton method '{name}': {reason}")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "lbfgs_mem = {mem} rejected: {reason}")
            }
            OptError::InvalidTimeout { reason } => write!(f, "Timeout rejected: {reason}"),

            OptError::NonFiniteCost { value } => {
                write!(f, "Negative log-likelihood evaluated to {value}")
            }
            OptError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Parameter vector has {actual} entries, expected {expected}")
            }
            OptError::InvalidThetaInput { index, value } => {
                write!(f, "Parameter {index} is {value}; all parameters must be finite")
            }
            OptError::InvalidLogLikInput { text } => {
                write!(f, "Likelihood term rejected its inputs: {text}")
            }
            OptError::Model { text } => write!(f, "Model error: {text}"),

            OptError::MissingThetaHat => write!(f, "Solver returned no parameter estimate"),
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Estimated parameter {index} is {value}: {reason}")
            }

            OptError::Solver { kind, text } => write!(f, "Solver error ({kind}): {text}"),
            OptError::Backend { text } => write!(f, "Optimizer backend error: {text}"),
        }
    }
}

impl From<Error> for OptError {
    fn from(err: Error) -> Self {
        let err = match err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match err.downcast::<ArgminError>() {
            Ok(argmin_err) => {
                let kind = match &argmin_err {
                    ArgminError::InvalidParameter { .. } => "invalid parameter",
                    ArgminError::NotImplemented { .. } => "not implemented",
                    ArgminError::NotInitialized { .. } => "not initialized",
                    ArgminError::ConditionViolated { .. } => "condition violated",
                    ArgminError::CheckpointNotFound { .. } => "checkpoint not found",
                    ArgminError::PotentialBug { .. } => "potential bug",
                    ArgminError::ImpossibleError { .. } => "impossible error",
                    _ => "other",
                };
                OptError::Solver { kind, text: argmin_err.to_string() }
            }
            Err(err) => OptError::Backend { text: err.to_string() },
        }
    }
}

impl From<GLMError> for OptError {
    fn from(err: GLMError) -> Self {
        match err {
            GLMError::DimensionMismatch { expected, found } => {
                OptError::ThetaLengthMismatch { expected, actual: found }
            }
            GLMError::NonFiniteCoefficient { index, value } => {
                OptError::InvalidThetaInput { index, value }
            }
            GLMError::InvalidDistributionParam { text } => OptError::InvalidLogLikInput { text },
            other => OptError::Model { text: other.to_string() },
        }
    }
}
