//! loglik_optimizer::finite_diff — forward-difference gradient fallback.
//!
//! Purpose
//! -------
//! Give the adapter a second finite-difference path when the central
//! estimate cannot be trusted: a cost evaluation failed, or the estimate
//! contains non-finite entries.
//!
//! Invariants & assumptions
//! ------------------------
//! - The objective closure writes any runtime error into `closure_err` and
//!   returns `NaN`; this helper treats a captured error as fatal.
//! - A returned gradient always satisfies [`validate_grad`].
use crate::optimization::loglik_optimizer::{Grad, Theta, validation::validate_grad};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Forward-difference gradient of `func` at `theta`, with error capture.
///
/// Clears `closure_err`, runs `forward_diff`, and then reports (in order) a
/// captured closure error or a validation failure.
///
/// # Errors
/// - The error captured from `func`, if any.
/// - `OptError::GradientDimMismatch` / `OptError::InvalidGradient` from
///   [`validate_grad`].
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> Result<Grad, Error> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}
