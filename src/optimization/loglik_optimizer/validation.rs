//! Validation helpers for log-likelihood optimization.
//!
//! - **Configuration**: [`verify_tol_grad`], [`verify_tol_cost`] and
//!   [`verify_timeout`] reject non-finite, non-positive or zero settings.
//! - **Inputs**: [`validate_theta`] checks a starting vector against the
//!   expected dimension and finiteness before a run begins.
//! - **Iterates**: [`validate_grad`] enforces dimension and finite entries on
//!   every gradient handed to Argmin.
//! - **Outputs**: [`validate_theta_hat`] and [`validate_value`] guard what a
//!   finished run reports.
//!
//! Every helper reports the first offending element through a dedicated
//! [`OptError`] variant.
use std::time::Duration;

use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{Grad, Theta},
};

/// Validate the optional gradient‐norm tolerance.
///
/// `None` disables the rule; `Some(tol)` must be finite and `> 0`.
///
/// # Errors
/// Returns [`OptError::InvalidTolGrad`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the optional cost‐change tolerance.
///
/// `None` disables the rule; `Some(tol)` must be finite and `> 0`.
///
/// # Errors
/// Returns [`OptError::InvalidTolCost`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the optional wall-clock budget of a run.
///
/// # Errors
/// Returns [`OptError::InvalidTimeout`] for `Some(Duration::ZERO)`.
pub fn verify_timeout(timeout: Option<Duration>) -> OptResult<()> {
    match timeout {
        Some(t) if t.is_zero() => {
            Err(OptError::InvalidTimeout { reason: "Timeout must be greater than zero." })
        }
        _ => Ok(()),
    }
}

/// Validate a parameter vector against the expected dimension and finiteness.
///
/// # Errors
/// - [`OptError::ThetaLengthMismatch`] if `theta.len() != dim`.
/// - [`OptError::InvalidThetaInput`] for the first non-finite entry.
pub fn validate_theta(theta: &Theta, dim: usize) -> OptResult<()> {
    if theta.len() != dim {
        return Err(OptError::ThetaLengthMismatch { expected: dim, actual: theta.len() });
    }
    for (index, &value) in theta.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidThetaInput { index, value });
        }
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if length does not match `dim`.
/// - [`OptError::InvalidGradient`] with the index/value/reason of the first
///   offending element.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate and unwrap an estimated parameter vector (`theta_hat`).
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if no vector was provided.
/// - [`OptError::InvalidThetaHat`] if any element is non-finite.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    let t = theta_hat.ok_or(OptError::MissingThetaHat)?;
    for (index, &value) in t.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidThetaHat {
                index,
                value,
                reason: "Parameter estimates must be finite.",
            });
        }
    }
    Ok(t)
}

/// Validate that a scalar log-likelihood value is finite.
///
/// # Errors
/// Returns [`OptError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Accept/reject behavior of the configuration checks.
    // - Dimension and finiteness checks on θ, gradients and θ̂.
    //
    // They intentionally DO NOT cover:
    // - How these checks are wired into the solver (builder/runner tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Tolerances accept `None` and positive finite values and reject the rest.
    //
    // Given
    // -----
    // - `None`, `1e-6`, `0.0`, `-1.0` and `NaN`.
    //
    // Expect
    // ------
    // - Only the first two pass, for both the gradient and cost checks.
    fn tolerance_checks_accept_positive_finite_values_only() {
        assert!(verify_tol_grad(None).is_ok());
        assert!(verify_tol_grad(Some(1e-6)).is_ok());
        assert!(matches!(verify_tol_grad(Some(0.0)), Err(OptError::InvalidTolGrad { .. })));
        assert!(matches!(verify_tol_grad(Some(f64::NAN)), Err(OptError::InvalidTolGrad { .. })));

        assert!(verify_tol_cost(None).is_ok());
        assert!(verify_tol_cost(Some(1e-12)).is_ok());
        assert!(matches!(verify_tol_cost(Some(-1.0)), Err(OptError::InvalidTolCost { .. })));
    }

    #[test]
    // Purpose
    // -------
    // A zero wall-clock budget is rejected; anything else passes.
    //
    // Given
    // -----
    // - `Some(Duration::ZERO)`, `Some(1s)` and `None`.
    //
    // Expect
    // ------
    // - Only the zero budget returns `InvalidTimeout`.
    fn verify_timeout_rejects_zero_duration() {
        assert!(matches!(
            verify_timeout(Some(Duration::ZERO)),
            Err(OptError::InvalidTimeout { .. })
        ));
        assert!(verify_timeout(Some(Duration::from_secs(1))).is_ok());
        assert!(verify_timeout(None).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // `validate_theta` reports length mismatches before finiteness problems.
    //
    // Given
    // -----
    // - θ of length 2 checked against dimension 3.
    // - θ of length 2 with a NaN in position 1 checked against dimension 2.
    //
    // Expect
    // ------
    // - `ThetaLengthMismatch { expected: 3, actual: 2 }` for the first case.
    // - `InvalidThetaInput { index: 1, .. }` for the second.
    fn validate_theta_reports_length_then_finiteness() {
        let short = array![0.0, 1.0];
        assert_eq!(
            validate_theta(&short, 3),
            Err(OptError::ThetaLengthMismatch { expected: 3, actual: 2 })
        );

        let bad = array![0.0, f64::NAN];
        match validate_theta(&bad, 2) {
            Err(OptError::InvalidThetaInput { index, value }) => {
                assert_eq!(index, 1);
                assert!(value.is_nan());
            }
            other => panic!("Expected InvalidThetaInput, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Gradients must match the parameter dimension and be finite.
    //
    // Given
    // -----
    // - A length-2 gradient checked against dimension 3.
    // - A gradient containing `+∞`.
    //
    // Expect
    // ------
    // - `GradientDimMismatch` and `InvalidGradient` respectively.
    fn validate_grad_rejects_wrong_length_and_non_finite_entries() {
        assert_eq!(
            validate_grad(&array![1.0, 2.0], 3),
            Err(OptError::GradientDimMismatch { expected: 3, found: 2 })
        );
        assert!(matches!(
            validate_grad(&array![1.0, f64::INFINITY], 2),
            Err(OptError::InvalidGradient { index: 1, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // θ̂ must be present and finite; values must be finite.
    //
    // Given
    // -----
    // - `None`, a finite vector, and a finite / infinite scalar value.
    //
    // Expect
    // ------
    // - `MissingThetaHat` for `None`, the vector back unchanged otherwise.
    // - `NonFiniteCost` only for the infinite value.
    fn theta_hat_and_value_checks() {
        assert_eq!(validate_theta_hat(None), Err(OptError::MissingThetaHat));
        let theta = array![0.5, -0.25];
        assert_eq!(validate_theta_hat(Some(theta.clone())), Ok(theta));

        assert!(validate_value(-12.5).is_ok());
        assert!(matches!(
            validate_value(f64::NEG_INFINITY),
            Err(OptError::NonFiniteCost { .. })
        ));
    }
}
