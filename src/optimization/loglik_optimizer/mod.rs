//! loglik_optimizer — argmin-powered log-likelihood maximizer.
//!
//! Purpose
//! -------
//! Maximize a log-likelihood `ℓ(θ)` with a quasi-Newton method. Models
//! implement [`LogLikelihood`] and call [`maximize`]; everything Argmin
//! specific stays behind this module.
//!
//! Key behaviors
//! -------------
//! - [`adapter::ArgMinAdapter`] turns `ℓ(θ)` into the cost `c(θ) = -ℓ(θ)` and
//!   supplies finite-difference gradients when the model has none.
//! - [`maximize`] validates `θ₀` with [`LogLikelihood::check`], builds a BFGS
//!   or L-BFGS solver ([`builders`]), runs it ([`run`]) and normalizes the
//!   result into an [`OptimOutcome`].
//! - Configuration ([`Tolerances`], [`MLEOptions`], [`QuasiNewton`],
//!   [`LineSearcher`]) is validated on construction ([`validation`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - Models implement `ℓ(θ)` and, optionally, `∇ℓ(θ)`; never the cost.
//! - Invalid inputs are `OptError` values, not panics.
//! - `OptimOutcome::converged` is `true` only when a tolerance was met.
//!
//! Conventions
//! -----------
//! - Parameters are [`Theta`] (`Array1<f64>`); the BFGS inverse Hessian is
//!   [`types::InvHessian`] seeded with a scaled identity.
//! - [`OptimOutcome::value`] is reported as `ℓ(θ̂)`, not the cost.
//!
//! Testing notes
//! -------------
//! - Submodule tests cover sign conventions ([`adapter`]), solver wiring
//!   ([`builders`], [`run`], [`api`]), finite differences ([`finite_diff`]),
//!   validation and configuration ([`validation`], [`traits`]).
//! - The GLM tests exercise [`maximize`] end to end on real likelihoods.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::traits::{
    DEFAULT_MAX_ITER, DEFAULT_TOL_COST, DEFAULT_TOL_GRAD, LineSearcher, LogLikelihood,
    MLEOptions, OptimOutcome, QuasiNewton, Tolerances,
};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, InvHessian, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
//     use rust_glm::optimization::loglik_optimizer::prelude::*;

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{
        LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, QuasiNewton, Tolerances,
    };
    pub use super::types::{Cost, Grad, Theta};
}
