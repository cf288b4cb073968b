//! loglik_optimizer::types — numeric aliases and pre-wired solver types.
//!
//! Purpose
//! -------
//! Give the optimizer one vocabulary for coefficient vectors, gradients,
//! inverse-Hessian approximations, and objective values, and pin the
//! concrete Argmin solver types the GLM engine can run. Keeping the aliases
//! here means the builders and runner never spell out Argmin generics.
//!
//! Key behaviors
//! -------------
//! - Alias `Theta`, `Grad`, `InvHessian`, and `Cost` onto `ndarray` / `f64`.
//! - Alias the Argmin counter map as [`FnEvalMap`].
//! - Provide BFGS and L-BFGS aliases for both supported line searches.
//!
//! Invariants & assumptions
//! ------------------------
//! - `Theta` and `Grad` always have length `p` (number of predictors).
//! - `InvHessian` is `p × p`; BFGS runs are seeded with a scaled identity.
//! - `Cost` is the negative log-likelihood `c(θ) = -ℓ(θ)`.
//!
//! Testing notes
//! -------------
//! - Aliases only; exercised by the builder and runner tests.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::{BFGS, LBFGS},
};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Coefficient vector `θ` handed to and returned by the optimizer.
pub type Theta = Array1<f64>;

/// Gradient vector, same length as [`Theta`].
pub type Grad = Array1<f64>;

/// Inverse-Hessian approximation maintained by BFGS (`p × p`).
pub type InvHessian = Array2<f64>;

/// Scalar objective value; the negative log-likelihood inside Argmin.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver
/// (e.g. `"cost_count"`, `"gradient_count"`).
pub type FnEvalMap = HashMap<String, u64>;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Hager–Zhang line search specialized to this crate’s numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

/// More–Thuente line search specialized to this crate’s numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

/// Full-memory BFGS with the Hager–Zhang line search.
pub type BfgsHagerZhang = BFGS<HagerZhangLS, Cost>;

/// Full-memory BFGS with the More–Thuente line search.
pub type BfgsMoreThuente = BFGS<MoreThuenteLS, Cost>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
