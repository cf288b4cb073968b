//! numerical_stability — guarded scalar transforms for GLM links.
//!
//! Purpose
//! -------
//! Keep the nonlinear maps behind the GLM families (logistic, exponential,
//! softplus) finite for every finite input, and centralize the clamping
//! constants so links and likelihoods share the same guards.
//!
//! Key behaviors
//! -------------
//! - `safe_logistic` maps ℝ into `[LOGIT_EPS, 1 - LOGIT_EPS]`.
//! - `safe_exp` maps ℝ into `[exp(-ETA_BOUND), exp(ETA_BOUND)]`.
//! - `exp_linear_tail` is `exp` up to `ETA_BOUND` and its tangent line
//!   above; the Poisson likelihood uses it so the cost keeps a slope there.
//! - `safe_softplus` evaluates `ln(1 + exp(x))` without overflow; the
//!   Bernoulli likelihood is written in terms of it.
//!
//! Conventions
//! -----------
//! - Pure `f64 → f64` functions; no logging, I/O or allocation.
//! - Domain and shape validation happens in the GLM layer, not here.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    ETA_BOUND, LOGIT_EPS, exp_linear_tail, safe_exp, safe_logistic, safe_softplus,
};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::transformations::{
        ETA_BOUND, LOGIT_EPS, exp_linear_tail, safe_exp, safe_logistic, safe_softplus,
    };
}
