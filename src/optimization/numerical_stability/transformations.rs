//! Numerical stability utilities.
//!
//! Guarded versions of the nonlinear maps used by the GLM links and
//! likelihoods. Each uses an explicit cutoff so `f64` arithmetic stays in a
//! well-conditioned regime.
//!
//! # Provided items
//! - [`LOGIT_EPS`]: distance kept between a logistic mean and {0, 1}.
//! - [`ETA_BOUND`]: magnitude cap on a log-link linear predictor.
//! - [`safe_softplus`]: stable `ln(1 + exp(x))`, ℝ → (0, ∞).
//! - [`safe_logistic`]: stable `1 / (1 + exp(-x))`, clamped into
//!   `[LOGIT_EPS, 1 - LOGIT_EPS]`.
//! - [`safe_exp`]: `exp(x)` with `x` clamped into `[-ETA_BOUND, ETA_BOUND]`.
//! - [`exp_linear_tail`]: `exp(x)` up to `ETA_BOUND`, continued by its
//!   tangent line above it.

/// Clamp margin for logistic outputs.
///
/// `safe_logistic` never returns a value closer than this to 0 or 1, so
/// `ln(μ)` and `ln(1 - μ)` stay finite for every finite input.
pub const LOGIT_EPS: f64 = 1e-12;

/// Cap on `|η|` for the exponential link.
///
/// `exp(100) ≈ 2.7e43`, far from `f64` overflow.
pub const ETA_BOUND: f64 = 100.0;

/// Numerically stable softplus: `softplus(x) = ln(1 + exp(x))`.
///
/// - For `x > 20`, `softplus(x) ≈ x` to full `f64` precision.
/// - Otherwise `ln1p(exp(x))`, which is accurate for large negative `x`.
pub fn safe_softplus(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp().ln_1p() }
}

/// Numerically stable logistic function clamped into `[LOGIT_EPS, 1 - LOGIT_EPS]`.
///
/// Evaluates `exp` only on non-positive arguments, so it never overflows.
pub fn safe_logistic(x: f64) -> f64 {
    let p = if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    };
    p.clamp(LOGIT_EPS, 1.0 - LOGIT_EPS)
}

/// `exp(x)` with `x` clamped into `[-ETA_BOUND, ETA_BOUND]`.
///
/// Always finite and strictly positive for finite input.
pub fn safe_exp(x: f64) -> f64 {
    x.clamp(-ETA_BOUND, ETA_BOUND).exp()
}

/// `exp(x)` for `x <= ETA_BOUND`, and `exp(B)·(1 + x - B)` above `B = ETA_BOUND`.
///
/// Continuous with a continuous, non-decreasing derivative, so an objective
/// built on it stays convex and keeps a slope of `exp(B)` past the bound.
/// Below the bound `exp` may underflow to `0.0`, which is still finite.
pub fn exp_linear_tail(x: f64) -> f64 {
    if x <= ETA_BOUND {
        x.exp()
    } else {
        ETA_BOUND.exp() * (1.0 + (x - ETA_BOUND))
    }
}
