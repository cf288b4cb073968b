//! optimization — MLE machinery, numerical guards, and unified error surface.
//!
//! Purpose
//! -------
//! Provide the optimization layer every GLM family fits through: an
//! Argmin-backed log-likelihood maximizer, numerically stable link
//! transforms, and a single error/result surface.
//!
//! Key behaviors
//! -------------
//! - `loglik_optimizer`: maximize `ℓ(θ)` with BFGS or L-BFGS, finite
//!   differences when no analytic gradient exists, validated configuration.
//! - `numerical_stability`: guarded logistic / exponential / softplus.
//! - `errors`: configuration issues, numerical failures and backend errors
//!   normalized into `OptError` / `OptResult<T>`.
//!
//! Conventions
//! -----------
//! - Solvers maximize `ℓ(θ)` by minimizing `c(θ) = -ℓ(θ)`; outcomes are
//!   reported in terms of `ℓ`.
//! - Callers never see raw Argmin errors.
//! - Only the runner emits log records (the verbose initial-state line);
//!   per-fit reporting belongs to the model layer.
//!
//! Testing notes
//! -------------
//! - Submodule unit tests cover solver wiring on toy quadratics, transform
//!   tails, and error conversions. GLM tests exercise the full stack.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
//     use rust_glm::optimization::prelude::*;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
