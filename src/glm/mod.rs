//! glm — generalized linear models fitted by maximum likelihood.
//!
//! Purpose
//! -------
//! Fit Normal, Bernoulli and Poisson GLMs through one generic estimator.
//! A family supplies the link and the negative log-likelihood; the model
//! supplies the data, the optimizer options and the fit/predict algorithm.
//!
//! Key behaviors
//! -------------
//! - [`family`]: the [`Family`] trait, the three concrete families, and the
//!   runtime-selected [`GLMFamily`].
//! - [`data`]: [`GLMData`], the validated `(X, y)` pair.
//! - [`model`]: [`GLM`] and its aliases; `fit`, `predict`,
//!   `linear_predictor`, `coefficients`, `results`.
//! - [`errors`]: [`GLMError`] / [`GLMResult`].
//!
//! Conventions
//! -----------
//! - Intercepts are not added here; prepend a column of ones (see
//!   `data::DataLoader::add_constant`) before building `GLMData`.
//! - Diagnostics are returned as `OptimOutcome` and mirrored to the `log`
//!   facade.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule; coefficient recovery on
//!   synthetic samples lives in `tests/integration_glm_pipeline.rs`.

pub mod data;
pub mod errors;
pub mod family;
pub mod model;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::GLMData;
pub use self::errors::{GLMError, GLMResult};
pub use self::family::{Bernoulli, Family, GLMFamily, Normal, Poisson};
pub use self::model::{BernoulliGLM, GLM, NormalGLM, PoissonGLM};

// ---- Optional convenience prelude for downstream crates -------------------
//
//     use rust_glm::glm::prelude::*;

pub mod prelude {
    pub use super::data::GLMData;
    pub use super::errors::{GLMError, GLMResult};
    pub use super::family::{Bernoulli, Family, GLMFamily, Normal, Poisson};
    pub use super::model::{BernoulliGLM, GLM, NormalGLM, PoissonGLM};
}
