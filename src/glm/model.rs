//! glm::model — generic GLM estimator over a [`Family`].
//!
//! Purpose
//! -------
//! Implement the fit/predict algorithm shared by every family: build the
//! linear predictor `η = Xβ`, evaluate the family's negative log-likelihood,
//! maximize `ℓ(β)` from `β₀ = 0` with the quasi-Newton optimizer, and map
//! new linear predictors through the family's link.
//!
//! Key behaviors
//! -------------
//! - [`GLM`] implements [`LogLikelihood`] with `Data = GLMData`, so fitting
//!   is a single call to [`maximize`]. No analytic gradient is supplied;
//!   the optimizer differentiates numerically.
//! - [`GLM::fit`] commits θ̂ even when the optimizer stops without meeting a
//!   tolerance. The returned [`OptimOutcome`] carries `converged`, `status`
//!   and `iterations`, and a `log::warn!` record is emitted.
//! - [`GLM::predict`] and [`GLM::coefficients`] fail with
//!   [`GLMError::ModelNotFitted`] until `fit` has succeeded.
//!
//! Invariants & assumptions
//! ------------------------
//! - `results` is `None` (Unfitted) or the outcome of the most recent
//!   successful `fit` (Fitted). A failed `fit` leaves the previous state
//!   untouched. Re-fitting always restarts from zeros.
//! - Coefficient length equals `data.n_predictors()`; `X_new` must have
//!   that many columns.
//!
//! Downstream usage
//! ----------------
//! - Rust callers use the aliases [`NormalGLM`], [`BernoulliGLM`] and
//!   [`PoissonGLM`]; the Python bindings use `GLM<GLMFamily>`.
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::{
    glm::{
        data::GLMData,
        errors::{GLMError, GLMResult},
        family::{Bernoulli, Family, Normal, Poisson},
    },
    optimization::{
        errors::OptResult,
        loglik_optimizer::{
            LogLikelihood, MLEOptions, OptimOutcome, Theta, maximize, validation::validate_theta,
        },
    },
};

/// GLM with a fixed family, owned data and optimizer options.
#[derive(Debug, Clone)]
pub struct GLM<F: Family> {
    pub family: F,
    pub options: MLEOptions,
    data: GLMData,
    results: Option<OptimOutcome>,
}

/// Gaussian response with identity link.
pub type NormalGLM = GLM<Normal>;

/// Binary response with logistic link.
pub type BernoulliGLM = GLM<Bernoulli>;

/// Count response with exponential link.
pub type PoissonGLM = GLM<Poisson>;

impl<F: Family> GLM<F> {
    /// Create an unfitted model.
    pub fn new(family: F, data: GLMData, options: MLEOptions) -> Self {
        Self { family, options, data, results: None }
    }

    /// Validate `x`/`y` and create an unfitted model with default options.
    ///
    /// # Errors
    /// Any validation error from [`GLMData::new`].
    pub fn from_arrays(family: F, x: Array2<f64>, y: Array1<f64>) -> GLMResult<Self> {
        Ok(Self::new(family, GLMData::new(x, y)?, MLEOptions::default()))
    }

    pub fn data(&self) -> &GLMData {
        &self.data
    }

    /// Apply the family's link elementwise.
    pub fn link_function(&self, eta: ArrayView1<f64>) -> Array1<f64> {
        eta.mapv(|e| self.family.link_function(e))
    }

    /// Negative log-likelihood of the training data at `params`.
    ///
    /// # Errors
    /// - [`GLMError::DimensionMismatch`] if `params.len() != p`.
    /// - [`GLMError::InvalidDistributionParam`] from the family.
    pub fn negative_log_likelihood(&self, params: &Theta) -> GLMResult<f64> {
        nll_at(&self.family, &self.data, params)
    }

    /// Fit the coefficients by maximum likelihood, starting from zeros.
    ///
    /// On success the outcome is stored (replacing any previous fit) and a
    /// reference to it is returned.
    ///
    /// # Errors
    /// [`GLMError::OptimizationFailed`] (or a more specific variant) when the
    /// optimizer errors out. Failing to converge within `max_iter` is not an
    /// error.
    pub fn fit(&mut self) -> GLMResult<&OptimOutcome> {
        let theta0 = Theta::zeros(self.data.n_predictors());
        let outcome = maximize(&*self, theta0, &self.data, &self.options)?;
        log::info!(
            "{} GLM fitted: coefficients = {}, loglik = {:.6}, iterations = {}",
            self.family.name(),
            outcome.theta_hat,
            outcome.value,
            outcome.iterations
        );
        if !outcome.converged {
            log::warn!(
                "{} GLM optimizer stopped without converging (status: {}); \
                 keeping the last iterate",
                self.family.name(),
                outcome.status
            );
        }
        Ok(self.results.insert(outcome))
    }

    /// Linear predictor `X_new · β̂`.
    ///
    /// # Errors
    /// - [`GLMError::ModelNotFitted`] before `fit`.
    /// - [`GLMError::DimensionMismatch`] if `x_new.ncols() != p`.
    pub fn linear_predictor(&self, x_new: ArrayView2<f64>) -> GLMResult<Array1<f64>> {
        let beta = self.coefficients()?;
        if x_new.ncols() != beta.len() {
            return Err(GLMError::DimensionMismatch { expected: beta.len(), found: x_new.ncols() });
        }
        Ok(x_new.dot(beta))
    }

    /// Response-scale predictions `g⁻¹(X_new · β̂)`.
    ///
    /// # Errors
    /// Same as [`GLM::linear_predictor`].
    pub fn predict(&self, x_new: ArrayView2<f64>) -> GLMResult<Array1<f64>> {
        let eta = self.linear_predictor(x_new)?;
        Ok(self.link_function(eta.view()))
    }

    /// Fitted coefficient vector β̂.
    ///
    /// # Errors
    /// [`GLMError::ModelNotFitted`] before `fit`.
    pub fn coefficients(&self) -> GLMResult<&Theta> {
        self.results.as_ref().map(|r| &r.theta_hat).ok_or(GLMError::ModelNotFitted)
    }

    /// Diagnostics of the most recent fit.
    pub fn results(&self) -> Option<&OptimOutcome> {
        self.results.as_ref()
    }

    pub fn is_fitted(&self) -> bool {
        self.results.is_some()
    }
}

impl<F: Family> LogLikelihood for GLM<F> {
    type Data = GLMData;

    fn value(&self, theta: &Theta, data: &GLMData) -> OptResult<f64> {
        Ok(-nll_at(&self.family, data, theta)?)
    }

    fn check(&self, theta: &Theta, data: &GLMData) -> OptResult<()> {
        validate_theta(theta, data.n_predictors())
    }
}

// ---- Helper Methods ----

fn nll_at<F: Family>(family: &F, data: &GLMData, params: &Theta) -> GLMResult<f64> {
    if params.len() != data.n_predictors() {
        return Err(GLMError::DimensionMismatch {
            expected: data.n_predictors(),
            found: params.len(),
        });
    }
    let eta = data.x().dot(params);
    family.negative_log_likelihood(data.y().view(), eta.view())
}
