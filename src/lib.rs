//! rust_glm — generalized linear models by maximum likelihood, with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the GLM estimator to Python via the `_rust_glm` extension module.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules: `glm` (families, data, estimator),
//!   `data` (CSV loaders), and `optimization` (the quasi-Newton maximizer
//!   and numerical guards).
//! - With the `python-bindings` feature, define the `GLM` and
//!   `GLMOptimOutcome` Python classes and register them under the
//!   `rust_glm.glm` submodule.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue, input conversion, and error mapping.
//! - Errors from core code travel as [`glm::GLMError`] / [`data::DataError`]
//!   and become `ValueError` at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! ```no_run
//! use ndarray::array;
//! use rust_glm::glm::{GLMFamily, GLM};
//!
//! let x = array![[1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [2.0, 1.0]];
//! let y = array![3.0, 1.0, 4.2, 5.1];
//! let mut model = GLM::from_arrays(GLMFamily::Normal, x.clone(), y)?;
//! model.fit()?;
//! let fitted = model.predict(x.view())?;
//! # Ok::<(), rust_glm::glm::GLMError>(())
//! ```
//!
//! Testing notes
//! -------------
//! - Unit tests sit next to each module; end-to-end recovery checks live in
//!   `tests/integration_glm_pipeline.rs`.

pub mod data;
pub mod glm;
pub mod optimization;
pub mod utils;

#[cfg(feature = "python-bindings")]
use std::str::FromStr;

// Results cross as `Vec`s: `numpy` may be built against a different
// `ndarray` release than this crate.
#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    glm::{errors::GLMError, family::Family, family::GLMFamily, model::GLM},
    optimization::loglik_optimizer::OptimOutcome,
    utils::{build_glm_model, extract_f64_matrix},
};

/// GLM — Python-facing wrapper for `GLM<GLMFamily>`.
///
/// Constructed from Python via `GLM(x, y, family="normal", ...)` or the
/// `GLM.normal`, `GLM.bernoulli` and `GLM.poisson` factories. `x` is a 2-D
/// design (intercept column included by the caller), `y` a 1-D response of
/// matching length. Optimizer keywords map onto `MLEOptions`; `timeout` is
/// in seconds.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "GLM", module = "rust_glm.glm")]
pub struct PyGLM {
    pub inner: GLM<GLMFamily>,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyGLM {
    #[new]
    #[pyo3(
        signature = (
            x,
            y,
            family = "normal",
            tol_grad = None,
            tol_cost = None,
            max_iter = None,
            method = None,
            line_searcher = None,
            lbfgs_mem = None,
            timeout = None,
            verbose = false,
        ),
        text_signature = "(x, y, /, family='normal', tol_grad=None, tol_cost=None, \
                          max_iter=None, method=None, line_searcher=None, lbfgs_mem=None, \
                          timeout=None, verbose=False)"
    )]
    #[allow(clippy::too_many_arguments)]
    pub fn new<'py>(
        py: Python<'py>, x: &Bound<'py, PyAny>, y: &Bound<'py, PyAny>, family: &str,
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
        method: Option<&str>, line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
        timeout: Option<f64>, verbose: bool,
    ) -> PyResult<Self> {
        let family = GLMFamily::from_str(family)?;
        let inner = build_glm_model(
            py,
            x,
            y,
            family,
            tol_grad,
            tol_cost,
            max_iter,
            method,
            line_searcher,
            lbfgs_mem,
            timeout,
            verbose,
        )?;
        Ok(PyGLM { inner })
    }

    #[staticmethod]
    #[pyo3(signature = (x, y, tol_grad = None, tol_cost = None, max_iter = None))]
    pub fn normal<'py>(
        py: Python<'py>, x: &Bound<'py, PyAny>, y: &Bound<'py, PyAny>, tol_grad: Option<f64>,
        tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> PyResult<Self> {
        Self::with_family(py, x, y, GLMFamily::Normal, tol_grad, tol_cost, max_iter)
    }

    #[staticmethod]
    #[pyo3(signature = (x, y, tol_grad = None, tol_cost = None, max_iter = None))]
    pub fn bernoulli<'py>(
        py: Python<'py>, x: &Bound<'py, PyAny>, y: &Bound<'py, PyAny>, tol_grad: Option<f64>,
        tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> PyResult<Self> {
        Self::with_family(py, x, y, GLMFamily::Bernoulli, tol_grad, tol_cost, max_iter)
    }

    #[staticmethod]
    #[pyo3(signature = (x, y, tol_grad = None, tol_cost = None, max_iter = None))]
    pub fn poisson<'py>(
        py: Python<'py>, x: &Bound<'py, PyAny>, y: &Bound<'py, PyAny>, tol_grad: Option<f64>,
        tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> PyResult<Self> {
        Self::with_family(py, x, y, GLMFamily::Poisson, tol_grad, tol_cost, max_iter)
    }

    /// Fit by maximum likelihood and return the optimizer diagnostics.
    ///
    /// The GIL is released while the optimizer runs.
    pub fn fit(&mut self, py: Python<'_>) -> PyResult<GLMOptimOutcome> {
        let inner = &mut self.inner;
        let outcome = py.allow_threads(|| inner.fit().cloned())?;
        Ok(GLMOptimOutcome { inner: outcome })
    }

    /// Response-scale predictions for a new design.
    #[pyo3(text_signature = "(self, x_new, /)")]
    pub fn predict<'py>(
        &self, py: Python<'py>, x_new: &Bound<'py, PyAny>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let x_new = extract_f64_matrix(x_new)?;
        let mu = self.inner.predict(x_new.view())?;
        Ok(mu.to_vec().into_pyarray(py))
    }

    /// Linear predictor `X_new · β̂`.
    #[pyo3(text_signature = "(self, x_new, /)")]
    pub fn linear_predictor<'py>(
        &self, py: Python<'py>, x_new: &Bound<'py, PyAny>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let x_new = extract_f64_matrix(x_new)?;
        let eta = self.inner.linear_predictor(x_new.view())?;
        Ok(eta.to_vec().into_pyarray(py))
    }

    #[getter]
    pub fn coefficients(&self) -> PyResult<Vec<f64>> {
        Ok(self.inner.coefficients()?.to_vec())
    }

    #[getter]
    pub fn results(&self) -> PyResult<GLMOptimOutcome> {
        match self.inner.results() {
            Some(outcome) => Ok(GLMOptimOutcome { inner: outcome.clone() }),
            None => Err(GLMError::ModelNotFitted.into()),
        }
    }

    #[getter]
    pub fn family(&self) -> &'static str {
        self.inner.family.name()
    }

    #[getter]
    pub fn is_fitted(&self) -> bool {
        self.inner.is_fitted()
    }

    fn __repr__(&self) -> String {
        format!(
            "GLM(family='{}', n_obs={}, n_predictors={}, fitted={})",
            self.inner.family.name(),
            self.inner.data().n_obs(),
            self.inner.data().n_predictors(),
            self.inner.is_fitted()
        )
    }
}

#[cfg(feature = "python-bindings")]
impl PyGLM {
    fn with_family<'py>(
        py: Python<'py>, x: &Bound<'py, PyAny>, y: &Bound<'py, PyAny>, family: GLMFamily,
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> PyResult<Self> {
        let inner = build_glm_model(
            py, x, y, family, tol_grad, tol_cost, max_iter, None, None, None, None, false,
        )?;
        Ok(PyGLM { inner })
    }
}

/// GLMOptimOutcome — read-only optimizer diagnostics of a GLM fit.
///
/// Instances come from `GLM.fit()` and the `GLM.results` getter; they are
/// never built by user code. Accessors copy into Python-owned values.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_glm.glm")]
pub struct GLMOptimOutcome {
    pub inner: OptimOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl GLMOptimOutcome {
    #[getter]
    pub fn theta_hat(&self) -> Vec<f64> {
        self.inner.theta_hat.to_vec()
    }

    #[getter]
    pub fn value(&self) -> f64 {
        self.inner.value
    }

    #[getter]
    pub fn converged(&self) -> bool {
        self.inner.converged
    }

    #[getter]
    pub fn status(&self) -> String {
        self.inner.status.clone()
    }

    #[getter]
    pub fn iterations(&self) -> usize {
        self.inner.iterations
    }

    #[getter]
    pub fn grad_norm(&self) -> Option<f64> {
        self.inner.grad_norm
    }

    #[getter]
    pub fn fn_evals(&self) -> Vec<(String, u64)> {
        self.inner.fn_evals.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }
}

/// _rust_glm — PyO3 module initializer for the Python extension.
///
/// Creates the `glm` submodule, attaches it to `_rust_glm`, and registers it
/// in `sys.modules` as `rust_glm.glm` so dotted imports work.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_glm<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let glm_mod = PyModule::new(_py, "glm")?;
    glm_models(_py, m, &glm_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("rust_glm.glm", glm_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn glm_models<'py>(
    _py: Python, rust_glm: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<PyGLM>()?;
    m.add_class::<GLMOptimOutcome>()?;
    rust_glm.add_submodule(m)?;
    Ok(())
}
