//! utils — Python-side extraction helpers for the PyO3 bindings.
//!
//! Converts array-likes (NumPy arrays, pandas objects, nested sequences)
//! into `ndarray` containers and keyword arguments into validated
//! optimizer options. Everything here is compiled only with the
//! `python-bindings` feature.
#[cfg(feature = "python-bindings")]
use std::{str::FromStr, time::Duration};

#[cfg(feature = "python-bindings")]
use ndarray::{Array1, Array2};

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::PyAny,
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1, PyReadonlyArray2,
};

#[cfg(feature = "python-bindings")]
use crate::{
    glm::{data::GLMData, errors::GLMError, family::GLMFamily, model::GLM},
    optimization::loglik_optimizer::{
        DEFAULT_MAX_ITER, DEFAULT_TOL_COST, DEFAULT_TOL_GRAD, LineSearcher, MLEOptions,
        QuasiNewton, Tolerances,
    },
};

/// Extract a 1-D `float64` array from an ndarray, a pandas Series or any
/// sequence of floats.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Extract a 2-D `float64` matrix from an ndarray, a pandas DataFrame or a
/// sequence of equally long float sequences.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_matrix(raw_data: &Bound<'_, PyAny>) -> PyResult<Array2<f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray2<f64>>() {
        return readonly_to_array2(&arr_ro);
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (), None) {
        if let Ok(frame_ro) = obj.extract::<PyReadonlyArray2<f64>>() {
            return readonly_to_array2(&frame_ro);
        }
    }

    let rows: Vec<Vec<f64>> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err(
            "expected a 2-D numpy.ndarray, pandas.DataFrame, or sequence of float64 rows",
        )
    })?;
    let n_cols = rows.first().map_or(0, Vec::len);
    if let Some(i) = rows.iter().position(|r| r.len() != n_cols) {
        return Err(PyValueError::new_err(format!(
            "row {i} has {} values, expected {n_cols}",
            rows[i].len()
        )));
    }
    let n_rows = rows.len();
    Array2::from_shape_vec((n_rows, n_cols), rows.into_iter().flatten().collect())
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Copy a NumPy matrix, in logical row-major order, into the crate's own
/// `Array2`.
///
/// `numpy` may link a different `ndarray` release than this crate, so only
/// the shape and a flat `Vec` cross over.
#[cfg(feature = "python-bindings")]
fn readonly_to_array2(arr_ro: &PyReadonlyArray2<'_, f64>) -> PyResult<Array2<f64>> {
    let view = arr_ro.as_array();
    let (n_rows, n_cols) = view.dim();
    Array2::from_shape_vec((n_rows, n_cols), view.iter().copied().collect())
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Build a `GLM<GLMFamily>` from Python arguments.
#[cfg(feature = "python-bindings")]
#[allow(clippy::too_many_arguments)]
pub fn build_glm_model<'py>(
    py: Python<'py>, x: &Bound<'py, PyAny>, y: &Bound<'py, PyAny>, family: GLMFamily,
    tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>, method: Option<&str>,
    line_searcher: Option<&str>, lbfgs_mem: Option<usize>, timeout: Option<f64>, verbose: bool,
) -> PyResult<GLM<GLMFamily>> {
    let x = extract_f64_matrix(x)?;
    let y_arr = extract_f64_array(py, y)?;
    let y = Array1::from(y_arr.as_slice()?.to_vec());
    let data = GLMData::new(x, y)?;

    let opts = extract_mle_opts(
        tol_grad,
        tol_cost,
        max_iter,
        method,
        line_searcher,
        lbfgs_mem,
        timeout,
        verbose,
    )?;

    Ok(GLM::new(family, data, opts))
}

#[cfg(feature = "python-bindings")]
#[allow(clippy::too_many_arguments)]
fn extract_mle_opts(
    tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>, method: Option<&str>,
    line_searcher: Option<&str>, lbfgs_mem: Option<usize>, timeout: Option<f64>, verbose: bool,
) -> PyResult<MLEOptions> {
    // OptResult<_> -> GLMError -> PyErr
    let tols = Tolerances::new(
        Some(tol_grad.unwrap_or(DEFAULT_TOL_GRAD)),
        Some(tol_cost.unwrap_or(DEFAULT_TOL_COST)),
        Some(max_iter.unwrap_or(DEFAULT_MAX_ITER)),
    )
    .map_err(GLMError::from)?;

    let method = match method {
        Some(name) => QuasiNewton::from_str(name).map_err(GLMError::from)?,
        None => QuasiNewton::Bfgs,
    };

    let ls = match line_searcher {
        Some(name) => LineSearcher::from_str(name).map_err(GLMError::from)?,
        None => LineSearcher::MoreThuente,
    };

    let timeout = match timeout {
        Some(secs) if secs.is_finite() && secs > 0.0 => Some(Duration::from_secs_f64(secs)),
        Some(secs) => {
            return Err(PyValueError::new_err(format!(
                "timeout must be a positive number of seconds, got {secs}"
            )));
        }
        None => None,
    };

    let opts = MLEOptions::new(tols, method, ls, lbfgs_mem, timeout, verbose)
        .map_err(GLMError::from)?;

    Ok(opts)
}
