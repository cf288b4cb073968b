//! glm::data — validated design matrix and response vector.
//!
//! [`GLMData`] is the only way observations enter a model. Construction
//! checks that the table is non-empty, has at least one predictor, contains
//! only finite values and that `x` and `y` agree on the number of rows. The
//! response domain (binary, counts) is deliberately left to the family.
//! Fields are private so a model's data cannot change after construction.
use ndarray::{Array1, Array2};

use crate::glm::errors::{GLMError, GLMResult};

/// Design matrix `x` (`n × p`) and response `y` (`n`).
#[derive(Debug, Clone, PartialEq)]
pub struct GLMData {
    x: Array2<f64>,
    y: Array1<f64>,
}

impl GLMData {
    /// Validate and wrap a design matrix and response vector.
    ///
    /// # Errors
    /// - [`GLMError::EmptyDesign`] / [`GLMError::NoPredictors`] for an empty
    ///   design matrix.
    /// - [`GLMError::ResponseLengthMismatch`] when `y.len() != x.nrows()`.
    /// - [`GLMError::NonFiniteDesign`] / [`GLMError::NonFiniteResponse`] for
    ///   the first NaN/±inf found.
    pub fn new(x: Array2<f64>, y: Array1<f64>) -> GLMResult<Self> {
        if x.nrows() == 0 {
            return Err(GLMError::EmptyDesign);
        }
        if x.ncols() == 0 {
            return Err(GLMError::NoPredictors);
        }
        if y.len() != x.nrows() {
            return Err(GLMError::ResponseLengthMismatch { rows: x.nrows(), len: y.len() });
        }
        if let Some(((row, col), &value)) = x.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(GLMError::NonFiniteDesign { row, col, value });
        }
        if let Some((index, &value)) = y.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(GLMError::NonFiniteResponse { index, value });
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    pub fn y(&self) -> &Array1<f64> {
        &self.y
    }

    /// Number of observations `n`.
    pub fn n_obs(&self) -> usize {
        self.x.nrows()
    }

    /// Number of predictors `p` (coefficient length).
    pub fn n_predictors(&self) -> usize {
        self.x.ncols()
    }
}
