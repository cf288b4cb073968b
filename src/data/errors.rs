//! Errors for the tabular data sources.
//!
//! [`DataError`] covers reading (I/O, CSV syntax, ragged rows), interpreting
//! (non-numeric fields, too few columns, empty tables) and using a loader
//! before `load_data` has succeeded ([`DataError::NotLoaded`]).
//!
//! ## Conventions
//! - `row` / `col` indices are 0-based over data rows (the header excluded).
//! - `line` numbers come from the CSV reader and are 1-based file lines.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::glm::errors::GLMError;

/// Result alias for data-source operations.
pub type DataResult<T> = Result<T, DataError>;

#[derive(Debug, Clone, PartialEq)]
pub enum DataError {
    // ---- Reading ----
    /// The source could not be opened.
    Io { path: String, text: String },

    /// The CSV reader rejected the input.
    Csv { text: String },

    /// A record has a different number of fields than the header.
    RaggedRow { line: Option<u64>, expected: usize, found: usize },

    // ---- Interpreting ----
    /// A field does not parse as `f64`.
    NonNumericField { row: usize, col: usize, field: String },

    /// Header present but no data rows.
    EmptyTable,

    /// Need at least one predictor column plus the response column.
    TooFewColumns { found: usize },

    /// Loaded table failed model-level validation.
    Validation(GLMError),

    // ---- Usage ----
    /// Accessor called before `load_data`.
    NotLoaded,
}

impl std::error::Error for DataError {}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::Io { path, text } => write!(f, "Could not open '{path}': {text}"),
            DataError::Csv { text } => write!(f, "CSV error: {text}"),
            DataError::RaggedRow { line, expected, found } => match line {
                Some(line) => write!(
                    f,
                    "Record on line {line} has {found} fields, expected {expected} (header width)"
                ),
                None => write!(f, "Record has {found} fields, expected {expected} (header width)"),
            },
            DataError::NonNumericField { row, col, field } => {
                write!(f, "Non-numeric field '{field}' at row {row}, column {col}")
            }
            DataError::EmptyTable => write!(f, "Table has a header but no data rows."),
            DataError::TooFewColumns { found } => write!(
                f,
                "Table has {found} column(s); need at least one predictor and a response."
            ),
            DataError::Validation(err) => write!(f, "Invalid table: {err}"),
            DataError::NotLoaded => {
                write!(f, "Data not loaded yet. Call `load_data()` first.")
            }
        }
    }
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> DataError {
        match err.kind() {
            csv::ErrorKind::UnequalLengths { pos, expected_len, len } => DataError::RaggedRow {
                line: pos.as_ref().map(|p| p.line()),
                expected: *expected_len as usize,
                found: *len as usize,
            },
            _ => DataError::Csv { text: err.to_string() },
        }
    }
}

impl From<GLMError> for DataError {
    fn from(err: GLMError) -> DataError {
        DataError::Validation(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<DataError> for PyErr {
    fn from(err: DataError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
