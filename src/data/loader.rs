//! data::loader — CSV-backed data sources for GLM fitting.
//!
//! Purpose
//! -------
//! Turn a numeric CSV table into a design matrix and a response vector.
//! Every loader follows the same table convention: the first row is a
//! header, every column but the last is a predictor, the last column is the
//! response, and every field parses as `f64`.
//!
//! Key behaviors
//! -------------
//! - [`DataLoader`]: shared accessors (`x`, `y`, `x_transpose`, `headers`),
//!   intercept augmentation (`add_constant`) and hand-off to the engine
//!   (`glm_data`). All of them return [`DataError::NotLoaded`] until
//!   `load_data` has succeeded.
//! - [`CsvLoader`]: reads a file path.
//! - [`CsvTextLoader`]: reads CSV text already in memory, e.g. a response
//!   body the caller fetched over HTTP.
//!
//! Conventions
//! -----------
//! - `add_constant` prepends a column of ones named `const`.
//! - A failed `load_data` leaves the loader in its previous state.
//!
//! Testing notes
//! -------------
//! - Unit tests parse in-memory tables and cover each rejection path;
//!   the file-backed loader is exercised through a temporary file.
use std::{fs::File, io::Read, path::PathBuf};

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, concatenate};

use crate::{
    data::errors::{DataError, DataResult},
    glm::data::GLMData,
};

/// Header name given to the intercept column.
pub const CONSTANT_COLUMN: &str = "const";

/// A parsed numeric table split into predictors and response.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub x: Array2<f64>,
    pub y: Array1<f64>,
}

/// Common interface of all data sources.
///
/// Implementors provide `load_data` and access to their loaded [`Table`];
/// everything else is derived.
pub trait DataLoader {
    /// Read and parse the source, replacing any previously loaded table.
    ///
    /// # Errors
    /// Any [`DataError`] raised while reading or parsing.
    fn load_data(&mut self) -> DataResult<()>;

    fn table(&self) -> Option<&Table>;

    fn table_mut(&mut self) -> Option<&mut Table>;

    fn is_loaded(&self) -> bool {
        self.table().is_some()
    }

    /// Prepend an intercept column of ones to the design matrix.
    ///
    /// # Errors
    /// [`DataError::NotLoaded`] before `load_data`.
    fn add_constant(&mut self) -> DataResult<()> {
        let table = self.table_mut().ok_or(DataError::NotLoaded)?;
        let ones = Array2::<f64>::ones((table.x.nrows(), 1));
        table.x = concatenate(Axis(1), &[ones.view(), table.x.view()])
            .map_err(|e| DataError::Csv { text: e.to_string() })?;
        table.headers.insert(0, CONSTANT_COLUMN.to_string());
        Ok(())
    }

    /// Design matrix `X` (`n × p`).
    fn x(&self) -> DataResult<ArrayView2<'_, f64>> {
        self.table().map(|t| t.x.view()).ok_or(DataError::NotLoaded)
    }

    /// Response vector `y` (`n`).
    fn y(&self) -> DataResult<ArrayView1<'_, f64>> {
        self.table().map(|t| t.y.view()).ok_or(DataError::NotLoaded)
    }

    /// `Xᵀ` (`p × n`), as a view.
    fn x_transpose(&self) -> DataResult<ArrayView2<'_, f64>> {
        Ok(self.x()?.reversed_axes())
    }

    /// Column names, predictors first and the response last.
    fn headers(&self) -> DataResult<&[String]> {
        self.table().map(|t| t.headers.as_slice()).ok_or(DataError::NotLoaded)
    }

    /// Copy the loaded table into a validated [`GLMData`].
    ///
    /// # Errors
    /// - [`DataError::NotLoaded`] before `load_data`.
    /// - [`DataError::Validation`] if the table fails `GLMData` checks
    ///   (e.g. non-finite values such as `inf` in the file).
    fn glm_data(&self) -> DataResult<GLMData> {
        let table = self.table().ok_or(DataError::NotLoaded)?;
        Ok(GLMData::new(table.x.clone(), table.y.clone())?)
    }
}

/// Loads a local CSV file.
#[derive(Debug, Clone)]
pub struct CsvLoader {
    pub path: PathBuf,
    table: Option<Table>,
}

impl CsvLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), table: None }
    }
}

impl DataLoader for CsvLoader {
    fn load_data(&mut self) -> DataResult<()> {
        let file = File::open(&self.path).map_err(|e| DataError::Io {
            path: self.path.display().to_string(),
            text: e.to_string(),
        })?;
        let table = parse_csv(file)?;
        log::info!(
            "Loaded local CSV file {}: {} rows, {} predictors",
            self.path.display(),
            table.x.nrows(),
            table.x.ncols()
        );
        self.table = Some(table);
        Ok(())
    }

    fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    fn table_mut(&mut self) -> Option<&mut Table> {
        self.table.as_mut()
    }
}

/// Loads CSV text held in memory.
#[derive(Debug, Clone)]
pub struct CsvTextLoader {
    pub text: String,
    table: Option<Table>,
}

impl CsvTextLoader {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), table: None }
    }
}

impl DataLoader for CsvTextLoader {
    fn load_data(&mut self) -> DataResult<()> {
        let table = parse_csv(self.text.as_bytes())?;
        log::info!(
            "Loaded CSV text: {} rows, {} predictors",
            table.x.nrows(),
            table.x.ncols()
        );
        self.table = Some(table);
        Ok(())
    }

    fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    fn table_mut(&mut self) -> Option<&mut Table> {
        self.table.as_mut()
    }
}

/// Parse a headed numeric CSV table from any reader.
///
/// Leading/trailing whitespace around fields is ignored.
///
/// # Errors
/// - [`DataError::TooFewColumns`] for fewer than two header columns.
/// - [`DataError::RaggedRow`] / [`DataError::Csv`] from the CSV reader.
/// - [`DataError::NonNumericField`] for the first field not parsing as `f64`.
/// - [`DataError::EmptyTable`] when there are no data rows.
pub fn parse_csv<R: Read>(reader: R) -> DataResult<Table> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    let n_cols = headers.len();
    if n_cols < 2 {
        return Err(DataError::TooFewColumns { found: n_cols });
    }

    let mut values = Vec::new();
    let mut n_rows = 0usize;
    for result in rdr.records() {
        let record = result?;
        for (col, field) in record.iter().enumerate() {
            let value = field.parse::<f64>().map_err(|_| DataError::NonNumericField {
                row: n_rows,
                col,
                field: field.to_string(),
            })?;
            values.push(value);
        }
        n_rows += 1;
    }
    if n_rows == 0 {
        return Err(DataError::EmptyTable);
    }

    let full = Array2::from_shape_vec((n_rows, n_cols), values)
        .map_err(|e| DataError::Csv { text: e.to_string() })?;
    let x = full.slice(ndarray::s![.., ..n_cols - 1]).to_owned();
    let y = full.column(n_cols - 1).to_owned();
    Ok(Table { headers, x, y })
}
