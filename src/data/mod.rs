//! data — tabular data sources feeding the GLM engine.
//!
//! Loaders read a headed numeric CSV table (from a file or from text in
//! memory), optionally prepend an intercept column, and hand the result to
//! the engine as a validated `GLMData`. Network access is left to the
//! caller: fetch the body, then use [`CsvTextLoader`].

pub mod errors;
pub mod loader;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{DataError, DataResult};
pub use self::loader::{CONSTANT_COLUMN, CsvLoader, CsvTextLoader, DataLoader, Table, parse_csv};

pub mod prelude {
    pub use super::errors::{DataError, DataResult};
    pub use super::loader::{CsvLoader, CsvTextLoader, DataLoader};
}
