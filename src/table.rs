//! Named-column price table
//!
//! Thin wrapper around a polars `DataFrame` so the binaries can pull
//! "high"/"low"/"close"-style columns out of real datasets. The indicator
//! functions themselves never touch this type; they are agnostic to where
//! their input slices come from, and tests construct series directly.

use polars::prelude::*;
use std::path::Path;

use crate::error::IndicatorError;

/// A table of named f64 columns backed by a polars `DataFrame`.
pub struct PriceTable {
    frame: DataFrame,
}

impl PriceTable {
    /// Wrap an existing DataFrame.
    pub fn new(frame: DataFrame) -> Self {
        PriceTable { frame }
    }

    /// Load a table from a parquet file.
    pub fn from_parquet(path: impl AsRef<Path>) -> PolarsResult<Self> {
        let frame = LazyFrame::scan_parquet(path.as_ref(), Default::default())?.collect()?;
        Ok(PriceTable { frame })
    }

    /// Fetch a column as an owned f64 sequence. Nulls come back as NaN.
    ///
    /// # Errors
    /// `ColumnNotFound` if the name is absent; `InvalidColumn` if the column
    /// cannot be cast to f64.
    pub fn get_column(&self, name: &str) -> Result<Vec<f64>, IndicatorError> {
        let column = self
            .frame
            .column(name)
            .map_err(|_| IndicatorError::ColumnNotFound {
                name: name.to_string(),
            })?;
        let column = column
            .cast(&DataType::Float64)
            .map_err(|_| IndicatorError::InvalidColumn {
                name: name.to_string(),
            })?;
        let values = column.f64().map_err(|_| IndicatorError::InvalidColumn {
            name: name.to_string(),
        })?;
        Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.frame.height()
    }
}
