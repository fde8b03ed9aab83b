//! CSV loading: a thin typed view over a polars frame.
//!
//! The column set is not validated when the file is read. A report asks for
//! the columns it needs and fails on the first one that is absent. Key columns
//! must be complete; blank or `nan` measurements are left out of the samples.

use std::path::Path;

use log::debug;
use polars::prelude::*;

use crate::utils::error::{ReportError, Result};

/// Rows of one results file, in file order.
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
}

impl Dataset {
    /// Reads a CSV file with a header row.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ReportError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )));
        }

        let frame = LazyCsvReader::new(path)
            .with_has_header(true)
            .finish()?
            .collect()?;

        debug!(
            "loaded {} rows x {} columns from {}",
            frame.height(),
            frame.width(),
            path.display()
        );
        Ok(Self { frame })
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Integer column, e.g. `Series`, `Nproc`, `Jobs`.
    pub fn ints(&self, name: &str) -> Result<Vec<i64>> {
        let column = self.frame.column(name)?.cast(&DataType::Int64)?;
        column
            .i64()?
            .into_iter()
            .enumerate()
            .map(|(row, value)| value.ok_or_else(|| missing(name, row)))
            .collect()
    }

    /// Float column, e.g. `Time`, `Best`.
    pub fn floats(&self, name: &str) -> Result<Vec<f64>> {
        let column = self.frame.column(name)?.cast(&DataType::Float64)?;
        column
            .f64()?
            .into_iter()
            .enumerate()
            .map(|(row, value)| value.ok_or_else(|| missing(name, row)))
            .collect()
    }

    /// Float column with blank and `nan` cells read as `None`.
    pub fn measurements(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let column = self.frame.column(name)?.cast(&DataType::Float64)?;
        Ok(column
            .f64()?
            .into_iter()
            .map(|value| value.filter(|v| !v.is_nan()))
            .collect())
    }

    /// Categorical column read as text, e.g. `Cooling`.
    pub fn labels(&self, name: &str) -> Result<Vec<String>> {
        let column = self.frame.column(name)?.cast(&DataType::String)?;
        column
            .str()?
            .into_iter()
            .enumerate()
            .map(|(row, value)| value.map(str::to_owned).ok_or_else(|| missing(name, row)))
            .collect()
    }

    /// Pairs an integer key column with a float value column, row by row.
    pub fn keyed(&self, key: &str, value: &str) -> Result<Vec<(i64, f64)>> {
        let keys = self.ints(key)?;
        let values = self.floats(value)?;
        Ok(keys.into_iter().zip(values).collect())
    }

    /// Like [`Dataset::keyed`], but rows without a measurement are dropped.
    /// A missing key is still an error.
    pub fn samples(&self, key: &str, value: &str) -> Result<Vec<(i64, f64)>> {
        let keys = self.ints(key)?;
        let values = self.measurements(value)?;
        Ok(keys
            .into_iter()
            .zip(values)
            .filter_map(|(key, value)| value.map(|v| (key, v)))
            .collect())
    }

    /// Appends (or replaces) a float column computed from existing ones.
    pub fn with_floats(&mut self, name: &str, values: Vec<f64>) -> Result<()> {
        if values.len() != self.height() {
            return Err(ReportError::LengthMismatch {
                expected: self.height(),
                found: values.len(),
            });
        }
        self.frame.with_column(Series::new(name.into(), values))?;
        Ok(())
    }
}

fn missing(column: &str, row: usize) -> ReportError {
    ReportError::MissingValue {
        column: column.to_string(),
        row,
    }
}
