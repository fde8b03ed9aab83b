//! Error type shared by loading, aggregation and rendering.
//!
//! Nothing here is recovered from: every variant travels up to the report
//! binary, which exits with the message.

use plotters::drawing::DrawingAreaErrorKind;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Error, Debug)]
pub enum ReportError {
    /// File system failure (missing CSV, unwritable output directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parse failure or a column that does not exist.
    #[error("data error: {0}")]
    Polars(#[from] PolarsError),

    /// A referenced column holds a null cell.
    #[error("column '{column}' has no value in row {row}")]
    MissingValue { column: String, row: usize },

    /// Two parallel inputs disagree in length.
    #[error("length mismatch: expected {expected} values, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// Nothing left to plot.
    #[error("empty dataset: {0}")]
    EmptyDataset(String),

    /// Values on a logarithmic axis must be strictly positive.
    #[error("value {0} cannot be placed on a logarithmic axis")]
    NonPositiveLog(f64),

    /// Failure reported by the drawing backend.
    #[error("render error: {0}")]
    Render(String),

    /// The in-memory frame did not match the figure dimensions.
    #[error("image buffer does not fit {width}x{height}")]
    Buffer { width: u32, height: u32 },
}

impl<E> From<DrawingAreaErrorKind<E>> for ReportError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        ReportError::Render(err.to_string())
    }
}
