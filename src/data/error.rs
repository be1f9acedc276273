//! Error types for data operations
//!
//! Provides unified error handling for loading, normalizing, charting and
//! exporting uploaded tables.

use crate::data::chart_engine::RenderFailure;
use thiserror::Error;

/// Errors that can occur during data operations
#[derive(Error, Debug)]
pub enum DataError {
    /// File extension is not one of the supported formats
    #[error("Unsupported file format: {extension:?}")]
    UnsupportedFormat { extension: String },

    /// No candidate text encoding produced a usable table
    #[error("Could not decode file with any supported encoding")]
    Decode,

    /// Parsed content does not have a tabular shape
    #[error("Invalid data layout: {0}")]
    Schema(String),

    /// Structural parse error reported by the format reader
    #[error("{format} parse error: {message}")]
    Format {
        format: &'static str,
        message: String,
    },

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Upload exceeds the configured ceiling
    #[error("File too large: {size_mb}MB (max {max_mb}MB)")]
    TooLarge { size_mb: u64, max_mb: u64 },

    /// Columns of a table do not all have the same length
    #[error("Column {column:?} has {found} rows, expected {expected}")]
    RaggedColumns {
        column: String,
        expected: usize,
        found: usize,
    },

    /// No table has been uploaded yet
    #[error("No data uploaded")]
    NoData,

    /// Export selector is not csv or json
    #[error("Unsupported export format: {0:?}")]
    UnsupportedExport(String),

    /// The chart could not be produced. The reason stays out of the message.
    #[error("Unable to generate chart")]
    ChartUnavailable(RenderFailure),
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;

impl DataError {
    pub(crate) fn format(format: &'static str, message: impl ToString) -> Self {
        DataError::Format {
            format,
            message: message.to_string(),
        }
    }
}

impl From<polars::error::PolarsError> for DataError {
    fn from(err: polars::error::PolarsError) -> Self {
        DataError::format("CSV", err)
    }
}

impl From<calamine::Error> for DataError {
    fn from(err: calamine::Error) -> Self {
        DataError::format("Spreadsheet", err)
    }
}
