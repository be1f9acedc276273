//! Table export
//!
//! Serializes the current table back to CSV or JSON bytes for download.

use crate::constants::{EXPORT_CSV_FILENAME, EXPORT_JSON_FILENAME};
use crate::data::csv_parser::write_csv_content;
use crate::data::error::{DataError, DataResult};
use crate::data::json_parser::write_json_content;
use crate::types::{ChartConfig, DataTable};
use std::str::FromStr;

/// Download formats offered by the export boundary
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn filename(&self) -> &'static str {
        match self {
            ExportFormat::Csv => EXPORT_CSV_FILENAME,
            ExportFormat::Json => EXPORT_JSON_FILENAME,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }

    /// Serialize a table in this format
    pub fn export(&self, table: &DataTable) -> Vec<u8> {
        match self {
            ExportFormat::Csv => to_csv(table),
            ExportFormat::Json => to_json(table),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = DataError;

    fn from_str(selector: &str) -> DataResult<Self> {
        match selector {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(DataError::UnsupportedExport(other.to_string())),
        }
    }
}

/// CSV bytes: header row, no index column
pub fn to_csv(table: &DataTable) -> Vec<u8> {
    write_csv_content(table).into_bytes()
}

/// JSON bytes: array of row objects, 2-space indent
pub fn to_json(table: &DataTable) -> Vec<u8> {
    write_json_content(table).into_bytes()
}

/// Pretty-printed chart configuration, for saving a chart setup alongside its data
pub fn chart_config_to_json(config: &ChartConfig) -> Vec<u8> {
    serde_json::to_vec_pretty(config).unwrap_or_else(|_| b"{}".to_vec())
}
