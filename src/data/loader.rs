//! Format dispatch for uploaded files
//!
//! Picks a parser from the file extension, runs it, and repairs the header
//! row so every column has a distinct, non-blank name.

use crate::constants::UNNAMED_HEADER_PREFIX;
use crate::data::csv_parser::parse_csv_bytes;
use crate::data::error::{DataError, DataResult};
use crate::data::json_parser::parse_json_bytes;
use crate::data::spreadsheet::parse_spreadsheet_bytes;
use crate::perf::{Stage, StageTimer};
use crate::types::{DataColumn, DataTable};
use std::collections::HashSet;
use std::path::Path;

/// Supported upload formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Csv,
    Json,
    Xlsx,
    Xls,
}

impl FileFormat {
    /// Select a format from a file name's extension (case-insensitive)
    pub fn from_filename(filename: &str) -> DataResult<Self> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        Self::from_extension(extension)
    }

    pub fn from_extension(extension: &str) -> DataResult<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "csv" => Ok(FileFormat::Csv),
            "json" => Ok(FileFormat::Json),
            "xlsx" => Ok(FileFormat::Xlsx),
            "xls" => Ok(FileFormat::Xls),
            _ => Err(DataError::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Json => "json",
            FileFormat::Xlsx => "xlsx",
            FileFormat::Xls => "xls",
        }
    }
}

/// Parse raw file bytes of the given format into a table
pub fn load(bytes: &[u8], format: FileFormat) -> DataResult<DataTable> {
    let timer = StageTimer::start(Stage::Load);

    let table = match format {
        FileFormat::Csv => parse_csv_bytes(bytes)?,
        FileFormat::Json => parse_json_bytes(bytes)?,
        FileFormat::Xlsx | FileFormat::Xls => parse_spreadsheet_bytes(bytes)?,
    };
    let table = repair_headers(table)?;

    tracing::debug!(
        "Loaded {} with {} rows x {} cols in {:.2}ms",
        format.label(),
        table.row_count(),
        table.column_count(),
        timer.elapsed_ms()
    );

    Ok(table)
}

/// Name blank headers `Unnamed: <index>` and suffix repeats with `.1`, `.2`, ...
fn repair_headers(table: DataTable) -> DataResult<DataTable> {
    let mut seen: HashSet<String> = HashSet::new();
    let columns = table
        .into_columns()
        .into_iter()
        .enumerate()
        .map(|(idx, column)| {
            let base = if column.name.trim().is_empty() {
                format!("{}{}", UNNAMED_HEADER_PREFIX, idx)
            } else {
                column.name
            };

            let mut name = base.clone();
            let mut suffix = 1;
            while seen.contains(&name) {
                name = format!("{}.{}", base, suffix);
                suffix += 1;
            }
            seen.insert(name.clone());

            DataColumn::new(name, column.cells)
        })
        .collect();

    DataTable::new(columns)
}
