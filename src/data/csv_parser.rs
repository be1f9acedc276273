//! CSV parsing and writing
//!
//! Uploaded bytes are decoded with each candidate encoding in turn and the
//! text is handed to polars for parsing and schema inference. Inference scans
//! every row, and the common missing-value tokens (`NA`, `null`, `NaN`, ...)
//! read as missing. The writer side produces the comma-separated text used by
//! the exporter.

use crate::constants::CSV_NULL_TOKENS;
use crate::data::encoding::CANDIDATE_ENCODINGS;
use crate::data::error::{DataError, DataResult};
use crate::types::{DataCell, DataColumn, DataTable};
use polars::prelude::*;
use std::io::Cursor;

/// Parse raw CSV bytes into a table.
///
/// Encodings are tried in order. An encoding is accepted once it decodes
/// cleanly and yields at least one column. A structural parse error from
/// polars stops the search immediately.
pub fn parse_csv_bytes(bytes: &[u8]) -> DataResult<DataTable> {
    for encoding in CANDIDATE_ENCODINGS {
        let Some(text) = encoding.decode(bytes) else {
            tracing::debug!("CSV is not valid {}", encoding.label());
            continue;
        };
        if text.trim().is_empty() {
            continue;
        }

        let table = parse_csv_content(&text)?;
        if table.column_count() == 0 {
            continue;
        }

        tracing::debug!("Decoded CSV as {}", encoding.label());
        return Ok(table);
    }

    Err(DataError::Decode)
}

/// Parse already-decoded CSV text with a header row.
///
/// Column names are the header cells exactly as written; blank and repeated
/// names are left for the loader to repair.
pub fn parse_csv_content(content: &str) -> DataResult<DataTable> {
    let null_values = NullValues::AllColumns(CSV_NULL_TOKENS.iter().map(|t| (*t).into()).collect());
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(CsvParseOptions::default().with_null_values(Some(null_values)))
        .into_reader_with_file_handle(Cursor::new(content.as_bytes().to_vec()))
        .finish()?;

    let mut headers = read_header_row(content)?;
    if headers.len() != df.width() {
        tracing::debug!(
            "Header row has {} fields but {} columns were parsed",
            headers.len(),
            df.width()
        );
        headers = df.get_column_names().iter().map(|n| n.to_string()).collect();
    }

    let height = df.height();
    let columns = df
        .get_columns()
        .iter()
        .zip(headers)
        .map(|(column, name)| {
            let cells = (0..height)
                .map(|row_idx| polars_value_to_cell(column, row_idx))
                .collect();
            DataColumn::new(name, cells)
        })
        .collect();

    DataTable::new(columns)
}

/// The raw header cells. polars renames blank and repeated headers
/// (`column_3`, `a_duplicated_0`), so the first record is read again as data.
fn read_header_row(content: &str) -> DataResult<Vec<String>> {
    let df = CsvReadOptions::default()
        .with_has_header(false)
        .with_n_rows(Some(1))
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(content.as_bytes().to_vec()))
        .finish()?;

    let headers = df
        .get_columns()
        .iter()
        .map(|column| match column.get(0) {
            Ok(AnyValue::String(s)) => s.to_string(),
            Ok(AnyValue::StringOwned(s)) => s.to_string(),
            _ => String::new(),
        })
        .collect();

    Ok(headers)
}

/// Convert a polars cell value to DataCell
fn polars_value_to_cell(column: &Column, row_idx: usize) -> DataCell {
    if let Ok(val) = column.get(row_idx) {
        match val {
            AnyValue::Null => DataCell::Empty,
            AnyValue::Int8(v) => DataCell::Int(v as i64),
            AnyValue::Int16(v) => DataCell::Int(v as i64),
            AnyValue::Int32(v) => DataCell::Int(v as i64),
            AnyValue::Int64(v) => DataCell::Int(v),
            AnyValue::UInt8(v) => DataCell::Int(v as i64),
            AnyValue::UInt16(v) => DataCell::Int(v as i64),
            AnyValue::UInt32(v) => DataCell::Int(v as i64),
            AnyValue::UInt64(v) => match i64::try_from(v) {
                Ok(n) => DataCell::Int(n),
                Err(_) => DataCell::Float(v as f64),
            },
            AnyValue::Float32(v) => DataCell::Float(v as f64),
            AnyValue::Float64(v) => DataCell::Float(v),
            AnyValue::Boolean(v) => DataCell::Boolean(v),
            AnyValue::String(s) => text_cell(s),
            AnyValue::StringOwned(s) => {
                let s_str: &str = &s;
                text_cell(s_str)
            }
            _ => DataCell::Text(format!("{}", val)),
        }
    } else {
        DataCell::Empty
    }
}

fn text_cell(s: &str) -> DataCell {
    if s.is_empty() {
        DataCell::Empty
    } else {
        DataCell::Text(s.to_string())
    }
}

/// Convert a table to CSV text: header row, one line per row, no index column
pub fn write_csv_content(table: &DataTable) -> String {
    let mut out = String::new();

    let headers: Vec<String> = table
        .columns()
        .iter()
        .map(|col| quote_csv_field(&col.name))
        .collect();
    out.push_str(&headers.join(","));
    out.push('\n');

    for row_idx in 0..table.row_count() {
        let cells: Vec<String> = table
            .row(row_idx)
            .map(|(_, cell)| quote_csv_field(&cell.to_string()))
            .collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }

    out
}

/// Quote a CSV field if necessary (contains commas, quotes, or newlines)
fn quote_csv_field(value: &str) -> String {
    let needs_quoting = value.contains(',')
        || value.contains('"')
        || value.contains('\n')
        || value.contains('\r');

    if needs_quoting {
        // Escape internal quotes by doubling them
        let escaped = value.replace('"', "\"\"");
        format!("\"{}\"", escaped)
    } else {
        value.to_string()
    }
}
