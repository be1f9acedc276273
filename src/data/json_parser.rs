//! JSON data parsing
//!
//! Parses a JSON array of objects (or a single object) into a table, and
//! writes tables back out as arrays of row objects.

use crate::data::encoding::UTF8_BOM;
use crate::data::error::{DataError, DataResult};
use crate::types::{DataCell, DataColumn, DataTable};
use serde_json::{Map, Value};

/// Parse raw JSON bytes into a table; a leading UTF-8 BOM is ignored
pub fn parse_json_bytes(bytes: &[u8]) -> DataResult<DataTable> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let value: Value = serde_json::from_slice(bytes)?;
    parse_json_value(&value)
}

/// Parse JSON content from a string
pub fn parse_json_content(json: &str) -> DataResult<DataTable> {
    parse_json_bytes(json.as_bytes())
}

fn parse_json_value(value: &Value) -> DataResult<DataTable> {
    let records = extract_records(value)?;

    // Union of keys, in order of first appearance
    let mut column_names: Vec<&str> = Vec::new();
    for record in &records {
        for key in record.keys() {
            if !column_names.contains(&key.as_str()) {
                column_names.push(key);
            }
        }
    }

    let columns = column_names
        .iter()
        .map(|name| {
            let cells = records
                .iter()
                .map(|record| record.get(*name).map(json_value_to_cell).unwrap_or(DataCell::Empty))
                .collect();
            DataColumn::new(*name, cells)
        })
        .collect();

    DataTable::new(columns)
}

/// A sequence of objects gives one record per element; a lone object is one record
fn extract_records(value: &Value) -> DataResult<Vec<&Map<String, Value>>> {
    match value {
        Value::Array(arr) => arr
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                item.as_object().ok_or_else(|| {
                    DataError::Schema(format!("array element {} is not an object", idx))
                })
            })
            .collect(),
        Value::Object(obj) => Ok(vec![obj]),
        _ => Err(DataError::Schema(
            "JSON must contain an array of objects or a single object".to_string(),
        )),
    }
}

/// Convert a JSON value to a DataCell
fn json_value_to_cell(value: &Value) -> DataCell {
    match value {
        Value::Null => DataCell::Empty,
        Value::Bool(b) => DataCell::Boolean(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => DataCell::Int(i),
            None => n.as_f64().map(DataCell::Float).unwrap_or(DataCell::Empty),
        },
        Value::String(s) => DataCell::Text(s.clone()),
        // Nested structures are kept as their JSON text
        Value::Array(_) | Value::Object(_) => DataCell::Text(value.to_string()),
    }
}

/// Convert a table to JSON string content (array of objects, 2-space indent)
pub fn write_json_content(table: &DataTable) -> String {
    let array: Vec<Map<String, Value>> = (0..table.row_count())
        .map(|row_idx| table.row_to_json(row_idx))
        .collect();

    serde_json::to_string_pretty(&array).unwrap_or_else(|_| "[]".to_string())
}
