//! Excel workbook parsing (.xlsx / .xls)
//!
//! Only the first worksheet is read. The first row of its used range is the
//! header row.

use crate::data::error::{DataError, DataResult};
use crate::types::{DataCell, DataColumn, DataTable};
use calamine::{Data, DataType, Reader, open_workbook_auto_from_rs};
use std::io::Cursor;

/// Largest float that still converts to an integer without losing precision
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Parse raw workbook bytes into a table
pub fn parse_spreadsheet_bytes(bytes: &[u8]) -> DataResult<DataTable> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DataError::format("Spreadsheet", "workbook has no worksheets"))??;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return DataTable::new(Vec::new());
    };

    let mut columns: Vec<DataColumn> = header_row
        .iter()
        .map(|cell| DataColumn::new(header_text(cell), Vec::new()))
        .collect();

    for row in rows {
        for (col_idx, column) in columns.iter_mut().enumerate() {
            let cell = row.get(col_idx).map(excel_cell_to_data_cell).unwrap_or(DataCell::Empty);
            column.cells.push(cell);
        }
    }

    DataTable::new(columns)
}

/// Header text for a cell in the first row
fn header_text(cell: &Data) -> String {
    match excel_cell_to_data_cell(cell) {
        DataCell::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Convert a calamine cell to DataCell.
///
/// Whole-number floats become integers and error cells become missing.
fn excel_cell_to_data_cell(cell: &Data) -> DataCell {
    match cell {
        Data::Empty | Data::Error(_) => DataCell::Empty,
        Data::String(s) if s.is_empty() => DataCell::Empty,
        Data::String(s) => DataCell::Text(s.clone()),
        Data::Int(n) => DataCell::Int(*n),
        Data::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < MAX_EXACT_INT => {
            DataCell::Int(*f as i64)
        }
        Data::Float(f) => DataCell::Float(*f),
        Data::Bool(b) => DataCell::Boolean(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_datetime()
            .map(DataCell::DateTime)
            .unwrap_or_else(|| DataCell::Text(cell.to_string())),
        _ => DataCell::Text(cell.to_string()),
    }
}
