//! Table normalization
//!
//! Cleans a freshly loaded table: drops empty rows and columns, normalizes
//! header names and fills missing cells according to each column's storage
//! type. Normalizing an already-normalized table returns it unchanged.

use crate::constants::UNNAMED_COLUMN_PREFIX;
use crate::perf::Stage;
use crate::profile_stage;
use crate::types::{DataCell, DataColumn, DataTable};
use std::collections::HashSet;

/// Normalize a table. Pure and total.
pub fn normalize(table: DataTable) -> DataTable {
    profile_stage!(Stage::Normalize);

    let row_count = table.row_count();
    let columns = table.into_columns();

    // 1. Drop rows that are missing in every column
    let keep_rows: Vec<bool> = (0..row_count)
        .map(|row| columns.iter().any(|c| !c.cells[row].is_empty()))
        .collect();
    let dropped_rows = keep_rows.iter().filter(|keep| !**keep).count();

    let columns: Vec<DataColumn> = columns
        .into_iter()
        .map(|column| {
            let cells = column
                .cells
                .into_iter()
                .zip(&keep_rows)
                .filter_map(|(cell, keep)| keep.then_some(cell))
                .collect();
            DataColumn::new(column.name, cells)
        })
        // 2. Drop columns that are missing in every row
        .filter(|column| !column.is_all_missing())
        .collect();

    if dropped_rows > 0 {
        tracing::debug!("Dropped {} empty rows", dropped_rows);
    }

    // 3. Rename, then 4. fill
    let mut seen: HashSet<String> = HashSet::new();
    let columns: Vec<DataColumn> = columns
        .into_iter()
        .enumerate()
        .map(|(idx, column)| {
            let name = unique_name(normalize_header(&column.name, idx), &mut seen);
            fill_missing(DataColumn::new(name, column.cells))
        })
        .collect();

    // Every column was filtered by the same row mask, so lengths still agree
    DataTable::new(columns).unwrap_or_default()
}

/// Trim a header and replace spaces and dots with underscores
pub fn normalize_header(name: &str, index: usize) -> String {
    let cleaned = name.trim().replace([' ', '.'], "_");
    if cleaned.is_empty() {
        format!("{}{}", UNNAMED_COLUMN_PREFIX, index)
    } else {
        cleaned
    }
}

fn unique_name(base: String, seen: &mut HashSet<String>) -> String {
    let mut name = base.clone();
    let mut suffix = 1;
    while seen.contains(&name) {
        name = format!("{}_{}", base, suffix);
        suffix += 1;
    }
    seen.insert(name.clone());
    name
}

/// Fill missing cells using the column's storage type
fn fill_missing(mut column: DataColumn) -> DataColumn {
    if column.missing_count() == 0 {
        return column;
    }

    let fill = column.storage_type().fill_value();
    for cell in column.cells.iter_mut().filter(|c| c.is_empty()) {
        *cell = fill.clone();
    }
    column
}
