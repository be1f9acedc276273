//! Property tests for table normalization.

use crate::helpers::{TestTableBuilder, assert_column_names};
use autoviz::data::{normalize, normalize_header};
use autoviz::types::{DataCell, DataColumn, DataTable, StorageType};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn int_cells(rows: usize) -> impl Strategy<Value = Vec<DataCell>> {
    prop::collection::vec(prop::option::of(-1_000i64..1_000), rows).prop_map(|cells| {
        cells
            .into_iter()
            .map(|c| c.map_or(DataCell::Empty, DataCell::Int))
            .collect()
    })
}

fn text_cells(rows: usize) -> impl Strategy<Value = Vec<DataCell>> {
    prop::collection::vec(prop::option::of("[a-z]{1,6}"), rows).prop_map(|cells| {
        cells
            .into_iter()
            .map(|c| c.map_or(DataCell::Empty, DataCell::Text))
            .collect()
    })
}

fn column(rows: usize) -> impl Strategy<Value = DataColumn> {
    (" ?[A-Za-z .]{0,8} ?", prop_oneof![int_cells(rows), text_cells(rows)])
        .prop_map(|(name, cells)| DataColumn::new(name, cells))
}

fn table() -> impl Strategy<Value = DataTable> {
    (0usize..8, 1usize..5)
        .prop_flat_map(|(rows, cols)| prop::collection::vec(column(rows), cols))
        .prop_map(|columns| DataTable::new(columns).unwrap())
}

/// What normalization should produce, computed cell by cell
fn expected_cells(table: &DataTable) -> Vec<Vec<DataCell>> {
    let kept_rows: Vec<usize> = (0..table.row_count())
        .filter(|&row| table.columns().iter().any(|c| !c.cells[row].is_empty()))
        .collect();

    table
        .columns()
        .iter()
        .filter(|c| !c.is_all_missing())
        .map(|c| {
            let fill = match c.storage_type() {
                StorageType::Int64 => DataCell::Int(0),
                _ => DataCell::Text("Unknown".to_string()),
            };
            kept_rows
                .iter()
                .map(|&row| match &c.cells[row] {
                    DataCell::Empty => fill.clone(),
                    cell => cell.clone(),
                })
                .collect()
        })
        .collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_normalize_is_idempotent(table in table()) {
        let once = normalize(table);
        let twice = normalize(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_columns_have_equal_lengths(table in table()) {
        let normalized = normalize(table);
        for column in normalized.columns() {
            prop_assert_eq!(column.len(), normalized.row_count());
        }
    }

    #[test]
    fn prop_missing_cells_are_filled(table in table()) {
        let expected = expected_cells(&table);
        let normalized = normalize(table);

        prop_assert_eq!(normalized.missing_count(), 0);
        let actual: Vec<Vec<DataCell>> =
            normalized.columns().iter().map(|c| c.cells.clone()).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_header_names_are_unique(table in table()) {
        let names = normalize(table).column_names();
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        prop_assert_eq!(deduped.len(), names.len());
    }
}

// ============================================================================
// Examples
// ============================================================================

#[test]
fn test_header_cleanup_and_collisions() {
    let table = TestTableBuilder::new()
        .with_text_column(" Total Sales.Q1 ", &["a"])
        .with_text_column("Total Sales Q1", &["b"])
        .with_text_column("  ", &["c"])
        .build();

    let normalized = normalize(table);

    assert_column_names(&normalized, &["Total_Sales_Q1", "Total_Sales_Q1_1", "Unnamed_2"]);
    assert_eq!(normalize_header(" Total Sales.Q1 ", 0), "Total_Sales_Q1");
}

#[test]
fn test_float_column_fills_with_zero() {
    let table = TestTableBuilder::new()
        .with_float_column("price", &[Some(1.5), None])
        .build();

    let normalized = normalize(table);

    assert_eq!(normalized.cell(1, 0), Some(&DataCell::Float(0.0)));
}

#[test]
fn test_empty_strings_are_not_missing() {
    let table = TestTableBuilder::new()
        .with_int_column("a", &[None, None])
        .with_text_column("b", &["", ""])
        .build();

    let normalized = normalize(table);

    // "" is text, not missing, so column b survives
    assert_column_names(&normalized, &["b"]);
    assert_eq!(normalized.row_count(), 2);
}
