//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestTableBuilder` - Builder pattern for creating tables column by column
//! - Upload fixtures and a helper that returns a session with data loaded

use autoviz::session::Session;
use autoviz::types::{DataCell, DataColumn, DataTable};

/// Small sales upload with one missing unit count and one missing price
pub const SALES_CSV: &str = "\
region,product,units,price
north,apples,10,1.5
south,pears,,2.0
north,pears,4,
east,plums,7,3.25
";

pub const SALES_JSON: &str = r#"[
    {"region": "north", "units": 10},
    {"region": "south", "units": 3, "note": "late"},
    {"region": "north", "units": null}
]"#;

pub fn text(s: &str) -> DataCell {
    DataCell::Text(s.to_string())
}

// ============================================================================
// TestTableBuilder
// ============================================================================

/// Builder for creating test tables.
///
/// # Example
/// ```ignore
/// let table = TestTableBuilder::new()
///     .with_text_column("region", &["north", "south"])
///     .with_int_column("units", &[Some(10), None])
///     .build();
/// ```
#[derive(Default)]
pub struct TestTableBuilder {
    columns: Vec<DataColumn>,
}

impl TestTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column(mut self, name: &str, cells: Vec<DataCell>) -> Self {
        self.columns.push(DataColumn::new(name, cells));
        self
    }

    pub fn with_text_column(self, name: &str, values: &[&str]) -> Self {
        let cells = values.iter().map(|v| text(v)).collect();
        self.with_column(name, cells)
    }

    pub fn with_int_column(self, name: &str, values: &[Option<i64>]) -> Self {
        let cells = values
            .iter()
            .map(|v| v.map_or(DataCell::Empty, DataCell::Int))
            .collect();
        self.with_column(name, cells)
    }

    pub fn with_float_column(self, name: &str, values: &[Option<f64>]) -> Self {
        let cells = values
            .iter()
            .map(|v| v.map_or(DataCell::Empty, DataCell::Float))
            .collect();
        self.with_column(name, cells)
    }

    pub fn build(self) -> DataTable {
        DataTable::new(self.columns).expect("test columns must have equal lengths")
    }
}

// ============================================================================
// Session Helpers
// ============================================================================

/// A default session with `contents` uploaded under `filename`
pub fn uploaded_session(filename: &str, contents: &[u8]) -> Session {
    let session = Session::default();
    session
        .upload(filename, contents)
        .unwrap_or_else(|err| panic!("upload of {} failed: {}", filename, err));
    session
}

pub fn assert_column_names(table: &DataTable, expected: &[&str]) {
    assert_eq!(
        table.column_names(),
        expected.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        "column names differ"
    );
}
