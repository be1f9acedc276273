//! Column classification and table statistics

use crate::constants::{INDEX_MEMORY_BYTES, SAMPLE_VALUES};
use crate::perf::Stage;
use crate::profile_stage;
use crate::types::{DataColumn, DataTable, SemanticType, StorageType};
use serde::ser::{Serialize, Serializer};
use serde::Deserialize;
use serde_json::Value;

/// Read-only summary of one column
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ColumnDescriptor {
    #[serde(skip)]
    pub name: String,
    #[serde(rename = "type")]
    pub semantic_type: SemanticType,
    #[serde(rename = "dtype")]
    pub storage_type: StorageType,
    #[serde(rename = "unique_values")]
    pub distinct_count: usize,
    #[serde(rename = "null_values")]
    pub missing_count: usize,
    pub sample_values: Vec<Value>,
}

impl ColumnDescriptor {
    pub fn describe(column: &DataColumn) -> Self {
        let storage_type = column.storage_type();
        Self {
            name: column.name.clone(),
            semantic_type: SemanticType::from(storage_type),
            storage_type,
            distinct_count: column.distinct_count(),
            missing_count: column.missing_count(),
            sample_values: column
                .cells
                .iter()
                .take(SAMPLE_VALUES)
                .map(|cell| cell.to_json_value())
                .collect(),
        }
    }
}

/// Column descriptors keyed by name, in column order.
///
/// Serializes as a JSON object whose keys follow the table's column order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnInfo(Vec<ColumnDescriptor>);

impl ColumnInfo {
    pub fn get(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.0.iter().find(|d| d.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ColumnInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|d| (&d.name, d)))
    }
}

/// Describe every column of a table
pub fn classify(table: &DataTable) -> ColumnInfo {
    profile_stage!(Stage::Classify);
    ColumnInfo(table.columns().iter().map(ColumnDescriptor::describe).collect())
}

/// Table-level statistics for the stats boundary
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct DataStats {
    pub total_rows: usize,
    pub total_columns: usize,
    pub numeric_columns: usize,
    pub categorical_columns: usize,
    pub missing_values: usize,
    /// Approximate in-memory size in bytes
    pub memory_usage: usize,
}

impl DataStats {
    pub fn from_table(table: &DataTable) -> Self {
        let storage: Vec<StorageType> = table.columns().iter().map(DataColumn::storage_type).collect();

        let memory_usage = INDEX_MEMORY_BYTES
            + table
                .columns()
                .iter()
                .flat_map(|c| c.cells.iter())
                .map(|cell| cell.approximate_size())
                .sum::<usize>();

        Self {
            total_rows: table.row_count(),
            total_columns: table.column_count(),
            numeric_columns: storage.iter().filter(|s| s.is_numeric()).count(),
            categorical_columns: storage.iter().filter(|s| **s == StorageType::Text).count(),
            missing_values: table.missing_count(),
            memory_usage,
        }
    }
}
