//! Core types for the autoviz pipeline.
//!
//! This module defines the table model shared by the loaders, the normalizer,
//! the classifier and the chart engine, plus the chart configuration that
//! arrives from the chart boundary.

use crate::constants::{DEFAULT_CHART_TITLE, UNKNOWN_TEXT};
use crate::data::{DataError, DataResult};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ============================================================================
// Table Types
// ============================================================================

/// An uploaded table: ordered, named columns of equal length.
///
/// The fields are private so the equal-length invariant can only be
/// established through [`DataTable::new`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataTable {
    columns: Vec<DataColumn>,
    row_count: usize,
}

impl DataTable {
    /// Build a table, rejecting columns of differing lengths.
    pub fn new(columns: Vec<DataColumn>) -> DataResult<Self> {
        let row_count = columns.first().map(DataColumn::len).unwrap_or(0);
        if let Some(ragged) = columns.iter().find(|c| c.len() != row_count) {
            return Err(DataError::RaggedColumns {
                column: ragged.name.clone(),
                expected: row_count,
                found: ragged.len(),
            });
        }
        Ok(Self { columns, row_count })
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[DataColumn] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Look a column up by its exact name
    pub fn column(&self, name: &str) -> Option<&DataColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Cell at (row, column index), if both are in range
    pub fn cell(&self, row: usize, column: usize) -> Option<&DataCell> {
        self.columns.get(column).and_then(|c| c.cells.get(row))
    }

    /// Iterate the cells of one row as (column name, cell) pairs
    pub fn row(&self, row: usize) -> impl Iterator<Item = (&str, &DataCell)> + '_ {
        self.columns
            .iter()
            .filter_map(move |c| c.cells.get(row).map(|cell| (c.name.as_str(), cell)))
    }

    /// One row as a JSON object, keys in column order
    pub fn row_to_json(&self, row: usize) -> serde_json::Map<String, Value> {
        self.row(row)
            .map(|(name, cell)| (name.to_string(), cell.to_json_value()))
            .collect()
    }

    /// Total number of missing cells across all columns
    pub fn missing_count(&self) -> usize {
        self.columns.iter().map(DataColumn::missing_count).sum()
    }

    pub fn into_columns(self) -> Vec<DataColumn> {
        self.columns
    }
}

/// A named column of cells
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataColumn {
    /// Column name/header
    pub name: String,
    /// Cells in row order
    pub cells: Vec<DataCell>,
}

impl DataColumn {
    pub fn new(name: impl Into<String>, cells: Vec<DataCell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Storage type implied by the non-missing cells.
    ///
    /// Ints mixed with floats widen to `Float64`; any other mix is `Text`.
    pub fn storage_type(&self) -> StorageType {
        let mut storage = StorageType::Null;
        for cell in &self.cells {
            let kind = match cell {
                DataCell::Empty => continue,
                DataCell::Int(_) => StorageType::Int64,
                DataCell::Float(_) => StorageType::Float64,
                DataCell::Boolean(_) => StorageType::Bool,
                DataCell::DateTime(_) => StorageType::DateTime,
                DataCell::Text(_) => return StorageType::Text,
            };
            storage = match (storage, kind) {
                (StorageType::Null, kind) => kind,
                (current, kind) if current == kind => current,
                (StorageType::Int64, StorageType::Float64)
                | (StorageType::Float64, StorageType::Int64) => StorageType::Float64,
                _ => return StorageType::Text,
            };
        }
        storage
    }

    pub fn is_numeric(&self) -> bool {
        self.storage_type().is_numeric()
    }

    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    pub fn is_all_missing(&self) -> bool {
        self.cells.iter().all(DataCell::is_empty)
    }

    /// Number of distinct non-missing values
    pub fn distinct_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| !c.is_empty())
            .map(DataCell::key)
            .collect::<std::collections::HashSet<_>>()
            .len()
    }

    /// Numeric view of the column; `None` where a cell is not a number
    pub fn numeric_values(&self) -> Vec<Option<f64>> {
        self.cells.iter().map(DataCell::as_f64).collect()
    }
}

/// How a column's values are stored after loading
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    Int64,
    Float64,
    Bool,
    DateTime,
    /// Strings, or a mix of value kinds
    Text,
    /// No value present at all
    Null,
}

impl StorageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::Int64 => "int64",
            StorageType::Float64 => "float64",
            StorageType::Bool => "bool",
            StorageType::DateTime => "datetime",
            StorageType::Text => "text",
            StorageType::Null => "null",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, StorageType::Int64 | StorageType::Float64)
    }

    /// Value used to fill missing cells during normalization
    pub fn fill_value(&self) -> DataCell {
        match self {
            StorageType::Int64 => DataCell::Int(0),
            StorageType::Float64 => DataCell::Float(0.0),
            _ => DataCell::Text(UNKNOWN_TEXT.to_string()),
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a column means, independent of how it is stored
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    Numeric,
    Categorical,
    Datetime,
    Other,
}

impl From<StorageType> for SemanticType {
    fn from(storage: StorageType) -> Self {
        match storage {
            StorageType::Int64 | StorageType::Float64 => SemanticType::Numeric,
            StorageType::Text => SemanticType::Categorical,
            StorageType::DateTime => SemanticType::Datetime,
            StorageType::Bool | StorageType::Null => SemanticType::Other,
        }
    }
}

/// A single cell value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DataCell {
    Text(String),
    Int(i64),
    Float(f64),
    Boolean(bool),
    DateTime(NaiveDateTime),
    Empty,
}

/// Hashable identity of a cell, used for distinct counts and grouping
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CellKey {
    Text(String),
    Int(i64),
    Float(u64),
    Boolean(bool),
    DateTime(NaiveDateTime),
    Empty,
}

impl DataCell {
    pub fn is_empty(&self) -> bool {
        matches!(self, DataCell::Empty)
    }

    /// Numeric value of the cell, if it holds a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataCell::Int(n) => Some(*n as f64),
            DataCell::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn key(&self) -> CellKey {
        match self {
            DataCell::Text(s) => CellKey::Text(s.clone()),
            DataCell::Int(n) => CellKey::Int(*n),
            // -0.0 and 0.0 group together, as do all NaNs
            DataCell::Float(n) if *n == 0.0 => CellKey::Float(0.0f64.to_bits()),
            DataCell::Float(n) if n.is_nan() => CellKey::Float(f64::NAN.to_bits()),
            DataCell::Float(n) => CellKey::Float(n.to_bits()),
            DataCell::Boolean(b) => CellKey::Boolean(*b),
            DataCell::DateTime(dt) => CellKey::DateTime(*dt),
            DataCell::Empty => CellKey::Empty,
        }
    }

    /// Convert the cell to a plain JSON primitive.
    ///
    /// Non-finite floats and missing cells become `null`; timestamps become
    /// ISO-8601 strings.
    pub fn to_json_value(&self) -> Value {
        match self {
            DataCell::Text(s) => Value::String(s.clone()),
            DataCell::Int(n) => Value::Number((*n).into()),
            DataCell::Float(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            DataCell::Boolean(b) => Value::Bool(*b),
            DataCell::DateTime(dt) => {
                Value::String(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
            }
            DataCell::Empty => Value::Null,
        }
    }

    /// Rough in-memory footprint in bytes, used by the stats boundary
    pub fn approximate_size(&self) -> usize {
        match self {
            DataCell::Text(s) => 8 + 49 + s.len(),
            DataCell::Boolean(_) => 1,
            _ => 8,
        }
    }
}

impl fmt::Display for DataCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataCell::Text(s) => f.write_str(s),
            DataCell::Int(n) => write!(f, "{}", n),
            // Keep a decimal point on whole floats so they re-parse as floats
            DataCell::Float(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{:.1}", n)
            }
            DataCell::Float(n) => write!(f, "{}", n),
            DataCell::Boolean(b) => write!(f, "{}", b),
            DataCell::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            DataCell::Empty => Ok(()),
        }
    }
}

// ============================================================================
// Chart Types
// ============================================================================

/// Chart configuration, as received from the chart boundary.
///
/// Every field is optional on the wire; missing ones take the defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Type of chart to render
    pub chart_type: ChartType,
    /// Column name for the X axis
    pub x_axis: Option<String>,
    /// Column name for the Y axis
    pub y_axis: Option<String>,
    /// Named color palette
    pub color_scheme: ColorScheme,
    /// Chart title
    pub title: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            chart_type: ChartType::Bar,
            x_axis: None,
            y_axis: None,
            color_scheme: ColorScheme::Default,
            title: DEFAULT_CHART_TITLE.to_string(),
        }
    }
}

impl ChartConfig {
    pub fn new(chart_type: ChartType) -> Self {
        Self {
            chart_type,
            ..Default::default()
        }
    }

    pub fn with_x(mut self, x: impl Into<String>) -> Self {
        self.x_axis = Some(x.into());
        self
    }

    pub fn with_y(mut self, y: impl Into<String>) -> Self {
        self.y_axis = Some(y.into());
        self
    }

    pub fn with_axes(self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.with_x(x).with_y(y)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_color_scheme(mut self, scheme: ColorScheme) -> Self {
        self.color_scheme = scheme;
        self
    }

    /// X axis selection; blank strings count as not supplied
    pub fn x_column(&self) -> Option<&str> {
        supplied(&self.x_axis)
    }

    /// Y axis selection; blank strings count as not supplied
    pub fn y_column(&self) -> Option<&str> {
        supplied(&self.y_axis)
    }
}

fn supplied(axis: &Option<String>) -> Option<&str> {
    axis.as_deref().filter(|name| !name.trim().is_empty())
}

/// Types of charts available.
///
/// Unrecognized names are kept as `Unknown` so the chart engine can refuse
/// them softly instead of failing deserialization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Scatter,
    Pie,
    Area,
    Histogram,
    Box,
    Heatmap,
    Unknown(String),
}

impl ChartType {
    pub fn label(&self) -> &str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Scatter => "scatter",
            ChartType::Pie => "pie",
            ChartType::Area => "area",
            ChartType::Histogram => "histogram",
            ChartType::Box => "box",
            ChartType::Heatmap => "heatmap",
            ChartType::Unknown(name) => name,
        }
    }

    pub fn all() -> &'static [ChartType] {
        &[
            ChartType::Bar,
            ChartType::Line,
            ChartType::Scatter,
            ChartType::Pie,
            ChartType::Area,
            ChartType::Histogram,
            ChartType::Box,
            ChartType::Heatmap,
        ]
    }
}

impl From<&str> for ChartType {
    fn from(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "bar" => ChartType::Bar,
            "line" => ChartType::Line,
            "scatter" => ChartType::Scatter,
            "pie" => ChartType::Pie,
            "area" => ChartType::Area,
            "histogram" => ChartType::Histogram,
            "box" => ChartType::Box,
            "heatmap" => ChartType::Heatmap,
            _ => ChartType::Unknown(name.to_string()),
        }
    }
}

impl From<String> for ChartType {
    fn from(name: String) -> Self {
        ChartType::from(name.as_str())
    }
}

impl From<ChartType> for String {
    fn from(chart_type: ChartType) -> Self {
        chart_type.label().to_string()
    }
}

/// Named color palettes. Unknown names fall back to the renderer default.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColorScheme {
    #[default]
    Default,
    Viridis,
    Plasma,
    Blues,
    Reds,
    Greens,
    Sunset,
    Ocean,
    Purple,
    Custom(String),
}

impl ColorScheme {
    pub fn label(&self) -> &str {
        match self {
            ColorScheme::Default => "default",
            ColorScheme::Viridis => "viridis",
            ColorScheme::Plasma => "plasma",
            ColorScheme::Blues => "blues",
            ColorScheme::Reds => "reds",
            ColorScheme::Greens => "greens",
            ColorScheme::Sunset => "sunset",
            ColorScheme::Ocean => "ocean",
            ColorScheme::Purple => "purple",
            ColorScheme::Custom(name) => name,
        }
    }
}

impl From<&str> for ColorScheme {
    fn from(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "default" | "" => ColorScheme::Default,
            "viridis" => ColorScheme::Viridis,
            "plasma" => ColorScheme::Plasma,
            "blues" => ColorScheme::Blues,
            "reds" => ColorScheme::Reds,
            "greens" => ColorScheme::Greens,
            "sunset" => ColorScheme::Sunset,
            "ocean" => ColorScheme::Ocean,
            "purple" => ColorScheme::Purple,
            _ => ColorScheme::Custom(name.to_string()),
        }
    }
}

impl From<String> for ColorScheme {
    fn from(name: String) -> Self {
        ColorScheme::from(name.as_str())
    }
}

impl From<ColorScheme> for String {
    fn from(scheme: ColorScheme) -> Self {
        scheme.label().to_string()
    }
}
