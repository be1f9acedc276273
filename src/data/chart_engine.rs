//! Chart request translation
//!
//! Turns a chart configuration plus a table into a [`ChartSpec`]: the
//! shaped dataset for the chart kind (pie aggregation, correlation matrix
//! for heatmaps) with uniform styling. Rendering is delegated to a
//! [`ChartRenderer`]. Nothing here fails hard; a chart that cannot be drawn
//! comes back as [`ChartOutcome::CannotRender`] with the reason.

use crate::constants::{
    AXIS_LINE_COLOR, AXIS_LINE_WIDTH, CHART_BACKGROUND, CHART_FONT_FAMILY, CHART_FONT_SIZE,
    CHART_HEIGHT, CHART_MARGIN, CHART_TITLE_COLOR, CHART_TITLE_FONT_SIZE, GRID_COLOR, GRID_WIDTH,
    PIE_COUNT_COLUMN,
};
use crate::perf::{Stage, StageTimer};
use crate::render::ChartRenderer;
use crate::types::{CellKey, ChartConfig, ChartType, DataCell, DataColumn, DataTable, StorageType};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

// ============================================================================
// Outcome Types
// ============================================================================

/// Result of a chart build: a rendered artifact or the reason there is none
#[derive(Clone, Debug, PartialEq)]
pub enum ChartOutcome<A> {
    Rendered(A),
    CannotRender(RenderFailure),
}

impl<A> ChartOutcome<A> {
    pub fn failure(&self) -> Option<&RenderFailure> {
        match self {
            ChartOutcome::Rendered(_) => None,
            ChartOutcome::CannotRender(reason) => Some(reason),
        }
    }
}

/// Which axis of a chart request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// Why a chart could not be produced
#[derive(Error, Clone, Debug, PartialEq)]
pub enum RenderFailure {
    /// A required axis was not supplied
    #[error("{chart_type} chart requires an {axis} axis")]
    MissingAxis { chart_type: String, axis: Axis },

    /// A supplied axis names no column of the table
    #[error("Column {0:?} not found")]
    ColumnNotFound(String),

    #[error("Table has no rows")]
    NoRows,

    #[error("Column {0:?} is not numeric")]
    NonNumericColumn(String),

    #[error("No numeric columns to correlate")]
    NoNumericColumns,

    #[error("Unknown chart type {0:?}")]
    UnknownChartType(String),

    #[error("Renderer failed: {0}")]
    Renderer(String),
}

// ============================================================================
// Chart Description
// ============================================================================

/// Declarative chart description handed to a renderer
#[derive(Clone, Debug, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartType,
    pub title: String,
    /// Named palette colors; `None` leaves colors to the renderer
    pub palette: Option<&'static [&'static str]>,
    /// Continuous color scale used by heatmaps
    pub color_scale: Option<&'static [&'static str]>,
    pub data: ChartData,
    pub style: ChartStyle,
}

/// A named sequence of values bound to one chart channel
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<Value>,
}

impl Series {
    fn from_column(column: &DataColumn) -> Self {
        Self {
            name: column.name.clone(),
            values: column.cells.iter().map(DataCell::to_json_value).collect(),
        }
    }
}

/// Shaped data for each chart kind
#[derive(Clone, Debug, PartialEq)]
pub enum ChartData {
    /// Bar, line, scatter and area charts map columns straight onto x and y
    XY { x: Series, y: Series },
    /// One slice per distinct name, in first-appearance order
    Pie { names: Series, values: Series },
    Histogram { x: Series },
    /// Grouped when `category` is present, a single box otherwise
    Box {
        category: Option<Series>,
        values: Series,
    },
    /// Square correlation matrix; `None` where the coefficient is undefined
    Heatmap {
        labels: Vec<String>,
        matrix: Vec<Vec<Option<f64>>>,
    },
}

/// Uniform styling applied to every chart kind
#[derive(Clone, Debug, PartialEq)]
pub struct ChartStyle {
    pub font_family: &'static str,
    pub font_size: u32,
    pub title_font_size: u32,
    pub title_color: &'static str,
    /// Horizontal title anchor, 0.5 is centered
    pub title_x: f64,
    pub plot_background: &'static str,
    pub paper_background: &'static str,
    /// left, right, top, bottom
    pub margin: (u32, u32, u32, u32),
    pub height: u32,
    pub grid_color: &'static str,
    pub grid_width: u32,
    pub axis_line_color: &'static str,
    pub axis_line_width: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            font_family: CHART_FONT_FAMILY,
            font_size: CHART_FONT_SIZE,
            title_font_size: CHART_TITLE_FONT_SIZE,
            title_color: CHART_TITLE_COLOR,
            title_x: 0.5,
            plot_background: CHART_BACKGROUND,
            paper_background: CHART_BACKGROUND,
            margin: CHART_MARGIN,
            height: CHART_HEIGHT,
            grid_color: GRID_COLOR,
            grid_width: GRID_WIDTH,
            axis_line_color: AXIS_LINE_COLOR,
            axis_line_width: AXIS_LINE_WIDTH,
        }
    }
}

// ============================================================================
// Translation
// ============================================================================

/// Translate and render a chart request. Never fails hard.
pub fn build<R: ChartRenderer>(
    table: &DataTable,
    config: &ChartConfig,
    renderer: &R,
) -> ChartOutcome<R::Artifact> {
    let _timer = StageTimer::start(Stage::Chart);

    let spec = match translate(table, config) {
        Ok(spec) => spec,
        Err(reason) => return ChartOutcome::CannotRender(reason),
    };

    match renderer.render(&spec) {
        Ok(artifact) => ChartOutcome::Rendered(artifact),
        Err(err) => ChartOutcome::CannotRender(RenderFailure::Renderer(err.to_string())),
    }
}

/// Shape the table for the requested chart kind and apply the house style
pub fn translate(table: &DataTable, config: &ChartConfig) -> Result<ChartSpec, RenderFailure> {
    if let ChartType::Unknown(name) = &config.chart_type {
        return Err(RenderFailure::UnknownChartType(name.clone()));
    }
    if table.row_count() == 0 {
        return Err(RenderFailure::NoRows);
    }

    let kind = &config.chart_type;
    let data = match kind {
        ChartType::Bar | ChartType::Line | ChartType::Scatter | ChartType::Area => {
            let x = required_column(table, config.x_column(), Axis::X, kind)?;
            let y = required_column(table, config.y_column(), Axis::Y, kind)?;
            ChartData::XY {
                x: Series::from_column(x),
                y: Series::from_column(y),
            }
        }
        ChartType::Pie => {
            let names = required_column(table, config.x_column(), Axis::X, kind)?;
            let values = config.y_column().and_then(|name| table.column(name));
            pie_data(names, values)?
        }
        ChartType::Histogram => {
            let x = required_column(table, config.x_column(), Axis::X, kind)?;
            ChartData::Histogram {
                x: Series::from_column(x),
            }
        }
        ChartType::Box => {
            let x = required_column(table, config.x_column(), Axis::X, kind)?;
            match config.y_column().and_then(|name| table.column(name)) {
                Some(y) => ChartData::Box {
                    category: Some(Series::from_column(x)),
                    values: Series::from_column(y),
                },
                None => ChartData::Box {
                    category: None,
                    values: Series::from_column(x),
                },
            }
        }
        ChartType::Heatmap => heatmap_data(table)?,
        ChartType::Unknown(name) => return Err(RenderFailure::UnknownChartType(name.clone())),
    };

    Ok(finish(config, data))
}

/// Attach title, palette and the uniform style
fn finish(config: &ChartConfig, data: ChartData) -> ChartSpec {
    ChartSpec {
        kind: config.chart_type.clone(),
        title: config.title.clone(),
        palette: config.color_scheme.palette(),
        color_scale: config.color_scheme.continuous_scale(),
        data,
        style: ChartStyle::default(),
    }
}

fn required_column<'a>(
    table: &'a DataTable,
    name: Option<&str>,
    axis: Axis,
    kind: &ChartType,
) -> Result<&'a DataColumn, RenderFailure> {
    let name = name.ok_or_else(|| RenderFailure::MissingAxis {
        chart_type: kind.label().to_string(),
        axis,
    })?;
    table
        .column(name)
        .ok_or_else(|| RenderFailure::ColumnNotFound(name.to_string()))
}

/// Sum `values` per distinct name, or count names when there is no value column
/// Running sum and row count of one pie slice
#[derive(Clone, Copy, Debug)]
struct SliceTotal {
    sum: f64,
    /// Exact integer sum; `None` once a non-integer value or an overflow is seen
    int_sum: Option<i64>,
    count: u64,
}

impl Default for SliceTotal {
    fn default() -> Self {
        Self {
            sum: 0.0,
            int_sum: Some(0),
            count: 0,
        }
    }
}

impl SliceTotal {
    fn add(&mut self, cell: Option<&DataCell>) {
        self.count += 1;
        match cell {
            Some(DataCell::Int(v)) => {
                self.sum += *v as f64;
                self.int_sum = self.int_sum.and_then(|sum| sum.checked_add(*v));
            }
            Some(cell) => {
                if let Some(v) = cell.as_f64() {
                    self.sum += v;
                    self.int_sum = None;
                }
            }
            None => {}
        }
    }

    fn sum_value(&self, storage: StorageType) -> Value {
        match (storage, self.int_sum) {
            (StorageType::Int64, Some(sum)) => Value::from(sum),
            _ => serde_json::Number::from_f64(self.sum)
                .map(Value::Number)
                .unwrap_or(Value::Null),
        }
    }
}

fn pie_data(names: &DataColumn, values: Option<&DataColumn>) -> Result<ChartData, RenderFailure> {
    let storage = values.map(DataColumn::storage_type);
    if let (Some(column), Some(storage)) = (values, storage) {
        if !storage.is_numeric() {
            return Err(RenderFailure::NonNumericColumn(column.name.clone()));
        }
    }

    // Group by name, preserving first-appearance order
    let mut group_order: Vec<&DataCell> = Vec::new();
    let mut groups: HashMap<CellKey, SliceTotal> = HashMap::new();

    for (row, name) in names.cells.iter().enumerate() {
        if name.is_empty() {
            continue;
        }
        let key = name.key();
        if !groups.contains_key(&key) {
            group_order.push(name);
        }
        groups
            .entry(key)
            .or_default()
            .add(values.and_then(|c| c.cells.get(row)));
    }

    let totals: Vec<SliceTotal> = group_order
        .iter()
        .map(|name| groups.get(&name.key()).copied().unwrap_or_default())
        .collect();

    let value_series = match (values, storage) {
        (Some(column), Some(storage)) => Series {
            name: column.name.clone(),
            values: totals.iter().map(|total| total.sum_value(storage)).collect(),
        },
        _ => Series {
            name: PIE_COUNT_COLUMN.to_string(),
            values: totals.iter().map(|total| Value::from(total.count)).collect(),
        },
    };

    Ok(ChartData::Pie {
        names: Series {
            name: names.name.clone(),
            values: group_order.iter().map(|cell| cell.to_json_value()).collect(),
        },
        values: value_series,
    })
}

/// Pairwise Pearson correlation over the numeric columns
fn heatmap_data(table: &DataTable) -> Result<ChartData, RenderFailure> {
    let numeric: Vec<&DataColumn> = table.columns().iter().filter(|c| c.is_numeric()).collect();
    if numeric.is_empty() {
        return Err(RenderFailure::NoNumericColumns);
    }

    let values: Vec<Vec<Option<f64>>> = numeric.iter().map(|c| c.numeric_values()).collect();
    let matrix = (0..values.len())
        .map(|i| {
            (0..values.len())
                .map(|j| pearson(&values[i], &values[j], i == j))
                .collect()
        })
        .collect();

    Ok(ChartData::Heatmap {
        labels: numeric.iter().map(|c| c.name.clone()).collect(),
        matrix,
    })
}

/// Pearson coefficient over rows where both values are present.
///
/// `None` with fewer than two complete pairs or when either side is constant.
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>], same_column: bool) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    if same_column {
        return Some(1.0);
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}
