//! Application-wide constants.
//!
//! Centralizes the defaults and styling values shared by the loaders,
//! the chart engine and the session boundary.

// ============================================================================
// Upload Limits
// ============================================================================

/// Maximum accepted upload size in MB
pub const MAX_UPLOAD_MB: u64 = 16;

/// Number of rows returned in the upload preview
pub const PREVIEW_ROWS: usize = 100;

/// CSV field values read as missing, in addition to empty fields
pub const CSV_NULL_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Number of sample values kept per column descriptor
pub const SAMPLE_VALUES: usize = 3;

// ============================================================================
// Normalization
// ============================================================================

/// Fill value for missing cells in string-valued columns
pub const UNKNOWN_TEXT: &str = "Unknown";

/// Prefix for blank headers coming out of a loader
pub const UNNAMED_HEADER_PREFIX: &str = "Unnamed: ";

/// Prefix for headers left empty after normalization
pub const UNNAMED_COLUMN_PREFIX: &str = "Unnamed_";

// ============================================================================
// Chart Defaults
// ============================================================================

/// Title used when a chart request carries none
pub const DEFAULT_CHART_TITLE: &str = "Data Visualization";

/// Name of the synthesized column holding pie counts
pub const PIE_COUNT_COLUMN: &str = "count";

// ============================================================================
// Chart Styling
// ============================================================================

pub const CHART_FONT_FAMILY: &str = "Inter, system-ui, sans-serif";
pub const CHART_FONT_SIZE: u32 = 14;
pub const CHART_TITLE_FONT_SIZE: u32 = 20;
pub const CHART_TITLE_COLOR: &str = "#1f2937";
pub const CHART_BACKGROUND: &str = "white";
pub const CHART_HEIGHT: u32 = 500;

/// Margins in pixels (left, right, top, bottom)
pub const CHART_MARGIN: (u32, u32, u32, u32) = (60, 60, 80, 60);

pub const GRID_COLOR: &str = "#f1f5f9";
pub const GRID_WIDTH: u32 = 1;
pub const AXIS_LINE_COLOR: &str = "#e5e7eb";
pub const AXIS_LINE_WIDTH: u32 = 2;

// ============================================================================
// Memory Estimation
// ============================================================================

/// Fixed overhead attributed to the row index when estimating memory
pub const INDEX_MEMORY_BYTES: usize = 128;

// ============================================================================
// Export
// ============================================================================

pub const EXPORT_CSV_FILENAME: &str = "autoviz_data.csv";
pub const EXPORT_JSON_FILENAME: &str = "autoviz_data.json";
pub const EXPORT_CHART_CONFIG_FILENAME: &str = "autoviz_chart.json";

// ============================================================================
// Server Defaults
// ============================================================================

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

// ============================================================================
// Performance Thresholds
// ============================================================================

/// Loads slower than this are logged as slow operations
pub const SLOW_LOAD_MS: f64 = 500.0;

/// Chart builds slower than this are logged as slow operations
pub const SLOW_CHART_MS: f64 = 100.0;

/// Normalize, classify and export share one threshold
pub const SLOW_TRANSFORM_MS: f64 = 250.0;
