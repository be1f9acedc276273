//! Session state and request handlers
//!
//! A [`Session`] holds the table of the current upload and implements the
//! upload, chart, export and stats boundaries on top of it. Each upload
//! replaces the table wholesale; readers work on an `Arc` snapshot, so a
//! request always sees one consistent table even while a new upload lands.

use crate::constants::EXPORT_CHART_CONFIG_FILENAME;
use crate::data::{
    ChartOutcome, ColumnInfo, DataError, DataResult, DataStats, ExportFormat, FileFormat, build,
    chart_config_to_json, classify, load, normalize,
};
use crate::perf::{Stage, StageTimer, measure};
use crate::render::ChartRenderer;
use crate::settings::Settings;
use crate::types::{ChartConfig, DataTable};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Response of a successful upload
#[derive(Clone, Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    /// The first rows of the table as JSON row objects
    pub data: Vec<Map<String, Value>>,
    pub headers: Vec<String>,
    pub total_rows: usize,
    pub total_columns: usize,
    pub column_info: ColumnInfo,
}

/// Response of a successful chart request
#[derive(Clone, Debug, Serialize)]
pub struct ChartResponse<A> {
    pub success: bool,
    pub chart: A,
    /// The request, echoed back with defaults applied
    pub config: ChartConfig,
}

/// A file ready for download
#[derive(Clone, Debug, PartialEq)]
pub struct ExportPayload {
    pub bytes: Vec<u8>,
    pub filename: &'static str,
    pub mime_type: &'static str,
}

/// Error body returned at the boundary
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&DataError> for ErrorResponse {
    fn from(err: &DataError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// The current table plus the last chart configuration that rendered
#[derive(Default)]
pub struct Session {
    settings: Settings,
    table: RwLock<Option<Arc<DataTable>>>,
    last_chart: RwLock<Option<ChartConfig>>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            table: RwLock::new(None),
            last_chart: RwLock::new(None),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Current table, if one has been uploaded
    pub fn snapshot(&self) -> Option<Arc<DataTable>> {
        self.table.read().clone()
    }

    fn require_table(&self) -> DataResult<Arc<DataTable>> {
        self.snapshot().ok_or(DataError::NoData)
    }

    /// Load, normalize and classify an upload, then make it the current table.
    ///
    /// On any error the previous table stays in place.
    pub fn upload(&self, filename: &str, bytes: &[u8]) -> DataResult<UploadResponse> {
        let size = bytes.len() as u64;
        if size > self.settings.max_upload_bytes() {
            return Err(DataError::TooLarge {
                size_mb: size.div_ceil(BYTES_PER_MB),
                max_mb: self.settings.max_upload_mb,
            });
        }

        let format = FileFormat::from_filename(filename)?;
        let (table, elapsed_ms) = measure(|| load(bytes, format).map(normalize));
        let table = table?;
        let column_info = classify(&table);

        let response = UploadResponse {
            success: true,
            data: (0..table.row_count().min(self.settings.preview_rows))
                .map(|row| table.row_to_json(row))
                .collect(),
            headers: table.column_names(),
            total_rows: table.row_count(),
            total_columns: table.column_count(),
            column_info,
        };

        tracing::info!(
            "Uploaded {} ({} rows x {} cols) in {:.2}ms",
            filename,
            response.total_rows,
            response.total_columns,
            elapsed_ms
        );

        *self.table.write() = Some(Arc::new(table));
        Ok(response)
    }

    /// Build a chart from the current table.
    ///
    /// A chart that cannot be drawn is reported as `ChartUnavailable`; the
    /// reason is logged rather than returned in the message.
    pub fn generate_chart<R: ChartRenderer>(
        &self,
        mut config: ChartConfig,
        renderer: &R,
    ) -> DataResult<ChartResponse<R::Artifact>> {
        let table = self.require_table()?;
        if config.title.trim().is_empty() {
            config.title = self.settings.default_title.clone();
        }

        match build(&table, &config, renderer) {
            ChartOutcome::Rendered(chart) => {
                *self.last_chart.write() = Some(config.clone());
                Ok(ChartResponse {
                    success: true,
                    chart,
                    config,
                })
            }
            ChartOutcome::CannotRender(reason) => {
                tracing::warn!(
                    chart_type = config.chart_type.label(),
                    "Chart generation failed: {}",
                    reason
                );
                Err(DataError::ChartUnavailable(reason))
            }
        }
    }

    /// Serialize the current table for download; `selector` is `csv` or `json`
    pub fn export(&self, selector: &str) -> DataResult<ExportPayload> {
        let format: ExportFormat = selector.parse()?;
        let table = self.require_table()?;
        let _timer = StageTimer::start(Stage::Export);
        let bytes = format.export(&table);

        tracing::info!("Exported {} bytes as {}", bytes.len(), format.filename());

        Ok(ExportPayload {
            bytes,
            filename: format.filename(),
            mime_type: format.mime_type(),
        })
    }

    /// The last chart configuration that rendered, as a JSON download
    pub fn export_chart_config(&self) -> DataResult<ExportPayload> {
        let config = self.last_chart_config().ok_or(DataError::NoData)?;
        Ok(ExportPayload {
            bytes: chart_config_to_json(&config),
            filename: EXPORT_CHART_CONFIG_FILENAME,
            mime_type: "application/json",
        })
    }

    pub fn last_chart_config(&self) -> Option<ChartConfig> {
        self.last_chart.read().clone()
    }

    pub fn stats(&self) -> DataResult<DataStats> {
        Ok(DataStats::from_table(&*self.require_table()?))
    }
}
