//! autoviz: tabular data ingestion, column profiling and chart generation.
//!
//! Uploads (CSV, JSON, Excel) are parsed into a [`types::DataTable`],
//! normalized, profiled per column, and turned into chart descriptions that
//! a [`render::ChartRenderer`] draws. [`session::Session`] ties the stages
//! together behind the upload / chart / export / stats boundaries.

pub mod constants;
pub mod data;
pub mod logging;
pub mod perf;
pub mod render;
pub mod session;
pub mod settings;
pub mod types;
