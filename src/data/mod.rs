//! Data loading, cleaning and charting
//!
//! Raw upload bytes flow through this module in stages:
//! - `loader` picks a parser from the file extension (CSV, JSON, Excel)
//! - `normalizer` drops empty rows/columns, cleans headers and fills gaps
//! - `classifier` describes each column and the table as a whole
//! - `chart_engine` shapes the table for a chart request
//! - `export` writes the table back out as CSV or JSON
//!
//! ## Error Handling
//!
//! All data operations return `DataResult<T>` which uses the `DataError` type.
//! Chart building is the exception: it returns a `ChartOutcome`, and a chart
//! that cannot be drawn is reported as `CannotRender` with a `RenderFailure`.

mod chart_engine;
mod classifier;
mod csv_parser;
mod encoding;
mod error;
mod export;
mod json_parser;
mod loader;
mod normalizer;
mod spreadsheet;

pub use chart_engine::*;
pub use classifier::*;
pub use csv_parser::*;
pub use encoding::*;
pub use error::*;
pub use export::*;
pub use json_parser::*;
pub use loader::*;
pub use normalizer::*;
pub use spreadsheet::*;
