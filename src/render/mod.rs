//! Chart rendering
//!
//! The chart engine produces a backend-neutral [`ChartSpec`]; a
//! [`ChartRenderer`] turns it into whatever artifact a front end needs.
//! [`PlotlyRenderer`] emits a Plotly figure as JSON.

mod palette;
mod plotly;

pub use palette::*;
pub use plotly::*;

use crate::data::ChartSpec;
use thiserror::Error;

/// Errors a renderer can report
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Unsupported chart: {0}")]
    Unsupported(String),
}

/// A charting backend
pub trait ChartRenderer {
    type Artifact;

    fn render(&self, spec: &ChartSpec) -> Result<Self::Artifact, RenderError>;
}
