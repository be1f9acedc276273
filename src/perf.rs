//! Pipeline timing.
//!
//! Every upload and chart request passes through a fixed set of [`Stage`]s.
//! A [`StageTimer`] measures one stage and reports it when dropped: stages
//! slower than their threshold are logged as slow operations, and with the
//! `profiling` feature every stage is traced with its nesting depth.
//!
//! ```toml
//! [dependencies]
//! autoviz = { features = ["profiling"] }
//! ```
//!
//! ```ignore
//! use autoviz::perf::Stage;
//! use autoviz::profile_stage;
//!
//! fn classify(table: &DataTable) -> ColumnInfo {
//!     profile_stage!(Stage::Classify);
//!     // ...
//! }
//! ```

use crate::constants::{SLOW_CHART_MS, SLOW_LOAD_MS, SLOW_TRANSFORM_MS};
use std::fmt;
use std::time::Instant;

/// Time a stage only when the `profiling` feature is on
#[macro_export]
macro_rules! profile_stage {
    ($stage:expr) => {
        #[cfg(feature = "profiling")]
        let _stage_timer = $crate::perf::StageTimer::start($stage);
        #[cfg(not(feature = "profiling"))]
        let _ = $stage;
    };
}

pub use profile_stage;

// ============================================================================
// Stages
// ============================================================================

/// Steps of the upload / chart / export pipeline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Load,
    Normalize,
    Classify,
    Chart,
    Export,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Load => "load",
            Stage::Normalize => "normalize",
            Stage::Classify => "classify",
            Stage::Chart => "chart",
            Stage::Export => "export",
        }
    }

    /// Duration above which the stage counts as slow
    pub fn slow_threshold_ms(&self) -> f64 {
        match self {
            Stage::Load => SLOW_LOAD_MS,
            Stage::Chart => SLOW_CHART_MS,
            Stage::Normalize | Stage::Classify | Stage::Export => SLOW_TRANSFORM_MS,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Stage Timer
// ============================================================================

#[cfg(feature = "profiling")]
thread_local! {
    static STAGE_DEPTH: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// Measures one stage from `start` until drop
pub struct StageTimer {
    stage: Stage,
    started: Instant,
    #[cfg(feature = "profiling")]
    depth: usize,
}

impl StageTimer {
    pub fn start(stage: Stage) -> Self {
        #[cfg(feature = "profiling")]
        let depth = STAGE_DEPTH.with(|d| d.replace(d.get() + 1));

        Self {
            stage,
            started: Instant::now(),
            #[cfg(feature = "profiling")]
            depth,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn elapsed_ms(&self) -> f64 {
        elapsed_ms(self.started)
    }

    pub fn is_slow(&self) -> bool {
        self.elapsed_ms() > self.stage.slow_threshold_ms()
    }
}

impl Drop for StageTimer {
    fn drop(&mut self) {
        let elapsed = self.elapsed_ms();

        #[cfg(feature = "profiling")]
        {
            STAGE_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
            tracing::trace!(
                "{}[stage] {}: {:.2}ms",
                "  ".repeat(self.depth),
                self.stage,
                elapsed
            );
        }

        if elapsed > self.stage.slow_threshold_ms() {
            tracing::warn!(
                stage = self.stage.label(),
                elapsed_ms = format!("{:.2}", elapsed),
                threshold_ms = format!("{:.2}", self.stage.slow_threshold_ms()),
                "Slow operation"
            );
        }
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

/// Run `f`, returning its result and the elapsed milliseconds
#[inline]
pub fn measure<T, F: FnOnce() -> T>(f: F) -> (T, f64) {
    let started = Instant::now();
    let result = f();
    (result, elapsed_ms(started))
}
