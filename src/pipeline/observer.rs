//! Pipeline observer: hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries and per fragment
//! without coupling to stage logic. Every hook has an empty default, so an
//! observer only implements what it needs.

use std::time::{Duration, Instant};

use crate::types::{ScoreGroup, ScoreMap, Source};

/// Extraction + aggregation over all document fragments
pub const STAGE_EXTRACT: &str = "extract";
/// Ranking of the global score map
pub const STAGE_RANK: &str = "rank";

/// Timing and size summary for one completed stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageReport {
    pub elapsed: Duration,
    /// Number of items the stage produced (phrases or ranks)
    pub items: usize,
}

impl StageReport {
    pub fn new(elapsed: Duration, items: usize) -> Self {
        Self { elapsed, items }
    }
}

/// Wall-clock timer for a stage.
#[derive(Debug, Clone, Copy)]
pub struct StageClock {
    started: Instant,
}

impl StageClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Callbacks invoked by [`super::runner::Pipeline::run`].
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    /// Called once per fragment, after extraction and before merging.
    fn on_fragment(&mut self, _source: Source, _phrases: &ScoreMap) {}

    fn on_ranking(&mut self, _groups: &[ScoreGroup]) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}
