//! Pipeline observer: hooks for logging, profiling and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. Use cases include timing stages, counting chunks, and
//! checking stage order in tests.

use std::time::{Duration, Instant};

use crate::nlp::chunker::Chunk;

pub const STAGE_PREPROCESS: &str = "preprocess";
pub const STAGE_SEGMENT: &str = "segment";
pub const STAGE_CHUNK: &str = "chunk";
pub const STAGE_KEYWORDS: &str = "keywords";
pub const STAGE_SENTENCES: &str = "sentences";
pub const STAGE_TOPICS: &str = "topics";
pub const STAGE_ASSEMBLE: &str = "assemble";

/// All stages, in execution order.
pub const STAGES: [&str; 7] = [
    STAGE_PREPROCESS,
    STAGE_SEGMENT,
    STAGE_CHUNK,
    STAGE_KEYWORDS,
    STAGE_SENTENCES,
    STAGE_TOPICS,
    STAGE_ASSEMBLE,
];

/// Wall-clock timer for a single stage.
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

/// What a stage reports when it finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageReport {
    pub elapsed: Duration,
    /// Items the stage produced (sentences, chunks, keywords, ...)
    pub items: Option<usize>,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            items: None,
        }
    }

    pub fn with_items(mut self, items: usize) -> Self {
        self.items = Some(items);
        self
    }
}

/// Receives callbacks at each stage boundary.
///
/// Every method has an empty default, so implementors only override what
/// they need.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    /// Called once per chunk, in order, while keywords are counted.
    fn on_chunk(&mut self, _chunk: &Chunk<'_>) {}
}

/// Observer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Observer that records stage names and reports, for diagnostics.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    pub started: Vec<&'static str>,
    pub finished: Vec<(&'static str, StageReport)>,
    pub chunk_sizes: Vec<usize>,
}

impl PipelineObserver for RecordingObserver {
    fn on_stage_start(&mut self, stage: &'static str) {
        self.started.push(stage);
    }

    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.finished.push((stage, *report));
    }

    fn on_chunk(&mut self, chunk: &Chunk<'_>) {
        self.chunk_sizes.push(chunk.len());
    }
}

impl RecordingObserver {
    /// Items reported by a finished stage.
    pub fn items(&self, stage: &str) -> Option<usize> {
        self.finished
            .iter()
            .find(|(name, _)| *name == stage)
            .and_then(|(_, report)| report.items)
    }
}
