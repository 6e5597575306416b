//! Structured run logging utilities.
//!
//! Provides consistent, structured logging for pipeline runs with
//! tracing spans and contextual information.

use tracing::{error, info, warn, Span};

use clipcut_engine::ProgressObserver;

/// Run logger for structured logging with consistent formatting.
///
/// Provides a simple interface for logging run lifecycle events
/// with automatic contextual information (run ID, stage).
#[derive(Debug, Clone)]
pub struct RunLogger {
    run_id: String,
}

impl RunLogger {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
        }
    }

    /// Log the start of a run.
    pub fn log_start(&self, message: &str) {
        info!(run_id = %self.run_id, "Run started: {}", message);
    }

    /// Log a progress update during the run.
    pub fn log_progress(&self, stage: &str, message: &str) {
        info!(run_id = %self.run_id, stage, "Run progress: {}", message);
    }

    /// Log a warning during the run.
    pub fn log_warning(&self, message: &str) {
        warn!(run_id = %self.run_id, "Run warning: {}", message);
    }

    /// Log an error during the run.
    pub fn log_error(&self, message: &str) {
        error!(run_id = %self.run_id, "Run error: {}", message);
    }

    /// Log the completion of the run.
    pub fn log_completion(&self, message: &str) {
        info!(run_id = %self.run_id, "Run completed: {}", message);
    }

    /// Create a tracing span for this run.
    pub fn create_span(&self) -> Span {
        tracing::info_span!("pipeline_run", run_id = %self.run_id)
    }
}

/// Progress observer that reports through tracing.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl ProgressObserver for LoggingObserver {
    fn on_progress(&self, step: &str, percent: f32) {
        info!(step, percent, "Progress");
    }
}

/// Maps an inner observer's 0-100 range onto a sub-range of the run.
///
/// The scheduler reports its own 0-100 stage percentages; within a full
/// pipeline run those land between the analysis and render steps.
pub struct ScaledObserver<'a> {
    inner: &'a dyn ProgressObserver,
    lo: f32,
    hi: f32,
}

impl<'a> ScaledObserver<'a> {
    pub fn new(inner: &'a dyn ProgressObserver, lo: f32, hi: f32) -> Self {
        Self { inner, lo, hi }
    }
}

impl ProgressObserver for ScaledObserver<'_> {
    fn on_progress(&self, step: &str, percent: f32) {
        let scaled = self.lo + (self.hi - self.lo) * (percent / 100.0);
        self.inner.on_progress(step, scaled);
    }
}
