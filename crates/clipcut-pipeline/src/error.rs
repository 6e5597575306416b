//! Pipeline error types.

use thiserror::Error;

use clipcut_analysis::AnalysisError;
use clipcut_engine::EngineError;
use clipcut_media::MediaError;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors that can abort a pipeline run.
///
/// Per-clip render failures are NOT represented here: they are collected
/// into the run's [`clipcut_models::RenderReport`] and never abort the
/// batch. This enum covers stage-level failures only.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
