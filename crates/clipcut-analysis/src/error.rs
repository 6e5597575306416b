//! Analysis client error types.

use thiserror::Error;

pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Analysis service unreachable: {0}")]
    Unreachable(String),

    #[error("Analysis service returned {status}: {body}")]
    BadStatus { status: u16, body: String },

    #[error("Failed to parse analysis response: {0}")]
    Unparseable(String),

    #[error("Analysis service returned no usable clip proposals")]
    NoUsableClips,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AnalysisError {
    pub fn unreachable(msg: impl Into<String>) -> Self {
        Self::Unreachable(msg.into())
    }

    pub fn unparseable(msg: impl Into<String>) -> Self {
        Self::Unparseable(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
