//! Engine error types.

use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed or missing transcript input; the run aborts before
    /// candidate collection.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid interval: {0}")]
    Interval(#[from] clipcut_models::IntervalError),
}

impl EngineError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
