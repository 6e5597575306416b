//! Analysis artifact models.
//!
//! The analysis result is the engine's output artifact for downstream
//! consumption: an ordered clip list plus optional error string, mirroring
//! the wire shape of the external content-analysis service.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single clip proposal as exchanged with the content-analysis service.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClipProposal {
    /// Start time in seconds
    pub start_time: f64,

    /// End time in seconds
    pub end_time: f64,

    /// Why this moment is engaging / caption text
    pub description: String,
}

impl ClipProposal {
    pub fn duration(&self) -> f64 {
        (self.end_time - self.start_time).max(0.0)
    }
}

/// Analysis output artifact.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisResult {
    /// Ordered clip proposals
    pub clips: Vec<ClipProposal>,

    /// Detected transcript language, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Total source duration in seconds, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<f64>,

    /// Terminal error for a failed analysis stage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResult {
    /// Successful result carrying ordered proposals.
    pub fn ok(clips: Vec<ClipProposal>) -> Self {
        Self {
            clips,
            language: None,
            total_duration: None,
            error: None,
        }
    }

    /// Failed result carrying only the error string.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            clips: Vec::new(),
            language: None,
            total_duration: None,
            error: Some(error.into()),
        }
    }
}
