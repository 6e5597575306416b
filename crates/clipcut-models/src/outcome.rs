//! Pipeline run outcome models.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::candidate::FinalClip;

/// A clip that was rendered to disk.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RenderedClip {
    /// The clip definition that was rendered
    pub clip: FinalClip,

    /// Path to the rendered video file
    pub clip_path: String,

    /// Path to the extracted thumbnail, when thumbnailing succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_path: Option<String>,
}

/// A per-clip render failure, recovered locally and reported at the end.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RenderFailure {
    /// 1-based clip id that failed
    pub clip_id: u32,

    /// Collaborator-reported failure message
    pub error: String,
}

/// Accumulated render results: successes kept, failures recorded.
///
/// A failure rendering one clip never aborts the remaining clips.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct RenderReport {
    pub rendered: Vec<RenderedClip>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<RenderFailure>,
}

impl RenderReport {
    pub fn record_success(&mut self, rendered: RenderedClip) {
        self.rendered.push(rendered);
    }

    pub fn record_failure(&mut self, clip_id: u32, error: impl Into<String>) {
        self.failures.push(RenderFailure {
            clip_id,
            error: error.into(),
        });
    }
}

/// Structured result of one pipeline run.
///
/// Stage-level failures produce `success: false` with an error string
/// instead of raising past the pipeline boundary. An empty clip list with
/// `success: true` is a valid "no clips found" result.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RunOutcome {
    /// Whether the run completed its stages
    pub success: bool,

    /// Terminal error for a failed run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// When the outcome was produced
    pub timestamp: DateTime<Utc>,

    /// Path to the transcript artifact, when transcription ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript_path: Option<String>,

    /// Path to the analysis artifact, when analysis ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_path: Option<String>,

    /// Path to the source thumbnail, when extracted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_path: Option<String>,

    /// Render results for the selected clips
    #[serde(default)]
    pub render: RenderReport,

    /// Number of clips successfully generated
    pub total_clips_generated: usize,
}

impl RunOutcome {
    /// Successful outcome wrapping a render report.
    pub fn success(render: RenderReport) -> Self {
        let total = render.rendered.len();
        Self {
            success: true,
            error: None,
            timestamp: Utc::now(),
            transcript_path: None,
            analysis_path: None,
            thumbnail_path: None,
            render,
            total_clips_generated: total,
        }
    }

    /// Failed outcome carrying the terminal error.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            timestamp: Utc::now(),
            transcript_path: None,
            analysis_path: None,
            thumbnail_path: None,
            render: RenderReport::default(),
            total_clips_generated: 0,
        }
    }
}
