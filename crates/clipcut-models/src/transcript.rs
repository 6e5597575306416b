//! Transcript artifact models.
//!
//! Matches the JSON shape produced by the speech-to-text collaborator:
//! `{ text, language, segments: [{ id, start, end, text, confidence, words }] }`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Word-level timing inside a transcript segment.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WordTiming {
    pub word: String,
    pub start: f64,
    pub end: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
}

/// A single timed transcript segment.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TranscriptSegment {
    /// Segment index (0-based)
    #[serde(default)]
    pub id: u32,

    /// Start time in seconds
    pub start: f64,

    /// End time in seconds
    pub end: f64,

    /// Spoken text
    pub text: String,

    /// Average log-probability from the speech-to-text engine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// Word-level timestamps, when the engine provides them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<WordTiming>,
}

impl TranscriptSegment {
    /// Create a segment without confidence or word timings.
    pub fn new(id: u32, start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            id,
            start,
            end,
            text: text.into(),
            confidence: None,
            words: Vec::new(),
        }
    }

    /// Segment duration in seconds.
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// Full transcript of a source video.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Transcript {
    /// Concatenated text of all segments
    pub text: String,

    /// Detected language code
    pub language: String,

    /// Ordered timed segments
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    /// Assemble a transcript from ordered segments, joining their text.
    pub fn from_segments(language: impl Into<String>, segments: Vec<TranscriptSegment>) -> Self {
        let text = segments
            .iter()
            .map(|s| s.text.trim())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            text,
            language: language.into(),
            segments,
        }
    }

    /// End time of the last segment, or 0 for an empty transcript.
    pub fn total_duration(&self) -> f64 {
        self.segments.last().map(|s| s.end).unwrap_or(0.0)
    }

    /// True when the transcript carries no usable segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
