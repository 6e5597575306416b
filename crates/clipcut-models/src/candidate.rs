//! Candidate and final clip models.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::interval::TimeInterval;

/// Maximum characters kept in a final clip description before truncation.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// Which upstream path proposed a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClipSource {
    /// Keyword-based engagement scoring over raw segments
    Heuristic,
    /// Similarity-merged topic groups fed through the heuristic scorer
    Semantic,
    /// External content-analysis service proposal
    External,
}

impl ClipSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClipSource::Heuristic => "heuristic",
            ClipSource::Semantic => "semantic",
            ClipSource::External => "external",
        }
    }
}

/// A proposed clip, not yet validated against duration/count constraints.
///
/// Immutable once created; constraint enforcement produces adjusted copies.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CandidateClip {
    /// Proposed time range
    pub interval: TimeInterval,

    /// Transcript text or service-provided description
    pub text: String,

    /// Engagement score (0-100). Irrelevant for external proposals, which
    /// are kept in service order rather than re-ranked.
    pub score: f64,

    /// Upstream path that proposed this candidate
    pub source: ClipSource,
}

impl CandidateClip {
    pub fn new(
        interval: TimeInterval,
        text: impl Into<String>,
        score: f64,
        source: ClipSource,
    ) -> Self {
        Self {
            interval,
            text: text.into(),
            score,
            source,
        }
    }

    /// Copy of this candidate with a different interval.
    pub fn with_interval(&self, interval: TimeInterval) -> Self {
        Self {
            interval,
            text: self.text.clone(),
            score: self.score,
            source: self.source,
        }
    }
}

/// A candidate that survived deduplication and constraint enforcement and
/// was selected into the output sequence. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FinalClip {
    /// 1-based position in the final sequence
    pub id: u32,

    /// Final (possibly adjusted) time range
    pub interval: TimeInterval,

    /// Description, truncated to [`MAX_DESCRIPTION_CHARS`] with an ellipsis
    pub description: String,

    /// Upstream path that proposed the underlying candidate
    pub source: ClipSource,

    /// When the clip definition was created
    pub created_at: DateTime<Utc>,
}

impl FinalClip {
    /// Build a final clip from a surviving candidate.
    ///
    /// Truncation counts characters, not bytes, so multi-byte text never
    /// splits a code point.
    pub fn from_candidate(id: u32, candidate: &CandidateClip) -> Self {
        Self {
            id,
            interval: candidate.interval,
            description: truncate_description(&candidate.text),
            source: candidate.source,
            created_at: Utc::now(),
        }
    }

    /// Clip duration in seconds.
    pub fn duration(&self) -> f64 {
        self.interval.duration()
    }
}

/// Truncate a description to [`MAX_DESCRIPTION_CHARS`], appending an
/// ellipsis when anything was cut.
pub fn truncate_description(text: &str) -> String {
    if text.chars().count() > MAX_DESCRIPTION_CHARS {
        let mut out: String = text.chars().take(MAX_DESCRIPTION_CHARS).collect();
        out.push_str("...");
        out
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_description_unchanged() {
        assert_eq!(truncate_description("short text"), "short text");
    }

    #[test]
    fn test_truncate_long_description() {
        let long = "a".repeat(250);
        let truncated = truncate_description(&long);
        assert_eq!(truncated.chars().count(), MAX_DESCRIPTION_CHARS + 3);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_truncate_exactly_at_boundary() {
        let exact = "b".repeat(MAX_DESCRIPTION_CHARS);
        assert_eq!(truncate_description(&exact), exact);
    }

    #[test]
    fn test_truncate_multibyte_safe() {
        let long = "é".repeat(300);
        let truncated = truncate_description(&long);
        assert_eq!(truncated.chars().count(), MAX_DESCRIPTION_CHARS + 3);
    }

    #[test]
    fn test_final_clip_from_candidate() {
        let candidate = CandidateClip::new(
            TimeInterval::new(10.0, 40.0).unwrap(),
            "great moment",
            72.0,
            ClipSource::Heuristic,
        );
        let clip = FinalClip::from_candidate(1, &candidate);
        assert_eq!(clip.id, 1);
        assert_eq!(clip.description, "great moment");
        assert_eq!(clip.source, ClipSource::Heuristic);
        assert!((clip.duration() - 30.0).abs() < 1e-9);
    }
}
