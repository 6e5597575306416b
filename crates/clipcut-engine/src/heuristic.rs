//! Keyword-based engagement scoring.
//!
//! The legacy selection path: estimates how shareable a transcript segment
//! is from lexical cues and duration, without any external service. Pure
//! and deterministic.

/// Fixed keyword categories checked by case-insensitive substring match.
const QUESTION_CUES: &[&str] = &["how", "why", "what", "when", "where", "?"];
const EXCITEMENT_CUES: &[&str] = &[
    "amazing", "incredible", "unbelievable", "wow", "crazy", "insane", "!",
];
const ACTIONABLE_CUES: &[&str] = &[
    "you should",
    "you need",
    "here's how",
    "the trick",
    "tip",
    "step",
    "try this",
];
const EMOTIONAL_CUES: &[&str] = &[
    "love", "hate", "afraid", "excited", "proud", "heartbreaking", "feel",
];
const NUMERIC_CUES: &[&str] = &[
    "percent", "%", "million", "billion", "thousand", "double", "triple", "number one",
];

/// Engagement scorer over transcript segments.
///
/// Score = (total cue hits across the five categories) * 10, scaled by a
/// duration factor that rewards shorter segments, clamped to 0-100.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicScorer;

impl HeuristicScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score text with its duration in seconds into a 0-100 engagement score.
    pub fn score_text(&self, text: &str, duration_secs: f64) -> u32 {
        let lowered = text.to_lowercase();

        let hits: usize = [
            QUESTION_CUES,
            EXCITEMENT_CUES,
            ACTIONABLE_CUES,
            EMOTIONAL_CUES,
            NUMERIC_CUES,
        ]
        .iter()
        .map(|cues| cues.iter().filter(|cue| lowered.contains(*cue)).count())
        .sum();

        // Shorter segments make tighter clips; 30s is the sweet spot.
        let duration_factor = (30.0 / duration_secs.max(1.0)).clamp(0.5, 1.0);

        ((hits as f64 * 10.0 * duration_factor).round() as i64).clamp(0, 100) as u32
    }
}
