//! Pipeline configuration.

use std::path::PathBuf;

use clipcut_media::TargetAspect;
use clipcut_models::{DedupStrategy, SelectionConstraints, SelectionMode};

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Duration/count constraints applied during selection
    pub constraints: SelectionConstraints,
    /// Candidate source: heuristic scoring or the external analysis service
    pub mode: SelectionMode,
    /// Cosine similarity threshold for semantic grouping
    pub similarity_threshold: f32,
    /// Directory for artifacts and rendered output
    pub work_dir: PathBuf,
    /// Output aspect for rendered clips
    pub target_aspect: TargetAspect,
    /// Burn subtitles into rendered clips
    pub burn_subtitles: bool,
    /// Whisper model size: tiny, base, small, medium, large
    pub whisper_model: String,
    /// Transcription language; auto-detected when unset
    pub language: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            constraints: SelectionConstraints::default(),
            mode: SelectionMode::Heuristic,
            similarity_threshold: 0.7,
            work_dir: PathBuf::from("/tmp/clipcut"),
            target_aspect: TargetAspect::Portrait,
            burn_subtitles: false,
            whisper_model: "base".to_string(),
            language: None,
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    ///
    /// Unset or unparseable variables fall back to their defaults.
    pub fn from_env() -> Self {
        let defaults = SelectionConstraints::default();
        let constraints = SelectionConstraints {
            min_duration: env_parse("CLIPCUT_MIN_DURATION_SECS", defaults.min_duration),
            max_duration: env_parse("CLIPCUT_MAX_DURATION_SECS", defaults.max_duration),
            absolute_minimum_duration: env_parse(
                "CLIPCUT_ABS_MIN_DURATION_SECS",
                defaults.absolute_minimum_duration,
            ),
            max_clips: env_parse("CLIPCUT_MAX_CLIPS", defaults.max_clips),
            overlap_tolerance_seconds: env_parse(
                "CLIPCUT_OVERLAP_TOLERANCE_SECS",
                defaults.overlap_tolerance_seconds,
            ),
            extend_short_clips: env_parse("CLIPCUT_EXTEND_SHORT_CLIPS", false),
            dedup_strategy: env_parse("CLIPCUT_DEDUP_STRATEGY", DedupStrategy::default()),
        };

        Self {
            constraints,
            mode: env_parse("CLIPCUT_MODE", SelectionMode::default()),
            similarity_threshold: env_parse("CLIPCUT_SIMILARITY_THRESHOLD", 0.7),
            work_dir: std::env::var("CLIPCUT_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/tmp/clipcut")),
            target_aspect: env_parse("CLIPCUT_TARGET_ASPECT", TargetAspect::Portrait),
            burn_subtitles: env_parse("CLIPCUT_BURN_SUBTITLES", false),
            whisper_model: std::env::var("CLIPCUT_WHISPER_MODEL")
                .unwrap_or_else(|_| "base".to_string()),
            language: std::env::var("CLIPCUT_LANGUAGE").ok(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
