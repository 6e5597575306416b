//! Selection constraints and run configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which upstream path feeds the scheduler for a run.
///
/// The two modes are mutually exclusive per run: heuristic candidates are
/// score-ranked, external candidates keep the service's proposal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Heuristic scoring (optionally over semantic groups), ranked by score
    #[default]
    Heuristic,
    /// External content-analysis service, kept in service order
    External,
}

impl SelectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMode::Heuristic => "heuristic",
            SelectionMode::External => "external",
        }
    }
}

impl std::str::FromStr for SelectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heuristic" => Ok(SelectionMode::Heuristic),
            "external" => Ok(SelectionMode::External),
            other => Err(format!("unknown selection mode: {other}")),
        }
    }
}

/// How near-duplicate candidates are detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum DedupStrategy {
    /// Drop a candidate whose start lies within the overlap tolerance of an
    /// already-accepted candidate's start. Observed legacy behavior: ends
    /// are ignored entirely.
    #[default]
    StartProximity,
    /// Drop a candidate whose interval truly overlaps an accepted one.
    IntervalOverlap,
}

impl std::str::FromStr for DedupStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start_proximity" => Ok(DedupStrategy::StartProximity),
            "interval_overlap" => Ok(DedupStrategy::IntervalOverlap),
            other => Err(format!("unknown dedup strategy: {other}")),
        }
    }
}

/// Duration/count constraints applied during selection.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SelectionConstraints {
    /// Preferred minimum clip duration in seconds
    pub min_duration: f64,

    /// Maximum clip duration in seconds; longer candidates are trimmed
    pub max_duration: f64,

    /// Candidates shorter than this are dropped outright
    pub absolute_minimum_duration: f64,

    /// Maximum number of clips emitted per run
    pub max_clips: usize,

    /// Minimum separation between accepted candidates' start times
    pub overlap_tolerance_seconds: f64,

    /// Re-center and extend sub-minimum candidates to exactly
    /// `min_duration` instead of keeping them as natural segments
    #[serde(default)]
    pub extend_short_clips: bool,

    /// Near-duplicate detection strategy
    #[serde(default)]
    pub dedup_strategy: DedupStrategy,
}

impl Default for SelectionConstraints {
    fn default() -> Self {
        Self {
            min_duration: 30.0,
            max_duration: 90.0,
            absolute_minimum_duration: 5.0,
            max_clips: 5,
            overlap_tolerance_seconds: 5.0,
            extend_short_clips: false,
            dedup_strategy: DedupStrategy::StartProximity,
        }
    }
}
