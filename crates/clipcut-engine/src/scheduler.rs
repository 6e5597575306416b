//! Top-level clip scheduling.
//!
//! Linear state machine over one candidate pool:
//! `Collecting -> Deduplicating -> Enforcing -> Ranking -> Finalized`.
//! No branching back; one deterministic pass per run.

use clipcut_models::{CandidateClip, FinalClip, SelectionConstraints, SelectionMode};
use tracing::{debug, info};

use crate::constraints::enforce_constraints;
use crate::dedup::deduplicate;
use crate::progress::ProgressObserver;

/// Scheduler pipeline stage, for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Collecting,
    Deduplicating,
    Enforcing,
    Ranking,
    Finalized,
}

impl SchedulerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Collecting => "collecting",
            Self::Deduplicating => "deduplicating",
            Self::Enforcing => "enforcing",
            Self::Ranking => "ranking",
            Self::Finalized => "finalized",
        }
    }

    fn percent(&self) -> f32 {
        match self {
            Self::Collecting => 0.0,
            Self::Deduplicating => 25.0,
            Self::Enforcing => 50.0,
            Self::Ranking => 75.0,
            Self::Finalized => 100.0,
        }
    }
}

/// Ranks, truncates, and finalizes a collected candidate pool into the
/// ordered [`FinalClip`] list.
#[derive(Debug, Clone)]
pub struct ClipScheduler {
    constraints: SelectionConstraints,
    mode: SelectionMode,
    source_duration: f64,
}

impl ClipScheduler {
    pub fn new(
        constraints: SelectionConstraints,
        mode: SelectionMode,
        source_duration: f64,
    ) -> Self {
        Self {
            constraints,
            mode,
            source_duration,
        }
    }

    /// Run the full selection pass over an already-collected candidate pool.
    ///
    /// An empty pool yields an empty sequence; that is a valid "no clips
    /// found" result, not an error. Re-running on an identical pool and
    /// configuration yields an identical sequence.
    pub fn schedule(
        &self,
        candidates: Vec<CandidateClip>,
        observer: &dyn ProgressObserver,
    ) -> Vec<FinalClip> {
        let mut state = SchedulerState::Collecting;
        observer.on_progress(state.as_str(), state.percent());
        let collected = candidates.len();

        state = SchedulerState::Deduplicating;
        observer.on_progress(state.as_str(), state.percent());
        let survivors = deduplicate(
            candidates,
            self.constraints.overlap_tolerance_seconds,
            self.constraints.dedup_strategy,
        );
        debug!(
            collected,
            after_dedup = survivors.len(),
            "Deduplicated candidate pool"
        );

        state = SchedulerState::Enforcing;
        observer.on_progress(state.as_str(), state.percent());
        let mut enforced: Vec<CandidateClip> = survivors
            .iter()
            .filter_map(|c| enforce_constraints(c, &self.constraints, self.source_duration))
            .collect();

        state = SchedulerState::Ranking;
        observer.on_progress(state.as_str(), state.percent());
        if self.mode == SelectionMode::Heuristic {
            // Descending score, ties broken by earliest start.
            enforced.sort_by(|a, b| {
                b.score
                    .partial_cmp(&a.score)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(
                        a.interval
                            .start
                            .partial_cmp(&b.interval.start)
                            .unwrap_or(std::cmp::Ordering::Equal),
                    )
            });
        }
        // External mode preserves the service's proposal order.

        state = SchedulerState::Finalized;
        let clips: Vec<FinalClip> = enforced
            .iter()
            .take(self.constraints.max_clips)
            .enumerate()
            .map(|(i, c)| FinalClip::from_candidate(i as u32 + 1, c))
            .collect();
        observer.on_progress(state.as_str(), state.percent());

        info!(
            mode = self.mode.as_str(),
            collected,
            selected = clips.len(),
            "Clip scheduling finalized"
        );

        clips
    }
}
