//! Near-duplicate candidate suppression.
//!
//! Candidates are scanned in input order; the first-seen proposal for a
//! moment wins and later near-duplicates are dropped. The default check is
//! start-time proximity only (the observed legacy behavior): two candidates
//! with close starts are duplicates even when their ends differ wildly,
//! while truly overlapping intervals with distant starts both survive.
//! [`DedupStrategy::IntervalOverlap`] opts into the stricter full-overlap
//! test.

use clipcut_models::{CandidateClip, DedupStrategy};
use tracing::debug;

/// Filter near-duplicates from a candidate pool, preserving input order
/// among survivors.
pub fn deduplicate(
    candidates: Vec<CandidateClip>,
    overlap_tolerance_seconds: f64,
    strategy: DedupStrategy,
) -> Vec<CandidateClip> {
    let mut accepted: Vec<CandidateClip> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let duplicate_of = accepted.iter().position(|existing| match strategy {
            DedupStrategy::StartProximity => {
                (candidate.interval.start - existing.interval.start).abs()
                    < overlap_tolerance_seconds
            }
            DedupStrategy::IntervalOverlap => candidate.interval.overlaps(&existing.interval),
        });

        match duplicate_of {
            Some(idx) => {
                debug!(
                    start = candidate.interval.start,
                    kept_start = accepted[idx].interval.start,
                    "Dropping near-duplicate candidate"
                );
            }
            None => accepted.push(candidate),
        }
    }

    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipcut_models::{ClipSource, TimeInterval};

    fn candidate(start: f64, end: f64) -> CandidateClip {
        CandidateClip::new(
            TimeInterval::new(start, end).unwrap(),
            "text",
            50.0,
            ClipSource::Heuristic,
        )
    }

    #[test]
    fn test_close_starts_second_dropped() {
        // Starts at 10.0 and 12.0 are within the 5s tolerance
        let survivors = deduplicate(
            vec![candidate(10.0, 40.0), candidate(12.0, 70.0)],
            5.0,
            DedupStrategy::StartProximity,
        );
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].interval.start, 10.0);
    }

    #[test]
    fn test_distant_starts_both_kept() {
        let survivors = deduplicate(
            vec![candidate(10.0, 40.0), candidate(20.0, 50.0)],
            5.0,
            DedupStrategy::StartProximity,
        );
        assert_eq!(survivors.len(), 2);
    }

    #[test]
    fn test_start_proximity_ignores_true_overlap() {
        // Intervals overlap heavily but starts are 6s apart: legacy mode
        // keeps both.
        let survivors = deduplicate(
            vec![candidate(10.0, 60.0), candidate(16.0, 55.0)],
            5.0,
            DedupStrategy::StartProximity,
        );
        assert_eq!(survivors.len(), 2);
    }

    #[test]
    fn test_interval_overlap_mode_is_stricter() {
        let survivors = deduplicate(
            vec![candidate(10.0, 60.0), candidate(16.0, 55.0)],
            5.0,
            DedupStrategy::IntervalOverlap,
        );
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].interval.start, 10.0);
    }

    #[test]
    fn test_survivor_starts_respect_tolerance() {
        let pool: Vec<CandidateClip> = [0.0, 2.0, 4.0, 9.0, 11.0, 30.0]
            .iter()
            .map(|&s| candidate(s, s + 20.0))
            .collect();
        let survivors = deduplicate(pool, 5.0, DedupStrategy::StartProximity);
        for (i, a) in survivors.iter().enumerate() {
            for b in survivors.iter().skip(i + 1) {
                assert!((a.interval.start - b.interval.start).abs() >= 5.0);
            }
        }
    }

    #[test]
    fn test_input_order_preserved() {
        let survivors = deduplicate(
            vec![candidate(50.0, 70.0), candidate(10.0, 30.0), candidate(90.0, 110.0)],
            5.0,
            DedupStrategy::StartProximity,
        );
        let starts: Vec<f64> = survivors.iter().map(|c| c.interval.start).collect();
        assert_eq!(starts, vec![50.0, 10.0, 90.0]);
    }
}
