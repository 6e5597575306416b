//! Duration constraint enforcement.
//!
//! Applied to each surviving candidate independently:
//! 1. shorter than the absolute minimum: dropped outright;
//! 2. shorter than the preferred minimum: kept as a natural segment, or
//!    re-centered and extended to exactly `min_duration` when
//!    `extend_short_clips` is set;
//! 3. longer than the maximum: trimmed, keeping the start fixed;
//! 4. finally clamped to `[0, source_duration]`.

use clipcut_models::{CandidateClip, SelectionConstraints, TimeInterval};
use tracing::debug;

/// Adjust a candidate to satisfy the duration constraints, or drop it.
///
/// Returns `None` when the candidate is too short to be useful. Adjustments
/// never mutate the input; a new candidate is produced.
pub fn enforce_constraints(
    candidate: &CandidateClip,
    constraints: &SelectionConstraints,
    source_duration: f64,
) -> Option<CandidateClip> {
    let duration = candidate.interval.duration();

    if duration < constraints.absolute_minimum_duration {
        debug!(
            start = candidate.interval.start,
            duration, "Dropping candidate below absolute minimum duration"
        );
        return None;
    }

    let mut interval = candidate.interval;

    if duration < constraints.min_duration {
        if constraints.extend_short_clips {
            let start = (interval.center() - constraints.min_duration / 2.0).max(0.0);
            interval = TimeInterval {
                start,
                end: start + constraints.min_duration,
            };
        }
        // Otherwise keep as a natural segment: complete, naturally bounded.
    } else if duration > constraints.max_duration {
        interval = TimeInterval {
            start: interval.start,
            end: interval.start + constraints.max_duration,
        };
    }

    let interval = interval.clamped(source_duration);
    if interval.end <= interval.start {
        debug!(
            start = interval.start,
            "Dropping candidate emptied by source-duration clamp"
        );
        return None;
    }

    Some(candidate.with_interval(interval))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipcut_models::ClipSource;

    const SOURCE: f64 = 600.0;

    fn candidate(start: f64, end: f64) -> CandidateClip {
        CandidateClip::new(
            TimeInterval::new(start, end).unwrap(),
            "text",
            50.0,
            ClipSource::Heuristic,
        )
    }

    fn constraints(extend: bool) -> SelectionConstraints {
        SelectionConstraints {
            extend_short_clips: extend,
            ..SelectionConstraints::default()
        }
    }

    #[test]
    fn test_below_absolute_minimum_dropped() {
        // 3s candidate with 5s absolute minimum
        let c = candidate(10.0, 13.0);
        assert!(enforce_constraints(&c, &constraints(false), SOURCE).is_none());
    }

    #[test]
    fn test_natural_segment_kept_unextended() {
        // 10s is below min_duration=30 but above the 5s absolute minimum
        let c = candidate(10.0, 20.0);
        let out = enforce_constraints(&c, &constraints(false), SOURCE).unwrap();
        assert_eq!(out.interval.start, 10.0);
        assert_eq!(out.interval.end, 20.0);
    }

    #[test]
    fn test_mid_range_kept_unchanged() {
        // 40s sits between min and max
        let c = candidate(100.0, 140.0);
        let out = enforce_constraints(&c, &constraints(false), SOURCE).unwrap();
        assert_eq!(out.interval.start, 100.0);
        assert_eq!(out.interval.end, 140.0);
    }

    #[test]
    fn test_over_max_trimmed_keeping_start() {
        // 95s trimmed to exactly max_duration=90
        let c = candidate(100.0, 195.0);
        let out = enforce_constraints(&c, &constraints(false), SOURCE).unwrap();
        assert_eq!(out.interval.start, 100.0);
        assert_eq!(out.interval.end, 190.0);
        assert!((out.interval.duration() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_extend_short_recenters() {
        // 10s candidate centered at 105.0 extends to exactly 30s
        let c = candidate(100.0, 110.0);
        let out = enforce_constraints(&c, &constraints(true), SOURCE).unwrap();
        assert!((out.interval.duration() - 30.0).abs() < 1e-9);
        assert!((out.interval.start - 90.0).abs() < 1e-9);
        assert!((out.interval.end - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_extend_near_media_start_clamps_to_zero() {
        // Center at 4.0; re-centered start would be negative
        let c = candidate(0.0, 8.0);
        let out = enforce_constraints(&c, &constraints(true), SOURCE).unwrap();
        assert_eq!(out.interval.start, 0.0);
        assert!((out.interval.end - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_end_clamped_to_source_duration() {
        let c = candidate(590.0, 640.0);
        let out = enforce_constraints(&c, &constraints(false), SOURCE).unwrap();
        assert_eq!(out.interval.end, SOURCE);
    }

    #[test]
    fn test_adjustment_does_not_mutate_input() {
        let c = candidate(100.0, 195.0);
        let _ = enforce_constraints(&c, &constraints(false), SOURCE);
        assert_eq!(c.interval.end, 195.0);
    }
}
