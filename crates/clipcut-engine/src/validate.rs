//! Transcript validation.
//!
//! Run before candidate collection: a transcript with no segments or with
//! malformed timing aborts the run instead of producing nonsense intervals
//! downstream. An empty candidate pool later is fine; an empty transcript
//! is not.

use clipcut_models::{TimeInterval, Transcript, TranscriptSegment};

use crate::error::{EngineError, EngineResult};

/// Check that a transcript has segments and well-formed timing throughout.
pub fn validate_transcript(transcript: &Transcript) -> EngineResult<()> {
    if transcript.segments.is_empty() {
        return Err(EngineError::validation("transcript has no segments"));
    }
    for segment in &transcript.segments {
        validate_segment(segment)?;
    }
    Ok(())
}

fn validate_segment(segment: &TranscriptSegment) -> EngineResult<()> {
    if !segment.start.is_finite() || !segment.end.is_finite() {
        return Err(EngineError::validation(format!(
            "segment {} has non-finite timing",
            segment.id
        )));
    }
    // Ordering invariants are the interval type's own rules
    TimeInterval::new(segment.start, segment.end)?;
    Ok(())
}
