//! Time interval value type.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing or validating a [`TimeInterval`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntervalError {
    #[error("start time cannot be negative: {0}")]
    NegativeStart(f64),

    #[error("end time {end} must be after start time {start}")]
    EndNotAfterStart { start: f64, end: f64 },

    #[error("end time {end} exceeds source duration {duration}")]
    ExceedsSourceDuration { end: f64, duration: f64 },
}

/// A half-open time range in seconds relative to the source media.
///
/// Invariants: `start >= 0` and `end > start`. Both are enforced at
/// construction; adjusted intervals are produced as new values rather
/// than mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TimeInterval {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl TimeInterval {
    /// Create a new interval, validating the basic ordering invariants.
    pub fn new(start: f64, end: f64) -> Result<Self, IntervalError> {
        if start < 0.0 {
            return Err(IntervalError::NegativeStart(start));
        }
        if end <= start {
            return Err(IntervalError::EndNotAfterStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// Duration of the interval in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Midpoint of the interval in seconds.
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    /// Check that the interval fits inside a source of the given duration.
    pub fn validate_against(&self, source_duration: f64) -> Result<(), IntervalError> {
        if self.end > source_duration {
            return Err(IntervalError::ExceedsSourceDuration {
                end: self.end,
                duration: source_duration,
            });
        }
        Ok(())
    }

    /// Return a copy clamped to `[0, source_duration]`.
    ///
    /// Used after constraint adjustments which may push either bound past
    /// the media edges.
    pub fn clamped(&self, source_duration: f64) -> Self {
        Self {
            start: self.start.max(0.0),
            end: self.end.min(source_duration),
        }
    }

    /// True when this interval shares any time with `other`.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}
