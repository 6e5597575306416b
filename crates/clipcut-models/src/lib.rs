//! Shared data models for the ClipCut pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Time intervals and candidate/final clips
//! - Transcript artifacts (segments with timestamps)
//! - Selection constraints and modes
//! - Analysis results exchanged with the content-analysis service
//! - Pipeline run outcomes

pub mod analysis;
pub mod candidate;
pub mod constraints;
pub mod interval;
pub mod outcome;
pub mod timestamp;
pub mod transcript;

// Re-export common types
pub use analysis::{AnalysisResult, ClipProposal};
pub use candidate::{CandidateClip, ClipSource, FinalClip, MAX_DESCRIPTION_CHARS};
pub use constraints::{DedupStrategy, SelectionConstraints, SelectionMode};
pub use interval::{IntervalError, TimeInterval};
pub use outcome::{RenderFailure, RenderReport, RenderedClip, RunOutcome};
pub use transcript::{Transcript, TranscriptSegment, WordTiming};
