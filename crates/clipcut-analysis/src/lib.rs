//! Client for the external content-analysis service.
//!
//! Normalizes the service's proposals into [`clipcut_models::CandidateClip`]
//! records. The call is made exactly once per run: any transport failure,
//! unparseable response, or lack of usable entries (when required) surfaces
//! as a single explicit error with no retry.

pub mod client;
pub mod error;
pub mod format;

pub use client::{build_artifact, proposals_to_candidates, AnalysisClient, ConstraintHint};
pub use error::{AnalysisError, AnalysisResult};
pub use format::{format_transcript, MAX_PROMPT_SEGMENTS};
