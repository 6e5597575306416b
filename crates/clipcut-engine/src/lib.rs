//! Clip candidate selection and scheduling engine.
//!
//! A single-threaded, synchronous batch computation over an
//! already-materialized transcript and candidate pool. The engine performs
//! no I/O and holds no shared mutable state: candidates flow through
//! deduplication, constraint enforcement, and ranking into a deterministic
//! ordered [`clipcut_models::FinalClip`] list.

pub mod constraints;
pub mod dedup;
pub mod error;
pub mod heuristic;
pub mod progress;
pub mod scheduler;
pub mod semantic;
pub mod validate;

pub use constraints::enforce_constraints;
pub use dedup::deduplicate;
pub use error::{EngineError, EngineResult};
pub use heuristic::HeuristicScorer;
pub use progress::ProgressObserver;
pub use scheduler::{ClipScheduler, SchedulerState};
pub use semantic::{EmbeddingProvider, HashingEmbedder, SemanticGroup, SemanticGrouper};
pub use validate::validate_transcript;
