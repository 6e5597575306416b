//! Transcript-to-clips pipeline.
//!
//! Wires the engine, analysis client, and media collaborators into a
//! single staged run: probe, transcribe, collect candidates, select,
//! render. Configuration comes from the environment; progress is reported
//! through an injected observer.

pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;

pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use logging::{LoggingObserver, RunLogger, ScaledObserver};
pub use pipeline::{cues_for_interval, ClipPipeline};
