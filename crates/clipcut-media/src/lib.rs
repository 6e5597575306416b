//! Thin wrappers over the external media engines.
//!
//! Everything in this crate is invocation plumbing: FFmpeg/ffprobe/Whisper
//! are driven as child processes, one CLI run per operation. No decision
//! logic lives here.

pub mod clip;
pub mod command;
pub mod error;
pub mod probe;
pub mod subtitles;
pub mod thumbnail;
pub mod transcribe;

pub use clip::{extract_audio, ClipRenderer, FfmpegRenderer, TargetAspect};
pub use command::{FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use probe::{probe_video, VideoInfo};
pub use subtitles::{burn_in_subtitles, write_srt, SubtitleCue};
pub use thumbnail::render_thumbnail;
pub use transcribe::{Transcriber, WhisperCli};
