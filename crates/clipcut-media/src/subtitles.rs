//! Subtitle rendering and burn-in.
//!
//! Subtitles are written as SRT from transcript segments, then composited
//! into the video's pixel data with FFmpeg's `subtitles=` filter. When a
//! cue carries a position hint the SRT coordinate extension is emitted;
//! otherwise plain bottom-centered cues are written.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::info;

use clipcut_models::timestamp::format_srt_time;
use clipcut_models::TranscriptSegment;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;

/// One subtitle cue.
#[derive(Debug, Clone)]
pub struct SubtitleCue {
    pub start: f64,
    pub end: f64,
    pub text: String,
    /// Optional pixel position hint (x, y); selects the positioned format
    pub position: Option<(u32, u32)>,
}

impl From<&TranscriptSegment> for SubtitleCue {
    fn from(segment: &TranscriptSegment) -> Self {
        Self {
            start: segment.start,
            end: segment.end,
            text: segment.text.trim().to_string(),
            position: None,
        }
    }
}

/// Render cues to an SRT file.
pub async fn write_srt(cues: &[SubtitleCue], output_path: impl AsRef<Path>) -> MediaResult<PathBuf> {
    let output_path = output_path.as_ref();
    let mut body = String::new();

    for (i, cue) in cues.iter().enumerate() {
        body.push_str(&format!("{}\n", i + 1));
        body.push_str(&format!(
            "{} --> {}",
            format_srt_time(cue.start),
            format_srt_time(cue.end)
        ));
        if let Some((x, y)) = cue.position {
            body.push_str(&format!(" X1:{x} Y1:{y}"));
        }
        body.push('\n');
        body.push_str(&cue.text);
        body.push_str("\n\n");
    }

    let mut file = tokio::fs::File::create(output_path).await?;
    file.write_all(body.as_bytes()).await?;
    file.flush().await?;

    info!(path = %output_path.display(), cues = cues.len(), "Wrote SRT file");
    Ok(output_path.to_path_buf())
}

/// Burn an SRT track into the video's pixels, copying the audio stream.
pub async fn burn_in_subtitles(
    video_path: impl AsRef<Path>,
    srt_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> MediaResult<PathBuf> {
    let output_path = output_path.as_ref();

    let filter = format!(
        "subtitles={}",
        escape_filter_path(&srt_path.as_ref().display().to_string())
    );

    let cmd = FfmpegCommand::new(video_path.as_ref(), output_path)
        .video_filter(filter)
        .audio_codec("copy");

    FfmpegRunner::new().run(&cmd).await?;

    info!(path = %output_path.display(), "Burned in subtitles");
    Ok(output_path.to_path_buf())
}

/// Escape a path for use inside an FFmpeg filter argument.
///
/// Colons and single quotes are separators/quotes in filter syntax.
fn escape_filter_path(path: &str) -> String {
    path.replace('\\', "/").replace(':', "\\:").replace('\'', "\\'")
}
