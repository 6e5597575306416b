//! Clip rendering and audio extraction.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;
use crate::thumbnail;

/// Output aspect for rendered clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetAspect {
    /// 9:16 portrait (1080x1920), the short-form default
    #[default]
    Portrait,
    /// 1:1 square (1080x1080)
    Square,
    /// Keep the source framing
    Landscape,
}

impl TargetAspect {
    /// Target output dimensions, or `None` for source passthrough.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match self {
            TargetAspect::Portrait => Some((1080, 1920)),
            TargetAspect::Square => Some((1080, 1080)),
            TargetAspect::Landscape => None,
        }
    }
}

impl std::str::FromStr for TargetAspect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "9:16" | "portrait" => Ok(TargetAspect::Portrait),
            "1:1" | "square" => Ok(TargetAspect::Square),
            "16:9" | "landscape" | "original" => Ok(TargetAspect::Landscape),
            other => Err(format!("unknown target aspect: {other}")),
        }
    }
}

/// Build the scale-to-cover + center-crop filter for an aspect conversion.
fn aspect_filter(aspect: TargetAspect) -> Option<String> {
    aspect.dimensions().map(|(w, h)| {
        format!("scale={w}:{h}:force_original_aspect_ratio=increase,crop={w}:{h}")
    })
}

/// Media renderer collaborator contract.
///
/// Per-call failure must not abort batch processing of other clips; the
/// caller collects failures per clip.
#[async_trait]
pub trait ClipRenderer: Send + Sync {
    /// Cut `[start, end)` out of `source` into `output`, converting aspect.
    async fn render_clip(
        &self,
        source: &Path,
        start: f64,
        end: f64,
        output: &Path,
        target_aspect: TargetAspect,
    ) -> MediaResult<PathBuf>;

    /// Grab a thumbnail frame from a rendered clip at `time_point` seconds.
    async fn render_thumbnail(
        &self,
        clip_path: &Path,
        time_point: f64,
        output: &Path,
    ) -> MediaResult<PathBuf>;
}

/// FFmpeg-backed renderer.
#[derive(Debug, Default, Clone, Copy)]
pub struct FfmpegRenderer;

impl FfmpegRenderer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ClipRenderer for FfmpegRenderer {
    async fn render_clip(
        &self,
        source: &Path,
        start: f64,
        end: f64,
        output: &Path,
        target_aspect: TargetAspect,
    ) -> MediaResult<PathBuf> {
        info!(
            source = %source.display(),
            start,
            end,
            "Rendering clip"
        );

        let mut cmd = FfmpegCommand::new(source, output)
            .seek(start)
            .duration(end - start)
            .video_codec("libx264")
            .audio_codec("aac");

        if let Some(filter) = aspect_filter(target_aspect) {
            cmd = cmd.video_filter(filter);
        }

        FfmpegRunner::new().run(&cmd).await?;
        Ok(output.to_path_buf())
    }

    async fn render_thumbnail(
        &self,
        clip_path: &Path,
        time_point: f64,
        output: &Path,
    ) -> MediaResult<PathBuf> {
        thumbnail::render_thumbnail(clip_path, time_point, output).await
    }
}

/// Extract the audio track as 16 kHz mono WAV for transcription.
pub async fn extract_audio(source: impl AsRef<Path>, output: impl AsRef<Path>) -> MediaResult<PathBuf> {
    let source = source.as_ref();
    let output = output.as_ref();
    info!(source = %source.display(), "Extracting audio");

    let cmd = FfmpegCommand::new(source, output)
        .no_video()
        .audio_codec("pcm_s16le")
        .audio_sample_rate(16000)
        .output_arg("-ac")
        .output_arg("1");

    FfmpegRunner::new().run(&cmd).await?;
    Ok(output.to_path_buf())
}
