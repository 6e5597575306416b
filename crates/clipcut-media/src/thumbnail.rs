//! Thumbnail extraction.

use std::path::{Path, PathBuf};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;

/// Width thumbnails are scaled to; height follows the aspect ratio.
const THUMBNAIL_SCALE_WIDTH: u32 = 480;

/// Grab a single frame at `time_point` seconds and save it scaled down.
pub async fn render_thumbnail(
    video_path: impl AsRef<Path>,
    time_point: f64,
    output_path: impl AsRef<Path>,
) -> MediaResult<PathBuf> {
    let output_path = output_path.as_ref();

    let filter = format!("scale={}:-2", THUMBNAIL_SCALE_WIDTH);
    let cmd = FfmpegCommand::new(video_path.as_ref(), output_path)
        .seek(time_point)
        .single_frame()
        .video_filter(filter);

    FfmpegRunner::new().run(&cmd).await?;
    Ok(output_path.to_path_buf())
}
