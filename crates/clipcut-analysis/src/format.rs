//! Transcript formatting for analysis requests.

use clipcut_models::Transcript;

/// Segment cap applied before formatting, to bound request size.
pub const MAX_PROMPT_SEGMENTS: usize = 100;

/// Format a transcript as timestamped lines, one per segment.
///
/// Only the first [`MAX_PROMPT_SEGMENTS`] segments are included.
/// Line shape: `[12.00s - 15.50s]: spoken text`.
pub fn format_transcript(transcript: &Transcript) -> String {
    transcript
        .segments
        .iter()
        .take(MAX_PROMPT_SEGMENTS)
        .map(|s| format!("[{:.2}s - {:.2}s]: {}", s.start, s.end, s.text))
        .collect::<Vec<_>>()
        .join("\n")
}
