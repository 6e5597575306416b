//! Speech-to-text collaborator.
//!
//! Wraps the Whisper CLI: one child process per transcription, JSON output
//! parsed into the shared [`Transcript`] model. Failures come back as
//! values through [`MediaResult`], never as panics.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{info, warn};

use clipcut_models::{Transcript, TranscriptSegment, WordTiming};

use crate::error::{MediaError, MediaResult};

/// Speech-to-text engine contract.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio file, auto-detecting the language when `None`.
    async fn transcribe(&self, audio_path: &Path, language: Option<&str>) -> MediaResult<Transcript>;
}

/// Whisper CLI wrapper.
#[derive(Debug, Clone)]
pub struct WhisperCli {
    /// Model size: tiny, base, small, medium, large
    model: String,
}

impl Default for WhisperCli {
    fn default() -> Self {
        // Base model balances speed and accuracy
        Self {
            model: "base".to_string(),
        }
    }
}

impl WhisperCli {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

/// Whisper's JSON output shape.
#[derive(Debug, Deserialize)]
struct WhisperOutput {
    text: String,
    language: String,
    #[serde(default)]
    segments: Vec<WhisperSegment>,
}

#[derive(Debug, Deserialize)]
struct WhisperSegment {
    #[serde(default)]
    id: u32,
    start: f64,
    end: f64,
    text: String,
    avg_logprob: Option<f64>,
    #[serde(default)]
    words: Vec<WhisperWord>,
}

#[derive(Debug, Deserialize)]
struct WhisperWord {
    word: String,
    start: f64,
    end: f64,
    probability: Option<f64>,
}

#[async_trait]
impl Transcriber for WhisperCli {
    async fn transcribe(&self, audio_path: &Path, language: Option<&str>) -> MediaResult<Transcript> {
        which::which("whisper").map_err(|_| MediaError::WhisperNotFound)?;
        if !audio_path.exists() {
            return Err(MediaError::FileNotFound(audio_path.to_path_buf()));
        }

        let out_dir = tempfile::tempdir()?;

        let mut cmd = Command::new("whisper");
        cmd.arg(audio_path)
            .args(["--model", &self.model])
            .args(["--output_format", "json"])
            .args(["--word_timestamps", "True"])
            .arg("--output_dir")
            .arg(out_dir.path());
        if let Some(lang) = language {
            cmd.args(["--language", lang]);
        }

        info!(
            audio = %audio_path.display(),
            model = %self.model,
            "Transcribing audio with Whisper"
        );

        let output = cmd
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| MediaError::transcription_failed(format!("failed to spawn whisper: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(exit_code = ?output.status.code(), "whisper exited with error");
            return Err(MediaError::transcription_failed(stderr.to_string()));
        }

        let stem = audio_path
            .file_stem()
            .ok_or_else(|| MediaError::transcription_failed("audio path has no file stem"))?;
        let json_path = out_dir.path().join(stem).with_extension("json");
        let raw = tokio::fs::read_to_string(&json_path)
            .await
            .map_err(|e| MediaError::transcription_failed(format!("missing whisper output: {e}")))?;

        let parsed: WhisperOutput = serde_json::from_str(&raw)
            .map_err(|e| MediaError::transcription_failed(format!("bad whisper output: {e}")))?;

        Ok(convert_output(parsed))
    }
}

fn convert_output(output: WhisperOutput) -> Transcript {
    let segments = output
        .segments
        .into_iter()
        .map(|s| TranscriptSegment {
            id: s.id,
            start: s.start,
            end: s.end,
            text: s.text.trim().to_string(),
            confidence: s.avg_logprob,
            words: s
                .words
                .into_iter()
                .map(|w| WordTiming {
                    word: w.word,
                    start: w.start,
                    end: w.end,
                    probability: w.probability,
                })
                .collect(),
        })
        .collect();

    Transcript {
        text: output.text.trim().to_string(),
        language: output.language,
        segments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_output() {
        let raw = r#"{
            "text": " hello world ",
            "language": "en",
            "segments": [
                {"id": 0, "start": 0.0, "end": 2.0, "text": " hello ", "avg_logprob": -0.3,
                 "words": [{"word": "hello", "start": 0.0, "end": 1.0, "probability": 0.98}]},
                {"id": 1, "start": 2.0, "end": 4.0, "text": "world", "avg_logprob": null}
            ]
        }"#;
        let parsed: WhisperOutput = serde_json::from_str(raw).unwrap();
        let transcript = convert_output(parsed);

        assert_eq!(transcript.text, "hello world");
        assert_eq!(transcript.language, "en");
        assert_eq!(transcript.segments.len(), 2);
        assert_eq!(transcript.segments[0].text, "hello");
        assert_eq!(transcript.segments[0].words.len(), 1);
        assert_eq!(transcript.segments[1].confidence, None);
        assert_eq!(transcript.total_duration(), 4.0);
    }
}
