//! End-to-end pipeline orchestration.
//!
//! One `process_video` call takes a source file through probe, audio
//! extraction, transcription, candidate collection, selection, and
//! rendering. Stage-level failures terminate the run and come back as a
//! structured failure outcome; per-clip render failures are collected and
//! never abort the batch.

use std::path::{Path, PathBuf};

use tracing::{info, Instrument};

use clipcut_analysis::{build_artifact, AnalysisClient, ConstraintHint};
use clipcut_engine::{
    ClipScheduler, HashingEmbedder, HeuristicScorer, ProgressObserver, SemanticGrouper,
};
use clipcut_media::{
    burn_in_subtitles, extract_audio, probe_video, write_srt, ClipRenderer, FfmpegRenderer,
    SubtitleCue, Transcriber, WhisperCli,
};
use clipcut_models::{
    timestamp::format_seconds, CandidateClip, FinalClip, RenderReport, RenderedClip, RunOutcome,
    SelectionMode, TimeInterval, Transcript,
};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::logging::{RunLogger, ScaledObserver};

/// The full transcript-to-clips pipeline.
pub struct ClipPipeline<T: Transcriber, R: ClipRenderer> {
    config: PipelineConfig,
    transcriber: T,
    renderer: R,
}

impl ClipPipeline<WhisperCli, FfmpegRenderer> {
    /// Pipeline with the stock Whisper and FFmpeg collaborators.
    pub fn with_defaults(config: PipelineConfig) -> Self {
        let transcriber = WhisperCli::new(config.whisper_model.clone());
        Self::new(config, transcriber, FfmpegRenderer::new())
    }
}

impl<T: Transcriber, R: ClipRenderer> ClipPipeline<T, R> {
    pub fn new(config: PipelineConfig, transcriber: T, renderer: R) -> Self {
        Self {
            config,
            transcriber,
            renderer,
        }
    }

    /// Process a video file into short clips.
    ///
    /// Never panics and never returns `Err`: stage failures are folded
    /// into a failure outcome with `success = false`.
    pub async fn process_video(
        &self,
        video_path: &Path,
        observer: &dyn ProgressObserver,
    ) -> RunOutcome {
        let logger = RunLogger::new(uuid::Uuid::new_v4().to_string());
        logger.log_start(&format!("processing {}", video_path.display()));

        let stages = self
            .run_stages(video_path, observer, &logger)
            .instrument(logger.create_span());
        match stages.await {
            Ok(outcome) => {
                logger.log_completion(&format!(
                    "{} clips generated",
                    outcome.total_clips_generated
                ));
                outcome
            }
            Err(e) => {
                logger.log_error(&e.to_string());
                RunOutcome::failure(e.to_string())
            }
        }
    }

    async fn run_stages(
        &self,
        video_path: &Path,
        observer: &dyn ProgressObserver,
        logger: &RunLogger,
    ) -> PipelineResult<RunOutcome> {
        observer.on_progress("probe", 10.0);
        let info = probe_video(video_path).await?;
        if info.duration <= 0.0 {
            return Err(PipelineError::validation("source has zero duration"));
        }
        logger.log_progress(
            "probe",
            &format!(
                "{}, {}x{}",
                format_seconds(info.duration),
                info.width,
                info.height
            ),
        );

        let work_dir = &self.config.work_dir;
        let clips_dir = work_dir.join("clips");
        tokio::fs::create_dir_all(&clips_dir).await?;

        observer.on_progress("transcribe", 30.0);
        let stem = file_stem(video_path);
        let audio_path = work_dir.join(format!("{stem}.wav"));
        extract_audio(video_path, &audio_path).await?;
        let transcript = self
            .transcriber
            .transcribe(&audio_path, self.config.language.as_deref())
            .await?;
        clipcut_engine::validate_transcript(&transcript)?;
        logger.log_progress(
            "transcribe",
            &format!(
                "{} segments, language {}",
                transcript.segments.len(),
                transcript.language
            ),
        );

        let transcript_path = work_dir.join(format!("{stem}_transcript.json"));
        write_json(&transcript_path, &transcript).await?;
        let srt_path = work_dir.join(format!("{stem}.srt"));
        let cues: Vec<SubtitleCue> = transcript.segments.iter().map(SubtitleCue::from).collect();
        write_srt(&cues, &srt_path).await?;

        observer.on_progress("analyze", 50.0);
        let mut analysis_path = None;
        let candidates = match self.config.mode {
            SelectionMode::Heuristic => self.heuristic_candidates(&transcript),
            SelectionMode::External => {
                let (candidates, artifact) = self.external_candidates(&transcript).await?;
                let path = work_dir.join(format!("{stem}_analysis.json"));
                write_json(&path, &artifact).await?;
                analysis_path = Some(path);
                candidates
            }
        };
        logger.log_progress("analyze", &format!("{} candidates collected", candidates.len()));

        let clips = self.select_clips(candidates, info.duration, observer);
        observer.on_progress("select", 70.0);

        let report = self
            .render_clips(video_path, &clips, &transcript, &clips_dir, logger)
            .await;
        observer.on_progress("render", 90.0);

        let mut outcome = RunOutcome::success(report);
        outcome.transcript_path = Some(transcript_path.display().to_string());
        outcome.analysis_path = analysis_path.map(|p| p.display().to_string());
        outcome.thumbnail_path = outcome
            .render
            .rendered
            .first()
            .and_then(|r| r.thumbnail_path.clone());

        let results_path = work_dir.join(format!("{stem}_results.json"));
        write_json(&results_path, &outcome).await?;
        observer.on_progress("finalize", 100.0);

        Ok(outcome)
    }

    /// Collect candidates by grouping segments and scoring each group.
    ///
    /// Zero-scoring groups carry no engagement cues and are not proposed.
    pub fn heuristic_candidates(&self, transcript: &Transcript) -> Vec<CandidateClip> {
        let scorer = HeuristicScorer::new();
        let grouper = SemanticGrouper::new(
            HashingEmbedder::default(),
            self.config.similarity_threshold,
        );

        grouper
            .group(&transcript.segments)
            .into_iter()
            .filter_map(|group| {
                let score = scorer.score_text(&group.text, group.interval.duration());
                (score > 0).then(|| group.into_candidate(score as f64))
            })
            .collect()
    }

    async fn external_candidates(
        &self,
        transcript: &Transcript,
    ) -> PipelineResult<(Vec<CandidateClip>, clipcut_models::AnalysisResult)> {
        let client = AnalysisClient::from_env()?;
        let hint = ConstraintHint {
            desired_clips: self.config.constraints.max_clips,
            min_duration_secs: self.config.constraints.min_duration,
            max_duration_secs: self.config.constraints.max_duration,
        };
        let proposals = client.analyze(transcript, &hint, false).await?;
        let candidates = clipcut_analysis::proposals_to_candidates(&proposals);
        let artifact = build_artifact(transcript, proposals);
        Ok((candidates, artifact))
    }

    /// Run the selection pass over a collected candidate pool.
    pub fn select_clips(
        &self,
        candidates: Vec<CandidateClip>,
        source_duration: f64,
        observer: &dyn ProgressObserver,
    ) -> Vec<FinalClip> {
        let scheduler = ClipScheduler::new(
            self.config.constraints.clone(),
            self.config.mode,
            source_duration,
        );
        // Scheduler stages land between the analyze and select steps
        let scaled = ScaledObserver::new(observer, 50.0, 70.0);
        scheduler.schedule(candidates, &scaled)
    }

    /// Render each selected clip, collecting per-clip failures.
    ///
    /// A failed render is recorded and skipped; the batch always runs to
    /// completion. A failed thumbnail or subtitle burn keeps the clip and
    /// logs a warning.
    pub async fn render_clips(
        &self,
        source: &Path,
        clips: &[FinalClip],
        transcript: &Transcript,
        clips_dir: &Path,
        logger: &RunLogger,
    ) -> RenderReport {
        let mut report = RenderReport::default();

        for clip in clips {
            let clip_path = clips_dir.join(format!("clip_{:02}.mp4", clip.id));
            let result = self
                .renderer
                .render_clip(
                    source,
                    clip.interval.start,
                    clip.interval.end,
                    &clip_path,
                    self.config.target_aspect,
                )
                .await;

            let mut clip_path = match result {
                Ok(path) => path,
                Err(e) => {
                    logger.log_warning(&format!("clip {} failed to render: {e}", clip.id));
                    report.record_failure(clip.id, e.to_string());
                    continue;
                }
            };

            if self.config.burn_subtitles {
                match self.burn_clip_subtitles(clip, &clip_path, transcript, clips_dir).await {
                    Ok(path) => clip_path = path,
                    Err(e) => {
                        logger.log_warning(&format!(
                            "clip {} subtitle burn failed, keeping plain clip: {e}",
                            clip.id
                        ));
                    }
                }
            }

            let thumb_path = clips_dir.join(format!("clip_{:02}.jpg", clip.id));
            let time_point = (clip.duration() / 2.0).min(5.0);
            let thumbnail_path = match self
                .renderer
                .render_thumbnail(&clip_path, time_point, &thumb_path)
                .await
            {
                Ok(path) => Some(path.display().to_string()),
                Err(e) => {
                    logger.log_warning(&format!("clip {} thumbnail failed: {e}", clip.id));
                    None
                }
            };

            info!(clip_id = clip.id, path = %clip_path.display(), "Rendered clip");
            report.record_success(RenderedClip {
                clip: clip.clone(),
                clip_path: clip_path.display().to_string(),
                thumbnail_path,
            });
        }

        report
    }

    async fn burn_clip_subtitles(
        &self,
        clip: &FinalClip,
        clip_path: &Path,
        transcript: &Transcript,
        clips_dir: &Path,
    ) -> PipelineResult<PathBuf> {
        let cues = cues_for_interval(transcript, &clip.interval);
        if cues.is_empty() {
            return Ok(clip_path.to_path_buf());
        }
        let srt_path = clips_dir.join(format!("clip_{:02}.srt", clip.id));
        write_srt(&cues, &srt_path).await?;
        let sub_path = clips_dir.join(format!("clip_{:02}_sub.mp4", clip.id));
        let path = burn_in_subtitles(clip_path, &srt_path, &sub_path).await?;
        Ok(path)
    }
}

/// Select the transcript cues overlapping a clip and rebase them to
/// clip-local time.
pub fn cues_for_interval(transcript: &Transcript, interval: &TimeInterval) -> Vec<SubtitleCue> {
    let duration = interval.duration();
    transcript
        .segments
        .iter()
        .filter(|s| s.end > interval.start && s.start < interval.end)
        .filter_map(|s| {
            let start = (s.start - interval.start).max(0.0);
            let end = (s.end - interval.start).min(duration);
            if end <= start {
                return None;
            }
            Some(SubtitleCue {
                start,
                end,
                text: s.text.trim().to_string(),
                position: None,
            })
        })
        .collect()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "video".to_string())
}

async fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> PipelineResult<()> {
    let body = serde_json::to_vec_pretty(value)?;
    tokio::fs::write(path, body).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use mockall::mock;
    use mockall::predicate::always;

    use clipcut_engine::progress::NoopObserver;
    use clipcut_media::{MediaError, MediaResult, TargetAspect};
    use clipcut_models::{ClipSource, TranscriptSegment};

    mock! {
        pub Renderer {}

        #[async_trait]
        impl ClipRenderer for Renderer {
            async fn render_clip(
                &self,
                source: &Path,
                start: f64,
                end: f64,
                output: &Path,
                target_aspect: TargetAspect,
            ) -> MediaResult<PathBuf>;

            async fn render_thumbnail(
                &self,
                clip_path: &Path,
                time_point: f64,
                output: &Path,
            ) -> MediaResult<PathBuf>;
        }
    }

    mock! {
        pub Stt {}

        impl Transcriber for Stt {
            fn transcribe<'life0, 'life1, 'life2, 'async_trait>(
                &'life0 self,
                audio_path: &'life1 Path,
                language: Option<&'life2 str>,
            ) -> ::core::pin::Pin<
                Box<dyn ::core::future::Future<Output = MediaResult<Transcript>> + Send + 'async_trait>,
            >
            where
                'life0: 'async_trait,
                'life1: 'async_trait,
                'life2: 'async_trait,
                Self: 'async_trait;
        }
    }

    fn test_transcript() -> Transcript {
        Transcript::from_segments(
            "en",
            vec![
                TranscriptSegment::new(0, 0.0, 40.0, "How do you build an audience? Amazing!"),
                TranscriptSegment::new(1, 100.0, 140.0, "Here's a tip: the top 5 secret steps."),
            ],
        )
    }

    fn final_clip(id: u32, start: f64, end: f64) -> FinalClip {
        let candidate = CandidateClip::new(
            TimeInterval::new(start, end).unwrap(),
            format!("clip {id}"),
            50.0,
            ClipSource::Heuristic,
        );
        FinalClip::from_candidate(id, &candidate)
    }

    fn pipeline_with_renderer(renderer: MockRenderer) -> ClipPipeline<MockStt, MockRenderer> {
        ClipPipeline::new(PipelineConfig::default(), MockStt::new(), renderer)
    }

    #[tokio::test]
    async fn test_render_failure_skips_only_affected_clip() {
        let mut renderer = MockRenderer::new();
        renderer
            .expect_render_clip()
            .times(2)
            .returning(|_, start, _, output, _| {
                if start == 0.0 {
                    Err(MediaError::ffmpeg_failed("boom", None, Some(1)))
                } else {
                    Ok(output.to_path_buf())
                }
            });
        renderer
            .expect_render_thumbnail()
            .times(1)
            .returning(|_, _, output| Ok(output.to_path_buf()));

        let pipeline = pipeline_with_renderer(renderer);
        let clips = vec![final_clip(1, 0.0, 40.0), final_clip(2, 100.0, 140.0)];
        let logger = RunLogger::new("test");

        let report = pipeline
            .render_clips(
                Path::new("/tmp/in.mp4"),
                &clips,
                &test_transcript(),
                Path::new("/tmp/clips"),
                &logger,
            )
            .await;

        assert_eq!(report.rendered.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].clip_id, 1);
        assert_eq!(report.rendered[0].clip.id, 2);
    }

    #[tokio::test]
    async fn test_thumbnail_failure_keeps_clip() {
        let mut renderer = MockRenderer::new();
        renderer
            .expect_render_clip()
            .times(1)
            .returning(|_, _, _, output, _| Ok(output.to_path_buf()));
        renderer
            .expect_render_thumbnail()
            .with(always(), always(), always())
            .times(1)
            .returning(|_, _, _| Err(MediaError::ffmpeg_failed("no frame", None, Some(1))));

        let pipeline = pipeline_with_renderer(renderer);
        let clips = vec![final_clip(1, 0.0, 40.0)];
        let logger = RunLogger::new("test");

        let report = pipeline
            .render_clips(
                Path::new("/tmp/in.mp4"),
                &clips,
                &test_transcript(),
                Path::new("/tmp/clips"),
                &logger,
            )
            .await;

        assert_eq!(report.rendered.len(), 1);
        assert!(report.failures.is_empty());
        assert!(report.rendered[0].thumbnail_path.is_none());
    }

    #[tokio::test]
    async fn test_stage_failure_folds_into_outcome() {
        let pipeline = ClipPipeline::new(
            PipelineConfig::default(),
            MockStt::new(),
            MockRenderer::new(),
        );

        // Probing a nonexistent source fails before any later stage runs
        let outcome = pipeline
            .process_video(Path::new("/nonexistent/source.mp4"), &NoopObserver)
            .await;

        assert!(!outcome.success);
        assert!(outcome.error.is_some());
        assert_eq!(outcome.total_clips_generated, 0);
        assert!(outcome.render.rendered.is_empty());
    }

    #[test]
    fn test_heuristic_candidates_score_cue_rich_segments() {
        let pipeline = ClipPipeline::new(
            PipelineConfig::default(),
            MockStt::new(),
            MockRenderer::new(),
        );
        let candidates = pipeline.heuristic_candidates(&test_transcript());

        assert!(!candidates.is_empty());
        for c in &candidates {
            assert!(c.score > 0.0);
            assert_eq!(c.source, ClipSource::Semantic);
        }
    }

    #[test]
    fn test_select_clips_respects_max_clips() {
        let pipeline = ClipPipeline::new(
            PipelineConfig::default(),
            MockStt::new(),
            MockRenderer::new(),
        );
        let candidates: Vec<CandidateClip> = (0..12)
            .map(|i| {
                CandidateClip::new(
                    TimeInterval::new(i as f64 * 50.0, i as f64 * 50.0 + 40.0).unwrap(),
                    format!("candidate {i}"),
                    (i * 5) as f64,
                    ClipSource::Heuristic,
                )
            })
            .collect();

        let clips = pipeline.select_clips(candidates, 700.0, &NoopObserver);
        assert_eq!(clips.len(), 5);
        // Sequential ids after ranking
        let ids: Vec<u32> = clips.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_cues_for_interval_rebases_times() {
        let transcript = Transcript::from_segments(
            "en",
            vec![
                TranscriptSegment::new(0, 0.0, 10.0, "before"),
                TranscriptSegment::new(1, 25.0, 35.0, "straddles start"),
                TranscriptSegment::new(2, 40.0, 50.0, "inside"),
                TranscriptSegment::new(3, 80.0, 95.0, "after"),
            ],
        );
        let interval = TimeInterval::new(30.0, 70.0).unwrap();

        let cues = cues_for_interval(&transcript, &interval);
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].start, 0.0);
        assert_eq!(cues[0].end, 5.0);
        assert_eq!(cues[1].start, 10.0);
        assert_eq!(cues[1].end, 20.0);
    }

    #[test]
    fn test_cues_for_interval_empty_when_no_overlap() {
        let transcript = Transcript::from_segments(
            "en",
            vec![TranscriptSegment::new(0, 0.0, 10.0, "early")],
        );
        let interval = TimeInterval::new(50.0, 80.0).unwrap();
        assert!(cues_for_interval(&transcript, &interval).is_empty());
    }
}
