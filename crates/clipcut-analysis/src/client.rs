//! HTTP client for the external content-analysis service.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use clipcut_models::{AnalysisResult as AnalysisArtifact, CandidateClip, ClipProposal, ClipSource, TimeInterval, Transcript};

use crate::error::{AnalysisError, AnalysisResult};
use crate::format::format_transcript;

/// Guidance forwarded to the analysis service. Advisory only: the service
/// is not required to honor it, and the scheduler enforces the real
/// constraints afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ConstraintHint {
    /// Desired number of clip proposals
    pub desired_clips: usize,
    /// Preferred minimum clip duration in seconds
    pub min_duration_secs: f64,
    /// Preferred maximum clip duration in seconds
    pub max_duration_secs: f64,
}

impl Default for ConstraintHint {
    fn default() -> Self {
        Self {
            desired_clips: 5,
            min_duration_secs: 30.0,
            max_duration_secs: 90.0,
        }
    }
}

/// Request body sent to the analysis endpoint.
#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    transcript: String,
    hint: &'a ConstraintHint,
}

/// Response body: an ordered proposal list, optionally wrapped in a
/// markdown code fence by chat-style backends.
#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    clips: Vec<ClipProposal>,
}

/// Content-analysis service client.
///
/// One synchronous (awaited) call per run; failures are terminal for the
/// analysis stage and are never retried here.
pub struct AnalysisClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl AnalysisClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            client: Client::new(),
        }
    }

    /// Build a client from `ANALYSIS_API_URL` / `ANALYSIS_API_KEY`.
    pub fn from_env() -> AnalysisResult<Self> {
        let base_url = std::env::var("ANALYSIS_API_URL")
            .map_err(|_| AnalysisError::config("ANALYSIS_API_URL not set"))?;
        let api_key = std::env::var("ANALYSIS_API_KEY").ok();
        Ok(Self::new(base_url, api_key))
    }

    /// Analyze a transcript, returning the service's ordered proposals.
    ///
    /// With `require_proposals` set, an empty (but well-formed) proposal
    /// list is treated as a failure; otherwise it is a valid empty result.
    pub async fn analyze(
        &self,
        transcript: &Transcript,
        hint: &ConstraintHint,
        require_proposals: bool,
    ) -> AnalysisResult<Vec<ClipProposal>> {
        let formatted = format_transcript(transcript);
        debug!(
            segments = transcript.segments.len(),
            prompt_bytes = formatted.len(),
            "Sending transcript for analysis"
        );

        let url = format!("{}/v1/analyze", self.base_url.trim_end_matches('/'));
        let request = AnalyzeRequest {
            transcript: formatted,
            hint,
        };

        let mut builder = self.client.post(&url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AnalysisError::unreachable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::BadStatus { status, body });
        }

        let text = response
            .text()
            .await
            .map_err(|e| AnalysisError::unreachable(e.to_string()))?;

        let parsed: AnalyzeResponse = serde_json::from_str(strip_code_fence(&text))
            .map_err(|e| AnalysisError::unparseable(e.to_string()))?;

        // Entries the scheduler could never use are discarded up front.
        let usable: Vec<ClipProposal> = parsed
            .clips
            .into_iter()
            .filter(|p| p.start_time >= 0.0 && p.end_time > p.start_time)
            .collect();

        if usable.is_empty() && require_proposals {
            return Err(AnalysisError::NoUsableClips);
        }

        info!(proposals = usable.len(), "Analysis service returned proposals");
        Ok(usable)
    }

    /// Analyze and wrap the proposals as external-source candidates,
    /// preserving the service's proposal order.
    pub async fn analyze_to_candidates(
        &self,
        transcript: &Transcript,
        hint: &ConstraintHint,
        require_proposals: bool,
    ) -> AnalysisResult<Vec<CandidateClip>> {
        let proposals = self.analyze(transcript, hint, require_proposals).await?;
        Ok(proposals_to_candidates(&proposals))
    }
}

/// Wrap service proposals as candidates with `source = external`.
///
/// Scores are left at zero: external mode preserves service order rather
/// than re-ranking.
pub fn proposals_to_candidates(proposals: &[ClipProposal]) -> Vec<CandidateClip> {
    proposals
        .iter()
        .filter_map(|p| {
            let interval = TimeInterval::new(p.start_time, p.end_time).ok()?;
            Some(CandidateClip::new(
                interval,
                p.description.clone(),
                0.0,
                ClipSource::External,
            ))
        })
        .collect()
}

/// Build the analysis artifact persisted next to the transcript.
pub fn build_artifact(transcript: &Transcript, proposals: Vec<ClipProposal>) -> AnalysisArtifact {
    let mut artifact = AnalysisArtifact::ok(proposals);
    artifact.language = Some(transcript.language.clone());
    artifact.total_duration = Some(transcript.total_duration());
    artifact
}

/// Strip a surrounding ```json fence, which chat-completion backends
/// sometimes emit around the JSON body.
fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_prefix("```json").unwrap_or(text);
    let text = text.strip_prefix("```").unwrap_or(text);
    text.strip_suffix("```").unwrap_or(text).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipcut_models::TranscriptSegment;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transcript() -> Transcript {
        Transcript::from_segments(
            "en",
            vec![
                TranscriptSegment::new(0, 0.0, 30.0, "intro"),
                TranscriptSegment::new(1, 30.0, 75.0, "the good part"),
            ],
        )
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_proposals_to_candidates_skips_invalid() {
        let proposals = vec![
            ClipProposal {
                start_time: 10.0,
                end_time: 40.0,
                description: "good".into(),
            },
            ClipProposal {
                start_time: 50.0,
                end_time: 50.0,
                description: "degenerate".into(),
            },
        ];
        let candidates = proposals_to_candidates(&proposals);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].source, ClipSource::External);
        assert_eq!(candidates[0].score, 0.0);
    }

    #[tokio::test]
    async fn test_analyze_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/analyze"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"clips":[{"start_time":30.0,"end_time":75.0,"description":"the good part"}]}"#,
            ))
            .mount(&server)
            .await;

        let client = AnalysisClient::new(server.uri(), None);
        let proposals = client
            .analyze(&transcript(), &ConstraintHint::default(), true)
            .await
            .unwrap();
        assert_eq!(proposals.len(), 1);
        assert_eq!(proposals[0].start_time, 30.0);
    }

    #[tokio::test]
    async fn test_analyze_fenced_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/analyze"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "```json\n{\"clips\":[{\"start_time\":1.0,\"end_time\":20.0,\"description\":\"x\"}]}\n```",
            ))
            .mount(&server)
            .await;

        let client = AnalysisClient::new(server.uri(), None);
        let proposals = client
            .analyze(&transcript(), &ConstraintHint::default(), true)
            .await
            .unwrap();
        assert_eq!(proposals.len(), 1);
    }

    #[tokio::test]
    async fn test_analyze_unparseable_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/analyze"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
            .mount(&server)
            .await;

        let client = AnalysisClient::new(server.uri(), None);
        let err = client
            .analyze(&transcript(), &ConstraintHint::default(), true)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Unparseable(_)));
    }

    #[tokio::test]
    async fn test_analyze_empty_required() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/analyze"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"clips":[]}"#))
            .mount(&server)
            .await;

        let client = AnalysisClient::new(server.uri(), None);
        let err = client
            .analyze(&transcript(), &ConstraintHint::default(), true)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::NoUsableClips));
    }

    #[tokio::test]
    async fn test_analyze_empty_allowed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/analyze"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"clips":[]}"#))
            .mount(&server)
            .await;

        let client = AnalysisClient::new(server.uri(), None);
        let proposals = client
            .analyze(&transcript(), &ConstraintHint::default(), false)
            .await
            .unwrap();
        assert!(proposals.is_empty());
    }

    #[tokio::test]
    async fn test_analyze_bad_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/analyze"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let client = AnalysisClient::new(server.uri(), None);
        let err = client
            .analyze(&transcript(), &ConstraintHint::default(), true)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::BadStatus { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_analyze_unreachable() {
        // Port 1 is never bound
        let client = AnalysisClient::new("http://127.0.0.1:1", None);
        let err = client
            .analyze(&transcript(), &ConstraintHint::default(), true)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Unreachable(_)));
    }
}
