//! Similarity-based segment grouping.
//!
//! Merges semantically similar transcript segments into coarser topic
//! intervals before scoring. Greedy first-eligible-wins: segments are
//! visited in transcript order, and each unclaimed segment whose embedding
//! exceeds the similarity threshold joins the current group. A segment is
//! claimed by at most one group.

use clipcut_models::{CandidateClip, ClipSource, TimeInterval, TranscriptSegment};
use tracing::debug;

/// Produces text embeddings for similarity comparison.
///
/// The real collaborator is an external embedding model; the shipped
/// [`HashingEmbedder`] keeps heuristic mode fully offline.
pub trait EmbeddingProvider {
    fn embed(&self, text: &str) -> Vec<f32>;
}

/// Deterministic hashing bag-of-words embedder.
///
/// Tokens are hashed into a fixed number of buckets and the resulting
/// count vector is L2-normalized. Crude, but stable and dependency-free.
#[derive(Debug, Clone, Copy)]
pub struct HashingEmbedder {
    buckets: usize,
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self { buckets: 256 }
    }
}

impl HashingEmbedder {
    pub fn new(buckets: usize) -> Self {
        Self {
            buckets: buckets.max(1),
        }
    }
}

impl EmbeddingProvider for HashingEmbedder {
    fn embed(&self, text: &str) -> Vec<f32> {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut vector = vec![0.0f32; self.buckets];
        for token in text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let mut hasher = DefaultHasher::new();
            token.hash(&mut hasher);
            let bucket = (hasher.finish() % self.buckets as u64) as usize;
            vector[bucket] += 1.0;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

/// Cosine similarity between two embedding vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|v| v * v).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// A merged group of similar segments.
#[derive(Debug, Clone)]
pub struct SemanticGroup {
    /// Span from the earliest start to the latest end of the members
    pub interval: TimeInterval,

    /// Concatenated member text
    pub text: String,

    /// Number of merged segments (diagnostics only)
    pub segment_count: usize,

    /// Mean pairwise similarity to the seed segment (diagnostics only)
    pub avg_similarity: f32,
}

impl SemanticGroup {
    /// Convert into a candidate with the given engagement score.
    pub fn into_candidate(self, score: f64) -> CandidateClip {
        CandidateClip::new(self.interval, self.text, score, ClipSource::Semantic)
    }
}

/// Similarity-threshold grouper over ordered transcript segments.
pub struct SemanticGrouper<E: EmbeddingProvider> {
    embedder: E,
    similarity_threshold: f32,
}

impl Default for SemanticGrouper<HashingEmbedder> {
    fn default() -> Self {
        Self::new(HashingEmbedder::default(), 0.7)
    }
}

impl<E: EmbeddingProvider> SemanticGrouper<E> {
    pub fn new(embedder: E, similarity_threshold: f32) -> Self {
        Self {
            embedder,
            similarity_threshold,
        }
    }

    /// Group segments into coarser topic intervals.
    ///
    /// Visits segments in transcript order. Each unclaimed segment seeds a
    /// group and claims every later unclaimed segment whose similarity to
    /// the seed exceeds the threshold.
    pub fn group(&self, segments: &[TranscriptSegment]) -> Vec<SemanticGroup> {
        let embeddings: Vec<Vec<f32>> = segments
            .iter()
            .map(|s| self.embedder.embed(&s.text))
            .collect();

        let mut claimed = vec![false; segments.len()];
        let mut groups = Vec::new();

        for i in 0..segments.len() {
            if claimed[i] {
                continue;
            }
            claimed[i] = true;

            let mut members = vec![i];
            let mut similarity_sum = 0.0f32;

            for j in (i + 1)..segments.len() {
                if claimed[j] {
                    continue;
                }
                let similarity = cosine_similarity(&embeddings[i], &embeddings[j]);
                if similarity > self.similarity_threshold {
                    claimed[j] = true;
                    members.push(j);
                    similarity_sum += similarity;
                }
            }

            let start = members
                .iter()
                .map(|&k| segments[k].start)
                .fold(f64::INFINITY, f64::min);
            let end = members
                .iter()
                .map(|&k| segments[k].end)
                .fold(f64::NEG_INFINITY, f64::max);

            let Ok(interval) = TimeInterval::new(start, end) else {
                debug!(seed = i, "Skipping degenerate semantic group");
                continue;
            };

            let text = members
                .iter()
                .map(|&k| segments[k].text.trim())
                .collect::<Vec<_>>()
                .join(" ");

            let avg_similarity = if members.len() > 1 {
                similarity_sum / (members.len() - 1) as f32
            } else {
                1.0
            };

            groups.push(SemanticGroup {
                interval,
                text,
                segment_count: members.len(),
                avg_similarity,
            });
        }

        groups
    }
}
