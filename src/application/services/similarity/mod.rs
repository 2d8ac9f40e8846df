mod phonetic;
mod sequence;
mod text_metrics;
mod word_alignment;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::application::ports::Embedder;
use crate::domain::SimilarityMetrics;

use super::text_normalizer::{normalize_text, tokenize};

pub use phonetic::phonetic_fold;
pub use sequence::{char_similarity, edit_distance, lcs_length, levenshtein_similarity};
pub use text_metrics::{
    Bleu, FuzzyRatio, MetricKind, Rouge1, RougeL, TextMetric, TokenSortRatio, WordErrorRate,
    default_text_metrics,
};
pub use word_alignment::{
    MISMATCH_THRESHOLD, PHONETIC_MATCH_THRESHOLD, WordAlignment, align_words,
};

/// Compares expected against transcribed text with every configured metric.
pub struct SimilarityEngine {
    text_metrics: Vec<Box<dyn TextMetric>>,
    embedder: Option<Arc<dyn Embedder>>,
}

impl SimilarityEngine {
    pub fn new(text_metrics: Vec<Box<dyn TextMetric>>, embedder: Option<Arc<dyn Embedder>>) -> Self {
        Self {
            text_metrics,
            embedder,
        }
    }

    /// All auxiliary metrics, no meaning comparison.
    pub fn lexical() -> Self {
        Self::new(default_text_metrics(), None)
    }

    pub fn with_embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    pub async fn compare(&self, expected_raw: &str, transcribed_raw: &str) -> SimilarityMetrics {
        let mut metrics = self.compare_lexical(expected_raw, transcribed_raw);
        metrics.semantic_similarity = self.semantic_similarity(expected_raw, transcribed_raw).await;
        metrics
    }

    /// Everything except the embedding-based meaning score.
    pub fn compare_lexical(&self, expected_raw: &str, transcribed_raw: &str) -> SimilarityMetrics {
        let expected = normalize_text(expected_raw);
        let transcribed = normalize_text(transcribed_raw);

        let (word_overlap, words_matched, total_unique_words) = word_overlap(&expected, &transcribed);
        let alignment = align_words(&expected, &transcribed);
        let auxiliary = self.auxiliary_scores(&expected, &transcribed);

        SimilarityMetrics {
            character_similarity: char_similarity(&expected, &transcribed),
            word_overlap,
            words_matched,
            total_unique_words,
            word_level_similarity: alignment.word_level_similarity(),
            total_expected_words: alignment.total_expected,
            perfect_matches: alignment.perfect,
            phonetic_matches: alignment.phonetic,
            fuzzy_matches: alignment.fuzzy,
            mismatched_words: alignment.mismatched,
            word_error_rate: auxiliary.get(&MetricKind::WordErrorRate).copied(),
            fuzzy_ratio: auxiliary.get(&MetricKind::FuzzyRatio).copied(),
            fuzzy_token_ratio: auxiliary.get(&MetricKind::TokenSortRatio).copied(),
            rouge_1_f: auxiliary.get(&MetricKind::Rouge1).copied(),
            rouge_l_f: auxiliary.get(&MetricKind::RougeL).copied(),
            bleu_score: auxiliary.get(&MetricKind::Bleu).copied(),
            semantic_similarity: None,
        }
    }

    fn auxiliary_scores(&self, expected: &str, transcribed: &str) -> HashMap<MetricKind, f64> {
        let mut scores = HashMap::with_capacity(self.text_metrics.len());
        for metric in &self.text_metrics {
            match metric.score(expected, transcribed) {
                Some(score) => {
                    scores.insert(metric.kind(), score);
                }
                None => tracing::debug!(metric = %metric.kind(), "Metric undefined for input"),
            }
        }
        scores
    }

    async fn semantic_similarity(&self, expected_raw: &str, transcribed_raw: &str) -> Option<f64> {
        let embedder = self.embedder.as_ref()?;
        if expected_raw.trim().is_empty() || transcribed_raw.trim().is_empty() {
            return None;
        }

        match embedder.embed_batch(&[expected_raw, transcribed_raw]).await {
            Ok(embeddings) if embeddings.len() == 2 => {
                Some(embeddings[0].cosine_similarity(&embeddings[1]) as f64)
            }
            Ok(embeddings) => {
                tracing::warn!(
                    count = embeddings.len(),
                    "Unexpected embedding count, skipping semantic similarity"
                );
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Semantic similarity unavailable");
                None
            }
        }
    }
}

impl Default for SimilarityEngine {
    fn default() -> Self {
        Self::lexical()
    }
}

/// Jaccard overlap of the two token sets; two empty sets overlap 0, not 1.
fn word_overlap(expected: &str, transcribed: &str) -> (f64, usize, usize) {
    let expected: HashSet<&str> = tokenize(expected).into_iter().collect();
    let transcribed: HashSet<&str> = tokenize(transcribed).into_iter().collect();

    let matched = expected.intersection(&transcribed).count();
    let union = expected.union(&transcribed).count();
    if union == 0 {
        return (0.0, 0, 0);
    }
    (matched as f64 / union as f64, matched, union)
}
