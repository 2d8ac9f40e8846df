use std::sync::Arc;

use async_trait::async_trait;

use voxgate::application::ports::{Embedder, EmbedderError};
use voxgate::application::services::SimilarityEngine;
use voxgate::domain::{Embedding, ValidationLevel, ValidationVerdict};
use voxgate::infrastructure::embedding::MockEmbedder;

struct UnavailableEmbedder;

#[async_trait]
impl Embedder for UnavailableEmbedder {
    async fn embed(&self, _text: &str) -> Result<Embedding, EmbedderError> {
        Err(EmbedderError::ModelLoadFailed("offline".to_string()))
    }

    async fn embed_batch(&self, _texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        Err(EmbedderError::ModelLoadFailed("offline".to_string()))
    }
}

#[test]
fn given_identical_texts_when_comparing_then_every_score_is_perfect_and_excellent() {
    let engine = SimilarityEngine::lexical();

    let metrics = engine.compare_lexical("The cat sat on the mat", "The cat sat on the mat");
    let verdict = ValidationVerdict::from_metrics(&metrics);

    assert_eq!(metrics.word_level_similarity, 1.0);
    assert_eq!(metrics.character_similarity, 1.0);
    assert_eq!(metrics.word_error_rate, Some(0.0));
    assert_eq!(metrics.fuzzy_ratio, Some(1.0));
    assert!(metrics.mismatched_words.is_empty());
    assert_eq!(verdict.level, ValidationLevel::Excellent);
    assert!(verdict.passed);
}

#[test]
fn given_case_only_difference_when_comparing_then_scores_match_lowercase_comparison() {
    let engine = SimilarityEngine::lexical();

    let mixed = engine.compare_lexical("Hello World", "HELLO world");
    let lower = engine.compare_lexical("hello world", "hello world");

    assert_eq!(mixed.word_level_similarity, lower.word_level_similarity);
    assert_eq!(mixed.word_error_rate, lower.word_error_rate);
    assert_eq!(mixed.character_similarity, lower.character_similarity);
}

#[test]
fn given_punctuation_differences_when_comparing_then_word_level_similarity_stays_full() {
    let engine = SimilarityEngine::lexical();

    let metrics = engine.compare_lexical("Hola mundo", "hola, mundo!");

    assert_eq!(metrics.word_level_similarity, 1.0);
    assert_eq!(metrics.word_error_rate, Some(0.0));
}

#[test]
fn given_detached_punctuation_in_expected_text_when_comparing_then_it_is_not_counted_as_a_word() {
    let engine = SimilarityEngine::lexical();

    let metrics = engine.compare_lexical("Uno - dos", "uno dos");
    let verdict = ValidationVerdict::from_metrics(&metrics);

    assert_eq!(metrics.total_expected_words, 2);
    assert_eq!(metrics.word_level_similarity, 1.0);
    assert_eq!(metrics.word_error_rate, Some(0.0));
    assert_eq!(verdict.level, ValidationLevel::Excellent);
}

#[test]
fn given_unrelated_punctuation_tokens_when_comparing_then_they_never_match_each_other() {
    let engine = SimilarityEngine::lexical();

    let metrics = engine.compare_lexical("Hola ... mundo", "adiós - amigo");

    assert!(metrics.perfect_matches.is_empty());
    assert_eq!(metrics.total_expected_words, 2);
    assert_eq!(metrics.word_level_similarity, 0.0);
}

#[test]
fn given_number_words_against_digits_when_comparing_then_needs_review() {
    let engine = SimilarityEngine::lexical();

    let metrics = engine.compare_lexical("setecientos treinta y uno", "731");
    let verdict = ValidationVerdict::from_metrics(&metrics);

    assert!(metrics.word_level_similarity < 0.3);
    assert_eq!(verdict.level, ValidationLevel::NeedsReview);
    assert!(!verdict.passed);
}

#[test]
fn given_transcripts_with_more_matching_words_when_comparing_then_score_never_drops() {
    let engine = SimilarityEngine::lexical();
    let expected = "one quick brown fox jumps over lazy dogs";
    let transcripts = [
        "zzz zzz zzz zzz zzz zzz zzz zzz",
        "one zzz zzz zzz zzz zzz zzz zzz",
        "one quick zzz zzz zzz zzz zzz zzz",
        "one quick brown zzz jumps zzz zzz zzz",
        "one quick brown fox jumps over zzz dogs",
        "one quick brown fox jumps over lazy dogs",
    ];

    let scores: Vec<f64> = transcripts
        .iter()
        .map(|t| engine.compare_lexical(expected, t).word_level_similarity)
        .collect();

    for pair in scores.windows(2) {
        assert!(pair[1] >= pair[0], "scores went down: {scores:?}");
    }
    assert_eq!(scores.last(), Some(&1.0));
}

#[test]
fn given_accented_spelling_variant_when_comparing_then_counted_as_phonetic_match() {
    let engine = SimilarityEngine::lexical();

    let metrics = engine.compare_lexical("la canción", "la cancion");

    assert_eq!(metrics.word_level_similarity, 1.0);
    assert_eq!(metrics.phonetic_matches.len(), 1);
    assert_eq!(metrics.phonetic_matches[0].expected_word, "canción");
}

#[test]
fn given_empty_transcription_when_comparing_then_scores_zero_but_never_missing() {
    let engine = SimilarityEngine::lexical();

    let metrics = engine.compare_lexical("hello world", "");
    let verdict = ValidationVerdict::from_metrics(&metrics);

    assert_eq!(metrics.word_level_similarity, 0.0);
    assert_eq!(metrics.word_error_rate, Some(1.0));
    assert_eq!(metrics.mismatched_words, vec!["hello", "world"]);
    assert_eq!(verdict.level, ValidationLevel::NeedsReview);
}

#[test]
fn given_empty_expected_text_when_comparing_then_word_error_rate_is_missing() {
    let engine = SimilarityEngine::lexical();

    let metrics = engine.compare_lexical("", "something was said");
    let verdict = ValidationVerdict::from_metrics(&metrics);

    assert_eq!(metrics.word_error_rate, None);
    assert_eq!(metrics.bleu_score, None);
    assert_eq!(verdict.level, ValidationLevel::NeedsReview);
    assert!(verdict.recommendations.contains(&"Word error rate unavailable".to_string()));
}

#[test]
fn given_no_auxiliary_metrics_when_comparing_then_primary_score_still_computed() {
    let engine = SimilarityEngine::new(Vec::new(), None);

    let metrics = engine.compare_lexical("good morning", "good morning");

    assert_eq!(metrics.word_level_similarity, 1.0);
    assert_eq!(metrics.word_error_rate, None);
    assert_eq!(metrics.rouge_1_f, None);
    assert_eq!(metrics.overall_similarity(), None);
}

#[tokio::test]
async fn given_embedder_when_comparing_then_semantic_similarity_is_reported() {
    let engine = SimilarityEngine::lexical().with_embedder(Arc::new(MockEmbedder));

    let metrics = engine.compare("Good morning", "good morning").await;

    let semantic = metrics.semantic_similarity.unwrap();
    assert!((semantic - 1.0).abs() < 1e-6);
}

#[tokio::test]
async fn given_failing_embedder_when_comparing_then_only_semantic_similarity_is_missing() {
    let engine = SimilarityEngine::lexical().with_embedder(Arc::new(UnavailableEmbedder));

    let metrics = engine.compare("good morning", "good morning").await;

    assert_eq!(metrics.semantic_similarity, None);
    assert_eq!(metrics.word_level_similarity, 1.0);
    assert_eq!(metrics.fuzzy_ratio, Some(1.0));
}
