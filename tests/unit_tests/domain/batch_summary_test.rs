use voxgate::domain::{BatchEntry, BatchSummary, ValidationLevel, ValidationReport};

fn completed(level: ValidationLevel, similarity: f64) -> BatchEntry {
    let json = serde_json::json!({
        "audio_path": "/clips/x.wav",
        "language": null,
        "backend": "local",
        "model_size": "base",
        "expected_text": "",
        "transcribed_text": "",
        "transcription_confidence": null,
        "basic_similarity": {
            "similarity_ratio": similarity,
            "word_error_rate": null,
            "word_overlap": 0.0,
            "words_matched": 0,
            "total_unique_words": 0
        },
        "comprehensive_similarity": {
            "fuzzy_ratio": null,
            "fuzzy_token_ratio": null,
            "rouge_1_f": null,
            "rouge_l_f": null,
            "bleu_score": null,
            "overall_similarity": null
        },
        "enhanced_validation": {
            "transcribed_text": "",
            "similarity_score": similarity,
            "word_level_similarity": similarity,
            "perfect_matches": [],
            "phonetic_matches": [],
            "mismatched_words": [],
            "word_error_rate": null,
            "validation_passed": level.passed(),
            "validation_level": level,
            "recommendations": []
        },
        "quality": null
    });
    BatchEntry::Completed(serde_json::from_value::<ValidationReport>(json).unwrap())
}

#[test]
fn given_mixed_entries_when_summarizing_then_counts_each_outcome() {
    let entries = vec![
        completed(ValidationLevel::Excellent, 1.0),
        completed(ValidationLevel::Good, 0.9),
        completed(ValidationLevel::NeedsReview, 0.2),
        BatchEntry::Failed {
            audio_path: "/clips/missing.wav".to_string(),
            error: "not found".to_string(),
        },
    ];

    let summary = BatchSummary::from_entries(&entries);

    assert_eq!(summary.total, 4);
    assert_eq!(summary.passed, 2);
    assert_eq!(summary.needs_review, 1);
    assert_eq!(summary.errored, 1);
    assert_eq!(summary.levels.get(&ValidationLevel::Excellent), Some(&1));
    assert_eq!(summary.levels.get(&ValidationLevel::Acceptable), None);
    assert!((summary.mean_word_level_similarity.unwrap() - 0.7).abs() < 1e-9);
    assert!((summary.pass_rate() - 0.5).abs() < 1e-9);
}

#[test]
fn given_only_failures_when_summarizing_then_no_mean_similarity() {
    let entries = vec![BatchEntry::Failed {
        audio_path: "/clips/a.wav".to_string(),
        error: "boom".to_string(),
    }];

    let summary = BatchSummary::from_entries(&entries);

    assert_eq!(summary.errored, 1);
    assert_eq!(summary.mean_word_level_similarity, None);
    assert_eq!(summary.pass_rate(), 0.0);
}

#[test]
fn given_empty_batch_when_summarizing_then_everything_is_zero() {
    let summary = BatchSummary::from_entries(&[]);

    assert_eq!(summary, BatchSummary::default());
    assert_eq!(summary.pass_rate(), 0.0);
}
