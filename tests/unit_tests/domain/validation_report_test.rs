use std::path::PathBuf;

use voxgate::application::services::SimilarityEngine;
use voxgate::domain::{
    BatchEntry, QualityAssessment, TranscriptionBackend, ValidationLevel, ValidationReport,
    ValidationResult, ValidationVerdict,
};

fn result_for(expected: &str, transcribed: &str) -> ValidationResult {
    let metrics = SimilarityEngine::lexical().compare_lexical(expected, transcribed);
    let verdict = ValidationVerdict::from_metrics(&metrics);
    ValidationResult {
        audio_path: PathBuf::from("/clips/a.wav"),
        language: Some("en".to_string()),
        backend: TranscriptionBackend::Local,
        model_size: Some("base".to_string()),
        expected_text: expected.to_string(),
        transcribed_text: transcribed.to_string(),
        confidence: Some(0.9),
        metrics,
        quality: Some(QualityAssessment::from_scores(0.4, 0.1)),
        verdict,
    }
}

#[test]
fn given_result_when_serializing_report_then_block_field_names_are_stable() {
    let report = ValidationReport::from(result_for("hello world", "hello world"));

    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["audio_path"], "/clips/a.wav");
    assert_eq!(json["backend"], "local");
    assert_eq!(json["model_size"], "base");
    assert_eq!(json["basic_similarity"]["similarity_ratio"], 1.0);
    assert_eq!(json["basic_similarity"]["words_matched"], 2);
    assert!(json["comprehensive_similarity"].get("rouge_l_f").is_some());
    assert!(json["comprehensive_similarity"].get("overall_similarity").is_some());
    assert_eq!(json["enhanced_validation"]["validation_level"], "EXCELLENT");
    assert_eq!(json["enhanced_validation"]["validation_passed"], true);
    assert!(json["quality"].get("quality_confidence").is_some());
}

#[test]
fn given_completed_and_failed_entries_when_serializing_then_tagged_by_status() {
    let entries = vec![
        BatchEntry::Completed(ValidationReport::from(result_for("hi there", "hi there"))),
        BatchEntry::Failed {
            audio_path: "/clips/b.wav".to_string(),
            error: "audio file not found: /clips/b.wav".to_string(),
        },
    ];

    let json = serde_json::to_value(&entries).unwrap();

    assert_eq!(json[0]["status"], "completed");
    assert_eq!(json[0]["enhanced_validation"]["validation_level"], "EXCELLENT");
    assert_eq!(json[1]["status"], "failed");
    assert_eq!(json[1]["audio_path"], "/clips/b.wav");
}

#[test]
fn given_serialized_report_when_deserializing_then_round_trips() {
    let report = ValidationReport::from(result_for("one two three", "one too three"));

    let json = serde_json::to_string(&report).unwrap();
    let parsed: ValidationReport = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed, report);
}

#[test]
fn given_needs_review_result_when_reporting_then_recommendations_quote_observed_scores() {
    let report = ValidationReport::from(result_for("the quick brown fox", "completely different"));

    let validation = &report.enhanced_validation;

    assert_eq!(validation.validation_level, ValidationLevel::NeedsReview);
    assert!(!validation.validation_passed);
    assert!(validation.recommendations[0].starts_with("Low similarity score:"));
    assert!(validation.recommendations[1].starts_with("High word error rate:"));
    assert_eq!(
        validation.recommendations.last().map(String::as_str),
        Some("Manual review recommended")
    );
}
